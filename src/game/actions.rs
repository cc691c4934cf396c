use crate::card::Card;
use crate::error::ActionError;
use crate::hand::HandStatus;

use super::{Decision, Game, GameState};

impl Game {
    fn ensure_player_turn(&self, player_id: u8) -> Result<(), ActionError> {
        if *self.state.lock() != GameState::PlayerTurns {
            return Err(ActionError::InvalidState);
        }

        if !self.players.lock().contains(&player_id) {
            return Err(ActionError::PlayerNotFound);
        }

        if !self.is_player_turn(player_id) {
            return Err(ActionError::NotYourTurn);
        }

        Ok(())
    }

    fn advance_after_hand(&self) {
        let next = *self.current_turn.lock() + 1;
        if !self.seek_active_player(next) {
            *self.state.lock() = GameState::DealerTurn;
        }
    }

    /// Applies a hit or stand decision for the player whose turn it is.
    ///
    /// Returns the card drawn on a hit.
    ///
    /// # Errors
    ///
    /// Same as [`Game::hit`] and [`Game::stand`].
    pub fn record_decision(
        &self,
        player_id: u8,
        decision: Decision,
    ) -> Result<Option<Card>, ActionError> {
        match decision {
            Decision::Hit => self.hit(player_id).map(Some),
            Decision::Stand => self.stand(player_id).map(|()| None),
        }
    }

    /// Player action: Hit (draw a card).
    ///
    /// A hit that busts the hand or brings it to 21 ends the player's turn.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in player turn state, it is not the
    /// player's turn, the player cannot be found, the hand is not active, or
    /// the deck is empty.
    pub fn hit(&self, player_id: u8) -> Result<Card, ActionError> {
        self.ensure_player_turn(player_id)?;

        let status = self
            .hands
            .lock()
            .get(&player_id)
            .ok_or(ActionError::PlayerNotFound)?
            .status();
        if status != HandStatus::Active {
            return Err(ActionError::HandNotActive);
        }

        let card = self.draw()?;

        let mut hands = self.hands.lock();
        let hand = hands
            .get_mut(&player_id)
            .ok_or(ActionError::PlayerNotFound)?;
        hand.add_card(card);
        let status = hand.status();
        let value = hand.value();
        drop(hands);

        log::debug!("player {player_id} hits {card} for {value}");

        if status != HandStatus::Active {
            log::debug!("player {player_id} finishes on {value} ({status:?})");
            self.advance_after_hand();
        }

        Ok(card)
    }

    /// Player action: Stand (keep current hand).
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in player turn state, it is not the
    /// player's turn, the player cannot be found, or the hand is not active.
    pub fn stand(&self, player_id: u8) -> Result<(), ActionError> {
        self.ensure_player_turn(player_id)?;

        let mut hands = self.hands.lock();
        let hand = hands
            .get_mut(&player_id)
            .ok_or(ActionError::PlayerNotFound)?;

        if hand.status() != HandStatus::Active {
            return Err(ActionError::HandNotActive);
        }

        hand.stand();
        let value = hand.value();
        drop(hands);

        log::debug!("player {player_id} stands on {value}");
        self.advance_after_hand();

        Ok(())
    }

    /// Checks if it's the specified player's turn.
    fn is_player_turn(&self, player_id: u8) -> bool {
        let turn = *self.current_turn.lock();
        self.players.lock().get(turn) == Some(&player_id)
    }

    /// Moves the turn to the first player at or after `from` whose hand is
    /// still active. Returns `false` when nobody is left to act.
    pub(super) fn seek_active_player(&self, from: usize) -> bool {
        let mut turn = self.current_turn.lock();
        let players = self.players.lock();
        let hands = self.hands.lock();

        let next = players.iter().enumerate().skip(from).find(|(_, id)| {
            hands
                .get(id)
                .is_some_and(|hand| hand.status() == HandStatus::Active)
        });

        match next {
            Some((index, _)) => {
                *turn = index;
                true
            }
            None => {
                *turn = players.len();
                false
            }
        }
    }
}
