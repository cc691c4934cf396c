use alloc::vec::Vec;

use crate::error::{DealError, DeckError};
use crate::hand::{Hand, HandStatus};

use super::{Game, GameState};

impl Game {
    /// Updates standing bets and clamps every bet to its owner's bankroll.
    ///
    /// All requests are validated before any bet changes. A player whose
    /// standing bet would be zero (a zero request or a zero table default)
    /// fails with [`DealError::ZeroBet`].
    fn lock_bets(&self, players: &[u8], requests: &[(u8, usize)]) -> Result<(), DealError> {
        for &(player_id, _) in requests {
            if !players.contains(&player_id) {
                return Err(DealError::PlayerNotFound);
            }
        }

        let money = self.money.lock();
        let mut bets = self.bets.lock();

        let mut locked = Vec::with_capacity(players.len());
        for &player_id in players {
            let requested = requests
                .iter()
                .rev()
                .find(|(id, _)| *id == player_id)
                .map(|&(_, amount)| amount)
                .or_else(|| bets.get(&player_id).copied())
                .unwrap_or(self.options.default_bet);
            if requested == 0 {
                return Err(DealError::ZeroBet);
            }

            let bankroll = money.get(&player_id).copied().unwrap_or(0);
            let bet = requested.min(bankroll);
            if bet < requested {
                log::debug!("player {player_id} bet {requested} clamped to bankroll {bankroll}");
            }
            locked.push((player_id, bet));
        }

        bets.extend(locked);
        Ok(())
    }

    /// Reshuffles the deck, locks in bets and deals a new round.
    ///
    /// `bets` lists `(player_id, amount)` pairs for players changing their
    /// standing bet; everyone else keeps the bet from the previous round.
    /// Each bet is then clamped to the player's bankroll.
    ///
    /// Returns the state the round landed in: [`GameState::Settlement`] when
    /// the natural check ends the round at once, [`GameState::PlayerTurns`]
    /// otherwise.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is already in progress, nobody is seated,
    /// a bet names an unknown player or is zero, or the deck runs out.
    pub fn start_round(&self, bets: &[(u8, usize)]) -> Result<GameState, DealError> {
        if *self.state.lock() != GameState::AwaitingDeal {
            return Err(DealError::InvalidState);
        }

        self.reshuffle();
        self.deal(bets)
    }

    /// Locks in bets and deals from the deck as it currently stands.
    ///
    /// This is [`Game::start_round`] without the reshuffle, for drivers that
    /// stage the deck themselves.
    ///
    /// # Errors
    ///
    /// Same as [`Game::start_round`].
    pub fn deal(&self, bets: &[(u8, usize)]) -> Result<GameState, DealError> {
        let mut state = self.state.lock();
        if *state != GameState::AwaitingDeal {
            return Err(DealError::InvalidState);
        }

        let players = self.players.lock().clone();
        if players.is_empty() {
            return Err(DealError::NoPlayers);
        }

        let cards_needed = (players.len() + 1) * 2;
        if self.cards_remaining() < cards_needed {
            return Err(DeckError::Empty.into());
        }

        self.lock_bets(&players, bets)?;

        // Hands from the previous round are discarded here.
        let mut hands = self.hands.lock();
        hands.clear();
        for &player_id in &players {
            hands.insert(player_id, Hand::new());
        }
        drop(hands);

        let mut dealer = self.dealer_hand.lock();
        dealer.clear();
        for _ in 0..2 {
            dealer.add_card(self.draw()?);
        }
        drop(dealer);

        for &player_id in &players {
            for _ in 0..2 {
                let card = self.draw()?;
                if let Some(hand) = self.hands.lock().get_mut(&player_id) {
                    hand.add_card(card);
                }
            }
        }

        log::info!("dealt a round to {} player(s)", players.len());

        let next = self.natural_check(&players);
        *state = next;
        drop(state);

        Ok(next)
    }

    /// Ends the round on the spot if the dealer or every player has a
    /// natural; otherwise hands the turn to the first player who can act.
    fn natural_check(&self, players: &[u8]) -> GameState {
        let dealer_blackjack = self.dealer_hand.lock().is_blackjack();

        let naturals: Vec<u8> = {
            let hands = self.hands.lock();
            players
                .iter()
                .filter(|id| {
                    hands
                        .get(id)
                        .is_some_and(|hand| hand.status() == HandStatus::Blackjack)
                })
                .copied()
                .collect()
        };
        for player_id in &naturals {
            log::info!("player {player_id} was dealt a natural");
        }

        if dealer_blackjack || naturals.len() == players.len() {
            if dealer_blackjack {
                log::info!("dealer was dealt a natural");
            }
            self.dealer_hand.lock().reveal_hole();
            return GameState::Settlement;
        }

        if self.seek_active_player(0) {
            GameState::PlayerTurns
        } else {
            GameState::DealerTurn
        }
    }
}
