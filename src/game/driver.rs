//! Request/response seam between the round engine and whoever supplies
//! player decisions.

use crate::card::Card;
use crate::error::RoundError;
use crate::hand::Hand;
use crate::result::RoundResult;

use super::{Game, GameState};

/// A player's choice on their turn.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Decision {
    /// Take another card.
    Hit,
    /// Keep the current hand.
    Stand,
}

/// Everything a player may look at before deciding.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DecisionRequest {
    /// Who must decide.
    pub player_id: u8,
    /// The dealer's face-up card.
    pub dealer_up_card: Option<Card>,
    /// The player's hand.
    pub hand: Hand,
}

/// Supplies hit/stand decisions to [`Game::play_round`].
///
/// Implemented for any `FnMut(&DecisionRequest) -> Decision`, which is
/// handy for scripted drivers.
pub trait Decider {
    /// Chooses what the requesting player does next.
    fn decide(&mut self, request: &DecisionRequest) -> Decision;
}

impl<F> Decider for F
where
    F: FnMut(&DecisionRequest) -> Decision,
{
    fn decide(&mut self, request: &DecisionRequest) -> Decision {
        self(request)
    }
}

impl Game {
    /// Returns the pending decision, if any.
    ///
    /// `None` means no player can act right now: the round is not in
    /// [`GameState::PlayerTurns`].
    pub fn offer_decision(&self) -> Option<DecisionRequest> {
        let player_id = self.current_player()?;
        let hand = self.get_hand(player_id)?;
        let dealer_up_card = self.dealer_hand.lock().up_card().copied();

        Some(DecisionRequest {
            player_id,
            dealer_up_card,
            hand,
        })
    }

    /// Plays a full round: deal, every pending decision, the dealer's turn
    /// and settlement.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by any step.
    pub fn play_round<D: Decider + ?Sized>(
        &self,
        bets: &[(u8, usize)],
        decider: &mut D,
    ) -> Result<RoundResult, RoundError> {
        self.start_round(bets)?;

        while let Some(request) = self.offer_decision() {
            let decision = decider.decide(&request);
            self.record_decision(request.player_id, decision)?;
        }

        if self.state() == GameState::DealerTurn {
            self.advance_dealer()?;
        }

        self.settle().map_err(RoundError::from)
    }
}
