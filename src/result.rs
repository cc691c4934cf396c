//! Round result types for settlement.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::hand::Score;

/// Result of a single hand after settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandOutcome {
    /// Player wins even money.
    Win,
    /// Player loses the bet.
    Lose,
    /// Push (tie).
    Push,
    /// Player's natural is paid the premium.
    Blackjack,
}

impl HandOutcome {
    /// Resolves a player's hand against the dealer's.
    ///
    /// A dealer natural is checked first, then a dealer bust, then a plain
    /// comparison. Only a two-card 21 earns [`HandOutcome::Blackjack`]; a
    /// 21 made by hitting is compared like any other total.
    #[must_use]
    pub const fn resolve(dealer: &Score, player: &Score) -> Self {
        if dealer.is_blackjack() {
            if player.is_blackjack() {
                Self::Push
            } else {
                Self::Lose
            }
        } else if dealer.is_bust() {
            if player.is_bust() {
                Self::Lose
            } else if player.is_blackjack() {
                Self::Blackjack
            } else {
                Self::Win
            }
        } else if player.is_blackjack() {
            Self::Blackjack
        } else if player.is_bust() || player.total < dealer.total {
            Self::Lose
        } else if player.total > dealer.total {
            Self::Win
        } else {
            Self::Push
        }
    }
}

/// Result for a single player after settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerResult {
    /// The player ID.
    pub player_id: u8,
    /// The player's name.
    pub name: String,
    /// The outcome of the hand.
    pub outcome: HandOutcome,
    /// The bet that was settled.
    pub bet: usize,
    /// The player's hand value.
    pub player_value: u16,
    /// Net result (positive = profit, negative = loss).
    pub net: isize,
    /// Bankroll after settlement.
    pub money: usize,
}

/// Result of the entire round after settlement.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoundResult {
    /// Results for each player, in seating order.
    pub players: Vec<PlayerResult>,
    /// The dealer's final hand value.
    pub dealer_value: u16,
    /// Whether the dealer busted.
    pub dealer_bust: bool,
    /// Whether the dealer had blackjack.
    pub dealer_blackjack: bool,
    /// Players removed from the table because their bankroll hit zero.
    pub eliminated: Vec<PlayerResult>,
    /// Whether the table is now empty.
    pub game_over: bool,
}
