//! Read-only snapshots of the table for rendering.

extern crate alloc;

use alloc::string::String;
use alloc::vec::Vec;

use crate::card::Card;
use crate::hand::{DealerHand, Hand};

/// What a seated player looks like from the rail.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerView {
    /// The player ID.
    pub id: u8,
    /// Display name.
    pub name: String,
    /// Current bankroll.
    pub money: usize,
    /// Standing bet (locked for the round once dealt).
    pub bet: usize,
    /// Current hand; empty before the first deal.
    pub hand: Hand,
}

/// The dealer's hand with the hole card withheld until it is revealed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealerView {
    /// Cards in deal order; `None` marks the face-down hole card.
    pub cards: Vec<Option<Card>>,
    /// Value of the face-up cards only.
    pub visible_value: u16,
    /// Whether the hole card has been turned over.
    pub hole_revealed: bool,
    /// Whether the revealed hand is a natural. Always `false` while the hole
    /// card is down.
    pub is_blackjack: bool,
    /// Whether the revealed hand is bust.
    pub is_bust: bool,
}

impl From<&DealerHand> for DealerView {
    fn from(dealer: &DealerHand) -> Self {
        let hole_revealed = dealer.is_hole_revealed();
        let cards = dealer
            .cards()
            .iter()
            .enumerate()
            .map(|(index, card)| (hole_revealed || index != 0).then_some(*card))
            .collect();

        Self {
            cards,
            visible_value: dealer.visible_value(),
            hole_revealed,
            is_blackjack: hole_revealed && dealer.is_blackjack(),
            is_bust: hole_revealed && dealer.is_bust(),
        }
    }
}
