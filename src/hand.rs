//! Hand scoring plus player and dealer hand representations.

extern crate alloc;

use alloc::vec::Vec;

use crate::card::Card;

/// Totals at or above this make the dealer stand.
pub const DEALER_STANDS_ON: u16 = 17;

/// The best reading of a set of cards.
///
/// Produced by [`score`]; every flag is derived from `total`, `soft_aces`
/// and the card count, so a `Score` never goes stale as long as it is
/// recomputed after each card.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct Score {
    /// Best total, at most 21 whenever the aces allow it.
    pub total: u16,
    /// Aces still counted as 11.
    pub soft_aces: u8,
    /// Number of cards scored.
    pub card_count: usize,
}

impl Score {
    /// Over 21 with no ace left to lower.
    #[must_use]
    pub const fn is_bust(&self) -> bool {
        self.total > 21
    }

    /// Exactly 21, from any number of cards.
    #[must_use]
    pub const fn is_twenty_one(&self) -> bool {
        self.total == 21
    }

    /// 21 from the first two cards.
    #[must_use]
    pub const fn is_blackjack(&self) -> bool {
        self.card_count == 2 && self.total == 21
    }

    /// At least one ace is still counted as 11.
    #[must_use]
    pub const fn is_soft(&self) -> bool {
        self.soft_aces > 0
    }
}

/// Scores a sequence of cards.
///
/// Every ace starts at 11 and is lowered to 1, one at a time, while the
/// total is over 21. The result depends only on the ranks present, never on
/// their order.
#[must_use]
pub fn score(cards: &[Card]) -> Score {
    let mut total: u16 = 0;
    let mut soft_aces: u8 = 0;

    for card in cards {
        if card.rank.is_ace() {
            soft_aces += 1;
        }
        total += u16::from(card.value());
    }

    while total > 21 && soft_aces > 0 {
        total -= 10;
        soft_aces -= 1;
    }

    Score {
        total,
        soft_aces,
        card_count: cards.len(),
    }
}

/// Hand status.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum HandStatus {
    /// Hand is waiting for the player's decision.
    Active,
    /// Player has stood.
    Stood,
    /// Hand reached 21 after a hit and stands automatically.
    TwentyOne,
    /// Hand has busted (over 21).
    Bust,
    /// Hand is a blackjack (natural 21).
    Blackjack,
}

/// A player's hand.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Hand {
    /// Cards in the hand.
    cards: Vec<Card>,
    /// Current status of the hand.
    status: HandStatus,
}

impl Hand {
    /// Creates a new empty hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            status: HandStatus::Active,
        }
    }

    /// Adds a card to the hand and re-scores it.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);

        let score = score(&self.cards);
        if score.is_bust() {
            self.status = HandStatus::Bust;
        } else if score.is_blackjack() {
            self.status = HandStatus::Blackjack;
        } else if score.is_twenty_one() {
            self.status = HandStatus::TwentyOne;
        }
    }

    /// Marks an active hand as stood. Finished hands are left alone.
    pub fn stand(&mut self) {
        if self.status == HandStatus::Active {
            self.status = HandStatus::Stood;
        }
    }

    /// Returns the cards in the hand.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the current status of the hand.
    #[must_use]
    pub const fn status(&self) -> HandStatus {
        self.status
    }

    /// Returns the full score of the hand.
    #[must_use]
    pub fn score(&self) -> Score {
        score(&self.cards)
    }

    /// Calculates the value of the hand.
    ///
    /// Aces are counted as 11 if possible without busting, otherwise as 1.
    #[must_use]
    pub fn value(&self) -> u16 {
        self.score().total
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        self.score().is_soft()
    }

    /// Returns whether the hand is a natural.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.score().is_blackjack()
    }

    /// Returns whether the hand is bust.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.score().is_bust()
    }

    /// Returns whether the hand totals exactly 21.
    #[must_use]
    pub fn is_twenty_one(&self) -> bool {
        self.score().is_twenty_one()
    }

    /// Returns the number of cards in the hand.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}

impl Default for Hand {
    fn default() -> Self {
        Self::new()
    }
}

/// The dealer's hand.
///
/// The first card dealt to the dealer is the hole card and stays face down
/// until [`DealerHand::reveal_hole`]; the second is the up card.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DealerHand {
    /// Cards in the hand.
    cards: Vec<Card>,
    /// Whether the hole card is revealed.
    hole_revealed: bool,
}

impl DealerHand {
    /// Creates a new empty dealer hand.
    #[must_use]
    pub const fn new() -> Self {
        Self {
            cards: Vec::new(),
            hole_revealed: false,
        }
    }

    /// Adds a card to the hand.
    pub fn add_card(&mut self, card: Card) {
        self.cards.push(card);
    }

    /// Returns all cards in the hand, including a face-down hole card.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the face-down card (first card).
    #[must_use]
    pub fn hole_card(&self) -> Option<&Card> {
        self.cards.first()
    }

    /// Returns the visible card (second card).
    #[must_use]
    pub fn up_card(&self) -> Option<&Card> {
        self.cards.get(1)
    }

    /// Returns whether the hole card is revealed.
    #[must_use]
    pub const fn is_hole_revealed(&self) -> bool {
        self.hole_revealed
    }

    /// Reveals the hole card.
    pub const fn reveal_hole(&mut self) {
        self.hole_revealed = true;
    }

    /// Calculates the visible value (only up card if hole not revealed).
    #[must_use]
    pub fn visible_value(&self) -> u16 {
        if self.hole_revealed {
            self.value()
        } else {
            self.up_card().map_or(0, |c| u16::from(c.value()))
        }
    }

    /// Returns the full score of the hand.
    #[must_use]
    pub fn score(&self) -> Score {
        score(&self.cards)
    }

    /// Calculates the full value of the hand.
    #[must_use]
    pub fn value(&self) -> u16 {
        self.score().total
    }

    /// Returns whether the hand is a blackjack.
    #[must_use]
    pub fn is_blackjack(&self) -> bool {
        self.score().is_blackjack()
    }

    /// Returns whether the hand is bust.
    #[must_use]
    pub fn is_bust(&self) -> bool {
        self.score().is_bust()
    }

    /// Returns whether the hand is soft (contains an ace counted as 11).
    #[must_use]
    pub fn is_soft(&self) -> bool {
        self.score().is_soft()
    }

    /// Returns whether the fixed policy makes the dealer draw again.
    #[must_use]
    pub fn must_hit(&self) -> bool {
        let score = self.score();
        !score.is_bust() && score.total < DEALER_STANDS_ON
    }

    /// Returns the number of cards.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the hand is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }

    /// Clears the hand for a new round.
    pub fn clear(&mut self) {
        self.cards.clear();
        self.hole_revealed = false;
    }
}

impl Default for DealerHand {
    fn default() -> Self {
        Self::new()
    }
}
