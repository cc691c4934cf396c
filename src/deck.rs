//! The 52-card deck.

extern crate alloc;

use alloc::vec::Vec;

use rand::Rng;
use rand::seq::SliceRandom;

use crate::card::{Card, DECK_SIZE, Rank, Suit};
use crate::error::DeckError;

/// A single 52-card deck.
///
/// Cards are drawn from the end of the sequence. A fresh deck is empty until
/// [`Deck::shuffle`] fills it.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Deck {
    cards: Vec<Card>,
}

impl Deck {
    /// Creates an empty deck.
    #[must_use]
    pub const fn new() -> Self {
        Self { cards: Vec::new() }
    }

    /// Creates a deck whose draws come out in the given order.
    ///
    /// The first element of `draws` is the first card dealt. The deck is not
    /// checked for completeness, which makes this useful for staging a round.
    #[must_use]
    pub fn from_draw_order(draws: &[Card]) -> Self {
        let mut cards = draws.to_vec();
        cards.reverse();
        Self { cards }
    }

    /// Restores all 52 cards and permutes them uniformly at random.
    pub fn shuffle<R: Rng + ?Sized>(&mut self, rng: &mut R) {
        self.cards.clear();
        self.cards.reserve(DECK_SIZE);

        for rank in Rank::ALL {
            for suit in Suit::ALL {
                self.cards.push(Card::new(rank, suit));
            }
        }
        debug_assert_eq!(self.cards.len(), DECK_SIZE);

        self.cards.shuffle(rng);
    }

    /// Removes and returns the top card.
    ///
    /// # Errors
    ///
    /// Returns [`DeckError::Empty`] if no cards remain.
    pub fn draw(&mut self) -> Result<Card, DeckError> {
        self.cards.pop().ok_or(DeckError::Empty)
    }

    /// Returns the cards still in the deck, bottom first.
    #[must_use]
    pub fn cards(&self) -> &[Card] {
        &self.cards
    }

    /// Returns the number of cards remaining.
    #[must_use]
    pub fn len(&self) -> usize {
        self.cards.len()
    }

    /// Returns whether the deck has run out.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.cards.is_empty()
    }
}
