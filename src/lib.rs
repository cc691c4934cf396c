//! A multi-player blackjack table with optional `no_std` support.
//!
//! The crate provides a [`Game`] type that runs the full round cycle for up
//! to six players against a fixed-policy dealer: dealing, the natural check,
//! player decisions, dealer play and settlement.
//!
//! # Example
//!
//! ```no_run
//! use bjtable::{Decision, Game, GameOptions};
//!
//! let game = Game::new(GameOptions::default(), 42);
//! let alice = game.join("Alice", 1000).unwrap();
//!
//! let mut stand_on_17 = |request: &bjtable::DecisionRequest| {
//!     if request.hand.value() < 17 { Decision::Hit } else { Decision::Stand }
//! };
//! let result = game.play_round(&[(alice, 50)], &mut stand_on_17).unwrap();
//! println!("{:?}", result.players[0].outcome);
//! ```
#![cfg_attr(not(feature = "std"), no_std)]
#![cfg_attr(docsrs, feature(doc_cfg))]

#[cfg(all(not(feature = "std"), not(feature = "alloc")))]
compile_error!(
    "`std` is disabled but `alloc` feature is not enabled. Enable `alloc` or keep `std` enabled."
);

extern crate alloc;

pub mod card;
pub mod deck;
pub mod error;
pub mod game;
pub mod hand;
pub mod options;
pub mod result;
mod sync;
pub mod view;

// Re-export main types
pub use card::{Card, DECK_SIZE, Rank, Suit};
pub use deck::Deck;
pub use error::{ActionError, DealError, DeckError, RoundError, SeatError, ShowdownError};
pub use game::{Decider, Decision, DecisionRequest, Game, GameState};
pub use hand::{DEALER_STANDS_ON, DealerHand, Hand, HandStatus, Score, score};
pub use options::{GameOptions, RoundingMode};
pub use result::{HandOutcome, PlayerResult, RoundResult};
pub use view::{DealerView, PlayerView};
