//! Error types for game operations.

use thiserror::Error;

/// Errors raised by the deck.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DeckError {
    /// No cards left to draw.
    #[error("no cards left in the deck")]
    Empty,
}

/// Errors that can occur when a player joins or leaves the table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum SeatError {
    /// Players can only join or leave between rounds.
    #[error("invalid game state for seating")]
    InvalidState,
    /// Player not found.
    #[error("player not found")]
    PlayerNotFound,
    /// Every seat is taken.
    #[error("the table is full")]
    TableFull,
    /// A player must bring some money to the table.
    #[error("bankroll is zero")]
    ZeroBankroll,
}

/// Errors that can occur while locking bets and dealing a round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum DealError {
    /// Invalid game state for dealing.
    #[error("invalid game state for dealing")]
    InvalidState,
    /// Nobody is seated.
    #[error("no players at the table")]
    NoPlayers,
    /// A bet was given for an unknown player.
    #[error("player not found")]
    PlayerNotFound,
    /// Bet amount is zero.
    #[error("bet amount is zero")]
    ZeroBet,
    /// The deck ran out mid-deal.
    #[error(transparent)]
    Deck(#[from] DeckError),
}

/// Errors that can occur during player decisions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ActionError {
    /// Invalid game state for this action.
    #[error("invalid game state for this action")]
    InvalidState,
    /// Not this player's turn.
    #[error("not this player's turn")]
    NotYourTurn,
    /// Player not found.
    #[error("player not found")]
    PlayerNotFound,
    /// Hand is not active.
    #[error("hand is not active")]
    HandNotActive,
    /// The deck ran out while hitting.
    #[error(transparent)]
    Deck(#[from] DeckError),
}

/// Errors that can occur during the dealer's turn and settlement.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ShowdownError {
    /// Invalid game state for this step.
    #[error("invalid game state for showdown")]
    InvalidState,
    /// The deck ran out while the dealer had to draw.
    #[error(transparent)]
    Deck(#[from] DeckError),
}

/// Errors that can occur while [`Game::play_round`](crate::Game::play_round)
/// drives a whole round.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum RoundError {
    /// Dealing failed.
    #[error("deal failed: {0}")]
    Deal(#[from] DealError),
    /// A player decision was rejected.
    #[error("decision rejected: {0}")]
    Action(#[from] ActionError),
    /// Dealer play or settlement failed.
    #[error("showdown failed: {0}")]
    Showdown(#[from] ShowdownError),
}
