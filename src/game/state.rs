//! Game state types.

/// Where the table is in the round cycle.
///
/// A round moves `AwaitingDeal → PlayerTurns → DealerTurn → Settlement` and
/// back to `AwaitingDeal`. The natural check runs inside the deal and can
/// jump straight to `Settlement`, or to `DealerTurn` when nobody is left to
/// act.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum GameState {
    /// Between rounds: players may join or leave and the next deal may start.
    AwaitingDeal,
    /// Waiting for hit/stand decisions.
    PlayerTurns,
    /// Dealer plays out their hand.
    DealerTurn,
    /// Hands are final and bets can be settled.
    Settlement,
    /// Every player went broke; the session is over.
    GameOver,
}
