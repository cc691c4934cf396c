//! Table configuration options.

/// Rounding mode for the blackjack premium.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum RoundingMode {
    /// Round up.
    Up,
    /// Round down.
    Down,
    /// Round to nearest.
    Nearest,
}

/// Configuration options for a blackjack table.
///
/// Use the builder pattern to customize options:
///
/// ```
/// use bjtable::GameOptions;
///
/// let options = GameOptions::default()
///     .with_max_players(4)
///     .with_starting_bankroll(500)
///     .with_default_bet(25);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct GameOptions {
    /// Maximum number of seated players.
    pub max_players: u8,
    /// Bankroll front ends give each new player.
    pub starting_bankroll: usize,
    /// Bet a player carries until they change it.
    pub default_bet: usize,
    /// Blackjack payout ratio (typically 1.5).
    pub blackjack_pays: f64,
    /// Rounding mode for blackjack payouts.
    pub rounding_blackjack: RoundingMode,
}

impl Default for GameOptions {
    fn default() -> Self {
        Self {
            max_players: 6,
            starting_bankroll: 1000,
            default_bet: 50,
            blackjack_pays: 1.5,
            rounding_blackjack: RoundingMode::Down,
        }
    }
}

impl GameOptions {
    /// Sets the maximum number of seated players.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_max_players(2);
    /// assert_eq!(options.max_players, 2);
    /// ```
    #[must_use]
    pub const fn with_max_players(mut self, max_players: u8) -> Self {
        self.max_players = max_players;
        self
    }

    /// Sets the starting bankroll.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_starting_bankroll(250);
    /// assert_eq!(options.starting_bankroll, 250);
    /// ```
    #[must_use]
    pub const fn with_starting_bankroll(mut self, bankroll: usize) -> Self {
        self.starting_bankroll = bankroll;
        self
    }

    /// Sets the default standing bet.
    ///
    /// A zero default makes the next deal fail with
    /// [`DealError::ZeroBet`](crate::DealError::ZeroBet) for any player who
    /// has not placed a bet of their own.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_default_bet(10);
    /// assert_eq!(options.default_bet, 10);
    /// ```
    #[must_use]
    pub const fn with_default_bet(mut self, bet: usize) -> Self {
        self.default_bet = bet;
        self
    }

    /// Sets the blackjack payout ratio.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::GameOptions;
    ///
    /// let options = GameOptions::default().with_blackjack_pays(1.2);
    /// assert_eq!(options.blackjack_pays, 1.2);
    /// ```
    #[must_use]
    pub const fn with_blackjack_pays(mut self, ratio: f64) -> Self {
        self.blackjack_pays = ratio;
        self
    }

    /// Sets the rounding mode for blackjack payouts.
    ///
    /// # Example
    ///
    /// ```
    /// use bjtable::{GameOptions, RoundingMode};
    ///
    /// let options = GameOptions::default().with_rounding_blackjack(RoundingMode::Up);
    /// assert_eq!(options.rounding_blackjack, RoundingMode::Up);
    /// ```
    #[must_use]
    pub const fn with_rounding_blackjack(mut self, mode: RoundingMode) -> Self {
        self.rounding_blackjack = mode;
        self
    }
}
