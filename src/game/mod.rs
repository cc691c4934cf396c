//! Round engine and table state.

use core::sync::atomic::{AtomicU8, Ordering};

use alloc::string::String;
use alloc::vec::Vec;
#[cfg(all(not(feature = "std"), feature = "alloc"))]
use hashbrown::HashMap;
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;
#[cfg(feature = "std")]
use std::collections::HashMap;

use crate::sync::Mutex;

use crate::card::Card;
use crate::deck::Deck;
use crate::error::{DeckError, SeatError};
use crate::hand::{DealerHand, Hand};
use crate::options::GameOptions;
use crate::view::{DealerView, PlayerView};

mod actions;
mod deal;
mod dealer;
mod driver;
pub mod state;

pub use driver::{Decider, Decision, DecisionRequest};
pub use state::GameState;

/// A blackjack table that seats players, deals rounds and settles bets.
///
/// The game owns the deck, every player's bankroll and hand, and the
/// dealer. A round is driven step by step:
///
/// 1. [`Game::start_round`] locks bets and deals,
/// 2. [`Game::offer_decision`] / [`Game::record_decision`] until no decision
///    is pending,
/// 3. [`Game::advance_dealer`] while in [`GameState::DealerTurn`],
/// 4. [`Game::settle`] to pay out and clear bankrupt players.
///
/// [`Game::play_round`] runs all four steps against a [`Decider`].
pub struct Game {
    /// The deck. Exposed so a round can be staged with
    /// [`Deck::from_draw_order`] before calling [`Game::deal`].
    pub deck: Mutex<Deck>,
    /// Table options.
    pub options: GameOptions,
    /// Current game state.
    state: Mutex<GameState>,
    /// Next player ID to assign.
    next_id: AtomicU8,
    /// Seated player IDs in seating order.
    players: Mutex<Vec<u8>>,
    /// Player names (`player_id` -> name).
    names: Mutex<HashMap<u8, String>>,
    /// Player money (`player_id` -> money amount).
    money: Mutex<HashMap<u8, usize>>,
    /// Standing bets (`player_id` -> bet amount).
    bets: Mutex<HashMap<u8, usize>>,
    /// Player hands for the current round.
    hands: Mutex<HashMap<u8, Hand>>,
    /// Dealer's hand.
    dealer_hand: Mutex<DealerHand>,
    /// Index into `players` of whoever must decide next.
    current_turn: Mutex<usize>,
    /// Random number generator.
    rng: Mutex<ChaCha8Rng>,
}

impl Game {
    /// Creates a new game with the given seed.
    ///
    /// # Example
    ///
    /// ```no_run
    /// use bjtable::{Game, GameOptions};
    ///
    /// let options = GameOptions::default();
    /// let game = Game::new(options, 42);
    /// let _ = game;
    /// ```
    #[must_use]
    pub fn new(options: GameOptions, seed: u64) -> Self {
        let mut rng = ChaCha8Rng::seed_from_u64(seed);
        let mut deck = Deck::new();
        deck.shuffle(&mut rng);

        Self {
            deck: Mutex::new(deck),
            options,
            state: Mutex::new(GameState::AwaitingDeal),
            next_id: AtomicU8::new(0),
            players: Mutex::new(Vec::new()),
            names: Mutex::new(HashMap::new()),
            money: Mutex::new(HashMap::new()),
            bets: Mutex::new(HashMap::new()),
            hands: Mutex::new(HashMap::new()),
            dealer_hand: Mutex::new(DealerHand::new()),
            current_turn: Mutex::new(0),
            rng: Mutex::new(rng),
        }
    }

    /// Restores and reshuffles all 52 cards.
    fn reshuffle(&self) {
        let mut deck = self.deck.lock();
        let mut rng = self.rng.lock();
        deck.shuffle(&mut *rng);
    }

    /// Draws a card from the deck.
    fn draw(&self) -> Result<Card, DeckError> {
        let card = self.deck.lock().draw()?;
        log::trace!("drew {card}");
        Ok(card)
    }

    /// Seats a player with the given bankroll.
    ///
    /// Returns the assigned player ID. The player starts with the table's
    /// default standing bet.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is in progress, every seat is taken, or
    /// `money` is zero.
    pub fn join(&self, name: impl Into<String>, money: usize) -> Result<u8, SeatError> {
        if *self.state.lock() != GameState::AwaitingDeal {
            return Err(SeatError::InvalidState);
        }
        if money == 0 {
            return Err(SeatError::ZeroBankroll);
        }

        let mut players = self.players.lock();
        if players.len() >= usize::from(self.options.max_players) {
            return Err(SeatError::TableFull);
        }

        let id = self.next_id.fetch_add(1, Ordering::SeqCst);
        let name = name.into();
        log::info!("player {id} ({name}) joins with {money}");

        players.push(id);
        drop(players);
        self.names.lock().insert(id, name);
        self.money.lock().insert(id, money);
        self.bets.lock().insert(id, self.options.default_bet);
        Ok(id)
    }

    /// Leaves the table between rounds.
    ///
    /// # Errors
    ///
    /// Returns an error if a round is in progress or the player is unknown.
    pub fn leave(&self, player_id: u8) -> Result<(), SeatError> {
        match *self.state.lock() {
            GameState::AwaitingDeal | GameState::GameOver => {}
            _ => return Err(SeatError::InvalidState),
        }
        if !self.players.lock().contains(&player_id) {
            return Err(SeatError::PlayerNotFound);
        }

        self.remove_player(player_id);
        Ok(())
    }

    fn remove_player(&self, player_id: u8) {
        self.players.lock().retain(|&id| id != player_id);
        self.names.lock().remove(&player_id);
        self.money.lock().remove(&player_id);
        self.bets.lock().remove(&player_id);
        self.hands.lock().remove(&player_id);
    }

    /// Returns the number of seated players.
    pub fn player_count(&self) -> usize {
        self.players.lock().len()
    }

    /// Returns the seated player IDs in seating order.
    pub fn players(&self) -> Vec<u8> {
        self.players.lock().clone()
    }

    /// Returns the number of cards remaining in the deck.
    pub fn cards_remaining(&self) -> usize {
        self.deck.lock().len()
    }

    /// Returns the current game state.
    pub fn state(&self) -> GameState {
        *self.state.lock()
    }

    /// Returns the player ID whose decision is pending.
    ///
    /// Returns `None` outside [`GameState::PlayerTurns`].
    pub fn current_player(&self) -> Option<u8> {
        if *self.state.lock() != GameState::PlayerTurns {
            return None;
        }
        let turn = *self.current_turn.lock();
        self.players.lock().get(turn).copied()
    }

    /// Returns the standing bet for the specified player.
    pub fn get_bet(&self, player_id: u8) -> Option<usize> {
        self.bets.lock().get(&player_id).copied()
    }

    /// Returns the current money for the specified player.
    pub fn get_money(&self, player_id: u8) -> Option<usize> {
        self.money.lock().get(&player_id).copied()
    }

    /// Returns the name of the specified player.
    pub fn get_name(&self, player_id: u8) -> Option<String> {
        self.names.lock().get(&player_id).cloned()
    }

    /// Returns a copy of the player's hand.
    pub fn get_hand(&self, player_id: u8) -> Option<Hand> {
        self.hands.lock().get(&player_id).cloned()
    }

    /// Returns what the players can see of the dealer's hand.
    pub fn dealer_view(&self) -> DealerView {
        DealerView::from(&*self.dealer_hand.lock())
    }

    /// Returns a snapshot of every seated player in seating order.
    pub fn player_views(&self) -> Vec<PlayerView> {
        let players = self.players.lock().clone();
        let names = self.names.lock();
        let money = self.money.lock();
        let bets = self.bets.lock();
        let hands = self.hands.lock();

        players
            .into_iter()
            .map(|id| PlayerView {
                id,
                name: names.get(&id).cloned().unwrap_or_default(),
                money: money.get(&id).copied().unwrap_or(0),
                bet: bets.get(&id).copied().unwrap_or(0),
                hand: hands.get(&id).cloned().unwrap_or_default(),
            })
            .collect()
    }
}
