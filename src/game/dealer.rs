use alloc::vec::Vec;

use crate::card::Card;
use crate::error::ShowdownError;
use crate::hand::HandStatus;
use crate::options::RoundingMode;
use crate::result::{HandOutcome, PlayerResult, RoundResult};

use super::{Game, GameState};

#[cfg(feature = "std")]
fn round_amount(amount: f64, mode: RoundingMode) -> usize {
    match mode {
        RoundingMode::Up => amount.ceil() as usize,
        RoundingMode::Down => amount.floor() as usize,
        RoundingMode::Nearest => amount.round() as usize,
    }
}

#[cfg(all(not(feature = "std"), feature = "alloc"))]
fn round_amount(amount: f64, mode: RoundingMode) -> usize {
    match mode {
        RoundingMode::Up => libm::ceil(amount) as usize,
        RoundingMode::Down => libm::floor(amount) as usize,
        RoundingMode::Nearest => libm::round(amount) as usize,
    }
}

impl Game {
    /// Checks whether every player's hand went over 21.
    fn all_players_bust(&self) -> bool {
        self.hands
            .lock()
            .values()
            .all(|hand| hand.status() == HandStatus::Bust)
    }

    /// Dealer plays their hand with the fixed house policy.
    ///
    /// The dealer reveals the hole card and draws while the total is 16 or
    /// less, standing on any 17. When every player has already busted the
    /// dealer draws nothing at all.
    ///
    /// Returns the cards drawn by the dealer.
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in dealer turn state or the deck
    /// is empty while the dealer must draw.
    pub fn advance_dealer(&self) -> Result<Vec<Card>, ShowdownError> {
        if *self.state.lock() != GameState::DealerTurn {
            return Err(ShowdownError::InvalidState);
        }

        self.dealer_hand.lock().reveal_hole();

        let mut drawn_cards = Vec::new();

        if self.all_players_bust() {
            log::debug!("every player busted, dealer stands pat");
            *self.state.lock() = GameState::Settlement;
            return Ok(drawn_cards);
        }

        while self.dealer_hand.lock().must_hit() {
            let card = self.draw()?;
            self.dealer_hand.lock().add_card(card);
            drawn_cards.push(card);
        }

        let value = self.dealer_hand.lock().value();
        log::debug!("dealer finishes on {value} after {} card(s)", drawn_cards.len());

        *self.state.lock() = GameState::Settlement;

        Ok(drawn_cards)
    }

    /// Rounds the blackjack premium according to the table options.
    fn blackjack_premium(&self, bet: usize) -> usize {
        #[expect(
            clippy::cast_precision_loss,
            reason = "f64 has sufficient precision for monetary values"
        )]
        let winnings = (bet as f64) * self.options.blackjack_pays;
        round_amount(winnings, self.options.rounding_blackjack)
    }

    /// Settles every bet against the dealer and clears bankrupt players.
    ///
    /// Each bankroll changes exactly once: a win adds the bet, a natural adds
    /// the rounded premium, a loss removes the bet and a push leaves it
    /// alone. Players left with nothing are unseated afterwards; if that
    /// empties the table the game moves to [`GameState::GameOver`].
    ///
    /// # Errors
    ///
    /// Returns an error if the game is not in settlement state.
    #[expect(
        clippy::significant_drop_tightening,
        reason = "locks are held for entire operation"
    )]
    pub fn settle(&self) -> Result<RoundResult, ShowdownError> {
        let mut state = self.state.lock();
        if *state != GameState::Settlement {
            return Err(ShowdownError::InvalidState);
        }

        let mut dealer = self.dealer_hand.lock();
        dealer.reveal_hole();
        let dealer_score = dealer.score();
        drop(dealer);

        let players = self.players.lock().clone();
        let mut player_results = Vec::with_capacity(players.len());

        {
            let hands = self.hands.lock();
            let bets = self.bets.lock();
            let names = self.names.lock();
            let mut money = self.money.lock();

            for &player_id in &players {
                let Some(hand) = hands.get(&player_id) else {
                    continue;
                };
                let bet = bets.get(&player_id).copied().unwrap_or(0);
                let player_score = hand.score();
                let outcome = HandOutcome::resolve(&dealer_score, &player_score);

                let Some(bankroll) = money.get_mut(&player_id) else {
                    continue;
                };

                #[expect(clippy::cast_possible_wrap, reason = "bet values fit in isize")]
                let net = match outcome {
                    HandOutcome::Win => {
                        *bankroll += bet;
                        bet as isize
                    }
                    HandOutcome::Blackjack => {
                        let premium = self.blackjack_premium(bet);
                        *bankroll += premium;
                        premium as isize
                    }
                    HandOutcome::Lose => {
                        *bankroll = bankroll.saturating_sub(bet);
                        -(bet as isize)
                    }
                    HandOutcome::Push => 0,
                };

                log::info!(
                    "player {player_id} {outcome:?} on {} against {} (net {net}, bankroll {bankroll})",
                    player_score.total,
                    dealer_score.total
                );

                player_results.push(PlayerResult {
                    player_id,
                    name: names.get(&player_id).cloned().unwrap_or_default(),
                    outcome,
                    bet,
                    player_value: player_score.total,
                    net,
                    money: *bankroll,
                });
            }
        }

        let eliminated: Vec<PlayerResult> = player_results
            .iter()
            .filter(|result| result.money == 0)
            .cloned()
            .collect();
        for result in &eliminated {
            log::info!("player {} ({}) is out of money", result.player_id, result.name);
            self.remove_player(result.player_id);
        }

        let game_over = self.players.lock().is_empty();
        *state = if game_over {
            log::info!("every player is out of money, game over");
            GameState::GameOver
        } else {
            GameState::AwaitingDeal
        };

        Ok(RoundResult {
            players: player_results,
            dealer_value: dealer_score.total,
            dealer_bust: dealer_score.is_bust(),
            dealer_blackjack: dealer_score.is_blackjack(),
            eliminated,
            game_over,
        })
    }
}
