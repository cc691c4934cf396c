use bjtable::{
    Card, DealerView, Decision, Game, GameOptions, GameState, Hand, HandOutcome, HandStatus,
    PlayerResult, PlayerView, Rank, RoundResult, Suit,
};
use serde::Serialize;
use wasm_bindgen::prelude::*;

#[wasm_bindgen]
pub struct WasmGame {
    game: Game,
}

#[wasm_bindgen]
impl WasmGame {
    #[wasm_bindgen(constructor)]
    pub fn new(seed: u32) -> Self {
        Self {
            game: Game::new(GameOptions::default(), seed as u64),
        }
    }

    pub fn reset(&mut self, seed: u32) {
        self.game = Game::new(GameOptions::default(), seed as u64);
    }

    pub fn join(&self, name: String, money: u32) -> Result<u32, JsValue> {
        self.game
            .join(name, money as usize)
            .map(u32::from)
            .map_err(js_err)
    }

    pub fn leave(&self, player_id: u8) -> Result<(), JsValue> {
        self.game.leave(player_id).map_err(js_err)
    }

    /// Starts a round; `bets` holds `[player_id, amount]` pairs flattened.
    pub fn start_round(&self, bets: Vec<u32>) -> Result<(), JsValue> {
        let bets: Vec<(u8, usize)> = bets
            .chunks_exact(2)
            .map(|pair| (pair[0] as u8, pair[1] as usize))
            .collect();
        self.game.start_round(&bets).map(|_| ()).map_err(js_err)
    }

    pub fn hit(&self, player_id: u8) -> Result<(), JsValue> {
        self.game
            .record_decision(player_id, Decision::Hit)
            .map(|_| ())
            .map_err(js_err)
    }

    pub fn stand(&self, player_id: u8) -> Result<(), JsValue> {
        self.game
            .record_decision(player_id, Decision::Stand)
            .map(|_| ())
            .map_err(js_err)
    }

    pub fn advance_dealer(&self) -> Result<u32, JsValue> {
        self.game
            .advance_dealer()
            .map(|drawn| drawn.len() as u32)
            .map_err(js_err)
    }

    pub fn settle(&self) -> Result<JsValue, JsValue> {
        let result = self.game.settle().map_err(js_err)?;
        to_js_value(&JsRoundResult::from(result))
    }

    pub fn snapshot(&self) -> Result<JsValue, JsValue> {
        let snapshot = Snapshot {
            state: state_to_str(self.game.state()),
            players: self
                .game
                .player_views()
                .into_iter()
                .map(JsPlayer::from)
                .collect(),
            dealer: JsDealer::from(self.game.dealer_view()),
            current_player: self.game.current_player().map(u32::from),
            cards_remaining: self.game.cards_remaining() as u32,
        };

        to_js_value(&snapshot)
    }
}

#[derive(Serialize)]
struct Snapshot {
    state: &'static str,
    players: Vec<JsPlayer>,
    dealer: JsDealer,
    current_player: Option<u32>,
    cards_remaining: u32,
}

#[derive(Serialize)]
struct JsCard {
    suit: &'static str,
    rank: &'static str,
}

#[derive(Serialize)]
struct JsHand {
    cards: Vec<JsCard>,
    value: u16,
    is_soft: bool,
    status: &'static str,
}

impl From<&Hand> for JsHand {
    fn from(hand: &Hand) -> Self {
        Self {
            cards: hand.cards().iter().copied().map(card_to_js).collect(),
            value: hand.value(),
            is_soft: hand.is_soft(),
            status: hand_status_to_str(hand.status()),
        }
    }
}

#[derive(Serialize)]
struct JsPlayer {
    id: u32,
    name: String,
    money: u32,
    bet: u32,
    hand: JsHand,
}

impl From<PlayerView> for JsPlayer {
    fn from(player: PlayerView) -> Self {
        Self {
            id: u32::from(player.id),
            hand: JsHand::from(&player.hand),
            name: player.name,
            money: player.money as u32,
            bet: player.bet as u32,
        }
    }
}

#[derive(Serialize)]
struct JsDealer {
    cards: Vec<Option<JsCard>>,
    visible_value: u16,
    hole_revealed: bool,
    is_blackjack: bool,
    is_bust: bool,
}

impl From<DealerView> for JsDealer {
    fn from(dealer: DealerView) -> Self {
        Self {
            cards: dealer
                .cards
                .into_iter()
                .map(|card| card.map(card_to_js))
                .collect(),
            visible_value: dealer.visible_value,
            hole_revealed: dealer.hole_revealed,
            is_blackjack: dealer.is_blackjack,
            is_bust: dealer.is_bust,
        }
    }
}

#[derive(Serialize)]
struct JsRoundResult {
    players: Vec<JsPlayerResult>,
    eliminated: Vec<u32>,
    dealer_value: u16,
    dealer_bust: bool,
    dealer_blackjack: bool,
    game_over: bool,
}

impl From<RoundResult> for JsRoundResult {
    fn from(result: RoundResult) -> Self {
        Self {
            eliminated: result
                .eliminated
                .iter()
                .map(|player| u32::from(player.player_id))
                .collect(),
            players: result.players.into_iter().map(JsPlayerResult::from).collect(),
            dealer_value: result.dealer_value,
            dealer_bust: result.dealer_bust,
            dealer_blackjack: result.dealer_blackjack,
            game_over: result.game_over,
        }
    }
}

#[derive(Serialize)]
struct JsPlayerResult {
    player_id: u32,
    name: String,
    outcome: &'static str,
    bet: u32,
    player_value: u16,
    net: i32,
    money: u32,
}

impl From<PlayerResult> for JsPlayerResult {
    fn from(result: PlayerResult) -> Self {
        Self {
            player_id: u32::from(result.player_id),
            name: result.name,
            outcome: outcome_to_str(result.outcome),
            bet: result.bet as u32,
            player_value: result.player_value,
            net: result.net as i32,
            money: result.money as u32,
        }
    }
}

fn card_to_js(card: Card) -> JsCard {
    JsCard {
        suit: suit_to_str(card.suit),
        rank: rank_to_str(card.rank),
    }
}

fn rank_to_str(rank: Rank) -> &'static str {
    rank.label()
}

fn suit_to_str(suit: Suit) -> &'static str {
    match suit {
        Suit::Clubs => "Clubs",
        Suit::Diamonds => "Diamonds",
        Suit::Hearts => "Hearts",
        Suit::Spades => "Spades",
    }
}

fn state_to_str(state: GameState) -> &'static str {
    match state {
        GameState::AwaitingDeal => "AwaitingDeal",
        GameState::PlayerTurns => "PlayerTurns",
        GameState::DealerTurn => "DealerTurn",
        GameState::Settlement => "Settlement",
        GameState::GameOver => "GameOver",
    }
}

fn hand_status_to_str(status: HandStatus) -> &'static str {
    match status {
        HandStatus::Active => "Active",
        HandStatus::Stood => "Stood",
        HandStatus::TwentyOne => "TwentyOne",
        HandStatus::Bust => "Bust",
        HandStatus::Blackjack => "Blackjack",
    }
}

fn outcome_to_str(outcome: HandOutcome) -> &'static str {
    match outcome {
        HandOutcome::Win => "Win",
        HandOutcome::Lose => "Lose",
        HandOutcome::Push => "Push",
        HandOutcome::Blackjack => "Blackjack",
    }
}

fn js_err<E: core::fmt::Display>(err: E) -> JsValue {
    JsValue::from_str(&err.to_string())
}

fn to_js_value<T: Serialize>(value: &T) -> Result<JsValue, JsValue> {
    serde_wasm_bindgen::to_value(value).map_err(|err| JsValue::from_str(&err.to_string()))
}
