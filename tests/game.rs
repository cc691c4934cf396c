//! Game integration tests.

use bjtable::{
    ActionError, Card, DealError, Deck, DeckError, Decision, DecisionRequest, Game, GameOptions,
    GameState, HandOutcome, HandStatus, Rank, RoundingMode, SeatError, ShowdownError, Suit,
};

const fn card(rank: Rank, suit: Suit) -> Card {
    Card::new(rank, suit)
}

fn stage(game: &Game, draws: &[Card]) {
    *game.deck.lock() = Deck::from_draw_order(draws);
}

fn table() -> Game {
    Game::new(GameOptions::default(), 42)
}

#[test]
fn dealer_is_dealt_first_and_hole_card_is_hidden() {
    let game = table();
    let player = game.join("Ann", 1000).unwrap();

    stage(
        &game,
        &[
            card(Rank::Nine, Suit::Clubs),    // dealer hole
            card(Rank::Six, Suit::Hearts),    // dealer up
            card(Rank::Ten, Suit::Spades),    // player
            card(Rank::Four, Suit::Diamonds), // player
        ],
    );

    assert_eq!(game.deal(&[]).unwrap(), GameState::PlayerTurns);

    let view = game.dealer_view();
    assert_eq!(view.cards, vec![None, Some(card(Rank::Six, Suit::Hearts))]);
    assert_eq!(view.visible_value, 6);
    assert!(!view.hole_revealed);

    let hand = game.get_hand(player).unwrap();
    assert_eq!(hand.value(), 14);
    assert_eq!(hand.status(), HandStatus::Active);

    let request = game.offer_decision().unwrap();
    assert_eq!(
        request,
        DecisionRequest {
            player_id: player,
            dealer_up_card: Some(card(Rank::Six, Suit::Hearts)),
            hand,
        }
    );
}

#[test]
fn dealer_natural_pushes_player_natural() {
    let game = table();
    let player = game.join("Ann", 1000).unwrap();

    stage(
        &game,
        &[
            card(Rank::Ace, Suit::Clubs),
            card(Rank::King, Suit::Hearts),
            card(Rank::Ace, Suit::Spades),
            card(Rank::Queen, Suit::Diamonds),
        ],
    );

    assert_eq!(game.deal(&[]).unwrap(), GameState::Settlement);
    assert!(game.offer_decision().is_none());
    assert!(game.dealer_view().hole_revealed);

    let result = game.settle().unwrap();
    assert!(result.dealer_blackjack);
    assert_eq!(result.players[0].outcome, HandOutcome::Push);
    assert_eq!(result.players[0].net, 0);
    assert_eq!(game.get_money(player), Some(1000));
    assert_eq!(game.state(), GameState::AwaitingDeal);
}

#[test]
fn dealer_natural_beats_player_twenty() {
    let game = table();
    let player = game.join("Ann", 1000).unwrap();

    stage(
        &game,
        &[
            card(Rank::King, Suit::Clubs),
            card(Rank::Ace, Suit::Hearts),
            card(Rank::King, Suit::Spades),
            card(Rank::Queen, Suit::Diamonds),
        ],
    );

    assert_eq!(game.deal(&[]).unwrap(), GameState::Settlement);

    let result = game.settle().unwrap();
    assert_eq!(result.players[0].outcome, HandOutcome::Lose);
    assert_eq!(result.players[0].net, -50);
    assert_eq!(game.get_money(player), Some(950));
}

#[test]
fn dealer_bust_pays_player_even_money() {
    let game = table();
    let player = game.join("Ann", 1000).unwrap();

    stage(
        &game,
        &[
            card(Rank::Ten, Suit::Clubs),    // dealer hole
            card(Rank::Six, Suit::Hearts),   // dealer up
            card(Rank::Ten, Suit::Spades),   // player
            card(Rank::Eight, Suit::Hearts), // player
            card(Rank::King, Suit::Clubs),   // dealer draw
        ],
    );

    game.deal(&[]).unwrap();
    game.record_decision(player, Decision::Stand).unwrap();
    assert_eq!(game.state(), GameState::DealerTurn);

    let drawn = game.advance_dealer().unwrap();
    assert_eq!(drawn, vec![card(Rank::King, Suit::Clubs)]);
    assert_eq!(game.state(), GameState::Settlement);

    let result = game.settle().unwrap();
    assert!(result.dealer_bust);
    assert_eq!(result.dealer_value, 26);
    assert_eq!(result.players[0].outcome, HandOutcome::Win);
    assert_eq!(game.get_money(player), Some(1050));
}

#[test]
fn equal_totals_push() {
    let game = table();
    let player = game.join("Ann", 1000).unwrap();

    stage(
        &game,
        &[
            card(Rank::Ten, Suit::Clubs),
            card(Rank::Nine, Suit::Hearts),
            card(Rank::Jack, Suit::Spades),
            card(Rank::Nine, Suit::Diamonds),
        ],
    );

    game.deal(&[]).unwrap();
    game.stand(player).unwrap();
    assert!(game.advance_dealer().unwrap().is_empty());

    let result = game.settle().unwrap();
    assert_eq!(result.dealer_value, 19);
    assert_eq!(result.players[0].outcome, HandOutcome::Push);
    assert_eq!(game.get_money(player), Some(1000));
}

#[test]
fn natural_pays_premium_and_is_skipped_for_decisions() {
    let game = table();
    let lucky = game.join("Ann", 1000).unwrap();
    let other = game.join("Bob", 1000).unwrap();

    stage(
        &game,
        &[
            card(Rank::Ten, Suit::Clubs),     // dealer hole
            card(Rank::Seven, Suit::Hearts),  // dealer up
            card(Rank::Ace, Suit::Spades),    // Ann
            card(Rank::King, Suit::Diamonds), // Ann
            card(Rank::Ten, Suit::Hearts),    // Bob
            card(Rank::Five, Suit::Clubs),    // Bob
        ],
    );

    assert_eq!(game.deal(&[]).unwrap(), GameState::PlayerTurns);
    assert_eq!(game.current_player(), Some(other));
    assert_eq!(game.hit(lucky).unwrap_err(), ActionError::NotYourTurn);

    game.stand(other).unwrap();
    assert!(game.advance_dealer().unwrap().is_empty());

    let result = game.settle().unwrap();
    assert_eq!(result.players[0].outcome, HandOutcome::Blackjack);
    assert_eq!(result.players[0].net, 75);
    assert_eq!(result.players[1].outcome, HandOutcome::Lose);
    assert_eq!(game.get_money(lucky), Some(1075));
    assert_eq!(game.get_money(other), Some(950));
}

#[test]
fn every_player_natural_ends_round_without_dealer_play() {
    let game = table();
    let first = game.join("Ann", 1000).unwrap();
    let second = game.join("Bob", 1000).unwrap();

    stage(
        &game,
        &[
            card(Rank::Five, Suit::Clubs),
            card(Rank::Six, Suit::Hearts),
            card(Rank::Ace, Suit::Spades),
            card(Rank::King, Suit::Diamonds),
            card(Rank::Queen, Suit::Hearts),
            card(Rank::Ace, Suit::Clubs),
        ],
    );

    assert_eq!(game.deal(&[]).unwrap(), GameState::Settlement);
    assert!(game.dealer_view().hole_revealed);
    assert_eq!(
        game.advance_dealer().unwrap_err(),
        ShowdownError::InvalidState
    );

    let result = game.settle().unwrap();
    assert_eq!(result.dealer_value, 11);
    assert!(
        result
            .players
            .iter()
            .all(|player| player.outcome == HandOutcome::Blackjack)
    );
    assert_eq!(game.get_money(first), Some(1075));
    assert_eq!(game.get_money(second), Some(1075));
}

#[test]
fn twenty_one_by_hitting_ends_turn_and_pays_even_money() {
    let game = table();
    let player = game.join("Ann", 1000).unwrap();

    stage(
        &game,
        &[
            card(Rank::Ten, Suit::Clubs),
            card(Rank::Seven, Suit::Hearts),
            card(Rank::Seven, Suit::Spades),
            card(Rank::Seven, Suit::Diamonds),
            card(Rank::Seven, Suit::Clubs),
        ],
    );

    game.deal(&[]).unwrap();
    let drawn = game.record_decision(player, Decision::Hit).unwrap();
    assert_eq!(drawn, Some(card(Rank::Seven, Suit::Clubs)));

    let hand = game.get_hand(player).unwrap();
    assert_eq!(hand.status(), HandStatus::TwentyOne);
    assert!(!hand.is_blackjack());
    assert_eq!(game.state(), GameState::DealerTurn);
    assert_eq!(game.stand(player).unwrap_err(), ActionError::InvalidState);

    game.advance_dealer().unwrap();
    let result = game.settle().unwrap();
    assert_eq!(result.players[0].outcome, HandOutcome::Win);
    assert_eq!(game.get_money(player), Some(1050));
}

#[test]
fn dealer_draws_nothing_when_every_player_busts() {
    let game = table();
    let player = game.join("Ann", 1000).unwrap();

    stage(
        &game,
        &[
            card(Rank::Ten, Suit::Clubs),
            card(Rank::Five, Suit::Hearts),
            card(Rank::Ten, Suit::Spades),
            card(Rank::Six, Suit::Diamonds),
            card(Rank::King, Suit::Clubs),
            card(Rank::Two, Suit::Clubs),
        ],
    );

    game.deal(&[]).unwrap();
    game.hit(player).unwrap();
    assert_eq!(game.get_hand(player).unwrap().status(), HandStatus::Bust);
    assert_eq!(game.state(), GameState::DealerTurn);

    assert!(game.advance_dealer().unwrap().is_empty());
    assert!(game.dealer_view().hole_revealed);
    assert_eq!(game.cards_remaining(), 1);

    let result = game.settle().unwrap();
    assert_eq!(result.dealer_value, 15);
    assert!(!result.dealer_bust);
    assert_eq!(result.players[0].outcome, HandOutcome::Lose);
    assert_eq!(game.get_money(player), Some(950));
}

#[test]
fn dealer_plays_on_when_only_some_players_bust() {
    let game = table();
    let busted = game.join("Ann", 1000).unwrap();
    let standing = game.join("Bob", 1000).unwrap();

    stage(
        &game,
        &[
            card(Rank::Ten, Suit::Clubs),    // dealer hole
            card(Rank::Six, Suit::Hearts),   // dealer up
            card(Rank::Ten, Suit::Spades),   // Ann
            card(Rank::Six, Suit::Diamonds), // Ann
            card(Rank::Ten, Suit::Hearts),   // Bob
            card(Rank::Nine, Suit::Clubs),   // Bob
            card(Rank::King, Suit::Clubs),   // Ann hits
            card(Rank::Two, Suit::Diamonds), // dealer draw
        ],
    );

    game.deal(&[]).unwrap();
    game.hit(busted).unwrap();
    assert_eq!(game.get_hand(busted).unwrap().status(), HandStatus::Bust);
    assert_eq!(game.current_player(), Some(standing));
    game.stand(standing).unwrap();

    let drawn = game.advance_dealer().unwrap();
    assert_eq!(drawn, vec![card(Rank::Two, Suit::Diamonds)]);

    let result = game.settle().unwrap();
    assert_eq!(result.dealer_value, 18);
    assert_eq!(result.players[0].outcome, HandOutcome::Lose);
    assert_eq!(result.players[1].outcome, HandOutcome::Win);
    assert_eq!(game.get_money(busted), Some(950));
    assert_eq!(game.get_money(standing), Some(1050));
}

#[test]
fn dealer_hits_below_seventeen_and_stands_on_soft_seventeen() {
    let game = table();
    let player = game.join("Ann", 1000).unwrap();

    stage(
        &game,
        &[
            card(Rank::Four, Suit::Clubs),
            card(Rank::Two, Suit::Hearts),
            card(Rank::Ten, Suit::Spades),
            card(Rank::Nine, Suit::Diamonds),
            card(Rank::Ace, Suit::Clubs),   // 17, soft: stands
            card(Rank::Three, Suit::Clubs), // never drawn
        ],
    );

    game.deal(&[]).unwrap();
    game.stand(player).unwrap();

    let drawn = game.advance_dealer().unwrap();
    assert_eq!(drawn, vec![card(Rank::Ace, Suit::Clubs)]);

    let result = game.settle().unwrap();
    assert_eq!(result.dealer_value, 17);
    assert_eq!(result.players[0].outcome, HandOutcome::Win);
}

#[test]
fn bet_is_clamped_to_bankroll() {
    let game = table();
    let player = game.join("Ann", 30).unwrap();

    game.start_round(&[(player, 50)]).unwrap();
    assert_eq!(game.get_bet(player), Some(30));
}

#[test]
fn zero_default_bet_is_rejected_until_a_bet_is_placed() {
    let game = Game::new(GameOptions::default().with_default_bet(0), 1);
    let player = game.join("Ann", 100).unwrap();

    assert_eq!(game.start_round(&[]).unwrap_err(), DealError::ZeroBet);
    assert_eq!(game.state(), GameState::AwaitingDeal);

    game.start_round(&[(player, 10)]).unwrap();
    assert_eq!(game.get_bet(player), Some(10));
}

#[test]
fn failed_deal_leaves_standing_bets_alone() {
    let game = table();
    let player = game.join("Ann", 100).unwrap();

    stage(&game, &[card(Rank::Two, Suit::Clubs)]);
    assert_eq!(
        game.deal(&[(player, 7)]).unwrap_err(),
        DealError::Deck(DeckError::Empty)
    );
    assert_eq!(game.get_bet(player), Some(50));
    assert_eq!(game.state(), GameState::AwaitingDeal);
}

#[test]
fn standing_bet_carries_over_between_rounds() {
    let game = table();
    let player = game.join("Ann", 1000).unwrap();
    assert_eq!(game.get_bet(player), Some(50));

    let mut stand = |_: &DecisionRequest| Decision::Stand;
    game.play_round(&[(player, 20)], &mut stand).unwrap();
    game.play_round(&[], &mut stand).unwrap();
    assert_eq!(game.get_bet(player), Some(20));
}

#[test]
fn bankrupt_player_is_removed_after_settlement() {
    let game = table();
    let broke = game.join("Ann", 30).unwrap();
    let rich = game.join("Bob", 1000).unwrap();

    stage(
        &game,
        &[
            card(Rank::Ten, Suit::Clubs),
            card(Rank::Nine, Suit::Hearts),
            card(Rank::Ten, Suit::Spades),
            card(Rank::Seven, Suit::Diamonds),
            card(Rank::Ten, Suit::Hearts),
            card(Rank::Queen, Suit::Clubs),
        ],
    );

    game.deal(&[]).unwrap();
    assert_eq!(game.get_bet(broke), Some(30));
    game.stand(broke).unwrap();
    game.stand(rich).unwrap();
    game.advance_dealer().unwrap();

    let result = game.settle().unwrap();
    assert_eq!(result.players[0].money, 0);
    assert_eq!(result.eliminated.len(), 1);
    assert_eq!(result.eliminated[0].player_id, broke);
    assert!(!result.game_over);

    assert_eq!(game.players(), vec![rich]);
    assert_eq!(game.get_money(broke), None);
    assert_eq!(game.get_money(rich), Some(1050));
    assert_eq!(game.state(), GameState::AwaitingDeal);
}

#[test]
fn last_bankruptcy_ends_the_game() {
    let game = table();
    let player = game.join("Ann", 50).unwrap();

    stage(
        &game,
        &[
            card(Rank::Ten, Suit::Clubs),
            card(Rank::Ace, Suit::Hearts),
            card(Rank::Ten, Suit::Spades),
            card(Rank::Seven, Suit::Diamonds),
        ],
    );

    game.deal(&[]).unwrap();
    let result = game.settle().unwrap();
    assert!(result.game_over);
    assert_eq!(result.eliminated[0].player_id, player);
    assert_eq!(game.state(), GameState::GameOver);
    assert_eq!(game.start_round(&[]).unwrap_err(), DealError::InvalidState);
}

#[test]
fn blackjack_premium_follows_rounding_mode() {
    for (mode, expected) in [(RoundingMode::Down, 22), (RoundingMode::Up, 23)] {
        let game = Game::new(GameOptions::default().with_rounding_blackjack(mode), 3);
        let player = game.join("Ann", 100).unwrap();

        stage(
            &game,
            &[
                card(Rank::Ten, Suit::Clubs),
                card(Rank::Eight, Suit::Hearts),
                card(Rank::Ace, Suit::Spades),
                card(Rank::Jack, Suit::Diamonds),
            ],
        );

        game.deal(&[(player, 15)]).unwrap();
        let result = game.settle().unwrap();
        assert_eq!(result.players[0].net, expected);
        assert_eq!(game.get_money(player), Some(100 + expected as usize));
    }
}

#[test]
fn hit_with_empty_deck_returns_error() {
    let game = table();
    let player = game.join("Ann", 100).unwrap();

    stage(
        &game,
        &[
            card(Rank::Nine, Suit::Clubs),
            card(Rank::Seven, Suit::Hearts),
            card(Rank::Five, Suit::Spades),
            card(Rank::Six, Suit::Diamonds),
        ],
    );

    game.deal(&[]).unwrap();
    assert_eq!(
        game.hit(player).unwrap_err(),
        ActionError::Deck(DeckError::Empty)
    );
}

#[test]
fn deal_errors() {
    let game = table();
    assert_eq!(game.start_round(&[]).unwrap_err(), DealError::NoPlayers);

    let player = game.join("Ann", 100).unwrap();
    assert_eq!(
        game.start_round(&[(player, 0)]).unwrap_err(),
        DealError::ZeroBet
    );
    assert_eq!(
        game.start_round(&[(player + 1, 10)]).unwrap_err(),
        DealError::PlayerNotFound
    );

    stage(
        &game,
        &[
            card(Rank::Nine, Suit::Clubs),
            card(Rank::Seven, Suit::Hearts),
            card(Rank::Five, Suit::Spades),
        ],
    );
    assert_eq!(
        game.deal(&[]).unwrap_err(),
        DealError::Deck(DeckError::Empty)
    );

    game.start_round(&[]).unwrap();
    assert_eq!(game.start_round(&[]).unwrap_err(), DealError::InvalidState);
}

#[test]
fn seat_errors() {
    let game = Game::new(GameOptions::default().with_max_players(2), 1);

    assert_eq!(game.join("Ann", 0).unwrap_err(), SeatError::ZeroBankroll);
    let first = game.join("Ann", 100).unwrap();
    game.join("Bob", 100).unwrap();
    assert_eq!(game.join("Cid", 100).unwrap_err(), SeatError::TableFull);
    assert_eq!(game.leave(9).unwrap_err(), SeatError::PlayerNotFound);

    game.start_round(&[]).unwrap();
    assert_eq!(game.leave(first).unwrap_err(), SeatError::InvalidState);
}

#[test]
fn steps_reject_wrong_state() {
    let game = table();
    let player = game.join("Ann", 100).unwrap();

    assert_eq!(
        game.record_decision(player, Decision::Hit).unwrap_err(),
        ActionError::InvalidState
    );
    assert_eq!(
        game.advance_dealer().unwrap_err(),
        ShowdownError::InvalidState
    );
    assert_eq!(game.settle().unwrap_err(), ShowdownError::InvalidState);
    assert!(game.offer_decision().is_none());
}

#[test]
fn each_round_deals_fresh_hands_from_a_full_deck() {
    let game = table();
    let first = game.join("Ann", 1000).unwrap();
    let second = game.join("Bob", 1000).unwrap();
    let stand = |_: &DecisionRequest| Decision::Stand;

    for _ in 0..5 {
        game.start_round(&[]).unwrap();
        assert_eq!(game.get_hand(first).unwrap().len(), 2);
        assert_eq!(game.get_hand(second).unwrap().len(), 2);
        assert_eq!(game.cards_remaining(), 52 - 6);

        while let Some(request) = game.offer_decision() {
            game.record_decision(request.player_id, stand(&request))
                .unwrap();
        }
        if game.state() == GameState::DealerTurn {
            game.advance_dealer().unwrap();
        }
        game.settle().unwrap();
    }
}

#[test]
fn play_round_is_deterministic_and_settles_once() {
    fn run(seed: u64) -> Vec<(usize, isize)> {
        let game = Game::new(GameOptions::default(), seed);
        for name in ["Ann", "Bob", "Cid"] {
            game.join(name, 1000).unwrap();
        }

        let mut below_17 = |request: &DecisionRequest| {
            if request.hand.value() < 17 {
                Decision::Hit
            } else {
                Decision::Stand
            }
        };

        let mut history = Vec::new();
        for _ in 0..20 {
            if game.state() == GameState::GameOver {
                break;
            }
            let before: Vec<(u8, usize)> = game
                .player_views()
                .into_iter()
                .map(|view| (view.id, view.money))
                .collect();

            let result = game.play_round(&[], &mut below_17).unwrap();

            for player in &result.players {
                let (_, money) = before
                    .iter()
                    .find(|(id, _)| *id == player.player_id)
                    .unwrap();
                assert_eq!(
                    player.money as isize - *money as isize,
                    player.net,
                    "bankroll must move by exactly the net result"
                );
                history.push((player.money, player.net));
            }
        }
        history
    }

    assert_eq!(run(7), run(7));
}
