//! Terminal blackjack for one to six players against the house.

use std::time::{SystemTime, UNIX_EPOCH};

use anyhow::{Context, Result};
use bjtable::{
    Card, DealerView, Decision, Game, GameOptions, GameState, Hand, HandOutcome, HandStatus,
    PlayerResult, RoundResult, Suit,
};
use clap::Parser;
use clap::builder::RangedU64ValueParser;
use colored::{ColoredString, Colorize};
use dialoguer::{Confirm, Input, Select};

const BORDER: &str = "***********************************************";

/// Blackjack for one to six players against a dealer who hits on 16 and
/// stands on 17.
#[derive(Debug, Parser)]
#[command(name = "bjtable", version, about)]
struct Args {
    /// Shuffle seed; defaults to the current time.
    #[arg(long)]
    seed: Option<u64>,
    /// Money each player brings to the table.
    #[arg(
        long,
        default_value_t = 1000,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    bankroll: usize,
    /// Bet each player starts with.
    #[arg(
        long,
        default_value_t = 50,
        value_parser = RangedU64ValueParser::<usize>::new().range(1..)
    )]
    bet: usize,
    /// Number of players; asked for when omitted.
    #[arg(long, value_parser = clap::value_parser!(u8).range(1..=6))]
    players: Option<u8>,
    /// Log engine events to stderr (repeat for more detail).
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,
}

fn main() -> Result<()> {
    let args = Args::parse();
    init_logging(args.verbose);

    let seed = args.seed.unwrap_or_else(time_seed);
    log::info!("shuffle seed {seed}");

    let options = GameOptions::default()
        .with_starting_bankroll(args.bankroll)
        .with_default_bet(args.bet);
    let game = Game::new(options, seed);

    seat_players(&game, args.players)?;

    triple_border();
    println!("Initializing blackjack game for:");
    println!("DEALER");
    for (seat, player) in game.player_views().iter().enumerate() {
        println!("Player {}: {} (${})", seat + 1, player.name, player.money);
    }
    triple_border();

    loop {
        let choice = Select::new()
            .with_prompt("Deal or quit?")
            .items(&["Deal", "Quit"])
            .default(0)
            .interact()?;
        if choice == 1 {
            println!("Goodbye.");
            break;
        }

        let bets = adjust_bets(&game)?;
        play_round(&game, &bets)?;

        if game.state() == GameState::GameOver {
            println!("All players out of money. Game over!");
            break;
        }
    }

    Ok(())
}

fn init_logging(verbose: u8) {
    let level = match verbose {
        0 => "warn",
        1 => "info",
        2 => "debug",
        _ => "trace",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(level)).init();
}

fn time_seed() -> u64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs()
}

fn seat_players(game: &Game, requested: Option<u8>) -> Result<()> {
    let max = game.options.max_players;
    let count = match requested {
        Some(count) => count,
        None => Input::<u8>::new()
            .with_prompt(format!("How many players (1-{max})?"))
            .validate_with(move |count: &u8| -> Result<(), String> {
                if (1..=max).contains(count) {
                    Ok(())
                } else {
                    Err(format!("Enter a number from 1 to {max}"))
                }
            })
            .interact_text()?,
    };

    for seat in 1..=count {
        let name: String = Input::new()
            .with_prompt(format!("Player {seat}, please enter your name"))
            .interact_text()?;
        game.join(name.trim(), game.options.starting_bankroll)
            .with_context(|| format!("seating player {seat}"))?;
    }

    Ok(())
}

/// Shows the standing bets and collects any changes as `(player_id, bet)`.
fn adjust_bets(game: &Game) -> Result<Vec<(u8, usize)>> {
    let players = game.player_views();
    for (seat, player) in players.iter().enumerate() {
        println!(
            "Player {}: {} (${}) - betting ${} per hand",
            seat + 1,
            player.name,
            player.money,
            player.bet.min(player.money)
        );
    }

    let mut changes = Vec::new();

    let choice = Select::new()
        .with_prompt("Bets")
        .items(&["Continue with current amounts", "Change bet amounts"])
        .default(0)
        .interact()?;
    if choice == 0 {
        return Ok(changes);
    }

    loop {
        let player = if players.len() > 1 {
            let names: Vec<&str> = players.iter().map(|p| p.name.as_str()).collect();
            let index = Select::new()
                .with_prompt("Change which player's bet amount?")
                .items(&names)
                .default(0)
                .interact()?;
            &players[index]
        } else {
            &players[0]
        };

        let money = player.money;
        let bet = Input::<usize>::new()
            .with_prompt(format!("{} (${money}) - bet how much per hand?", player.name))
            .validate_with(move |bet: &usize| -> Result<(), String> {
                if (1..=money).contains(bet) {
                    Ok(())
                } else {
                    Err(format!("Enter an amount from 1 to {money}"))
                }
            })
            .interact_text()?;
        changes.push((player.id, bet));

        if players.len() == 1
            || !Confirm::new()
                .with_prompt("Change another player's bet amount?")
                .default(false)
                .interact()?
        {
            return Ok(changes);
        }
    }
}

fn play_round(game: &Game, bets: &[(u8, usize)]) -> Result<()> {
    game.start_round(bets).context("dealing the round")?;

    println!("Initial deal:");
    println!("{BORDER}");
    let dealer = game.dealer_view();
    if dealer.is_blackjack {
        println!(
            "DEALER ({}) - {}",
            format_dealer(&dealer),
            "DEALER BLACKJACK!!!".yellow().bold()
        );
    } else if dealer.hole_revealed {
        println!(
            "DEALER ({}) - {}",
            format_dealer(&dealer),
            dealer.visible_value
        );
    } else {
        println!("{}", dealer_showing(&dealer));
    }
    for player in game.player_views() {
        if player.hand.is_blackjack() {
            println!(
                "{} ({}) - {}",
                player.name,
                format_cards(player.hand.cards()),
                "NATURAL BLACKJACK!!!".yellow().bold()
            );
        } else {
            println!(
                "{} ({}) - {}",
                player.name,
                format_cards(player.hand.cards()),
                player.hand.value()
            );
        }
    }
    triple_border();

    while let Some(request) = game.offer_decision() {
        let name = game.get_name(request.player_id).unwrap_or_default();

        println!("{}", dealer_showing(&game.dealer_view()));
        println!("{}", format_hand(&request.hand));

        let choice = Select::new()
            .with_prompt(format!("{name}, would you like to hit or stand?"))
            .items(&["Hit", "Stand"])
            .default(0)
            .interact()?;
        let decision = if choice == 0 {
            Decision::Hit
        } else {
            Decision::Stand
        };

        match game.record_decision(request.player_id, decision)? {
            Some(card) => println!("{name} hits and receives {}.", format_card(card)),
            None => {
                println!("{name} stands.");
                println!("{BORDER}");
            }
        }

        if let Some(hand) = game.get_hand(request.player_id) {
            match hand.status() {
                HandStatus::Bust => {
                    println!("{}", format_hand(&hand));
                    println!("{name} {}", "busts.".red());
                    println!("{BORDER}");
                }
                HandStatus::TwentyOne => {
                    println!("{name} stands on 21.");
                    println!("{BORDER}");
                }
                _ => {}
            }
        }
    }

    if game.state() == GameState::DealerTurn {
        let everyone_bust = game
            .player_views()
            .iter()
            .all(|player| player.hand.is_bust());
        let drawn = game.advance_dealer()?;

        if everyone_bust {
            println!("Every player busted; the dealer does not draw.");
        } else {
            for card in drawn {
                println!("DEALER hits and receives {}.", format_card(card));
            }
            let dealer = game.dealer_view();
            println!("DEALER ({}) - {}", format_dealer(&dealer), dealer.visible_value);
            if !dealer.is_bust {
                println!("DEALER stands.");
            }
        }
    }

    let result = game.settle()?;
    print_results(&result);
    Ok(())
}

fn print_results(result: &RoundResult) {
    triple_border();
    println!("Results:");
    for player in &result.players {
        println!("{} - {} (${})", player.name, outcome_label(player), player.money);
    }
    for player in &result.eliminated {
        println!("{} is out of money. Goodbye!", player.name);
    }
    triple_border();
}

fn outcome_label(player: &PlayerResult) -> ColoredString {
    match player.outcome {
        HandOutcome::Blackjack => "NATURAL BLACKJACK, WIN 3:2".yellow().bold(),
        HandOutcome::Win => "WIN".green(),
        HandOutcome::Push => "PUSH".normal(),
        HandOutcome::Lose if player.player_value > 21 => "BUST (LOSE)".red(),
        HandOutcome::Lose => "LOSE".red(),
    }
}

fn triple_border() {
    for _ in 0..3 {
        println!("{BORDER}");
    }
}

fn dealer_showing(dealer: &DealerView) -> String {
    format!(
        "DEALER ({}) - showing {}",
        format_dealer(dealer),
        dealer.visible_value
    )
}

fn format_dealer(dealer: &DealerView) -> String {
    dealer
        .cards
        .iter()
        .map(|card| card.map_or_else(|| "__".to_string(), format_card))
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_hand(hand: &Hand) -> String {
    let soft = if hand.is_soft() { "soft " } else { "" };
    format!("({}) - {soft}{}", format_cards(hand.cards()), hand.value())
}

fn format_cards(cards: &[Card]) -> String {
    cards
        .iter()
        .map(|card| format_card(*card))
        .collect::<Vec<_>>()
        .join(" ")
}

fn format_card(card: Card) -> String {
    let text = card.to_string();
    match card.suit {
        Suit::Hearts | Suit::Diamonds => text.red().to_string(),
        Suit::Clubs | Suit::Spades => text.bold().to_string(),
    }
}
