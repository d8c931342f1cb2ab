use std::collections::HashMap;
use std::error::Error;
use std::process;

use clap::{ArgAction, Parser};
use tracing::{debug, info, warn};
use tracing_subscriber::EnvFilter;

use unobot::{Bot, DeckError, Game, GameError, create_bot_from_spec, label_for_spec, max_players};

/// Default base seed for deterministic runs.
const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

#[derive(Parser, Debug)]
#[command(
    name = "simulate",
    about = "Play bot-versus-bot Uno matches and report per-bot results."
)]
struct Args {
    /// Number of matches to simulate
    #[arg(short = 'g', long = "games", default_value_t = 100)]
    games: usize,

    /// Base RNG seed (shufflers and bot RNGs are derived deterministically)
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Score that ends a match
    #[arg(long = "target-score", default_value_t = unobot::DEFAULT_TARGET_SCORE)]
    target_score: u32,

    /// Cards dealt to each player at the start of a hand
    #[arg(long = "cards-per-player", default_value_t = 7)]
    cards_per_player: usize,

    /// Safety cap on actions per hand; matches exceeding this are aborted
    #[arg(long = "max-turns", default_value_t = 5000)]
    max_turns: usize,

    /// Log every hand and score update
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue)]
    verbose: bool,

    /// Player bot specs: e.g., heuristic random
    bots: Vec<String>,
}

#[derive(Default)]
struct Tally {
    seats: usize,
    wins: usize,
    points: u64,
}

fn main() {
    let args = Args::parse();
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new(if args.verbose { "debug" } else { "warn" }));
    tracing_subscriber::fmt().with_env_filter(filter).init();

    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let max = max_players(args.cards_per_player);
    if args.bots.len() < 2 || args.bots.len() > max {
        return Err(format!(
            "expected between 2 and {max} players, received {}",
            args.bots.len()
        )
        .into());
    }

    let mut tallies: HashMap<String, Tally> = HashMap::new();
    let mut aborted = 0usize;

    for game_index in 0..args.games {
        let seed = args.seed.wrapping_add(game_index as u64);
        let mut bots: Vec<Box<dyn Bot>> = Vec::with_capacity(args.bots.len());
        for (index, spec) in args.bots.iter().enumerate() {
            bots.push(create_bot_from_spec(spec, index, seed)?);
        }
        let names: Vec<String> = args
            .bots
            .iter()
            .enumerate()
            .map(|(index, spec)| format!("{}#{index}", label_for_spec(spec)))
            .collect();
        let mut game = Game::builder(names)
            .with_target_score(args.target_score)
            .with_cards_per_player(args.cards_per_player)
            .with_seed(seed)
            .build()?;

        match play_match(&mut game, &mut bots, args.max_turns)? {
            Some(winner) => {
                debug!(game = game_index, winner, hands = game.history().len(), "match finished");
                for (seat, spec) in args.bots.iter().enumerate() {
                    let tally = tallies.entry(label_for_spec(spec)).or_default();
                    tally.seats += 1;
                    tally.points += u64::from(game.scores()[seat]);
                    if seat == winner {
                        tally.wins += 1;
                    }
                }
            }
            None => {
                warn!(game = game_index, "match aborted");
                aborted += 1;
            }
        }
    }

    info!(games = args.games, aborted, "simulation complete");
    let mut labels: Vec<&String> = tallies.keys().collect();
    labels.sort();
    println!("{:<12} {:>6} {:>6} {:>9} {:>10}", "bot", "seats", "wins", "win rate", "avg score");
    for label in labels {
        let tally = &tallies[label];
        let seats = tally.seats.max(1) as f64;
        println!(
            "{:<12} {:>6} {:>6} {:>8.1}% {:>10.1}",
            label,
            tally.seats,
            tally.wins,
            100.0 * tally.wins as f64 / seats,
            tally.points as f64 / seats
        );
    }
    if aborted > 0 {
        println!("{aborted} matches aborted");
    }
    Ok(())
}

/// Plays hands until someone reaches the target. Returns `None` when a hand
/// exceeds `max_turns` actions or runs out of cards.
fn play_match(
    game: &mut Game,
    bots: &mut [Box<dyn Bot>],
    max_turns: usize,
) -> Result<Option<usize>, GameError> {
    loop {
        let mut turns = 0usize;
        while !game.current_hand().has_ended() {
            if turns >= max_turns {
                return Ok(None);
            }
            let hand = game.current_hand();
            let actor = hand.player_to_act();
            let state = hand.view(actor)?;
            let legal_actions = hand.legal_actions(actor)?;
            let action = bots[actor].select_action(&state, &legal_actions);
            match game.current_hand_mut().apply_action(actor, action) {
                Ok(()) => {}
                // Every card is held by a player; nothing left to draw.
                Err(GameError::Deck(DeckError::DeckExhausted)) => return Ok(None),
                Err(err) => return Err(err),
            }
            turns += 1;
        }
        let points = game.update_scores()?;
        debug!(points, scores = ?game.scores(), "hand complete");
        if let Some(winner) = game.winner() {
            return Ok(Some(winner));
        }
        game.start_new_hand()?;
    }
}
