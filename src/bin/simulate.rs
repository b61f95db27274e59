use std::error::Error;
use std::path::PathBuf;
use std::process;

use clap::{ArgAction, Parser};
use serde::Serialize;
use tracing::info;

use unodeck::{
    Game, GameEvent, RoundSummary, ScoreRecordWriter, create_policy_from_spec, describe_event,
    render_state,
};

const DEFAULT_SEED: u64 = 0xDEC0_1DED_5EED_F00D;

#[derive(Parser, Debug)]
#[command(name = "simulate", about = "Play one full game between automated players.")]
struct Args {
    /// Seed for shuffling and policy randomness
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Cumulative score that ends the game
    #[arg(long = "winning-score", default_value_t = unodeck::card::WINNING_SCORE)]
    winning_score: u32,

    /// Safety cap on turns per round
    #[arg(long = "max-turns", default_value_t = 5_000)]
    max_turns: usize,

    /// Append per-round cumulative scores to this CSV file
    #[arg(long = "scores")]
    scores: Option<PathBuf>,

    /// Print every event and the table state after each turn
    #[arg(long = "visualize", action = ArgAction::SetTrue)]
    visualize: bool,

    /// Print a JSON summary instead of plain text
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue)]
    verbose: bool,

    /// Player policy specs (2-4 total): heuristic[:bias], greedy, random
    players: Vec<String>,
}

#[derive(Serialize)]
struct Summary<'a> {
    seed: u64,
    winner: String,
    rounds: &'a [RoundSummary],
    players: Vec<String>,
    totals: &'a [u32],
}

fn main() {
    let args = Args::parse();
    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new(filter)),
        )
        .init();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    let specs = if args.players.is_empty() {
        vec![String::from("heuristic"); 4]
    } else {
        args.players.clone()
    };

    let mut game = Game::builder()
        .with_seed(args.seed)
        .with_winning_score(args.winning_score)
        .build()?;
    let mut names = Vec::with_capacity(specs.len());
    for (index, spec) in specs.iter().enumerate() {
        let name = format!("Player{}", index + 1);
        game.add_player(name.clone(), create_policy_from_spec(spec)?)?;
        names.push(name);
    }

    let mut record = match &args.scores {
        Some(path) => Some(ScoreRecordWriter::append_to(path, names.clone())?),
        None => None,
    };

    info!(players = specs.len(), seed = args.seed, "starting simulation");
    game.start_game()?;
    drain(&mut game, &names, &mut record, args.visualize)?;

    while !game.is_finished() {
        if game.phase() == unodeck::Phase::RoundOver {
            game.start_next_round()?;
            drain(&mut game, &names, &mut record, args.visualize)?;
            continue;
        }
        let mut turns = 0usize;
        loop {
            if turns >= args.max_turns {
                return Err(unodeck::GameError::TurnLimitExceeded(args.max_turns).into());
            }
            let current = game.current_player();
            let outcome = game.handle_turn(current)?;
            drain(&mut game, &names, &mut record, args.visualize)?;
            if args.visualize {
                println!("{}", render_state(&game.state_view(current)?));
            }
            turns += 1;
            if outcome.round_over.is_some() {
                break;
            }
        }
    }

    if let Some(record) = record.as_mut() {
        record.flush()?;
    }

    let winner = game
        .winner()
        .and_then(|id| names.get(id).cloned())
        .unwrap_or_default();
    if args.json {
        let summary = Summary {
            seed: args.seed,
            winner,
            rounds: game.ledger().rounds(),
            players: names,
            totals: game.ledger().totals(),
        };
        println!("{}", serde_json::to_string_pretty(&summary)?);
    } else {
        println!(
            "Game finished after {} rounds. Winner: {winner}.",
            game.round()
        );
        for (name, total) in names.iter().zip(game.ledger().totals()) {
            println!("  {name:<10} {total:>5}");
        }
    }
    Ok(())
}

fn drain(
    game: &mut Game,
    names: &[String],
    record: &mut Option<ScoreRecordWriter<std::fs::File>>,
    visualize: bool,
) -> Result<(), Box<dyn Error>> {
    for event in game.take_events() {
        if visualize {
            println!("{}", describe_event(&event, names));
        }
        if matches!(event, GameEvent::RoundWon { .. } | GameEvent::GameWon { .. }) {
            if let Some(record) = record.as_mut() {
                record.record(&event)?;
            }
        }
    }
    Ok(())
}
