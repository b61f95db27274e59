use std::collections::HashMap;
use std::error::Error;
use std::process;
use std::time::Instant;

use clap::{ArgAction, Parser};
use rand::SeedableRng;
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use serde::Serialize;
use tracing::{info, warn};

use unodeck::{Game, create_policy_from_spec, label_for_spec};

/// Default base seed for deterministic runs.
const DEFAULT_SEED: u64 = 0xC0FFEE_u64 << 32 | 0x5EED_u64;

#[derive(Parser, Debug)]
#[command(
    name = "winrate",
    about = "Run many seeded games and summarise per-policy win rates."
)]
struct Args {
    /// Number of games to simulate
    #[arg(short = 'g', long = "games", default_value_t = 200)]
    games: usize,

    /// Base RNG seed (game and seating seeds are derived deterministically)
    #[arg(short = 's', long = "seed", default_value_t = DEFAULT_SEED)]
    seed: u64,

    /// Cumulative score that ends each game
    #[arg(long = "winning-score", default_value_t = unodeck::card::WINNING_SCORE)]
    winning_score: u32,

    /// Safety cap on turns per round; games exceeding this are aborted
    #[arg(long = "max-turns", default_value_t = 5_000)]
    max_turns: usize,

    /// Print the summary as JSON
    #[arg(long = "json", action = ArgAction::SetTrue)]
    json: bool,

    /// Enable debug logging
    #[arg(short = 'v', long = "verbose", action = ArgAction::SetTrue)]
    verbose: bool,

    /// Player policy specs: e.g., heuristic random (2-4 total)
    policies: Vec<String>,
}

#[derive(Serialize)]
struct LabelResult {
    label: String,
    wins: usize,
    seats: usize,
    win_rate: f64,
    avg_points: f64,
}

fn main() {
    let args = Args::parse();
    let filter = if args.verbose { "debug" } else { "warn" };
    tracing_subscriber::fmt().with_env_filter(filter).init();
    if let Err(err) = run(args) {
        eprintln!("Error: {err}");
        process::exit(1);
    }
}

fn run(args: Args) -> Result<(), Box<dyn Error>> {
    if args.policies.len() < 2 || args.policies.len() > 4 {
        return Err(format!(
            "expected between 2 and 4 players, received {}",
            args.policies.len()
        )
        .into());
    }

    let mut wins_per_label: HashMap<String, usize> = HashMap::new();
    let mut seats_per_label: HashMap<String, usize> = HashMap::new();
    let mut points_per_label: HashMap<String, u64> = HashMap::new();
    let mut aborted_games = 0usize;
    let players_per_game = args.policies.len();
    let started = Instant::now();

    for game_idx in 0..args.games {
        // Permute seating each game for fairness.
        let mut indices: Vec<usize> = (0..players_per_game).collect();
        let mut seat_rng = StdRng::seed_from_u64(args.seed ^ 0x9E37_79B9 ^ (game_idx as u64));
        indices.shuffle(&mut seat_rng);

        let mut game = Game::builder()
            .with_seed(mix_seed(args.seed, game_idx as u64))
            .with_winning_score(args.winning_score)
            .build()?;
        let mut labels = Vec::with_capacity(players_per_game);
        for (seat, src_idx) in indices.iter().enumerate() {
            let spec = &args.policies[*src_idx];
            game.add_player(format!("Seat{seat}"), create_policy_from_spec(spec)?)?;
            labels.push(label_for_spec(spec));
        }
        for label in &labels {
            *seats_per_label.entry(label.clone()).or_default() += 1;
        }

        match game.play_game(args.max_turns) {
            Ok(winner) => {
                let label = labels[winner].clone();
                *wins_per_label.entry(label.clone()).or_default() += 1;
                *points_per_label.entry(label).or_default() += game.score(winner) as u64;
            }
            Err(err) => {
                warn!(game = game_idx, %err, "game aborted");
                aborted_games += 1;
            }
        }
    }
    info!(
        games = args.games,
        elapsed_ms = started.elapsed().as_millis() as u64,
        "simulation finished"
    );

    let mut results: Vec<LabelResult> = seats_per_label
        .iter()
        .map(|(label, &seats)| {
            let wins = wins_per_label.get(label).copied().unwrap_or(0);
            let points = points_per_label.get(label).copied().unwrap_or(0);
            LabelResult {
                label: label.clone(),
                wins,
                seats,
                win_rate: if seats > 0 { wins as f64 / seats as f64 } else { 0.0 },
                avg_points: if seats > 0 { points as f64 / seats as f64 } else { 0.0 },
            }
        })
        .collect();
    results.sort_by(|a, b| {
        b.win_rate
            .partial_cmp(&a.win_rate)
            .unwrap_or(std::cmp::Ordering::Equal)
            .then_with(|| a.label.cmp(&b.label))
    });

    if args.json {
        println!("{}", serde_json::to_string_pretty(&results)?);
    } else {
        println!("Win rates (per-seat):");
        for result in &results {
            println!(
                "  {:<12}  {}/{}  ({:.2}%)   avg winning pts: {:>7.2}",
                result.label,
                result.wins,
                result.seats,
                result.win_rate * 100.0,
                result.avg_points
            );
        }
        if aborted_games > 0 {
            println!("\nNote: {aborted_games} game(s) hit the turn cap and were not counted.");
        }
    }
    Ok(())
}

fn mix_seed(base: u64, game: u64) -> u64 {
    let mut z = base ^ game.wrapping_mul(0x9E37_79B9_7F4A_7C15);
    z ^= z >> 12;
    z ^= z << 25;
    z ^= z >> 27;
    z
}
