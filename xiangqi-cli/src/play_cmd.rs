//! Play command - AI-vs-AI games from the initial position
//!
//! - run(): orchestration
//! - play_series(), report_results(): phases
//! - play_single_game(), compute_statistics(): steps

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use xiangqi_core::{initial_board, GameStatus, MinimaxAI, PlayedGame, Side, Tier};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Red AI tier (normal, hard, hell)
    #[arg(long, default_value = "normal")]
    pub red: Tier,

    /// Black AI tier (normal, hard, hell)
    #[arg(long, default_value = "normal")]
    pub black: Tier,

    /// Number of games to play
    #[arg(long, default_value = "1")]
    pub games: usize,

    /// Maximum plies per game before it is scored unfinished
    #[arg(long, default_value = "200")]
    pub max_moves: usize,

    /// RNG seed for reproducible games
    #[arg(long)]
    pub seed: Option<u64>,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// How a single game ended
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
enum Outcome {
    RedWins,
    BlackWins,
    Draw,
    /// Move cap reached
    Unfinished,
}

impl Outcome {
    fn of(game: &PlayedGame) -> Self {
        match game.status {
            GameStatus::Checkmate => match game.to_move {
                Side::Red => Outcome::BlackWins,
                Side::Black => Outcome::RedWins,
            },
            GameStatus::Stalemate => Outcome::Draw,
            GameStatus::Ongoing => Outcome::Unfinished,
        }
    }
}

#[derive(Clone, Debug, Serialize)]
struct GameRecord {
    game_number: usize,
    outcome: Outcome,
    plies: usize,
}

#[derive(Clone, Debug, Serialize)]
struct SeriesResults {
    red: Tier,
    black: Tier,
    red_wins: usize,
    black_wins: usize,
    draws: usize,
    unfinished: usize,
    avg_plies: f32,
    games: Vec<GameRecord>,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs) -> Result<()> {
    tracing::info!(
        "Starting {} games: red={} vs black={} (max {} plies)",
        args.games,
        args.red,
        args.black,
        args.max_moves
    );

    let results = play_series(&args);

    report_results(&results, args.json)
}

// ============================================================================
// PHASES
// ============================================================================

/// Play every game with one RNG stream
fn play_series(args: &PlayArgs) -> SeriesResults {
    let mut ai = match args.seed {
        Some(seed) => MinimaxAI::with_seed(seed),
        None => MinimaxAI::new(),
    };

    let games = (1..=args.games)
        .map(|game_number| {
            let record = play_single_game(&mut ai, args, game_number);
            tracing::info!(
                "Game {}: {:?} after {} plies",
                record.game_number,
                record.outcome,
                record.plies
            );
            record
        })
        .collect();

    compute_statistics(args.red, args.black, games)
}

fn report_results(results: &SeriesResults, json: bool) -> Result<()> {
    if json {
        let out = serde_json::to_string_pretty(results).context("Failed to encode results")?;
        println!("{}", out);
    } else {
        print_text_results(results);
    }
    Ok(())
}

// ============================================================================
// STEPS
// ============================================================================

fn play_single_game(ai: &mut MinimaxAI, args: &PlayArgs, game_number: usize) -> GameRecord {
    let game = ai.play_game(initial_board(), args.red, args.black, args.max_moves);

    GameRecord {
        game_number,
        outcome: Outcome::of(&game),
        plies: game.moves.len(),
    }
}

fn compute_statistics(red: Tier, black: Tier, games: Vec<GameRecord>) -> SeriesResults {
    let count = |outcome: Outcome| games.iter().filter(|g| g.outcome == outcome).count();

    let total_plies: usize = games.iter().map(|g| g.plies).sum();
    let avg_plies = if games.is_empty() {
        0.0
    } else {
        total_plies as f32 / games.len() as f32
    };

    SeriesResults {
        red,
        black,
        red_wins: count(Outcome::RedWins),
        black_wins: count(Outcome::BlackWins),
        draws: count(Outcome::Draw),
        unfinished: count(Outcome::Unfinished),
        avg_plies,
        games,
    }
}

fn print_text_results(results: &SeriesResults) {
    println!("\n=== {} (red) vs {} (black) ===", results.red, results.black);
    println!("Games:       {}", results.games.len());
    println!("Red wins:    {}", results.red_wins);
    println!("Black wins:  {}", results.black_wins);
    println!("Draws:       {}", results.draws);
    println!("Unfinished:  {}", results.unfinished);
    println!("Avg plies:   {:.1}", results.avg_plies);

    println!("\nGame details:");
    for game in &results.games {
        println!(
            "  Game {}: {:?} in {} plies",
            game.game_number, game.outcome, game.plies
        );
    }
}

// ============================================================================
// TESTS
// ============================================================================
