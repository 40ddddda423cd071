//! Match command - computer self-play
//!
//! ## Architecture
//!
//! - run(): orchestration
//! - play_match(), report_results(): phases
//! - play_single_game(), compute_match_statistics(): steps

use anyhow::{Context, Result};
use clap::Args;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

use tictac_core::{outcome, play_game, ComputerPlayer, Difficulty, EngineConfig, Mark, Outcome};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct MatchArgs {
    /// Number of games to play
    #[arg(long, default_value = "10")]
    pub games: usize,

    /// Strength of the X player (moves first)
    #[arg(long, default_value = "expert")]
    pub x: Difficulty,

    /// Strength of the O player
    #[arg(long, default_value = "expert")]
    pub o: Difficulty,

    /// Let minimax choose first moves too
    #[arg(long)]
    pub no_opening_book: bool,

    /// Output results as JSON
    #[arg(long)]
    pub json: bool,
}

/// Result of a single game
#[derive(Clone, Debug)]
struct GameRecord {
    game_number: usize,
    outcome: Outcome,
    moves: Vec<usize>,
}

/// Aggregated match results
#[derive(Clone, Debug)]
struct MatchResults {
    games: Vec<GameRecord>,
    x_wins: usize,
    o_wins: usize,
    ties: usize,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// Run match command
pub fn run(args: MatchArgs, seed: Option<u64>) -> Result<()> {
    tracing::info!(
        "Starting match: X={} vs O={} ({} games)",
        args.x,
        args.o,
        args.games
    );

    let results = play_match(&args, seed)?;
    report_results(&results, &args)
}

// ============================================================================
// PHASES
// ============================================================================

/// Play all games in the match
fn play_match(args: &MatchArgs, seed: Option<u64>) -> Result<MatchResults> {
    let mut rng = create_rng(seed);
    let engine = EngineConfig {
        use_opening_book: !args.no_opening_book,
    };

    let mut x = ComputerPlayer::with_options(Mark::X, args.x, engine.clone(), Some(rng.gen()));
    let mut o = ComputerPlayer::with_options(Mark::O, args.o, engine, Some(rng.gen()));

    let mut games = Vec::with_capacity(args.games);
    for game_num in 0..args.games {
        let record = play_single_game(&mut x, &mut o, game_num + 1)?;

        tracing::info!(
            "Game {}: {} ({} moves)",
            record.game_number,
            record.outcome,
            record.moves.len()
        );

        games.push(record);
    }

    Ok(compute_match_statistics(games))
}

/// Report match results
fn report_results(results: &MatchResults, args: &MatchArgs) -> Result<()> {
    if args.json {
        print_json_results(results)
    } else {
        print_text_results(results);
        Ok(())
    }
}

// ============================================================================
// STEPS
// ============================================================================

fn play_single_game(
    x: &mut ComputerPlayer,
    o: &mut ComputerPlayer,
    game_number: usize,
) -> Result<GameRecord> {
    let (board, moves) =
        play_game(x, o).with_context(|| format!("Game {} failed", game_number))?;

    Ok(GameRecord {
        game_number,
        outcome: outcome(&board),
        moves,
    })
}

/// Compute aggregate statistics from game records
fn compute_match_statistics(games: Vec<GameRecord>) -> MatchResults {
    let count = |target: Outcome| games.iter().filter(|g| g.outcome == target).count();
    let x_wins = count(Outcome::Won(Mark::X));
    let o_wins = count(Outcome::Won(Mark::O));
    let ties = count(Outcome::Tie);

    MatchResults {
        games,
        x_wins,
        o_wins,
        ties,
    }
}

// ============================================================================
// UTILITIES
// ============================================================================

/// Create RNG from seed or random
fn create_rng(seed: Option<u64>) -> ChaCha8Rng {
    match seed {
        Some(s) => ChaCha8Rng::seed_from_u64(s),
        None => ChaCha8Rng::from_entropy(),
    }
}

fn percent(part: usize, total: usize) -> f32 {
    if total > 0 {
        part as f32 / total as f32 * 100.0
    } else {
        0.0
    }
}

/// Print results as JSON
fn print_json_results(results: &MatchResults) -> Result<()> {
    println!("{}", json_results(results)?);
    Ok(())
}

/// Pretty JSON report of the match
fn json_results(results: &MatchResults) -> Result<String> {
    #[derive(serde::Serialize)]
    struct JsonGame {
        game_number: usize,
        outcome: Outcome,
        moves: Vec<usize>,
    }

    #[derive(serde::Serialize)]
    struct JsonOutput {
        total_games: usize,
        x_wins: usize,
        o_wins: usize,
        ties: usize,
        games: Vec<JsonGame>,
    }

    let output = JsonOutput {
        total_games: results.games.len(),
        x_wins: results.x_wins,
        o_wins: results.o_wins,
        ties: results.ties,
        games: results
            .games
            .iter()
            .map(|g| JsonGame {
                game_number: g.game_number,
                outcome: g.outcome,
                moves: g.moves.clone(),
            })
            .collect(),
    };

    serde_json::to_string_pretty(&output).context("Failed to serialize match results")
}

/// Print results as text
fn print_text_results(results: &MatchResults) {
    let total = results.games.len();

    println!("\n=== Match Results ===");
    println!("Total games: {}", total);
    println!("X wins: {} ({:.1}%)", results.x_wins, percent(results.x_wins, total));
    println!("O wins: {} ({:.1}%)", results.o_wins, percent(results.o_wins, total));
    println!("Ties:   {} ({:.1}%)", results.ties, percent(results.ties, total));
}
