//! Best-move command - analyze a single position

use anyhow::{Context, Result};
use clap::Args;
use serde::Serialize;

use tictac_core::{Board, Difficulty, EngineConfig, Mark, MinimaxEngine, RandomMover};

#[derive(Args)]
pub struct BestMoveArgs {
    /// Board as nine cells of X, O or '.', row by row (e.g. "X.O/.X./...")
    #[arg(long)]
    pub board: String,

    /// Mark to move
    #[arg(long)]
    pub mover: Mark,

    /// Mark the engine scores for (defaults to the mover)
    #[arg(long)]
    pub computer: Option<Mark>,

    /// expert runs minimax, easy picks a random empty cell
    #[arg(long, default_value = "expert")]
    pub difficulty: Difficulty,

    /// Let minimax choose first moves too
    #[arg(long)]
    pub no_opening_book: bool,

    /// Output as JSON
    #[arg(long)]
    pub json: bool,
}

/// Chosen move, ready for printing
#[derive(Debug, PartialEq, Serialize)]
struct Analysis {
    mover: Mark,
    difficulty: Difficulty,
    index: usize,
    /// Minimax score from the computer's side; absent for random picks
    score: Option<i32>,
}

pub fn run(args: BestMoveArgs, seed: Option<u64>) -> Result<()> {
    let analysis = analyze(&args, seed)?;

    if args.json {
        println!("{}", serde_json::to_string_pretty(&analysis)?);
    } else {
        match analysis.score {
            Some(score) => println!(
                "Best move for {}: {} (score {})",
                analysis.mover, analysis.index, score
            ),
            None => println!("Random move for {}: {}", analysis.mover, analysis.index),
        }
    }

    Ok(())
}

fn analyze(args: &BestMoveArgs, seed: Option<u64>) -> Result<Analysis> {
    let board: Board = args
        .board
        .parse()
        .with_context(|| format!("Failed to parse board '{}'", args.board))?;

    let (index, score) = match args.difficulty {
        Difficulty::Expert => {
            let config = EngineConfig {
                use_opening_book: !args.no_opening_book,
            };
            let engine = MinimaxEngine::with_config(args.computer.unwrap_or(args.mover), config);
            let mv = engine
                .best_move(&board, args.mover)
                .context("No move available")?;
            (mv.index, Some(mv.score))
        }
        Difficulty::Easy => {
            let index = RandomMover::from_seed_option(seed)
                .random_move(&board)
                .context("No move available")?;
            (index, None)
        }
    };

    Ok(Analysis {
        mover: args.mover,
        difficulty: args.difficulty,
        index,
        score,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(board: &str, mover: Mark, difficulty: Difficulty) -> BestMoveArgs {
        BestMoveArgs {
            board: board.to_string(),
            mover,
            computer: None,
            difficulty,
            no_opening_book: false,
            json: false,
        }
    }

    #[test]
    fn test_expert_finds_win() {
        let analysis = analyze(&args("X.O/XXO/...", Mark::O, Difficulty::Expert), None).unwrap();
        assert_eq!(analysis.index, 8);
        assert_eq!(analysis.score, Some(10));
    }

    #[test]
    fn test_easy_picks_empty_cell() {
        let analysis = analyze(&args("XO./...../", Mark::X, Difficulty::Easy), Some(4));
        // Only 8 cells given
        assert!(analysis.is_err());

        let analysis = analyze(&args("XO./.../...", Mark::X, Difficulty::Easy), Some(4)).unwrap();
        assert!(analysis.index >= 2);
        assert_eq!(analysis.score, None);
    }

    #[test]
    fn test_finished_board_is_an_error() {
        let err = analyze(&args("XXX/OO./...", Mark::O, Difficulty::Expert), None).unwrap_err();
        assert!(err.to_string().contains("No move available"));
    }
}
