//! Tic-tac-toe core - Game engine and AI
//!
//! This crate provides the core game logic:
//! - Board storage (3x3, row-major cell indices 0-8)
//! - Win/tie detection and move generation
//! - Opening book for the computer's first move
//! - Exhaustive minimax search and a uniform random mover
//! - Match session state for human-vs-human and human-vs-computer games

pub mod board;
pub mod rules;
pub mod opening;
pub mod ai;
pub mod config;
pub mod session;
pub mod error;

// Re-exports for convenient access
pub use board::{Board, Mark, CELL_COUNT};
pub use rules::{empty_cells, is_full, is_winning_for, outcome, winning_line, Line, Outcome, LINES};
pub use opening::{opening_move, OPENING_MOVES};
pub use ai::{play_game, ComputerPlayer, MinimaxEngine, RandomMover, SearchMove, LOSS_SCORE, TIE_SCORE, WIN_SCORE};
pub use config::{Difficulty, EngineConfig, Opponent, SessionConfig};
pub use session::{GameSession, COMPUTER_MARK, HUMAN_MARK};
pub use error::EngineError;
