//! Engine error type

use crate::rules::Outcome;

/// Errors surfaced at the engine boundary.
///
/// Search itself is total over well-formed boards; these cover caller
/// precondition violations and malformed textual input.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum EngineError {
    #[error("cell index {0} is out of range (expected 0-8)")]
    CellOutOfRange(usize),

    #[error("cell {0} is already occupied")]
    CellOccupied(usize),

    #[error("no empty cells remain on the board")]
    NoEmptyCells,

    #[error("game is already over: {0}")]
    GameAlreadyOver(Outcome),

    #[error("it is not the human player's turn")]
    NotYourTurn,

    #[error("invalid board: {0}")]
    ParseBoard(String),

    #[error("unknown difficulty '{0}' (expected 'easy' or 'expert')")]
    ParseDifficulty(String),

    #[error("unknown mark '{0}' (expected 'X' or 'O')")]
    ParseMark(String),
}
