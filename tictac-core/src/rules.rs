//! Terminal-state detection and move generation

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::board::{Board, Mark, CELL_COUNT};

/// Three cell indices forming a row, column or diagonal
pub type Line = [usize; 3];

/// The eight winning lines: rows, then columns, then diagonals
pub const LINES: [Line; 8] = [
    [0, 1, 2],
    [3, 4, 5],
    [6, 7, 8],
    [0, 3, 6],
    [1, 4, 7],
    [2, 5, 8],
    [0, 4, 8],
    [2, 4, 6],
];

/// Game outcome
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub enum Outcome {
    InProgress,
    Won(Mark),
    Tie,
}

impl Outcome {
    pub fn is_over(self) -> bool {
        self != Outcome::InProgress
    }

    pub fn winner(self) -> Option<Mark> {
        match self {
            Outcome::Won(mark) => Some(mark),
            _ => None,
        }
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::InProgress => write!(f, "in progress"),
            Outcome::Won(mark) => write!(f, "{} won", mark),
            Outcome::Tie => write!(f, "tie"),
        }
    }
}

/// First line (in `LINES` order) fully held by `mark`
pub fn winning_line(board: &Board, mark: Mark) -> Option<Line> {
    LINES
        .iter()
        .copied()
        .find(|line| line.iter().all(|&i| board.get(i) == Some(mark)))
}

pub fn is_winning_for(board: &Board, mark: Mark) -> bool {
    winning_line(board, mark).is_some()
}

/// True when no cell is empty
pub fn is_full(board: &Board) -> bool {
    board.cells().iter().all(|c| c.is_some())
}

/// Empty cell indices in ascending order
pub fn empty_cells(board: &Board) -> Vec<usize> {
    (0..CELL_COUNT).filter(|&i| board.is_empty_at(i)).collect()
}

/// Combined terminal test: a completed line wins, otherwise a full board ties
pub fn outcome(board: &Board) -> Outcome {
    if is_winning_for(board, Mark::X) {
        Outcome::Won(Mark::X)
    } else if is_winning_for(board, Mark::O) {
        Outcome::Won(Mark::O)
    } else if is_full(board) {
        Outcome::Tie
    } else {
        Outcome::InProgress
    }
}
