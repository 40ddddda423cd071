//! Opening book for the computer's first move

use crate::board::{Board, CELL_COUNT};

/// Preferred first moves: center, then the four corners
pub const OPENING_MOVES: [usize; 5] = [4, 0, 2, 6, 8];

/// Book move for the computer's first turn.
///
/// Fires only while at most one mark is on the board. Returns the first
/// empty cell from `OPENING_MOVES`.
pub fn opening_move(board: &Board) -> Option<usize> {
    if board.empty_count() < CELL_COUNT - 1 {
        return None;
    }
    OPENING_MOVES.iter().copied().find(|&i| board.is_empty_at(i))
}
