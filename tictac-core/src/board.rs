//! 3x3 board storage with row-major cell indices

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::error::EngineError;

/// Number of cells on the board
pub const CELL_COUNT: usize = 9;

/// Board side length
pub const SIDE: usize = 3;

/// Player mark
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Mark {
    X,
    O,
}

impl Mark {
    pub fn opponent(self) -> Self {
        match self {
            Mark::X => Mark::O,
            Mark::O => Mark::X,
        }
    }

    pub fn symbol(self) -> char {
        match self {
            Mark::X => 'X',
            Mark::O => 'O',
        }
    }
}

impl fmt::Display for Mark {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.symbol())
    }
}

impl FromStr for Mark {
    type Err = EngineError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "X" | "x" => Ok(Mark::X),
            "O" | "o" => Ok(Mark::O),
            other => Err(EngineError::ParseMark(other.to_string())),
        }
    }
}

/// Board state (copy to branch)
///
/// Index 0-8 maps to the grid row by row:
///
/// ```text
/// 0 | 1 | 2
/// 3 | 4 | 5
/// 6 | 7 | 8
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Option<Mark>; CELL_COUNT],
}

impl Board {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a board from a full cell array
    pub fn from_cells(cells: [Option<Mark>; CELL_COUNT]) -> Self {
        Self { cells }
    }

    pub fn cells(&self) -> &[Option<Mark>; CELL_COUNT] {
        &self.cells
    }

    /// Mark at `index`, `None` for an empty cell or an out-of-range index
    pub fn get(&self, index: usize) -> Option<Mark> {
        self.cells.get(index).copied().flatten()
    }

    pub fn is_empty_at(&self, index: usize) -> bool {
        index < CELL_COUNT && self.cells[index].is_none()
    }

    /// Place `mark` on an empty cell
    pub fn place(&mut self, index: usize, mark: Mark) -> Result<(), EngineError> {
        match self.cells.get(index) {
            None => Err(EngineError::CellOutOfRange(index)),
            Some(Some(_)) => Err(EngineError::CellOccupied(index)),
            Some(None) => {
                self.cells[index] = Some(mark);
                Ok(())
            }
        }
    }

    /// Copy of this board with `mark` written at `index`.
    ///
    /// The caller guarantees `index` is an empty in-range cell.
    pub fn with_mark(&self, index: usize, mark: Mark) -> Board {
        debug_assert!(self.is_empty_at(index), "cell {} is not empty", index);
        let mut next = *self;
        next.cells[index] = Some(mark);
        next
    }

    pub fn clear(&mut self) {
        self.cells = [None; CELL_COUNT];
    }

    pub fn mark_count(&self, mark: Mark) -> usize {
        self.cells.iter().filter(|&&c| c == Some(mark)).count()
    }

    pub fn empty_count(&self) -> usize {
        self.cells.iter().filter(|c| c.is_none()).count()
    }

    pub fn occupied_count(&self) -> usize {
        CELL_COUNT - self.empty_count()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..SIDE {
            let cell = |col: usize| match self.cells[row * SIDE + col] {
                Some(mark) => mark.symbol(),
                None => '.',
            };
            write!(f, " {} | {} | {} ", cell(0), cell(1), cell(2))?;
            if row + 1 < SIDE {
                writeln!(f)?;
                writeln!(f, "---+---+---")?;
            }
        }
        Ok(())
    }
}

impl FromStr for Board {
    type Err = EngineError;

    /// Parse nine cells of `X`, `O` or `.`/`-`/`_` (empty).
    /// Whitespace and `|`/`/` row separators are ignored.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let mut cells = [None; CELL_COUNT];
        let mut count = 0;

        for ch in s.chars() {
            let cell = match ch {
                'X' | 'x' => Some(Mark::X),
                'O' | 'o' => Some(Mark::O),
                '.' | '-' | '_' => None,
                c if c.is_whitespace() || c == '|' || c == '/' => continue,
                c => {
                    return Err(EngineError::ParseBoard(format!(
                        "unexpected character '{}'",
                        c
                    )))
                }
            };
            if count == CELL_COUNT {
                return Err(EngineError::ParseBoard(format!(
                    "more than {} cells",
                    CELL_COUNT
                )));
            }
            cells[count] = cell;
            count += 1;
        }

        if count != CELL_COUNT {
            return Err(EngineError::ParseBoard(format!(
                "expected {} cells, found {}",
                CELL_COUNT, count
            )));
        }

        Ok(Board { cells })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_board_is_empty() {
        let board = Board::new();
        assert_eq!(board.empty_count(), 9);
        assert_eq!(board.occupied_count(), 0);
        assert!((0..9).all(|i| board.is_empty_at(i)));
    }

    #[test]
    fn test_place_rejects_occupied_and_out_of_range() {
        let mut board = Board::new();
        board.place(4, Mark::X).unwrap();
        assert_eq!(board.get(4), Some(Mark::X));
        assert_eq!(board.place(4, Mark::O), Err(EngineError::CellOccupied(4)));
        assert_eq!(board.place(9, Mark::O), Err(EngineError::CellOutOfRange(9)));
        // Failed placements leave the board untouched
        assert_eq!(board.mark_count(Mark::O), 0);
    }

    #[test]
    fn test_with_mark_leaves_original() {
        let board = Board::new();
        let next = board.with_mark(0, Mark::O);
        assert_eq!(board.get(0), None);
        assert_eq!(next.get(0), Some(Mark::O));
    }

    #[test]
    fn test_parse_board() {
        let board: Board = "X.O / .X. / ..O".parse().unwrap();
        assert_eq!(board.get(0), Some(Mark::X));
        assert_eq!(board.get(2), Some(Mark::O));
        assert_eq!(board.get(4), Some(Mark::X));
        assert_eq!(board.get(8), Some(Mark::O));
        assert_eq!(board.empty_count(), 5);
    }

    #[test]
    fn test_parse_board_errors() {
        assert!(matches!("X.O".parse::<Board>(), Err(EngineError::ParseBoard(_))));
        assert!(matches!("XOXOXOXOXO".parse::<Board>(), Err(EngineError::ParseBoard(_))));
        assert!(matches!("X.O..Z...".parse::<Board>(), Err(EngineError::ParseBoard(_))));
    }

    #[test]
    fn test_display_round_trips_through_parse() {
        let board: Board = "XO.......".parse().unwrap();
        let text = board.to_string();
        assert!(text.starts_with(" X | O | . "));
        let reparsed: Board = text.replace("---+---+---", "").parse().unwrap();
        assert_eq!(reparsed, board);
    }

    #[test]
    fn test_mark_parse_and_opponent() {
        assert_eq!("x".parse::<Mark>().unwrap(), Mark::X);
        assert_eq!("O".parse::<Mark>().unwrap(), Mark::O);
        assert!("Q".parse::<Mark>().is_err());
        assert_eq!(Mark::X.opponent(), Mark::O);
        assert_eq!(Mark::O.opponent(), Mark::X);
    }
}
