//! Computer players: exhaustive minimax and a uniform random mover

use rand::prelude::*;
use rand_chacha::ChaCha8Rng;
use serde::{Deserialize, Serialize};

use crate::board::{Board, Mark};
use crate::config::{Difficulty, EngineConfig};
use crate::error::EngineError;
use crate::opening::opening_move;
use crate::rules::{empty_cells, is_winning_for, outcome, Outcome};

// ============================================================================
// CONSTANTS
// ============================================================================

/// Score of a position the computer has won
pub const WIN_SCORE: i32 = 10;

/// Score of a position the human has won
pub const LOSS_SCORE: i32 = -10;

/// Score of a full board with no winner
pub const TIE_SCORE: i32 = 0;

// ============================================================================
// SEARCH RESULT
// ============================================================================

/// A candidate cell and the score it leads to.
///
/// Scores are from the computer's point of view. For opening-book moves
/// the score is `TIE_SCORE` and carries no meaning.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct SearchMove {
    pub index: usize,
    pub score: i32,
}

/// Reject boards that are already decided or have no cell left
fn ensure_playable(board: &Board) -> Result<(), EngineError> {
    match outcome(board) {
        Outcome::Won(mark) => Err(EngineError::GameAlreadyOver(Outcome::Won(mark))),
        Outcome::Tie => Err(EngineError::NoEmptyCells),
        Outcome::InProgress => Ok(()),
    }
}

/// Pick the strictly best candidate, keeping the earliest on ties
fn select(candidates: impl IntoIterator<Item = SearchMove>, maximize: bool) -> Option<SearchMove> {
    let mut best: Option<SearchMove> = None;
    for mv in candidates {
        let better = match best {
            None => true,
            Some(b) if maximize => mv.score > b.score,
            Some(b) => mv.score < b.score,
        };
        if better {
            best = Some(mv);
        }
    }
    best
}

// ============================================================================
// MINIMAX ENGINE
// ============================================================================

/// Full-depth minimax player.
///
/// Holds no state between calls: every `best_move` is a pure function of
/// the board and mover passed in.
#[derive(Clone, Debug)]
pub struct MinimaxEngine {
    computer: Mark,
    config: EngineConfig,
}

impl MinimaxEngine {
    /// Engine scoring from `computer`'s point of view
    pub fn new(computer: Mark) -> Self {
        Self::with_config(computer, EngineConfig::default())
    }

    pub fn with_config(computer: Mark, config: EngineConfig) -> Self {
        Self { computer, config }
    }

    pub fn computer(&self) -> Mark {
        self.computer
    }

    pub fn human(&self) -> Mark {
        self.computer.opponent()
    }

    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// Best move for `mover` on a non-terminal board.
    ///
    /// The computer maximizes and the human minimizes. Ties go to the
    /// lowest cell index.
    pub fn best_move(&self, board: &Board, mover: Mark) -> Result<SearchMove, EngineError> {
        ensure_playable(board)?;

        if self.config.use_opening_book {
            if let Some(index) = opening_move(board) {
                tracing::debug!("{} opening book move: {}", mover, index);
                return Ok(SearchMove {
                    index,
                    score: TIE_SCORE,
                });
            }
        }

        let candidates = self.score_candidates(board, mover);
        let best = select(candidates, mover == self.computer).ok_or(EngineError::NoEmptyCells)?;

        tracing::debug!(
            "{} minimax move: {} (score {})",
            mover,
            best.index,
            best.score
        );
        Ok(best)
    }

    /// Score every empty cell for `mover`, in ascending index order
    #[cfg(not(feature = "parallel"))]
    fn score_candidates(&self, board: &Board, mover: Mark) -> Vec<SearchMove> {
        empty_cells(board)
            .into_iter()
            .map(|index| self.score_candidate(board, mover, index))
            .collect()
    }

    /// Score every empty cell for `mover`, in ascending index order.
    /// Each branch searches its own board copy.
    #[cfg(feature = "parallel")]
    fn score_candidates(&self, board: &Board, mover: Mark) -> Vec<SearchMove> {
        use rayon::prelude::*;

        empty_cells(board)
            .into_par_iter()
            .map(|index| self.score_candidate(board, mover, index))
            .collect()
    }

    fn score_candidate(&self, board: &Board, mover: Mark, index: usize) -> SearchMove {
        let child = board.with_mark(index, mover);
        SearchMove {
            index,
            score: self.minimax(&child, mover.opponent()),
        }
    }

    /// Value of `board` with `mover` to play. Scores are not discounted by depth.
    fn minimax(&self, board: &Board, mover: Mark) -> i32 {
        if is_winning_for(board, self.human()) {
            return LOSS_SCORE;
        }
        if is_winning_for(board, self.computer) {
            return WIN_SCORE;
        }

        let spots = empty_cells(board);
        if spots.is_empty() {
            return TIE_SCORE;
        }

        let maximize = mover == self.computer;
        let scores = spots
            .into_iter()
            .map(|index| self.minimax(&board.with_mark(index, mover), mover.opponent()));

        let best = if maximize { scores.max() } else { scores.min() };
        best.unwrap_or(TIE_SCORE)
    }
}

// ============================================================================
// RANDOM MOVER
// ============================================================================

/// Uniform random legal move
#[derive(Clone, Debug)]
pub struct RandomMover {
    rng: ChaCha8Rng,
}

impl RandomMover {
    pub fn new() -> Self {
        Self {
            rng: ChaCha8Rng::from_entropy(),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            rng: ChaCha8Rng::seed_from_u64(seed),
        }
    }

    /// Create from seed or entropy
    pub fn from_seed_option(seed: Option<u64>) -> Self {
        match seed {
            Some(s) => Self::with_seed(s),
            None => Self::new(),
        }
    }

    /// Uniformly chosen empty cell
    pub fn random_move(&mut self, board: &Board) -> Result<usize, EngineError> {
        ensure_playable(board)?;
        let spots = empty_cells(board);
        let index = *spots.choose(&mut self.rng).ok_or(EngineError::NoEmptyCells)?;
        tracing::trace!("random move: {} of {:?}", index, spots);
        Ok(index)
    }
}

impl Default for RandomMover {
    fn default() -> Self {
        Self::new()
    }
}

// ============================================================================
// COMPUTER PLAYER
// ============================================================================

/// Computer opponent: routes every turn by difficulty
#[derive(Clone, Debug)]
pub struct ComputerPlayer {
    difficulty: Difficulty,
    engine: MinimaxEngine,
    random: RandomMover,
}

impl ComputerPlayer {
    pub fn new(mark: Mark, difficulty: Difficulty) -> Self {
        Self::with_options(mark, difficulty, EngineConfig::default(), None)
    }

    pub fn with_options(
        mark: Mark,
        difficulty: Difficulty,
        engine: EngineConfig,
        seed: Option<u64>,
    ) -> Self {
        Self {
            difficulty,
            engine: MinimaxEngine::with_config(mark, engine),
            random: RandomMover::from_seed_option(seed),
        }
    }

    pub fn mark(&self) -> Mark {
        self.engine.computer()
    }

    pub fn difficulty(&self) -> Difficulty {
        self.difficulty
    }

    /// Cell to play on `board`
    pub fn choose_move(&mut self, board: &Board) -> Result<usize, EngineError> {
        match self.difficulty {
            Difficulty::Expert => Ok(self.engine.best_move(board, self.mark())?.index),
            Difficulty::Easy => self.random.random_move(board),
        }
    }
}

/// Play a complete game between two computer players, `x` moving first.
///
/// Returns the final board and the cells played in order.
pub fn play_game(
    x: &mut ComputerPlayer,
    o: &mut ComputerPlayer,
) -> Result<(Board, Vec<usize>), EngineError> {
    let mut board = Board::new();
    let mut history = Vec::new();
    let mut mover = Mark::X;

    while outcome(&board) == Outcome::InProgress {
        let player = if mover == Mark::X { &mut *x } else { &mut *o };
        let index = player.choose_move(&board)?;
        board.place(index, mover)?;
        history.push(index);
        mover = mover.opponent();
    }

    Ok((board, history))
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_board_takes_center() {
        let engine = MinimaxEngine::new(Mark::O);
        let mv = engine.best_move(&Board::new(), Mark::O).unwrap();
        assert_eq!(mv.index, 4);
    }

    #[test]
    fn test_reply_to_center_is_corner() {
        let engine = MinimaxEngine::new(Mark::O);
        let mv = engine.best_move(&board("....X...."), Mark::O).unwrap();
        assert_eq!(mv.index, 0);
    }

    #[test]
    fn test_without_book_reply_to_center_is_same_corner() {
        let config = EngineConfig {
            use_opening_book: false,
        };
        let engine = MinimaxEngine::with_config(Mark::O, config);
        let mv = engine.best_move(&board("....X...."), Mark::O).unwrap();
        assert_eq!(mv, SearchMove { index: 0, score: TIE_SCORE });
    }

    #[test]
    fn test_takes_immediate_win() {
        // O completes the right column; every other move lets X win
        let engine = MinimaxEngine::new(Mark::O);
        let mv = engine.best_move(&board("X.O XXO ..."), Mark::O).unwrap();
        assert_eq!(mv, SearchMove { index: 8, score: WIN_SCORE });
    }

    #[test]
    fn test_win_beats_block() {
        // O can win at 2 even though X threatens 5 and 2
        let engine = MinimaxEngine::new(Mark::O);
        let mv = engine.best_move(&board("OO. XX. X.."), Mark::O).unwrap();
        assert_eq!(mv, SearchMove { index: 2, score: WIN_SCORE });
    }

    #[test]
    fn test_blocks_threat() {
        let engine = MinimaxEngine::new(Mark::O);
        let mv = engine.best_move(&board("XX. .O. ..."), Mark::O).unwrap();
        assert_eq!(mv.index, 2);
        assert!(mv.score >= TIE_SCORE);
    }

    #[test]
    fn test_human_mover_minimizes() {
        let engine = MinimaxEngine::new(Mark::O);
        let mv = engine.best_move(&board("XX. .O. ..."), Mark::X).unwrap();
        assert_eq!(mv, SearchMove { index: 2, score: LOSS_SCORE });
    }

    #[test]
    fn test_best_move_is_deterministic() {
        let engine = MinimaxEngine::new(Mark::O);
        let b = board("X.. .O. ..X");
        let first = engine.best_move(&b, Mark::O).unwrap();
        let second = engine.best_move(&b, Mark::O).unwrap();
        assert_eq!(first, second);
        assert_eq!(b, board("X.. .O. ..X"));
    }

    #[test]
    fn test_rejects_terminal_boards() {
        let engine = MinimaxEngine::new(Mark::O);
        assert_eq!(
            engine.best_move(&board("XOX XOO OXX"), Mark::O),
            Err(EngineError::NoEmptyCells)
        );
        assert_eq!(
            engine.best_move(&board("XXX OO. ..."), Mark::O),
            Err(EngineError::GameAlreadyOver(Outcome::Won(Mark::X)))
        );
    }

    #[test]
    fn test_select_keeps_first_on_ties() {
        let moves = [
            SearchMove { index: 1, score: 0 },
            SearchMove { index: 3, score: 10 },
            SearchMove { index: 5, score: 10 },
            SearchMove { index: 7, score: -10 },
        ];
        assert_eq!(select(moves, true).map(|m| m.index), Some(3));
        assert_eq!(select(moves, false).map(|m| m.index), Some(7));
        assert_eq!(select(Vec::new(), true), None);
    }

    #[test]
    fn test_random_move_only_empty_cells() {
        let mut mover = RandomMover::with_seed(42);
        let b = board("X.O .X. O..");
        let empties = empty_cells(&b);
        for _ in 0..200 {
            let index = mover.random_move(&b).unwrap();
            assert!(empties.contains(&index));
            assert!(b.is_empty_at(index));
        }
    }

    #[test]
    fn test_random_move_reaches_every_empty_cell() {
        let mut mover = RandomMover::with_seed(7);
        let b = board("X...O...X");
        let mut seen = [false; 9];
        for _ in 0..500 {
            seen[mover.random_move(&b).unwrap()] = true;
        }
        for index in empty_cells(&b) {
            assert!(seen[index], "cell {} never chosen", index);
        }
    }

    #[test]
    fn test_random_move_seeded_is_reproducible() {
        let b = Board::new();
        let mut a = RandomMover::with_seed(99);
        let mut c = RandomMover::with_seed(99);
        let left: Vec<_> = (0..20).map(|_| a.random_move(&b).unwrap()).collect();
        let right: Vec<_> = (0..20).map(|_| c.random_move(&b).unwrap()).collect();
        assert_eq!(left, right);
    }

    #[test]
    fn test_easy_player_skips_opening_book() {
        let mut first_moves = std::collections::BTreeSet::new();
        for seed in 0..50 {
            let mut easy = ComputerPlayer::with_options(
                Mark::O,
                Difficulty::Easy,
                EngineConfig::default(),
                Some(seed),
            );
            first_moves.insert(easy.choose_move(&Board::new()).unwrap());
        }
        assert!(first_moves.len() > 1, "{:?}", first_moves);
        assert!(first_moves.iter().any(|&index| index != 4));
    }

    #[test]
    fn test_random_move_full_board_fails() {
        let mut mover = RandomMover::with_seed(1);
        assert_eq!(
            mover.random_move(&board("XOX XOO OXX")),
            Err(EngineError::NoEmptyCells)
        );
    }

    #[test]
    fn test_expert_self_play_ties() {
        let mut x = ComputerPlayer::new(Mark::X, Difficulty::Expert);
        let mut o = ComputerPlayer::new(Mark::O, Difficulty::Expert);
        let (final_board, history) = play_game(&mut x, &mut o).unwrap();
        assert_eq!(outcome(&final_board), Outcome::Tie);
        assert_eq!(history.len(), 9);
        assert_eq!(&history[..2], &[4, 0]);
    }

    #[test]
    fn test_expert_never_loses_to_easy() {
        for seed in 0..20 {
            let mut x = ComputerPlayer::with_options(
                Mark::X,
                Difficulty::Easy,
                EngineConfig::default(),
                Some(seed),
            );
            let mut o = ComputerPlayer::new(Mark::O, Difficulty::Expert);
            let (final_board, _) = play_game(&mut x, &mut o).unwrap();
            assert_ne!(outcome(&final_board), Outcome::Won(Mark::X), "seed {}", seed);
        }
    }
}
