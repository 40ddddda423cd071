//! Per-game match session

use crate::ai::ComputerPlayer;
use crate::board::{Board, Mark};
use crate::config::{Difficulty, Opponent, SessionConfig};
use crate::error::EngineError;
use crate::rules::{is_full, is_winning_for, winning_line, Line, Outcome};

/// Mark played by the human who starts the game
pub const HUMAN_MARK: Mark = Mark::X;

/// Mark played by the computer opponent
pub const COMPUTER_MARK: Mark = Mark::O;

/// One game of tic-tac-toe (reset with `new_game`).
///
/// X always moves first. With a computer opponent, each human move is
/// answered by the computer inside the same `play` call.
#[derive(Clone, Debug)]
pub struct GameSession {
    config: SessionConfig,
    board: Board,
    to_move: Mark,
    outcome: Outcome,
    history: Vec<(Mark, usize)>,
    computer: Option<ComputerPlayer>,
}

impl GameSession {
    pub fn new(config: SessionConfig) -> Self {
        Self {
            computer: build_computer(&config),
            config,
            board: Board::new(),
            to_move: HUMAN_MARK,
            outcome: Outcome::InProgress,
            history: Vec::new(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    /// Mark whose turn it is
    pub fn to_move(&self) -> Mark {
        self.to_move
    }

    pub fn outcome(&self) -> Outcome {
        self.outcome
    }

    /// Moves of the current game, in order
    pub fn history(&self) -> &[(Mark, usize)] {
        &self.history
    }

    pub fn player_name(&self) -> Option<&str> {
        self.config.player_name.as_deref()
    }

    pub fn has_computer(&self) -> bool {
        self.computer.is_some()
    }

    /// Play `index` for the side to move, then let the computer answer.
    ///
    /// Returns the outcome after the turn. A rejected move leaves the
    /// session unchanged.
    pub fn play(&mut self, index: usize) -> Result<Outcome, EngineError> {
        if self.outcome.is_over() {
            return Err(EngineError::GameAlreadyOver(self.outcome));
        }
        if self.computer.is_some() && self.to_move != HUMAN_MARK {
            return Err(EngineError::NotYourTurn);
        }

        self.apply(index)?;

        if !self.outcome.is_over() {
            if let Some(computer) = self.computer.as_mut() {
                let reply = computer.choose_move(&self.board)?;
                self.apply(reply)?;
            }
        }

        Ok(self.outcome)
    }

    /// Clear the board for another game with the same players
    pub fn new_game(&mut self) {
        self.board.clear();
        self.to_move = HUMAN_MARK;
        self.outcome = Outcome::InProgress;
        self.history.clear();
        tracing::debug!("New game started");
    }

    /// Start another game against a newly chosen opponent and difficulty.
    ///
    /// Keeps the player name and engine options. A computer opponent gets a
    /// fresh mover seeded from the session config.
    pub fn new_game_with(&mut self, opponent: Opponent, difficulty: Difficulty) {
        self.config.opponent = opponent;
        self.config.difficulty = difficulty;
        self.computer = build_computer(&self.config);
        tracing::info!("Next game: opponent={:?}, difficulty={}", opponent, difficulty);
        self.new_game();
    }

    /// End-of-game message, `None` while the game is running
    pub fn status_message(&self) -> Option<String> {
        match self.outcome {
            Outcome::InProgress => None,
            Outcome::Tie => Some("It's a Tie!".to_string()),
            Outcome::Won(mark) => match self.player_name() {
                Some(name) if mark == HUMAN_MARK => Some(format!("{} You Won!", name)),
                _ => Some("Winner!".to_string()),
            },
        }
    }

    /// Completed line of the finished game
    pub fn winning_line(&self) -> Option<Line> {
        self.outcome
            .winner()
            .and_then(|mark| winning_line(&self.board, mark))
    }

    /// Place the mover's mark, then check for a win and a full board
    fn apply(&mut self, index: usize) -> Result<(), EngineError> {
        let mover = self.to_move;
        self.board.place(index, mover)?;
        self.history.push((mover, index));

        if is_winning_for(&self.board, mover) {
            self.outcome = Outcome::Won(mover);
        } else if is_full(&self.board) {
            self.outcome = Outcome::Tie;
        } else {
            self.to_move = mover.opponent();
            return Ok(());
        }

        tracing::info!("Game over after {} moves: {}", self.history.len(), self.outcome);
        Ok(())
    }
}

fn build_computer(config: &SessionConfig) -> Option<ComputerPlayer> {
    match config.opponent {
        Opponent::Computer => Some(ComputerPlayer::with_options(
            COMPUTER_MARK,
            config.difficulty,
            config.engine.clone(),
            config.seed,
        )),
        Opponent::Human => None,
    }
}
