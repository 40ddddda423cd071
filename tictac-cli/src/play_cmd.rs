//! Play command - interactive terminal game
//!
//! The terminal is the presentation layer: it renders the session's board,
//! reads cell choices and shows the end-of-game message. All game rules
//! live in `GameSession`.

use std::io::{self, BufRead, Write};
use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Args;

use tictac_core::{Board, Difficulty, EngineError, GameSession, Opponent, SessionConfig, CELL_COUNT};

// ============================================================================
// COMMAND ARGUMENTS
// ============================================================================

#[derive(Args)]
pub struct PlayArgs {
    /// Session config JSON file (flags override it)
    #[arg(long, value_name = "FILE")]
    pub config: Option<PathBuf>,

    /// Computer strength: easy or expert
    #[arg(long)]
    pub difficulty: Option<Difficulty>,

    /// Two humans take turns instead of playing the computer
    #[arg(long)]
    pub two_player: bool,

    /// Your name, shown when you win
    #[arg(long)]
    pub name: Option<String>,

    /// Let minimax choose the computer's first move too
    #[arg(long)]
    pub no_opening_book: bool,
}

// ============================================================================
// ORCHESTRATION
// ============================================================================

/// Run play command
pub fn run(args: PlayArgs, seed: Option<u64>) -> Result<()> {
    let stdin = io::stdin();
    let stdout = io::stdout();
    let mut input = stdin.lock();
    let mut output = stdout.lock();

    let mut config = build_config(&args, seed)?;
    if config.player_name.is_none() {
        let name = prompt(&mut input, &mut output, "What's your name? ")?.unwrap_or_default();
        config = config.with_player_name(name);
    }

    tracing::info!(
        "Starting game: opponent={:?}, difficulty={}",
        config.opponent,
        config.difficulty
    );

    let mut session = GameSession::new(config);
    play_session(&mut session, &mut input, &mut output)
}

/// Merge the optional config file with command-line flags
fn build_config(args: &PlayArgs, seed: Option<u64>) -> Result<SessionConfig> {
    let mut config = match &args.config {
        Some(path) => SessionConfig::load(path)
            .with_context(|| format!("Failed to load session config: {}", path.display()))?,
        None => SessionConfig::default(),
    };

    if args.two_player {
        config.opponent = Opponent::Human;
    }
    if let Some(difficulty) = args.difficulty {
        config.difficulty = difficulty;
    }
    if let Some(name) = &args.name {
        config = config.with_player_name(name.as_str());
    }
    if let Some(seed) = seed {
        config.seed = Some(seed);
    }
    if args.no_opening_book {
        config.engine.use_opening_book = false;
    }

    Ok(config)
}

/// Game loop: render, read a cell, apply, repeat until quit or EOF
fn play_session<R: BufRead, W: Write>(
    session: &mut GameSession,
    input: &mut R,
    output: &mut W,
) -> Result<()> {
    loop {
        writeln!(output, "\n{}\n", render_board(session.board()))?;

        if let Some(message) = session.status_message() {
            writeln!(output, "{}", message)?;
            if let Some(line) = session.winning_line() {
                writeln!(
                    output,
                    "Winning line: {}-{}-{}",
                    line[0] + 1,
                    line[1] + 1,
                    line[2] + 1
                )?;
            }

            match prompt(input, output, "New game? [y/N] ")? {
                Some(answer) if answer.eq_ignore_ascii_case("y") => {}
                _ => return Ok(()),
            }
            match choose_players(session, input, output)? {
                Some((opponent, difficulty)) => {
                    session.new_game_with(opponent, difficulty);
                    continue;
                }
                None => return Ok(()),
            }
        }

        let question = format!("{} to move (1-9, q to quit): ", session.to_move());
        let answer = match prompt(input, output, &question)? {
            Some(answer) => answer,
            None => return Ok(()),
        };
        if answer.eq_ignore_ascii_case("q") {
            return Ok(());
        }

        let index = match parse_cell(&answer) {
            Some(index) => index,
            None => {
                writeln!(output, "Please enter a number from 1 to 9.")?;
                continue;
            }
        };

        match session.play(index) {
            Ok(_) => {}
            Err(EngineError::CellOccupied(_)) => {
                writeln!(output, "That square is taken.")?;
            }
            Err(e) => return Err(e).context("Failed to apply move"),
        }
    }
}

/// Ask for the next game's opponent and difficulty; `None` on EOF.
/// An empty answer keeps the previous choice.
fn choose_players<R: BufRead, W: Write>(
    session: &GameSession,
    input: &mut R,
    output: &mut W,
) -> Result<Option<(Opponent, Difficulty)>> {
    let previous = session.config();
    let default_answer = match previous.opponent {
        Opponent::Computer => "Y/n",
        Opponent::Human => "y/N",
    };

    let question = format!("Play the computer? [{}] ", default_answer);
    let opponent = match prompt(input, output, &question)? {
        None => return Ok(None),
        Some(answer) if answer.is_empty() => previous.opponent,
        Some(answer) if answer.eq_ignore_ascii_case("y") => Opponent::Computer,
        Some(_) => Opponent::Human,
    };
    if opponent == Opponent::Human {
        return Ok(Some((opponent, previous.difficulty)));
    }

    let question = format!("Difficulty, easy or expert [{}]: ", previous.difficulty);
    let difficulty = match prompt(input, output, &question)? {
        None => return Ok(None),
        Some(answer) if answer.is_empty() => previous.difficulty,
        Some(answer) => match answer.parse::<Difficulty>() {
            Ok(difficulty) => difficulty,
            Err(_) => {
                writeln!(output, "Unknown difficulty, keeping {}.", previous.difficulty)?;
                previous.difficulty
            }
        },
    };

    Ok(Some((opponent, difficulty)))
}

// ============================================================================
// UTILITIES
// ============================================================================

/// Print `question` and read one trimmed line; `None` on EOF
fn prompt<R: BufRead, W: Write>(input: &mut R, output: &mut W, question: &str) -> Result<Option<String>> {
    write!(output, "{}", question)?;
    output.flush()?;

    let mut line = String::new();
    let read = input.read_line(&mut line).context("Failed to read input")?;
    if read == 0 {
        return Ok(None);
    }
    Ok(Some(line.trim().to_string()))
}

/// 1-based cell number to board index
fn parse_cell(answer: &str) -> Option<usize> {
    let n: usize = answer.trim().parse().ok()?;
    (1..=CELL_COUNT).contains(&n).then(|| n - 1)
}

/// Board with cell numbers shown on empty squares
fn render_board(board: &Board) -> String {
    let symbol = |i: usize| match board.get(i) {
        Some(mark) => mark.symbol(),
        None => char::from_digit(i as u32 + 1, 10).unwrap_or('?'),
    };

    (0..3)
        .map(|row| {
            let base = row * 3;
            format!(" {} | {} | {} ", symbol(base), symbol(base + 1), symbol(base + 2))
        })
        .collect::<Vec<_>>()
        .join("\n---+---+---\n")
}
