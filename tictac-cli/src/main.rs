//! Tic-tac-toe CLI - Command-line interface
//!
//! Commands:
//! - play: Interactive game against a friend or the computer
//! - match: Computer self-play with aggregate results
//! - best-move: Analyze a single position

mod best_move_cmd;
mod match_cmd;
mod play_cmd;

use clap::{Parser, Subcommand};
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(name = "tictac")]
#[command(about = "Tic-tac-toe with an unbeatable minimax opponent")]
struct Cli {
    /// Random seed for reproducible easy-mode play
    #[arg(long, global = true)]
    seed: Option<u64>,

    /// Log engine decisions (overridden by RUST_LOG)
    #[arg(long, short, global = true)]
    verbose: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Play an interactive game in the terminal
    Play(play_cmd::PlayArgs),
    /// Let two computer players play each other
    Match(match_cmd::MatchArgs),
    /// Show the computer's move for a given board
    BestMove(best_move_cmd::BestMoveArgs),
}

fn init_logging(verbose: bool) {
    let default_level = if verbose { "debug" } else { "info" };
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
    tracing_subscriber::fmt()
        .with_env_filter(filter)
        .with_writer(std::io::stderr)
        .init();
}

fn main() -> anyhow::Result<()> {
    let cli = Cli::parse();
    init_logging(cli.verbose);

    match cli.command {
        Commands::Play(args) => play_cmd::run(args, cli.seed),
        Commands::Match(args) => match_cmd::run(args, cli.seed),
        Commands::BestMove(args) => best_move_cmd::run(args, cli.seed),
    }
}
