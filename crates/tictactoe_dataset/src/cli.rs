//! Command-line interface for tictactoe_dataset.

use clap::{Args, Parser, Subcommand};
use std::path::PathBuf;
use tictactoe_oracle::{RecordLayout, StateFilter, Strategy};

/// Tic-tac-toe dataset generator - perfect-play labels for every legal position
#[derive(Parser, Debug)]
#[command(name = "tictactoe_dataset")]
#[command(about = "Perfect-play labeled tic-tac-toe datasets", long_about = None)]
#[command(version)]
pub struct Cli {
    /// Subcommand to run
    #[command(subcommand)]
    pub command: Command,
}

/// Available commands
#[derive(Subcommand, Debug)]
pub enum Command {
    /// Enumerate, solve and write the dataset
    Generate(GenerateArgs),

    /// Solve a single position
    Solve {
        /// Nine cells of x, o or b in row-major order (commas and spaces ignored)
        board: String,

        /// Print the result as JSON
        #[arg(long)]
        json: bool,
    },

    /// Cross-check enumeration and solver against the reference minimax
    Verify,
}

/// Options for `generate`. Anything given here overrides the config file.
#[derive(Args, Debug, Clone, Default)]
pub struct GenerateArgs {
    /// Path to a TOML generator config
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Output file (defaults to a name derived from --states)
    #[arg(short, long)]
    pub output: Option<PathBuf>,

    /// How legal boards are found: brute-force or move-tree
    #[arg(long)]
    pub strategy: Option<Strategy>,

    /// Which positions to write: all, terminal or non-terminal
    #[arg(long)]
    pub states: Option<StateFilter>,

    /// Record layout: labeled or annotated
    #[arg(long)]
    pub layout: Option<RecordLayout>,

    /// Solve one subtree per opening move on the rayon pool
    #[arg(long)]
    pub parallel: bool,
}
