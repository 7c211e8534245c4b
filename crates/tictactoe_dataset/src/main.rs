//! Tic-tac-toe dataset generator
//!
//! Enumerates every legal position, labels it with its perfect-play outcome
//! and writes the result as a comma-separated text dataset.

#![warn(missing_docs)]

mod cli;
mod config;
mod verify;

use anyhow::{Result, bail};
use clap::Parser;
use cli::{Cli, Command, GenerateArgs};
use config::GeneratorConfig;
use serde::Serialize;
use tictactoe_oracle::{
    Board, Label, LabeledState, Player, Position, Solver, Strategy, TerminalOutcome, enumerate,
    enumerate_parallel, legality_violations, score::Score, write_dataset,
};
use tracing::{info, instrument, warn};
use tracing_subscriber::EnvFilter;

fn main() -> Result<()> {
    // Load .env file
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();

    match cli.command {
        Command::Generate(args) => run_generate(args),
        Command::Solve { board, json } => run_solve(&board, json),
        Command::Verify => verify::run_verify(),
    }
}

/// Enumerate, solve and write the dataset
#[instrument(skip(args))]
fn run_generate(args: GenerateArgs) -> Result<()> {
    let config = GeneratorConfig::resolve(&args)?;
    info!(?config, "Starting dataset generation");

    let states = if *config.parallel() {
        if *config.strategy() == Strategy::BruteForce {
            warn!("--parallel walks the move tree; ignoring brute-force strategy");
        }
        enumerate_parallel()
    } else {
        let mut solver = Solver::new();
        let states = enumerate(*config.strategy(), &mut solver);
        let stats = solver.cache().stats();
        info!(
            entries = solver.cache().len(),
            lookups = stats.lookups,
            hits = stats.hits,
            hit_rate = stats.hit_rate(),
            nodes = solver.nodes_visited(),
            "Solver cache statistics"
        );
        states
    };

    let path = config.output_path();
    let summary = write_dataset(&path, &states, config.dataset_options())?;
    info!(
        path = %path.display(),
        records = summary.records,
        terminal = summary.terminal,
        non_terminal = summary.non_terminal,
        "Dataset generation complete"
    );
    Ok(())
}

/// Result of `solve`, as printed.
#[derive(Debug, Serialize)]
struct SolveReport {
    board: String,
    outcome: TerminalOutcome,
    side_to_move: Option<Player>,
    score: Score,
    label: Label,
    best_move: Option<Position>,
    best_move_index: Option<usize>,
}

impl From<LabeledState> for SolveReport {
    fn from(state: LabeledState) -> Self {
        Self {
            board: state.board.to_string(),
            outcome: state.outcome,
            side_to_move: state.side_to_move,
            score: state.score(),
            label: Label::from_score(state.score()),
            best_move: state.solved.best_move,
            best_move_index: state.solved.best_move.map(Position::to_index),
        }
    }
}

/// Solve a single position and print the result
#[instrument]
fn run_solve(input: &str, json: bool) -> Result<()> {
    let board: Board = input.parse()?;

    let violations = legality_violations(&board);
    if !violations.is_empty() {
        let reasons: Vec<String> = violations.iter().map(ToString::to_string).collect();
        bail!("{board} is not reachable in legal play: {}", reasons.join("; "));
    }

    let report = SolveReport::from(LabeledState::label(board, &mut Solver::new()));

    if json {
        println!("{}", serde_json::to_string_pretty(&report)?);
        return Ok(());
    }

    println!("{}", board.display());
    println!("outcome: {}", report.outcome);
    if let Some(side) = report.side_to_move {
        println!("to move: {side}");
    }
    println!("value:   {} ({})", report.score, report.label);
    match report.best_move {
        Some(pos) => println!("best:    {} ({pos})", pos.to_index()),
        None => println!("best:    - (game over)"),
    }
    Ok(())
}
