//! Self-check of the enumerator and solver.

use anyhow::{Result, bail, ensure};
use tictactoe_oracle::solver::reference;
use tictactoe_oracle::{
    LEGAL_STATES, LabeledState, Solver, Strategy, TERMINAL_STATES, enumerate, enumerate_parallel,
};
use tracing::{debug, info, instrument};

/// Runs every check, failing on the first mismatch.
#[instrument]
pub fn run_verify() -> Result<()> {
    let mut solver = Solver::new();
    let tree = enumerate(Strategy::MoveTree, &mut solver);
    check_counts(Strategy::MoveTree, &tree)?;

    let brute = enumerate(Strategy::BruteForce, &mut Solver::new());
    check_counts(Strategy::BruteForce, &brute)?;
    ensure!(brute == tree, "strategies labeled the state space differently");
    info!("both strategies agree");

    check_against_reference(&tree)?;
    check_warm_cache(&tree, &mut solver)?;

    ensure!(
        enumerate_parallel() == tree,
        "parallel labeling differs from sequential"
    );
    info!("parallel labeling agrees");

    info!(states = tree.len(), "verification passed");
    Ok(())
}

fn check_counts(strategy: Strategy, states: &[LabeledState]) -> Result<()> {
    let terminal = states.iter().filter(|s| s.is_terminal()).count();
    let non_terminal = states.len() - terminal;
    debug!(%strategy, states = states.len(), terminal, non_terminal, "counted");

    ensure!(
        states.len() == LEGAL_STATES,
        "{strategy}: expected {LEGAL_STATES} legal states, found {}",
        states.len()
    );
    ensure!(
        terminal == TERMINAL_STATES,
        "{strategy}: expected {TERMINAL_STATES} terminal states, found {terminal}"
    );
    info!(%strategy, non_terminal, "state counts match");
    Ok(())
}

fn check_against_reference(states: &[LabeledState]) -> Result<()> {
    let mut checked = 0usize;
    for state in states.iter().filter(|s| !s.is_terminal()) {
        let side = state.board.side_to_move();
        let expected = reference::minimax(&state.board, side);
        if expected != state.solved {
            bail!(
                "{}: solver found {:?}, reference found {:?}",
                state.board,
                state.solved,
                expected
            );
        }
        checked += 1;
    }
    info!(checked, "solver agrees with reference minimax");
    Ok(())
}

fn check_warm_cache(states: &[LabeledState], solver: &mut Solver) -> Result<()> {
    for state in states.iter().filter(|s| !s.is_terminal()) {
        let again = solver.solve(&state.board, state.board.side_to_move());
        ensure!(
            again == state.solved,
            "{}: warm cache returned {:?}, cold search returned {:?}",
            state.board,
            again,
            state.solved
        );
    }
    let stats = solver.cache().stats();
    info!(
        entries = solver.cache().len(),
        hit_rate = stats.hit_rate(),
        "warm cache is idempotent"
    );
    Ok(())
}
