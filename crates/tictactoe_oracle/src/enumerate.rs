//! Enumeration and labeling of every legal position.
//!
//! Two ways to find the legal boards are offered: filtering all 3^9 raw
//! assignments through the legality filter, or walking legal moves from the
//! empty board. Both produce the same set in ascending code order, and each
//! non-terminal board in it is solved exactly once.

use crate::rules::{TerminalOutcome, classify, is_legal, legality_violations};
use crate::score::Score;
use crate::solver::{SolvedEntry, Solver};
use crate::types::BOARD_CODES;
use crate::{Board, Player, Position};
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use std::collections::btree_map::Entry;
use std::collections::{BTreeMap, BTreeSet};
use tracing::{debug, info, instrument, trace};

/// Number of legal positions on a 3x3 board, the empty board included.
pub const LEGAL_STATES: usize = 5_478;

/// Number of legal positions where the game is over.
pub const TERMINAL_STATES: usize = 958;

/// How legal boards are found.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    strum::Display,
    strum::EnumString,
)]
#[serde(rename_all = "kebab-case")]
#[strum(serialize_all = "kebab-case")]
pub enum Strategy {
    /// Decode every raw code and keep the legal boards.
    BruteForce,
    /// Apply legal moves recursively from the empty board.
    #[default]
    MoveTree,
}

impl Strategy {
    /// Legal boards in ascending code order.
    pub fn legal_boards(self) -> Vec<Board> {
        match self {
            Strategy::BruteForce => legal_boards_brute_force(),
            Strategy::MoveTree => legal_boards_move_tree(),
        }
    }
}

/// A legal position with its perfect-play label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LabeledState {
    /// The position.
    pub board: Board,
    /// Classifier verdict for the position itself.
    pub outcome: TerminalOutcome,
    /// Player to move; `None` once the game is over.
    pub side_to_move: Option<Player>,
    /// Value and best move. Terminal states carry the classifier's value.
    pub solved: SolvedEntry,
}

impl LabeledState {
    /// Labels `board`, consulting `solver` only if play continues.
    pub fn label(board: Board, solver: &mut Solver) -> Self {
        let outcome = classify(&board);
        match outcome.score() {
            Some(value) => Self {
                board,
                outcome,
                side_to_move: None,
                solved: SolvedEntry::terminal(value),
            },
            None => {
                let side = board.side_to_move();
                Self {
                    board,
                    outcome,
                    side_to_move: Some(side),
                    solved: solver.solve(&board, side),
                }
            }
        }
    }

    /// Whether the game is over in this position.
    pub fn is_terminal(&self) -> bool {
        self.outcome.is_terminal()
    }

    /// Minimax value from X's perspective.
    pub fn score(&self) -> Score {
        self.solved.score
    }
}

/// All raw codes, keeping those that pass the legality filter.
#[instrument]
pub fn legal_boards_brute_force() -> Vec<Board> {
    let boards: Vec<Board> = (0..BOARD_CODES)
        .filter_map(Board::from_code)
        .filter(|board| {
            let legal = is_legal(board);
            if !legal {
                trace!(%board, violations = ?legality_violations(board), "skipping unreachable board");
            }
            legal
        })
        .collect();
    debug!(count = boards.len(), "brute-force enumeration done");
    boards
}

/// Every board reachable by legal play from the empty board.
#[instrument]
pub fn legal_boards_move_tree() -> Vec<Board> {
    let mut seen = BTreeSet::new();
    collect_reachable(Board::new(), &mut seen);
    debug!(count = seen.len(), "move-tree enumeration done");
    seen.into_iter().filter_map(Board::from_code).collect()
}

/// Adds the codes of `board` and everything reachable from it to `seen`.
fn collect_reachable(board: Board, seen: &mut BTreeSet<u16>) {
    // A transposition: the subtree below is already collected.
    if !seen.insert(board.code()) {
        return;
    }
    if classify(&board).is_terminal() {
        return;
    }
    let side = board.side_to_move();
    for pos in board.empty_positions() {
        collect_reachable(board.with_mark(pos, side), seen);
    }
}

/// Labels every legal position, sorted by board code.
#[instrument(skip(solver))]
pub fn enumerate(strategy: Strategy, solver: &mut Solver) -> Vec<LabeledState> {
    let states: Vec<LabeledState> = strategy
        .legal_boards()
        .into_iter()
        .map(|board| LabeledState::label(board, solver))
        .collect();

    info!(
        states = states.len(),
        nodes = solver.nodes_visited(),
        cached = solver.cache().len(),
        "labeled legal states"
    );
    states
}

/// Labels every legal position using one worker per opening move.
///
/// Each worker walks and solves the subtree under its first move with a
/// private [`Solver`]. Positions reachable from several openings are labeled
/// by each such worker and must agree. The result equals [`enumerate`].
///
/// # Panics
///
/// Panics if two workers label the same position differently.
#[instrument]
pub fn enumerate_parallel() -> Vec<LabeledState> {
    let root = Board::new();

    let subtrees: Vec<Vec<LabeledState>> = Position::ALL
        .par_iter()
        .map(|opening| {
            let mut seen = BTreeSet::new();
            collect_reachable(root.with_mark(*opening, Player::X), &mut seen);

            let mut solver = Solver::new();
            let states: Vec<LabeledState> = seen
                .into_iter()
                .filter_map(Board::from_code)
                .map(|board| LabeledState::label(board, &mut solver))
                .collect();
            debug!(
                %opening,
                states = states.len(),
                nodes = solver.nodes_visited(),
                "subtree labeled"
            );
            states
        })
        .collect();

    let mut merged = BTreeMap::new();
    merged.insert(root.code(), LabeledState::label(root, &mut Solver::new()));
    for state in subtrees.into_iter().flatten() {
        match merged.entry(state.board.code()) {
            Entry::Vacant(slot) => {
                slot.insert(state);
            }
            Entry::Occupied(slot) => assert_eq!(
                *slot.get(),
                state,
                "workers disagree on {}",
                state.board
            ),
        }
    }

    info!(states = merged.len(), "labeled legal states in parallel");
    merged.into_values().collect()
}
