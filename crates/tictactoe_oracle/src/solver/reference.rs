//! Unpruned, uncached minimax.
//!
//! Exponentially slower than [`Solver`](super::Solver) and kept only to
//! check it: both must agree on value and best move for every position.

use super::SolvedEntry;
use crate::rules::classify;
use crate::score::Score;
use crate::{Board, Player, Position};

/// Plain minimax value and lowest-index optimal move for `board`.
pub fn minimax(board: &Board, to_move: Player) -> SolvedEntry {
    let mut nodes = 0;
    minimax_counted(board, to_move, &mut nodes)
}

/// Like [`minimax`], adding the number of visited nodes to `nodes`.
pub fn minimax_counted(board: &Board, to_move: Player, nodes: &mut u64) -> SolvedEntry {
    *nodes += 1;

    if let Some(value) = classify(board).score() {
        return SolvedEntry::terminal(value);
    }

    let mut best: Option<(Score, Position)> = None;
    for pos in board.empty_positions() {
        let child = minimax_counted(&board.with_mark(pos, to_move), to_move.opponent(), nodes).score;
        let improves = match (best, to_move) {
            (None, _) => true,
            (Some((value, _)), Player::X) => child > value,
            (Some((value, _)), Player::O) => child < value,
        };
        if improves {
            best = Some((child, pos));
        }
    }

    match best {
        Some((value, pos)) => SolvedEntry::new(value, Some(pos)),
        None => panic!("board {board} is not terminal but has no empty cell"),
    }
}
