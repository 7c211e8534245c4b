//! Fail-soft alpha-beta minimax over X-relative scores.
//!
//! X maximizes and O minimizes. Children are tried in ascending cell order
//! and the best move only changes on a strict improvement, which makes the
//! reported move the lowest-index optimal one whenever the result is exact.
//!
//! A result found under a narrowed window may only be a bound on the true
//! value. Those are handed back to the parent but never cached, so every
//! cache entry is exact and valid for any later window.

use super::cache::MemoKey;
use super::{SolvedEntry, Solver};
use crate::rules::classify;
use crate::score::{self, Score};
use crate::{Board, Player, Position, Square};

/// What a search result says about the true value.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub(super) enum Bound {
    /// The score is the minimax value.
    Exact,
    /// The true value is at least the score (search failed high).
    Lower,
    /// The true value is at most the score (search failed low).
    Upper,
}

impl Bound {
    /// Classifies a fail-soft result searched under `(alpha, beta)`.
    ///
    /// Scores cannot leave `[O_WINS, X_WINS]`, so a failed-high `X_WINS` or a
    /// failed-low `O_WINS` is still exact.
    fn of(value: Score, alpha: Score, beta: Score) -> Self {
        if value >= beta && value < score::X_WINS {
            Bound::Lower
        } else if value <= alpha && value > score::O_WINS {
            Bound::Upper
        } else {
            Bound::Exact
        }
    }
}

#[derive(Debug, Clone, Copy)]
pub(super) struct Searched {
    pub(super) entry: SolvedEntry,
    pub(super) bound: Bound,
}

impl Searched {
    fn exact(entry: SolvedEntry) -> Self {
        Self {
            entry,
            bound: Bound::Exact,
        }
    }

    pub(super) fn is_exact(&self) -> bool {
        self.bound == Bound::Exact
    }
}

pub(super) fn search(
    solver: &mut Solver,
    board: Board,
    to_move: Player,
    alpha: Score,
    beta: Score,
) -> Searched {
    solver.nodes += 1;

    let key = MemoKey::new(&board, to_move);
    if let Some(entry) = solver.cache.get(key) {
        return Searched::exact(entry);
    }

    if let Some(value) = classify(&board).score() {
        let entry = SolvedEntry::terminal(value);
        solver.cache.insert(key, entry);
        return Searched::exact(entry);
    }

    let maximizing = to_move == Player::X;
    let (mut lo, mut hi) = (alpha, beta);
    let mut best: Option<(Score, Position)> = None;
    let mut scratch = board;

    for pos in board.empty_positions() {
        scratch.set(pos, Square::Occupied(to_move));
        let child = search(solver, scratch, to_move.opponent(), lo, hi).entry.score;
        scratch.set(pos, Square::Empty);

        let improves = match best {
            None => true,
            Some((value, _)) if maximizing => child > value,
            Some((value, _)) => child < value,
        };
        if improves {
            best = Some((child, pos));
        }

        if maximizing {
            lo = lo.max(child);
        } else {
            hi = hi.min(child);
        }
        if hi <= lo {
            break;
        }
    }
    debug_assert_eq!(scratch, board, "scratch board not restored");

    let Some((value, best_move)) = best else {
        panic!("board {board} is not terminal but has no empty cell");
    };

    let searched = Searched {
        entry: SolvedEntry::new(value, Some(best_move)),
        bound: Bound::of(value, alpha, beta),
    };
    if searched.is_exact() {
        solver.cache.insert(key, searched.entry);
    }
    searched
}
