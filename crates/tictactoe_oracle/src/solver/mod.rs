//! Perfect-play solver.
//!
//! [`Solver`] runs minimax with alpha-beta pruning over a [`MemoCache`] it
//! owns. Scores follow the absolute convention in [`crate::score`]. Among
//! moves that reach the optimal value, the lowest-index cell is reported as
//! the best move; [`reference::minimax`] applies the same rule without any
//! pruning or caching and serves as the correctness oracle.

mod cache;
mod minimax;
pub mod reference;

pub use cache::{CacheStats, MemoCache, MemoKey};

use crate::rules::legality_violations;
use crate::score::{self, Score};
use crate::{Board, Player, Position};
use serde::{Deserialize, Serialize};
use tracing::instrument;

/// Result of solving a position.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, derive_new::new)]
pub struct SolvedEntry {
    /// Minimax value from X's perspective.
    pub score: Score,
    /// Lowest-index optimal move; `None` exactly when the position is terminal.
    pub best_move: Option<Position>,
}

impl SolvedEntry {
    /// Entry for a finished game.
    pub fn terminal(score: Score) -> Self {
        Self::new(score, None)
    }
}

/// Memoized alpha-beta solver.
///
/// One solver is meant to label a whole run; its cache grows monotonically
/// and answers every later query for a position it has solved exactly.
#[derive(Debug, Clone, Default)]
pub struct Solver {
    cache: MemoCache,
    nodes: u64,
}

impl Solver {
    /// Creates a solver with an empty cache.
    pub fn new() -> Self {
        Self::default()
    }

    /// Solves `board` with `side_to_move` to play.
    ///
    /// # Panics
    ///
    /// Panics if `board` is not reachable by legal play, or if `side_to_move`
    /// disagrees with the piece counts. Both indicate a caller defect.
    #[instrument(level = "debug", skip(self, board), fields(board = %board))]
    pub fn solve(&mut self, board: &Board, side_to_move: Player) -> SolvedEntry {
        let violations = legality_violations(board);
        assert!(
            violations.is_empty(),
            "cannot solve unreachable board {board}: {violations:?}"
        );
        assert_eq!(
            side_to_move,
            board.side_to_move(),
            "board {board} has {} to move",
            board.side_to_move()
        );

        let searched = minimax::search(self, *board, side_to_move, ROOT_ALPHA, ROOT_BETA);
        assert!(
            searched.is_exact(),
            "root search of {board} returned a bound: {searched:?}"
        );
        debug_assert!(score::is_valid(searched.entry.score));
        searched.entry
    }

    /// The memo cache built so far.
    pub fn cache(&self) -> &MemoCache {
        &self.cache
    }

    /// Search nodes entered since creation, cache hits included.
    pub fn nodes_visited(&self) -> u64 {
        self.nodes
    }
}

/// Root window; strictly outside the score range so root results are exact.
const ROOT_ALPHA: Score = score::O_WINS - 1;
const ROOT_BETA: Score = score::X_WINS + 1;

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_board_is_a_draw() {
        let mut solver = Solver::new();
        let entry = solver.solve(&Board::new(), Player::X);
        assert_eq!(entry.score, score::DRAWN);
        // Every opening move draws, so the lowest index wins the tie.
        assert_eq!(entry.best_move, Some(Position::TopLeft));
    }

    #[test]
    fn test_terminal_board_has_no_move() {
        let mut solver = Solver::new();
        let b = board("xxx oob bbb");
        let entry = solver.solve(&b, Player::O);
        assert_eq!(entry, SolvedEntry::terminal(score::X_WINS));
    }

    #[test]
    fn test_completes_own_line() {
        let mut solver = Solver::new();
        let entry = solver.solve(&board("bob xbx bob"), Player::X);
        assert_eq!(entry.score, score::X_WINS);
        assert_eq!(entry.best_move, Some(Position::Center));

        let entry = solver.solve(&board("bbx oob xxb"), Player::O);
        assert_eq!(entry.score, score::O_WINS);
        assert_eq!(entry.best_move, Some(Position::MiddleRight));
    }

    #[test]
    fn test_lowest_index_win_beats_faster_win() {
        // X can complete the middle row at 5, but playing 1 also forces a win.
        let mut solver = Solver::new();
        let entry = solver.solve(&board("obb xxb obb"), Player::X);
        assert_eq!(entry.score, score::X_WINS);
        assert_eq!(entry.best_move, Some(Position::TopCenter));
    }

    #[test]
    fn test_forced_block() {
        let mut solver = Solver::new();
        let entry = solver.solve(&board("xbb bxb obo"), Player::X);
        assert_eq!(entry.score, score::DRAWN);
        assert_eq!(entry.best_move, Some(Position::BottomCenter));
    }

    #[test]
    fn test_warm_cache_matches_cold() {
        let b = board("xbb bob bbb");
        let mut solver = Solver::new();
        let cold = solver.solve(&b, Player::X);
        let nodes = solver.nodes_visited();
        let warm = solver.solve(&b, Player::X);
        assert_eq!(cold, warm);
        // The second call is answered from the cache at the root.
        assert_eq!(solver.nodes_visited(), nodes + 1);
    }

    #[test]
    #[should_panic(expected = "unreachable")]
    fn test_illegal_board_panics() {
        Solver::new().solve(&board("oob bbb bbb"), Player::X);
    }

    #[test]
    #[should_panic(expected = "to move")]
    fn test_wrong_side_panics() {
        Solver::new().solve(&Board::new(), Player::O);
    }
}
