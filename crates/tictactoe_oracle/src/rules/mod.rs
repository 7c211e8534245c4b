//! Game rules for tic-tac-toe.
//!
//! Pure functions over [`Board`] values: terminal classification and the
//! legality filter. Neither enforces the other.

pub mod draw;
pub mod legality;
pub mod win;

pub use draw::is_full;
pub use legality::{is_legal, legality_violations, LegalityInvariants};
pub use win::{has_line, winner, LINES};

use crate::score::{self, Score};
use crate::{Board, Player};
use serde::{Deserialize, Serialize};

/// How a board stands, independent of whose turn it is.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, strum::Display)]
pub enum TerminalOutcome {
    /// X has completed a line.
    WinX,
    /// O has completed a line.
    WinO,
    /// The board is full with no completed line.
    Draw,
    /// Play continues.
    Continue,
}

impl TerminalOutcome {
    /// Whether play has ended.
    pub fn is_terminal(self) -> bool {
        self != TerminalOutcome::Continue
    }

    /// The absolute value of a finished game; `None` while play continues.
    pub fn score(self) -> Option<Score> {
        match self {
            TerminalOutcome::WinX => Some(score::X_WINS),
            TerminalOutcome::WinO => Some(score::O_WINS),
            TerminalOutcome::Draw => Some(score::DRAWN),
            TerminalOutcome::Continue => None,
        }
    }
}

/// Classifies a board as won, drawn or still in play.
///
/// The first completed line in [`LINES`] order decides the winner. Legality
/// is not checked here.
pub fn classify(board: &Board) -> TerminalOutcome {
    match winner(board) {
        Some(Player::X) => TerminalOutcome::WinX,
        Some(Player::O) => TerminalOutcome::WinO,
        None if is_full(board) => TerminalOutcome::Draw,
        None => TerminalOutcome::Continue,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn board(s: &str) -> Board {
        s.parse().unwrap()
    }

    #[test]
    fn test_empty_board_continues() {
        assert_eq!(classify(&Board::new()), TerminalOutcome::Continue);
        assert_eq!(TerminalOutcome::Continue.score(), None);
    }

    #[test]
    fn test_x_row_wins_regardless_of_remaining_cells() {
        for rest in ["oob bbb", "obo bbb", "bbb oob", "obb bob"] {
            let b = board(&format!("xxx {rest}"));
            assert!(is_legal(&b), "{b} should be legal");
            assert_eq!(classify(&b), TerminalOutcome::WinX);
        }
    }

    #[test]
    fn test_o_column_wins() {
        let b = board("oxx oxb obx");
        assert_eq!(classify(&b), TerminalOutcome::WinO);
        assert_eq!(TerminalOutcome::WinO.score(), Some(score::O_WINS));
    }

    #[test]
    fn test_full_board_without_line_is_draw() {
        // x o x / x o o / o x x
        let b = board("xox xoo oxx");
        assert_eq!(classify(&b), TerminalOutcome::Draw);
        assert_eq!(TerminalOutcome::Draw.score(), Some(score::DRAWN));
    }

    #[test]
    fn test_full_board_with_line_is_a_win() {
        // x x x / o o x / x o o
        let b = board("xxx oox xoo");
        assert_eq!(classify(&b), TerminalOutcome::WinX);
    }
}
