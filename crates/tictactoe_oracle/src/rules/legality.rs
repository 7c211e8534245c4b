//! Reachability of a raw board under alternating legal play.
//!
//! A board is legal when it can be reached from the empty board by X and O
//! taking turns, X first, with play stopping as soon as a line is completed.
//! Each condition is an [`Invariant`] over [`Board`]; together they form
//! [`LegalityInvariants`].

use super::win::has_line;
use crate::invariants::{Invariant, InvariantSet, InvariantViolation};
use crate::{Board, Player};

/// X moves first, so X has as many marks as O or exactly one more.
pub struct PieceCountInvariant;

impl Invariant<Board> for PieceCountInvariant {
    fn holds(board: &Board) -> bool {
        let (x, o) = (board.count(Player::X), board.count(Player::O));
        x == o || x == o + 1
    }

    fn description() -> &'static str {
        "X has as many marks as O or one more"
    }
}

/// Play stops at the first completed line, so both sides cannot have one.
pub struct SingleWinnerInvariant;

impl Invariant<Board> for SingleWinnerInvariant {
    fn holds(board: &Board) -> bool {
        !(has_line(board, Player::X) && has_line(board, Player::O))
    }

    fn description() -> &'static str {
        "At most one side has a completed line"
    }
}

/// A line for X means X moved last.
pub struct XWinParityInvariant;

impl Invariant<Board> for XWinParityInvariant {
    fn holds(board: &Board) -> bool {
        !has_line(board, Player::X) || board.count(Player::X) == board.count(Player::O) + 1
    }

    fn description() -> &'static str {
        "If X has a line, X has exactly one more mark than O"
    }
}

/// A line for O means O moved last.
pub struct OWinParityInvariant;

impl Invariant<Board> for OWinParityInvariant {
    fn holds(board: &Board) -> bool {
        !has_line(board, Player::O) || board.count(Player::X) == board.count(Player::O)
    }

    fn description() -> &'static str {
        "If O has a line, X and O have the same number of marks"
    }
}

/// The reachability conditions, in the order they are checked.
pub type LegalityInvariants = (
    PieceCountInvariant,
    SingleWinnerInvariant,
    XWinParityInvariant,
    OWinParityInvariant,
);

/// Whether `board` is reachable by alternating legal play.
pub fn is_legal(board: &Board) -> bool {
    LegalityInvariants::holds_all(board)
}

/// Every reachability condition `board` violates; empty for legal boards.
pub fn legality_violations(board: &Board) -> Vec<InvariantViolation> {
    LegalityInvariants::check_all(board).err().unwrap_or_default()
}
