//! Minimax values.
//!
//! Every score in this crate is absolute, from X's point of view: positive
//! means X wins under perfect play, negative means O wins. There is no
//! mover-relative (negamax) value anywhere.

/// A game-theoretic value in `{-1, 0, +1}`, from X's perspective.
pub type Score = i8;

/// X wins under perfect play.
pub const X_WINS: Score = 1;

/// Neither side can force a win.
pub const DRAWN: Score = 0;

/// O wins under perfect play.
pub const O_WINS: Score = -1;

/// Returns true for the three values a solved position can take.
pub fn is_valid(score: Score) -> bool {
    (O_WINS..=X_WINS).contains(&score)
}
