//! Win detection logic for tic-tac-toe.

use crate::{Board, Player, Position, Square};

/// The eight winning lines, checked in this order.
pub const LINES: [[Position; 3]; 8] = [
    // Rows
    [Position::TopLeft, Position::TopCenter, Position::TopRight],
    [Position::MiddleLeft, Position::Center, Position::MiddleRight],
    [Position::BottomLeft, Position::BottomCenter, Position::BottomRight],
    // Columns
    [Position::TopLeft, Position::MiddleLeft, Position::BottomLeft],
    [Position::TopCenter, Position::Center, Position::BottomCenter],
    [Position::TopRight, Position::MiddleRight, Position::BottomRight],
    // Diagonals
    [Position::TopLeft, Position::Center, Position::BottomRight],
    [Position::TopRight, Position::Center, Position::BottomLeft],
];

/// Owner of the first completed line, if any.
///
/// On an illegal board where both sides have a line, whichever line comes
/// first in [`LINES`] decides.
pub fn winner(board: &Board) -> Option<Player> {
    LINES.iter().find_map(|[a, b, c]| {
        let sq = board.get(*a);
        match sq {
            Square::Occupied(player) if sq == board.get(*b) && sq == board.get(*c) => Some(player),
            _ => None,
        }
    })
}

/// Checks whether `player` has three in a row anywhere on the board.
pub fn has_line(board: &Board, player: Player) -> bool {
    let mark = Square::Occupied(player);
    LINES
        .iter()
        .any(|line| line.iter().all(|pos| board.get(*pos) == mark))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_no_winner_empty_board() {
        let board = Board::new();
        assert_eq!(winner(&board), None);
    }

    #[test]
    fn test_winner_top_row() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Player::X));
        board.set(Position::TopCenter, Square::Occupied(Player::X));
        board.set(Position::TopRight, Square::Occupied(Player::X));
        assert_eq!(winner(&board), Some(Player::X));
        assert!(has_line(&board, Player::X));
        assert!(!has_line(&board, Player::O));
    }

    #[test]
    fn test_winner_diagonal() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Player::O));
        board.set(Position::Center, Square::Occupied(Player::O));
        board.set(Position::BottomRight, Square::Occupied(Player::O));
        assert_eq!(winner(&board), Some(Player::O));
    }

    #[test]
    fn test_no_winner_incomplete() {
        let mut board = Board::new();
        board.set(Position::TopLeft, Square::Occupied(Player::X));
        board.set(Position::TopCenter, Square::Occupied(Player::X));
        assert_eq!(winner(&board), None);
    }

    #[test]
    fn test_first_line_decides_when_both_have_lines() {
        // Illegal board: O owns the top row, X the bottom row.
        let board: Board = "ooo bbb xxx".parse().unwrap();
        assert_eq!(winner(&board), Some(Player::O));
        assert!(has_line(&board, Player::X));
    }
}
