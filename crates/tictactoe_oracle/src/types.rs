//! Core domain types for tic-tac-toe positions.

use crate::position::Position;
use serde::{Deserialize, Serialize};
use std::str::FromStr;
use tracing::instrument;

/// Number of distinct raw boards (3^9).
pub const BOARD_CODES: u16 = 19_683;

/// Player in the game.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize, strum::Display,
)]
pub enum Player {
    /// Player X (goes first, maximizes).
    X,
    /// Player O (goes second, minimizes).
    O,
}

impl Player {
    /// Returns the opponent player.
    pub fn opponent(self) -> Self {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Dataset symbol for this player's mark.
    pub fn symbol(self) -> char {
        match self {
            Player::X => 'x',
            Player::O => 'o',
        }
    }
}

/// A square on the tic-tac-toe board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Square {
    /// Empty square.
    Empty,
    /// Square occupied by a player.
    Occupied(Player),
}

impl Square {
    /// Dataset symbol: `b` for blank, otherwise the player's mark.
    pub fn symbol(self) -> char {
        match self {
            Square::Empty => 'b',
            Square::Occupied(player) => player.symbol(),
        }
    }

    /// Parses a cell symbol. Accepts the dataset symbols and a few common aliases.
    pub fn from_symbol(symbol: char) -> Option<Self> {
        match symbol {
            'x' | 'X' => Some(Square::Occupied(Player::X)),
            'o' | 'O' => Some(Square::Occupied(Player::O)),
            'b' | 'B' | '_' | '.' => Some(Square::Empty),
            _ => None,
        }
    }

    fn digit(self) -> u16 {
        match self {
            Square::Empty => 0,
            Square::Occupied(Player::X) => 1,
            Square::Occupied(Player::O) => 2,
        }
    }

    fn from_digit(digit: u16) -> Self {
        match digit {
            0 => Square::Empty,
            1 => Square::Occupied(Player::X),
            _ => Square::Occupied(Player::O),
        }
    }
}

/// 3x3 tic-tac-toe board.
///
/// Boards are small `Copy` values; search code works on scratch copies
/// rather than sharing a mutable board.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    /// Squares in row-major order (0-8).
    squares: [Square; 9],
}

impl Board {
    /// Creates a new empty board.
    pub fn new() -> Self {
        Self {
            squares: [Square::Empty; 9],
        }
    }

    /// Gets the square at the given position.
    pub fn get(&self, pos: Position) -> Square {
        self.squares[pos.to_index()]
    }

    /// Sets the square at the given position.
    pub fn set(&mut self, pos: Position, square: Square) {
        self.squares[pos.to_index()] = square;
    }

    /// Checks if a square is empty.
    pub fn is_empty(&self, pos: Position) -> bool {
        self.get(pos) == Square::Empty
    }

    /// Returns all squares as a slice.
    pub fn squares(&self) -> &[Square; 9] {
        &self.squares
    }

    /// Number of marks placed by `player`.
    pub fn count(&self, player: Player) -> usize {
        self.squares
            .iter()
            .filter(|sq| **sq == Square::Occupied(player))
            .count()
    }

    /// Empty cells in ascending index order.
    pub fn empty_positions(&self) -> impl Iterator<Item = Position> + '_ {
        Position::ALL.into_iter().filter(|pos| self.is_empty(*pos))
    }

    /// The player whose turn it is, derived from piece counts.
    ///
    /// X moves whenever both sides have placed the same number of marks.
    /// Meaningless for boards that fail the legality filter.
    pub fn side_to_move(&self) -> Player {
        if self.count(Player::X) == self.count(Player::O) {
            Player::X
        } else {
            Player::O
        }
    }

    /// Returns a copy of this board with `player`'s mark at `pos`.
    pub fn with_mark(&self, pos: Position, player: Player) -> Self {
        let mut next = *self;
        next.set(pos, Square::Occupied(player));
        next
    }

    /// Canonical base-3 encoding: cell `i` contributes `digit * 3^i`
    /// (empty 0, X 1, O 2). Always in `0..BOARD_CODES`.
    pub fn code(&self) -> u16 {
        self.squares
            .iter()
            .rev()
            .fold(0, |acc, sq| acc * 3 + sq.digit())
    }

    /// Decodes a canonical code. Returns `None` for codes outside `0..BOARD_CODES`.
    pub fn from_code(code: u16) -> Option<Self> {
        if code >= BOARD_CODES {
            return None;
        }
        let mut rest = code;
        let mut squares = [Square::Empty; 9];
        for sq in squares.iter_mut() {
            *sq = Square::from_digit(rest % 3);
            rest /= 3;
        }
        Some(Self { squares })
    }

    /// Formats the board as a human-readable grid; empty cells show their index.
    pub fn display(&self) -> String {
        let mut result = String::new();
        for row in 0..3 {
            for col in 0..3 {
                let idx = row * 3 + col;
                let symbol = match self.squares[idx] {
                    Square::Empty => idx.to_string(),
                    Square::Occupied(Player::X) => "X".to_string(),
                    Square::Occupied(Player::O) => "O".to_string(),
                };
                result.push_str(&symbol);
                if col < 2 {
                    result.push('|');
                }
            }
            if row < 2 {
                result.push_str("\n-+-+-\n");
            }
        }
        result
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

/// Compact form: the nine dataset symbols, e.g. `xobbxbbbo`.
impl std::fmt::Display for Board {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        for sq in &self.squares {
            write!(f, "{}", sq.symbol())?;
        }
        Ok(())
    }
}

/// Error parsing a board from text.
#[derive(Debug, Clone, PartialEq, Eq, derive_more::Display)]
pub enum BoardParseError {
    /// The input did not contain exactly nine cells.
    #[display("expected 9 cells, found {}", found)]
    CellCount {
        /// Number of cells found.
        found: usize,
    },

    /// A cell symbol was not recognized.
    #[display("unrecognized cell symbol {:?}", symbol)]
    UnknownSymbol {
        /// The offending character.
        symbol: char,
    },
}

impl std::error::Error for BoardParseError {}

impl FromStr for Board {
    type Err = BoardParseError;

    /// Parses nine cell symbols; commas and whitespace between cells are ignored.
    #[instrument]
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let cells = s
            .chars()
            .filter(|c| *c != ',' && !c.is_whitespace())
            .map(|c| Square::from_symbol(c).ok_or(BoardParseError::UnknownSymbol { symbol: c }))
            .collect::<Result<Vec<_>, _>>()?;

        let squares: [Square; 9] = cells
            .try_into()
            .map_err(|cells: Vec<Square>| BoardParseError::CellCount { found: cells.len() })?;
        Ok(Self { squares })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_board_code_is_zero() {
        assert_eq!(Board::new().code(), 0);
    }

    #[test]
    fn test_code_weights_cells_by_power_of_three() {
        let board = Board::new().with_mark(Position::TopCenter, Player::X);
        assert_eq!(board.code(), 3);
        let board = board.with_mark(Position::TopLeft, Player::O);
        assert_eq!(board.code(), 5);
        let full_o = Position::ALL
            .into_iter()
            .fold(Board::new(), |b, pos| b.with_mark(pos, Player::O));
        assert_eq!(full_o.code(), BOARD_CODES - 1);
    }

    #[test]
    fn test_from_code_inverts_code() {
        for code in [0, 1, 4_242, 12_345, BOARD_CODES - 1] {
            let board = Board::from_code(code).unwrap();
            assert_eq!(board.code(), code);
        }
        assert_eq!(Board::from_code(BOARD_CODES), None);
    }

    #[test]
    fn test_side_to_move_from_counts() {
        let board = Board::new();
        assert_eq!(board.side_to_move(), Player::X);
        let board = board.with_mark(Position::Center, Player::X);
        assert_eq!(board.side_to_move(), Player::O);
        let board = board.with_mark(Position::TopLeft, Player::O);
        assert_eq!(board.side_to_move(), Player::X);
    }

    #[test]
    fn test_empty_positions_ascending() {
        let board = Board::new()
            .with_mark(Position::TopLeft, Player::X)
            .with_mark(Position::Center, Player::O);
        let empty: Vec<usize> = board.empty_positions().map(Position::to_index).collect();
        assert_eq!(empty, vec![1, 2, 3, 5, 6, 7, 8]);
    }

    #[test]
    fn test_parse_accepts_dataset_and_alias_symbols() {
        let a: Board = "x,o,b,b,x,b,b,b,o".parse().unwrap();
        let b: Board = "XO_ _X_ __O".parse().unwrap();
        assert_eq!(a, b);
        assert_eq!(a.to_string(), "xobbxbbbo");
    }

    #[test]
    fn test_parse_rejects_bad_input() {
        assert_eq!(
            "xxo".parse::<Board>(),
            Err(BoardParseError::CellCount { found: 3 })
        );
        assert_eq!(
            "xoxoxoxoz".parse::<Board>(),
            Err(BoardParseError::UnknownSymbol { symbol: 'z' })
        );
    }

    #[test]
    fn test_display_grid() {
        let board = Board::new().with_mark(Position::Center, Player::X);
        assert_eq!(board.display(), "0|1|2\n-+-+-\n3|X|5\n-+-+-\n6|7|8");
    }
}
