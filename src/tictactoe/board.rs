//! Board representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

/// Side length of the square board
pub const BOARD_DIM: usize = 3;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    #[default]
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    /// Convert to a player if this cell holds a symbol
    pub fn to_player(self) -> Option<Player> {
        match self {
            Cell::X => Some(Player::X),
            Cell::O => Some(Player::O),
            Cell::Empty => None,
        }
    }
}

/// A player in the game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Player {
    X,
    O,
}

impl Player {
    /// Get the opponent player
    pub fn opponent(self) -> Player {
        match self {
            Player::X => Player::O,
            Player::O => Player::X,
        }
    }

    /// Convert player to cell
    pub fn to_cell(self) -> Cell {
        match self {
            Player::X => Cell::X,
            Player::O => Cell::O,
        }
    }
}

impl fmt::Display for Player {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Player::X => write!(f, "X"),
            Player::O => write!(f, "O"),
        }
    }
}

/// A space on the game board, identified by row and column.
///
/// Ordering is row-major, which fixes the iteration order used for
/// move enumeration and weighted sampling.
#[derive(
    Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize,
)]
pub struct Position {
    pub row: usize,
    pub col: usize,
}

impl Position {
    pub fn new(row: usize, col: usize) -> Self {
        Position { row, col }
    }

    /// Check whether row and column are in bounds of the game board
    pub fn validate(self) -> crate::Result<()> {
        if self.row >= BOARD_DIM || self.col >= BOARD_DIM {
            return Err(crate::Error::OutOfBounds { position: self });
        }
        Ok(())
    }
}

impl fmt::Display for Position {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{},{}", self.row, self.col)
    }
}

/// A 3x3 grid of cells.
///
/// Compared by full structural equality, which makes it usable as a
/// hash-map key. Configuration legality (piece counts consistent with
/// turn order) is the responsibility of the [`GameState`] layer.
///
/// [`GameState`]: super::game::GameState
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [[Cell; BOARD_DIM]; BOARD_DIM],
}

impl Board {
    /// Get the cell at a position. The position must be in bounds.
    pub fn cell(&self, pos: Position) -> Cell {
        self.cells[pos.row][pos.col]
    }

    pub(crate) fn set_cell(&mut self, pos: Position, cell: Cell) {
        self.cells[pos.row][pos.col] = cell;
    }

    /// Count the spaces holding an X or O
    pub fn occupied_count(&self) -> usize {
        self.cells
            .iter()
            .flatten()
            .filter(|&&cell| cell != Cell::Empty)
            .count()
    }

    pub fn is_full(&self) -> bool {
        self.cells.iter().flatten().all(|&cell| cell != Cell::Empty)
    }

    /// All empty positions in row-major order
    pub fn empty_positions(&self) -> Vec<Position> {
        let mut positions = Vec::new();
        for row in 0..BOARD_DIM {
            for col in 0..BOARD_DIM {
                if self.cells[row][col] == Cell::Empty {
                    positions.push(Position::new(row, col));
                }
            }
        }
        positions
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (i, row) in self.cells.iter().enumerate() {
            if i > 0 {
                write!(f, "/")?;
            }
            for &cell in row {
                write!(f, "{}", cell.to_char())?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn new_board_is_empty() {
        let board = Board::default();
        assert_eq!(board.occupied_count(), 0);
        assert_eq!(board.empty_positions().len(), 9);
        assert!(!board.is_full());
    }

    #[test]
    fn empty_positions_are_row_major() {
        let mut board = Board::default();
        board.set_cell(Position::new(0, 0), Cell::X);
        board.set_cell(Position::new(1, 1), Cell::O);

        let empty = board.empty_positions();
        assert_eq!(empty.len(), 7);
        assert_eq!(empty[0], Position::new(0, 1));
        assert!(empty.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn position_bounds() {
        assert!(Position::new(2, 2).validate().is_ok());
        assert!(Position::new(3, 0).validate().is_err());
        assert!(Position::new(0, 3).validate().is_err());
    }

    #[test]
    fn board_display_is_compact() {
        let mut board = Board::default();
        board.set_cell(Position::new(0, 0), Cell::X);
        board.set_cell(Position::new(2, 2), Cell::O);
        assert_eq!(board.to_string(), "X../.../..O");
    }
}
