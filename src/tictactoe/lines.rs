//! Winning line analysis for Tic-Tac-Toe

use super::board::{Board, Player, Position};

const fn pos(row: usize, col: usize) -> Position {
    Position { row, col }
}

/// Winning lines on the 3x3 board
pub const WINNING_LINES: [[Position; 3]; 8] = [
    [pos(0, 0), pos(0, 1), pos(0, 2)],
    [pos(1, 0), pos(1, 1), pos(1, 2)],
    [pos(2, 0), pos(2, 1), pos(2, 2)], // rows
    [pos(0, 0), pos(1, 0), pos(2, 0)],
    [pos(0, 1), pos(1, 1), pos(2, 1)],
    [pos(0, 2), pos(1, 2), pos(2, 2)], // columns
    [pos(0, 0), pos(1, 1), pos(2, 2)],
    [pos(0, 2), pos(1, 1), pos(2, 0)], // diagonals
];

/// Utility for analyzing winning lines
pub struct LineAnalyzer;

impl LineAnalyzer {
    /// Check if a player has three in a row.
    ///
    /// Lines containing empty cells never count: the target is always a
    /// player symbol, so a line of empties cannot match.
    pub fn has_won(board: &Board, player: Player) -> bool {
        let target = player.to_cell();
        WINNING_LINES
            .iter()
            .any(|line| line.iter().all(|&p| board.cell(p) == target))
    }

    /// Find the player holding a completed line, if any
    pub fn winning_player(board: &Board) -> Option<Player> {
        if Self::has_won(board, Player::X) {
            Some(Player::X)
        } else if Self::has_won(board, Player::O) {
            Some(Player::O)
        } else {
            None
        }
    }
}
