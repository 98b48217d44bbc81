//! Tic-Tac-Toe game implementation

pub mod board;
pub mod game;
pub mod lines;
pub mod symmetry;

pub use board::{BOARD_DIM, Board, Cell, Player, Position};
pub use game::{GameOutcome, GameState};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use symmetry::D4Transform;
