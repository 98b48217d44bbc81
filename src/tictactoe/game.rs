//! Game-state value type: board plus turn, move application, outcome detection

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{
    board::{BOARD_DIM, Board, Cell, Player, Position},
    lines::LineAnalyzer,
};

/// Outcome of a finished game
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameOutcome {
    Win(Player),
    Draw,
}

/// An ongoing or completed game of Tic-Tac-Toe.
///
/// Immutable value: moves produce a new state via [`apply_move`], the
/// original is never modified in place. The turn marker is typed as
/// [`Player`], so a state with a malformed turn cannot be constructed.
///
/// [`apply_move`]: GameState::apply_move
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct GameState {
    board: Board,
    turn: Player,
}

impl GameState {
    /// Create a game with an empty board where it is X's turn
    pub fn new() -> Self {
        GameState {
            board: Board::default(),
            turn: Player::X,
        }
    }

    pub fn board(&self) -> Board {
        self.board
    }

    /// The player whose turn it is
    pub fn turn(&self) -> Player {
        self.turn
    }

    /// Number of symbols already placed on the board
    pub fn ply(&self) -> usize {
        self.board.occupied_count()
    }

    /// Check for a finished game.
    ///
    /// Returns `Win` when a player holds a line of three, `Draw` when the
    /// board is full without one, and `None` while play continues.
    pub fn outcome(&self) -> Option<GameOutcome> {
        if let Some(winner) = LineAnalyzer::winning_player(&self.board) {
            Some(GameOutcome::Win(winner))
        } else if self.board.is_full() {
            Some(GameOutcome::Draw)
        } else {
            None
        }
    }

    pub fn is_terminal(&self) -> bool {
        self.outcome().is_some()
    }

    /// Legal moves in this position: every empty cell in row-major order,
    /// or nothing when the game is over.
    pub fn legal_moves(&self) -> Vec<Position> {
        if self.is_terminal() {
            return Vec::new();
        }
        self.board.empty_positions()
    }

    /// Place the mover's symbol and flip the turn, producing a new state.
    ///
    /// Fails on a terminal state, an out-of-bounds position, or an
    /// occupied cell.
    #[must_use = "apply_move returns a new game state; the original is unchanged"]
    pub fn apply_move(&self, position: Position) -> crate::Result<GameState> {
        if self.is_terminal() {
            return Err(crate::Error::GameOver);
        }
        position.validate()?;
        if self.board.cell(position) != Cell::Empty {
            return Err(crate::Error::Occupied { position });
        }

        let mut next = *self;
        next.board.set_cell(position, self.turn.to_cell());
        next.turn = self.turn.opponent();
        Ok(next)
    }
}

impl Default for GameState {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for GameState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..BOARD_DIM {
            for col in 0..BOARD_DIM {
                write!(f, "{}", self.board.cell(Position::new(row, col)).to_char())?;
            }
            writeln!(f)?;
        }
        match self.outcome() {
            Some(GameOutcome::Win(winner)) => write!(f, "{winner} wins"),
            Some(GameOutcome::Draw) => write!(f, "draw"),
            None => write!(f, "{} to move", self.turn),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn play(state: GameState, moves: &[(usize, usize)]) -> GameState {
        moves.iter().fold(state, |s, &(row, col)| {
            s.apply_move(Position::new(row, col)).unwrap()
        })
    }

    #[test]
    fn new_game_starts_with_x() {
        let state = GameState::new();
        assert_eq!(state.turn(), Player::X);
        assert_eq!(state.ply(), 0);
        assert_eq!(state.legal_moves().len(), 9);
        assert!(state.outcome().is_none());
    }

    #[test]
    fn moves_alternate_turns() {
        let state = GameState::new();
        let after_x = state.apply_move(Position::new(1, 1)).unwrap();
        assert_eq!(after_x.turn(), Player::O);
        assert_eq!(after_x.board().cell(Position::new(1, 1)), Cell::X);
        // Original untouched.
        assert_eq!(state.ply(), 0);

        let after_o = after_x.apply_move(Position::new(0, 0)).unwrap();
        assert_eq!(after_o.turn(), Player::X);
        assert_eq!(after_o.board().cell(Position::new(0, 0)), Cell::O);
    }

    #[test]
    fn occupied_cell_is_rejected() {
        let state = GameState::new().apply_move(Position::new(1, 1)).unwrap();
        let err = state.apply_move(Position::new(1, 1)).unwrap_err();
        assert!(matches!(err, crate::Error::Occupied { .. }));
    }

    #[test]
    fn out_of_bounds_is_rejected() {
        let err = GameState::new()
            .apply_move(Position::new(0, 3))
            .unwrap_err();
        assert!(matches!(err, crate::Error::OutOfBounds { .. }));
    }

    #[test]
    fn win_detection() {
        // X takes the top row.
        let state = play(
            GameState::new(),
            &[(0, 0), (1, 0), (0, 1), (1, 1), (0, 2)],
        );
        assert_eq!(state.outcome(), Some(GameOutcome::Win(Player::X)));
        assert!(state.legal_moves().is_empty());
        assert!(matches!(
            state.apply_move(Position::new(2, 2)).unwrap_err(),
            crate::Error::GameOver
        ));
    }

    #[test]
    fn draw_detection() {
        let state = play(
            GameState::new(),
            &[
                (0, 0),
                (0, 1),
                (0, 2),
                (1, 1),
                (1, 0),
                (2, 0),
                (1, 2),
                (2, 2),
                (2, 1),
            ],
        );
        assert_eq!(state.outcome(), Some(GameOutcome::Draw));
        assert!(state.legal_moves().is_empty());
    }

    #[test]
    fn legal_moves_are_row_major() {
        let state = GameState::new().apply_move(Position::new(0, 0)).unwrap();
        let moves = state.legal_moves();
        assert_eq!(moves[0], Position::new(0, 1));
        assert!(moves.windows(2).all(|w| w[0] < w[1]));
    }
}
