//! D4 symmetry group operations for board canonicalization

use serde::{Deserialize, Serialize};

use super::board::{BOARD_DIM, Board, Position};

/// Number of quarter-turns before a square board repeats
pub const ROTATIONS: u8 = 4;

/// D4 symmetry transformation (dihedral group of the square).
///
/// Rotations are applied first, then the optional transposition
/// across the main diagonal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct D4Transform {
    /// Number of clockwise quarter-turns (0-3)
    pub rotations: u8,
    /// Whether to transpose after rotating
    pub transpose: bool,
}

impl D4Transform {
    /// Create a transform, normalizing the rotation count to 0-3.
    /// Negative values wrap around.
    pub fn new(rotations: i32, transpose: bool) -> Self {
        let rotations = rotations.rem_euclid(ROTATIONS as i32) as u8;
        D4Transform {
            rotations,
            transpose,
        }
    }

    /// Create the identity transform
    pub fn identity() -> Self {
        D4Transform {
            rotations: 0,
            transpose: false,
        }
    }

    /// All 8 D4 transforms in matcher order: rotations 0..3, with the
    /// non-transposed variant before the transposed one.
    pub fn all() -> [D4Transform; 8] {
        let mut transforms = [D4Transform::identity(); 8];
        for rotations in 0..ROTATIONS {
            transforms[2 * rotations as usize] = D4Transform {
                rotations,
                transpose: false,
            };
            transforms[2 * rotations as usize + 1] = D4Transform {
                rotations,
                transpose: true,
            };
        }
        transforms
    }

    /// Get the inverse transform.
    ///
    /// With rotation applied before transposition, every transposed
    /// transform is an involution; pure rotations invert to the
    /// complementary rotation count.
    pub fn inverse(&self) -> D4Transform {
        if self.transpose {
            *self
        } else {
            D4Transform {
                rotations: (ROTATIONS - self.rotations) % ROTATIONS,
                transpose: false,
            }
        }
    }
}

impl Position {
    /// Transform a position to follow a board transformed the same way
    pub fn transform(&self, t: &D4Transform) -> Position {
        let n = BOARD_DIM - 1;
        let mut tp = match t.rotations % ROTATIONS {
            1 => Position::new(self.col, n - self.row),
            2 => Position::new(n - self.row, n - self.col),
            3 => Position::new(n - self.col, self.row),
            _ => *self,
        };
        if t.transpose {
            tp = Position::new(tp.col, tp.row);
        }
        tp
    }
}

impl Board {
    /// Apply a D4 transform to the board.
    ///
    /// The board transform agrees in direction with the position
    /// transform: `b.transform(t).cell(p.transform(t)) == b.cell(p)`.
    pub fn transform(&self, t: &D4Transform) -> Board {
        let mut transformed = Board::default();
        for row in 0..BOARD_DIM {
            for col in 0..BOARD_DIM {
                let pos = Position::new(row, col);
                transformed.set_cell(pos.transform(t), self.cell(pos));
            }
        }
        transformed
    }

    /// Test whether this board is a transformation of another board.
    ///
    /// Returns the first transform of `other` that reproduces `self`,
    /// searching all 8 combinations in [`D4Transform::all`] order, or
    /// `None` if the boards are unrelated. The fixed order makes the
    /// returned representative deterministic when multiple symmetry
    /// axes coincide.
    pub fn transformation(&self, other: &Board) -> Option<D4Transform> {
        D4Transform::all()
            .into_iter()
            .find(|t| other.transform(t) == *self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::board::Cell;

    fn sample_board() -> Board {
        let mut board = Board::default();
        board.set_cell(Position::new(0, 0), Cell::X);
        board.set_cell(Position::new(0, 2), Cell::O);
        board.set_cell(Position::new(1, 1), Cell::X);
        board.set_cell(Position::new(2, 1), Cell::O);
        board
    }

    #[test]
    fn rotation_formulas() {
        let pos = Position::new(0, 1);
        assert_eq!(pos.transform(&D4Transform::new(1, false)), Position::new(1, 2));
        assert_eq!(pos.transform(&D4Transform::new(2, false)), Position::new(2, 1));
        assert_eq!(pos.transform(&D4Transform::new(3, false)), Position::new(1, 0));
        assert_eq!(pos.transform(&D4Transform::new(0, false)), pos);
    }

    #[test]
    fn negative_rotations_wrap() {
        assert_eq!(D4Transform::new(-1, false), D4Transform::new(3, false));
        assert_eq!(D4Transform::new(-5, true), D4Transform::new(3, true));
        assert_eq!(D4Transform::new(6, false), D4Transform::new(2, false));
    }

    #[test]
    fn transpose_swaps_after_rotation() {
        let pos = Position::new(0, 1);
        // One rotation gives (1, 2); transposing yields (2, 1).
        assert_eq!(pos.transform(&D4Transform::new(1, true)), Position::new(2, 1));
    }

    #[test]
    fn board_and_position_transforms_agree() {
        let board = sample_board();
        for t in D4Transform::all() {
            let transformed = board.transform(&t);
            for pos in [
                Position::new(0, 0),
                Position::new(0, 2),
                Position::new(1, 1),
                Position::new(2, 1),
                Position::new(2, 2),
            ] {
                assert_eq!(transformed.cell(pos.transform(&t)), board.cell(pos));
            }
        }
    }

    #[test]
    fn transform_round_trips_through_inverse() {
        let board = sample_board();
        for t in D4Transform::all() {
            let round_trip = board.transform(&t).transform(&t.inverse());
            assert_eq!(round_trip, board, "round trip failed for {t:?}");
        }
        let pos = Position::new(0, 1);
        for t in D4Transform::all() {
            assert_eq!(pos.transform(&t).transform(&t.inverse()), pos);
        }
    }

    #[test]
    fn matcher_finds_every_transform() {
        let board = sample_board();
        for t in D4Transform::all() {
            let transformed = board.transform(&t);
            let found = transformed
                .transformation(&board)
                .expect("transformed board must match its source");
            assert_eq!(board.transform(&found), transformed);
        }
    }

    #[test]
    fn matcher_returns_identity_first_for_symmetric_boards() {
        // The empty board matches under every combination; the fixed
        // search order must report rotation 0, no transpose.
        let empty = Board::default();
        let found = empty.transformation(&empty).unwrap();
        assert_eq!(found, D4Transform::identity());
    }

    #[test]
    fn unrelated_boards_do_not_match() {
        let board = sample_board();
        let mut other = Board::default();
        other.set_cell(Position::new(1, 1), Cell::O);
        assert!(board.transformation(&other).is_none());
    }
}
