//! Error types for the beadbox crate

use thiserror::Error;

use crate::tictactoe::Position;

/// Main error type for the beadbox crate
#[derive(Error, Debug)]
#[non_exhaustive]
pub enum Error {
    #[error("position {position} is out of bounds (rows and columns must be 0-2)")]
    OutOfBounds { position: Position },

    #[error("position {position} is already occupied")]
    Occupied { position: Position },

    #[error("game already over")]
    GameOver,

    #[error("no valid moves available")]
    NoValidMoves,

    #[error("no matchbox found for board {board}")]
    NoBoxFound { board: String },

    #[error("legal move {position} failed during state-space construction: {message}")]
    LegalMoveFailed { position: Position, message: String },

    #[error("invalid configuration: {message}")]
    InvalidConfiguration { message: String },

    #[error("invalid bead schedule '{input}': {reason}")]
    ParseBeadSchedule { input: String, reason: String },
}

/// Convenience type alias for Results using the crate's Error type
pub type Result<T> = std::result::Result<T, Error>;
