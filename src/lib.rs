//! MENACE (Matchbox Educable Noughts And Crosses Engine) simulator
//!
//! This crate provides:
//! - A complete Tic-Tac-Toe game implementation with D4 symmetry tools
//! - A symmetry-deduplicated state-space builder (one matchbox per
//!   equivalence class of reachable board)
//! - Bead-weighted stochastic move selection with reward/punishment
//!   learning
//! - Training orchestration and an interactive CLI

pub mod cli;
pub mod error;
pub mod menace;
pub mod tictactoe;
pub mod utils;

pub use error::{Error, Result};
pub use menace::{
    BeadSchedule, Matchbox, Menace, MoveDecision, MoveRecord, OpponentKind, Options,
    TrainingConfig, TrainingReport, TrainingSession,
};
pub use tictactoe::{Board, D4Transform, GameOutcome, GameState, Player, Position};
