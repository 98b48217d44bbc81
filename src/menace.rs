//! MENACE learning system
//!
//! This module provides the bead-weighted learning engine: validated
//! configuration, the matchbox decision unit, the symmetry-aware
//! state-space builder, and training orchestration.

pub mod engine;
pub mod matchbox;
pub mod options;
pub mod training;

pub use engine::{Menace, MoveDecision, MoveRecord};
pub use matchbox::{BoxId, Matchbox};
pub use options::{BeadSchedule, LAYER_COUNT, Options};
pub use training::{OpponentKind, TrainingConfig, TrainingReport, TrainingSession};
