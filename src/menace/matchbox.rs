//! Matchbox: the per-state decision unit holding weighted move choices

use std::collections::HashMap;

use rand::Rng;
use serde::{Deserialize, Serialize};

use crate::{
    tictactoe::{GameState, Position},
    utils::weighted_draw,
};

/// Index of a matchbox in the engine's arena.
///
/// Successor links between matchboxes are arena indices rather than
/// owning pointers; the engine's board-to-id map is the sole authority
/// for identity.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct BoxId(pub(crate) usize);

impl BoxId {
    pub fn index(self) -> usize {
        self.0
    }
}

/// A matchbox holds beads representing the move choices available in
/// one canonical game state, plus links to the successor matchboxes.
///
/// Matchboxes for terminal states exist only so their parents'
/// successor links resolve; their bead and link maps stay empty
/// forever.
#[derive(Debug, Clone)]
pub struct Matchbox {
    state: GameState,
    total_beads: u32,
    beads: HashMap<Position, u32>,
    links: HashMap<Position, BoxId>,
}

impl Matchbox {
    pub(crate) fn new(state: GameState) -> Self {
        Matchbox {
            state,
            total_beads: 0,
            beads: HashMap::new(),
            links: HashMap::new(),
        }
    }

    /// The canonical game state this matchbox decides for
    pub fn state(&self) -> GameState {
        self.state
    }

    /// Sum of all per-move bead counts
    pub fn total_beads(&self) -> u32 {
        self.total_beads
    }

    /// Bead count for a specific move, if the move is tracked here
    pub fn bead_count(&self, position: Position) -> Option<u32> {
        self.beads.get(&position).copied()
    }

    /// Copy of the move-to-beads mapping
    pub fn beads(&self) -> HashMap<Position, u32> {
        self.beads.clone()
    }

    /// Copy of the move-to-successor mapping
    pub fn links(&self) -> HashMap<Position, BoxId> {
        self.links.clone()
    }

    /// Register a move discovered during construction: seed it with the
    /// layer's bead count and link it to its successor matchbox.
    pub(crate) fn register(&mut self, position: Position, beads: u32, successor: BoxId) {
        self.beads.insert(position, beads);
        self.total_beads += beads;
        self.links.insert(position, successor);
    }

    /// Adjust bead counts. Moves not tracked by this matchbox are
    /// silently ignored, and each delta is clamped so no count drops
    /// below zero; the clamped delta is applied to the move and to the
    /// total alike.
    pub fn tune(&mut self, deltas: &HashMap<Position, i32>) {
        for (&position, &delta) in deltas {
            let Some(count) = self.beads.get_mut(&position) else {
                continue;
            };
            let capped = delta.max(-(*count as i32));
            if capped >= 0 {
                *count += capped as u32;
                self.total_beads += capped as u32;
            } else {
                *count -= capped.unsigned_abs();
                self.total_beads -= capped.unsigned_abs();
            }
        }
    }

    /// Draw a move with probability proportional to its bead count.
    ///
    /// Returns `None` when the box holds no beads, which callers treat
    /// as resignation.
    pub fn sample<R: Rng>(&self, rng: &mut R) -> Option<Position> {
        let mut items: Vec<(Position, u32)> =
            self.beads.iter().map(|(&pos, &count)| (pos, count)).collect();
        // Row-major order for reproducible draws under a seeded RNG.
        items.sort_by_key(|&(pos, _)| pos);
        weighted_draw(rng, &items)
    }
}
