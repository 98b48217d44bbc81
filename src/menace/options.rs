//! Engine configuration: per-layer bead counts and reward magnitudes

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

/// Number of plies the state-space builder expands (a full board at
/// ply 9 is always terminal)
pub const LAYER_COUNT: usize = 9;

/// Initial bead count per layer, indexed by the number of symbols
/// already on the board when a state is discovered.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct BeadSchedule([u32; LAYER_COUNT]);

impl BeadSchedule {
    pub fn new(beads: [u32; LAYER_COUNT]) -> Self {
        BeadSchedule(beads)
    }

    /// Bead count for states discovered at the given layer
    pub fn for_layer(&self, layer: usize) -> u32 {
        self.0[layer]
    }

    /// Every per-layer bead count must be at least 1
    pub fn validate(&self) -> crate::Result<()> {
        for (layer, &beads) in self.0.iter().enumerate() {
            if beads < 1 {
                return Err(crate::Error::InvalidConfiguration {
                    message: format!("beads for layer {layer} must be at least 1"),
                });
            }
        }
        Ok(())
    }
}

impl Default for BeadSchedule {
    fn default() -> Self {
        // The original machine's schedule: more beads for early layers.
        BeadSchedule([4, 4, 3, 3, 2, 2, 1, 1, 1])
    }
}

impl fmt::Display for BeadSchedule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let parts: Vec<String> = self.0.iter().map(u32::to_string).collect();
        write!(f, "{}", parts.join(","))
    }
}

impl FromStr for BeadSchedule {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let parse_error = |reason: String| crate::Error::ParseBeadSchedule {
            input: s.to_string(),
            reason,
        };

        let values: Vec<u32> = s
            .split(',')
            .map(|part| {
                part.trim()
                    .parse::<u32>()
                    .map_err(|err| parse_error(format!("'{}': {err}", part.trim())))
            })
            .collect::<Result<_, _>>()?;

        let beads: [u32; LAYER_COUNT] = values.try_into().map_err(|values: Vec<u32>| {
            parse_error(format!(
                "expected {LAYER_COUNT} comma-separated counts, got {}",
                values.len()
            ))
        })?;

        let schedule = BeadSchedule(beads);
        schedule.validate()?;
        Ok(schedule)
    }
}

/// Options controlling bead management
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Options {
    /// Initial beads per move, depending on the layer a state was
    /// discovered in
    pub beads: BeadSchedule,
    /// Beads added to each of the winner's moves
    pub win_reward: u32,
    /// Beads added to each move of a drawn game (may be zero)
    pub draw_reward: u32,
}

impl Options {
    pub fn validate(&self) -> crate::Result<()> {
        self.beads.validate()
    }
}

impl Default for Options {
    fn default() -> Self {
        Options {
            beads: BeadSchedule::default(),
            win_reward: 3,
            draw_reward: 1,
        }
    }
}
