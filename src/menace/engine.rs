//! The MENACE learning engine: symmetry-deduplicated state-space
//! construction, stochastic move selection, and bead adjustment.

use std::{
    collections::{HashMap, HashSet},
    fmt,
};

use rand::{SeedableRng, rngs::StdRng};

use super::{
    matchbox::{BoxId, Matchbox},
    options::{LAYER_COUNT, Options},
};
use crate::tictactoe::{Board, D4Transform, GameState, Position};

/// The moves an engine made during one game, keyed by the state each
/// move was played in. Fed back to [`Menace::reward`] and
/// [`Menace::punish`] once the outcome is known.
pub type MoveRecord = HashMap<GameState, Position>;

/// Result of asking the engine for a move
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MoveDecision {
    /// A move was drawn and applied
    Played {
        position: Position,
        state: GameState,
    },
    /// The resolved matchbox holds no beads, so no weighted choice is
    /// possible. Not an error: callers punish the recorded moves and
    /// treat the game as lost.
    Resigned,
}

impl MoveDecision {
    /// The chosen move and resulting state, unless the engine resigned
    pub fn played(self) -> Option<(Position, GameState)> {
        match self {
            MoveDecision::Played { position, state } => Some((position, state)),
            MoveDecision::Resigned => None,
        }
    }
}

/// A MENACE instance that can learn to play both X and O.
///
/// Owns the universe of canonical matchboxes, built eagerly at
/// construction. Some legally reachable boards are not keys of the
/// index, but every such board is a symmetry transform of a board
/// that is.
pub struct Menace {
    boxes: Vec<Matchbox>,
    index: HashMap<Board, BoxId>,
    options: Options,
    rng: StdRng,
}

impl fmt::Debug for Menace {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Menace")
            .field("boxes", &self.boxes.len())
            .field("options", &self.options)
            .finish()
    }
}

impl Menace {
    /// Create an engine with validated options, seeding its RNG from
    /// the OS entropy source.
    pub fn new(options: Options) -> crate::Result<Self> {
        Self::with_seed(options, rand::random::<u64>())
    }

    /// Create an engine with a fixed RNG seed for reproducible play
    pub fn with_seed(options: Options, seed: u64) -> crate::Result<Self> {
        options.validate()?;
        let mut engine = Menace {
            boxes: Vec::new(),
            index: HashMap::new(),
            options,
            rng: StdRng::seed_from_u64(seed),
        };
        engine.build()?;
        Ok(engine)
    }

    /// Reset the RNG used for move selection
    pub fn reseed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }

    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Number of matchboxes in the canonical universe
    pub fn box_count(&self) -> usize {
        self.boxes.len()
    }

    /// Iterate over every matchbox in discovery order
    pub fn matchboxes(&self) -> impl Iterator<Item = &Matchbox> {
        self.boxes.iter()
    }

    /// Look up the matchbox by arena index (as found in successor links)
    pub fn matchbox_by_id(&self, id: BoxId) -> Option<&Matchbox> {
        self.boxes.get(id.index())
    }

    /// Retrieve the matchbox for a board, or for any symmetry
    /// transform of it. Returns `None` only for boards outside the
    /// reachable state space.
    pub fn matchbox(&self, board: &Board) -> Option<&Matchbox> {
        self.resolve(board).map(|(id, _)| &self.boxes[id.index()])
    }

    /// Matchbox counts per ply layer (diagnostics)
    pub fn per_ply_counts(&self) -> [usize; 10] {
        let mut counts = [0usize; 10];
        for matchbox in &self.boxes {
            counts[matchbox.state().ply()] += 1;
        }
        counts
    }

    /// Build one matchbox per symmetry-equivalence class of reachable
    /// board, linked into a DAG mirroring legal play.
    ///
    /// Layered breadth-first traversal over plies 0..8. Candidate
    /// successors are deduplicated against the states already queued
    /// for the next layer only: boards from different layers carry
    /// different piece counts and can never collide.
    fn build(&mut self) -> crate::Result<()> {
        let root = GameState::new();
        self.insert_box(root);
        let mut next = vec![root];

        for layer in 0..LAYER_COUNT {
            let frontier = std::mem::take(&mut next);
            let layer_beads = self.options.beads.for_layer(layer);

            for state in frontier {
                // Terminal states stay in the universe for their
                // parents' links but are never expanded.
                if state.is_terminal() {
                    continue;
                }
                let source = self.lookup(&state.board())?;
                // Multiple raw successors can collapse onto one
                // canonical box; register beads and a link only for
                // the first move that reaches each box.
                let mut linked: HashSet<BoxId> = HashSet::new();

                'moves: for position in state.legal_moves() {
                    let successor = state.apply_move(position).map_err(|err| {
                        crate::Error::LegalMoveFailed {
                            position,
                            message: err.to_string(),
                        }
                    })?;
                    let board = successor.board();

                    for queued in &next {
                        let queued_board = queued.board();
                        if board.transformation(&queued_board).is_some() {
                            let id = self.lookup(&queued_board)?;
                            if linked.insert(id) {
                                self.boxes[source.index()].register(position, layer_beads, id);
                            }
                            continue 'moves;
                        }
                    }

                    let id = self.insert_box(successor);
                    self.boxes[source.index()].register(position, layer_beads, id);
                    linked.insert(id);
                    next.push(successor);
                }
            }
        }
        Ok(())
    }

    fn insert_box(&mut self, state: GameState) -> BoxId {
        let id = BoxId(self.boxes.len());
        self.boxes.push(Matchbox::new(state));
        self.index.insert(state.board(), id);
        id
    }

    /// Exact-board index lookup. Callers guarantee the board was
    /// registered; a miss indicates a construction defect.
    fn lookup(&self, board: &Board) -> crate::Result<BoxId> {
        self.index
            .get(board)
            .copied()
            .ok_or_else(|| crate::Error::NoBoxFound {
                board: board.to_string(),
            })
    }

    /// Resolve a board to its owning matchbox by searching its 8
    /// symmetry transforms against the canonical index, in matcher
    /// order. Also returns the transform mapping the queried board to
    /// the canonical board.
    fn resolve(&self, board: &Board) -> Option<(BoxId, D4Transform)> {
        D4Transform::all().into_iter().find_map(|transform| {
            self.index
                .get(&board.transform(&transform))
                .map(|&id| (id, transform))
        })
    }

    /// Retrieve the engine's decision for a game state.
    ///
    /// Draws a move from the state's matchbox with probability
    /// proportional to bead count, maps it back into the caller's
    /// board coordinates, and applies it. A box with no beads yields
    /// [`MoveDecision::Resigned`] without altering anything.
    ///
    /// States outside the constructed universe are an error; this
    /// cannot happen for states produced by legal play.
    pub fn select_move(&mut self, state: &GameState) -> crate::Result<MoveDecision> {
        let board = state.board();
        let (id, to_canonical) =
            self.resolve(&board)
                .ok_or_else(|| crate::Error::NoBoxFound {
                    board: board.to_string(),
                })?;

        let Some(canonical_move) = self.boxes[id.index()].sample(&mut self.rng) else {
            return Ok(MoveDecision::Resigned);
        };

        let position = canonical_move.transform(&to_canonical.inverse());
        let next = state.apply_move(position)?;
        Ok(MoveDecision::Played {
            position,
            state: next,
        })
    }

    /// Tune each recorded move by `amount` in its canonical
    /// coordinates. States with no matching box are skipped.
    fn adjust(&mut self, moves: &MoveRecord, amount: i32) {
        for (state, &position) in moves {
            let Some((id, to_canonical)) = self.resolve(&state.board()) else {
                continue;
            };
            let canonical_move = position.transform(&to_canonical);
            self.boxes[id.index()]
                .tune(&HashMap::from([(canonical_move, amount)]));
        }
    }

    /// Adjust the engine's strategy after a losing game: one bead is
    /// removed from every recorded move.
    pub fn punish(&mut self, moves: &MoveRecord) {
        self.adjust(moves, -1);
    }

    /// Adjust the engine's strategy after a winning or drawing game,
    /// adding the configured reward to every recorded move.
    pub fn reward(&mut self, moves: &MoveRecord, won: bool) {
        let amount = if won {
            self.options.win_reward
        } else {
            self.options.draw_reward
        };
        self.adjust(moves, amount as i32);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn engine() -> Menace {
        Menace::with_seed(Options::default(), 42).unwrap()
    }

    #[test]
    fn opening_moves_share_three_boxes() {
        let engine = engine();
        let root = GameState::new();

        let mut distinct: HashSet<String> = HashSet::new();
        for position in root.legal_moves() {
            let next = root.apply_move(position).unwrap();
            let matchbox = engine
                .matchbox(&next.board())
                .expect("every opening board must resolve");
            distinct.insert(matchbox.state().board().to_string());
        }
        // Corner, edge, center.
        assert_eq!(distinct.len(), 3);
    }

    #[test]
    fn root_box_tracks_one_move_per_symmetry_class() {
        let engine = engine();
        let root = engine.matchbox(&Board::default()).unwrap();

        let beads = root.beads();
        assert_eq!(beads.len(), 3);
        assert!(beads.values().all(|&count| count == 4));
        assert_eq!(root.total_beads(), 12);

        let links = root.links();
        assert_eq!(links.len(), 3);
        let targets: HashSet<BoxId> = links.values().copied().collect();
        assert_eq!(targets.len(), 3);
    }

    #[test]
    fn resolve_is_closed_under_symmetry() {
        let engine = engine();
        let state = GameState::new()
            .apply_move(Position::new(0, 0))
            .unwrap()
            .apply_move(Position::new(1, 1))
            .unwrap();
        let board = state.board();

        for transform in D4Transform::all() {
            let transformed = board.transform(&transform);
            assert!(
                engine.matchbox(&transformed).is_some(),
                "transform {transform:?} failed to resolve"
            );
        }
    }

    #[test]
    fn unreachable_board_does_not_resolve() {
        // Two X's and no O is not reachable through legal alternation.
        let state = GameState::new().apply_move(Position::new(0, 0)).unwrap();
        let mut board = state.board();
        board.set_cell(Position::new(2, 2), crate::tictactoe::Cell::X);
        assert!(engine().matchbox(&board).is_none());
    }

    #[test]
    fn invalid_options_fail_construction() {
        let options = Options {
            beads: super::super::options::BeadSchedule::new([0; 9]),
            ..Options::default()
        };
        assert!(Menace::new(options).is_err());
    }

    #[test]
    fn selected_moves_are_legal() {
        let mut engine = engine();
        let mut state = GameState::new();
        while state.outcome().is_none() {
            match engine.select_move(&state).unwrap() {
                MoveDecision::Played { position, state: next } => {
                    assert!(state.legal_moves().contains(&position));
                    state = next;
                }
                MoveDecision::Resigned => panic!("fresh engine must never resign"),
            }
        }
    }
}
