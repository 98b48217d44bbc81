//! Training orchestration: self-play and random-opponent sessions

use std::{fmt, str::FromStr};

use indicatif::{ProgressBar, ProgressStyle};
use rand::{SeedableRng, prelude::IndexedRandom, rngs::StdRng};
use serde::{Deserialize, Serialize};

use super::engine::{Menace, MoveDecision, MoveRecord};
use crate::tictactoe::{GameOutcome, GameState, Player};

/// Who the engine trains against
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OpponentKind {
    /// The engine plays both sides of every game
    SelfPlay,
    /// A uniform-random legal mover; the engine alternates sides
    /// between games
    Random,
}

impl fmt::Display for OpponentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            OpponentKind::SelfPlay => write!(f, "self"),
            OpponentKind::Random => write!(f, "random"),
        }
    }
}

impl FromStr for OpponentKind {
    type Err = crate::Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "self" | "selfplay" | "self-play" => Ok(OpponentKind::SelfPlay),
            "random" => Ok(OpponentKind::Random),
            _ => Err(crate::Error::InvalidConfiguration {
                message: format!("unknown opponent '{s}' (expected 'self' or 'random')"),
            }),
        }
    }
}

/// Configuration for a training session
#[derive(Debug, Clone)]
pub struct TrainingConfig {
    pub games: usize,
    pub opponent: OpponentKind,
    /// Seed for both the engine's draws and the random opponent
    pub seed: Option<u64>,
    /// Render a progress bar while training
    pub progress: bool,
}

impl Default for TrainingConfig {
    fn default() -> Self {
        TrainingConfig {
            games: 10_000,
            opponent: OpponentKind::SelfPlay,
            seed: None,
            progress: false,
        }
    }
}

/// Outcome tallies across a session.
///
/// For self-play sessions wins/losses are counted from X's
/// perspective; against a random opponent they are counted from the
/// engine's perspective.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct TrainingReport {
    pub games: usize,
    pub wins: usize,
    pub draws: usize,
    pub losses: usize,
    pub resignations: usize,
}

impl TrainingReport {
    pub fn win_rate(&self) -> f64 {
        if self.games == 0 {
            return 0.0;
        }
        self.wins as f64 / self.games as f64
    }
}

/// A training session driving an engine through repeated games
pub struct TrainingSession {
    engine: Menace,
    config: TrainingConfig,
    report: TrainingReport,
    rng: StdRng,
}

impl TrainingSession {
    pub fn new(mut engine: Menace, config: TrainingConfig) -> Self {
        let seed = config.seed.unwrap_or_else(rand::random::<u64>);
        engine.reseed(seed);
        TrainingSession {
            engine,
            config,
            report: TrainingReport::default(),
            // Decorrelate the opponent's draws from the engine's.
            rng: StdRng::seed_from_u64(seed.wrapping_add(1)),
        }
    }

    pub fn report(&self) -> TrainingReport {
        self.report
    }

    pub fn engine(&self) -> &Menace {
        &self.engine
    }

    /// Consume the session, keeping the trained engine
    pub fn into_engine(self) -> Menace {
        self.engine
    }

    /// Run the configured number of games
    pub fn run(&mut self) -> crate::Result<TrainingReport> {
        let bar = if self.config.progress {
            Some(training_progress(self.config.games as u64))
        } else {
            None
        };

        let mut menace_side = Player::X;
        for _ in 0..self.config.games {
            match self.config.opponent {
                OpponentKind::SelfPlay => self.play_self_game()?,
                OpponentKind::Random => {
                    self.play_random_game(menace_side)?;
                    menace_side = menace_side.opponent();
                }
            }
            self.report.games += 1;
            if let Some(bar) = &bar {
                bar.inc(1);
            }
        }

        if let Some(bar) = &bar {
            bar.finish();
        }
        Ok(self.report)
    }

    /// One game where the engine plays both sides. The winner's moves
    /// are rewarded and the loser's punished; a draw rewards both
    /// sides with the draw reward.
    fn play_self_game(&mut self) -> crate::Result<()> {
        let mut state = GameState::new();
        let mut x_moves = MoveRecord::new();
        let mut o_moves = MoveRecord::new();

        while state.outcome().is_none() {
            let turn = state.turn();
            match self.engine.select_move(&state)? {
                MoveDecision::Played { position, state: next } => {
                    let record = match turn {
                        Player::X => &mut x_moves,
                        Player::O => &mut o_moves,
                    };
                    record.insert(state, position);
                    state = next;
                }
                MoveDecision::Resigned => {
                    let record = match turn {
                        Player::X => &x_moves,
                        Player::O => &o_moves,
                    };
                    self.engine.punish(record);
                    self.report.resignations += 1;
                    return Ok(());
                }
            }
        }

        match state.outcome() {
            Some(GameOutcome::Win(Player::X)) => {
                self.engine.reward(&x_moves, true);
                self.engine.punish(&o_moves);
                self.report.wins += 1;
            }
            Some(GameOutcome::Win(Player::O)) => {
                self.engine.reward(&o_moves, true);
                self.engine.punish(&x_moves);
                self.report.losses += 1;
            }
            Some(GameOutcome::Draw) => {
                self.engine.reward(&x_moves, false);
                self.engine.reward(&o_moves, false);
                self.report.draws += 1;
            }
            None => unreachable!("loop exits only on a terminal state"),
        }
        Ok(())
    }

    /// One game against a uniform-random legal mover, with the engine
    /// on the given side.
    fn play_random_game(&mut self, menace_side: Player) -> crate::Result<()> {
        let mut state = GameState::new();
        let mut moves = MoveRecord::new();

        while state.outcome().is_none() {
            if state.turn() == menace_side {
                match self.engine.select_move(&state)? {
                    MoveDecision::Played { position, state: next } => {
                        moves.insert(state, position);
                        state = next;
                    }
                    MoveDecision::Resigned => {
                        self.engine.punish(&moves);
                        self.report.resignations += 1;
                        return Ok(());
                    }
                }
            } else {
                let legal = state.legal_moves();
                let position = *legal.choose(&mut self.rng).ok_or(crate::Error::NoValidMoves)?;
                state = state.apply_move(position)?;
            }
        }

        match state.outcome() {
            Some(GameOutcome::Win(winner)) if winner == menace_side => {
                self.engine.reward(&moves, true);
                self.report.wins += 1;
            }
            Some(GameOutcome::Win(_)) => {
                self.engine.punish(&moves);
                self.report.losses += 1;
            }
            Some(GameOutcome::Draw) => {
                self.engine.reward(&moves, false);
                self.report.draws += 1;
            }
            None => unreachable!("loop exits only on a terminal state"),
        }
        Ok(())
    }
}

fn training_progress(total_games: u64) -> ProgressBar {
    let bar = ProgressBar::new(total_games);
    bar.set_style(
        ProgressStyle::default_bar()
            .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games")
            .expect("Invalid progress bar template")
            .progress_chars("=>-"),
    );
    bar
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::menace::options::Options;

    fn session(opponent: OpponentKind, games: usize) -> TrainingSession {
        let engine = Menace::with_seed(Options::default(), 42).unwrap();
        TrainingSession::new(
            engine,
            TrainingConfig {
                games,
                opponent,
                seed: Some(7),
                progress: false,
            },
        )
    }

    #[test]
    fn self_play_tallies_every_game() {
        let mut session = session(OpponentKind::SelfPlay, 50);
        let report = session.run().unwrap();
        assert_eq!(report.games, 50);
        assert_eq!(
            report.wins + report.draws + report.losses + report.resignations,
            50
        );
    }

    #[test]
    fn random_opponent_tallies_every_game() {
        let mut session = session(OpponentKind::Random, 50);
        let report = session.run().unwrap();
        assert_eq!(report.games, 50);
        assert_eq!(
            report.wins + report.draws + report.losses + report.resignations,
            50
        );
    }

    #[test]
    fn opponent_kind_parses() {
        assert_eq!("self".parse::<OpponentKind>().unwrap(), OpponentKind::SelfPlay);
        assert_eq!("RANDOM".parse::<OpponentKind>().unwrap(), OpponentKind::Random);
        assert!("minimax".parse::<OpponentKind>().is_err());
    }

    #[test]
    fn win_rate_handles_empty_report() {
        assert_eq!(TrainingReport::default().win_rate(), 0.0);
    }
}
