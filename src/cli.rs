//! Command-line interface for the MENACE simulator
//!
//! Provides three commands: `train` runs a batch of learning games,
//! `play` is the interactive loop against a human, and `stats` prints
//! diagnostics about the canonical box universe.

use std::io::{self, BufRead};

use anyhow::{Context, Result};
use clap::{Args, Parser, Subcommand, ValueEnum};

use crate::{
    menace::{
        BeadSchedule, Menace, MoveDecision, MoveRecord, OpponentKind, Options, TrainingConfig,
        TrainingSession,
    },
    tictactoe::{Board, GameOutcome, GameState, Player, Position},
};

#[derive(Parser)]
#[command(name = "beadbox", version, about = "MENACE matchbox-learning simulator", long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a fresh engine and report outcome tallies
    Train(TrainArgs),
    /// Play interactively against the engine
    Play(PlayArgs),
    /// Print diagnostics about the canonical box universe
    Stats(StatsArgs),
}

/// Parse arguments and dispatch to the selected command
pub fn run() -> Result<()> {
    let cli = Cli::parse();
    match cli.command {
        Commands::Train(args) => execute_train(args),
        Commands::Play(args) => execute_play(args),
        Commands::Stats(args) => execute_stats(args),
    }
}

#[derive(Args)]
struct TrainArgs {
    /// Number of training games
    #[arg(long, default_value_t = 10_000)]
    games: usize,

    /// Opponent: 'self' (engine plays both sides) or 'random'
    #[arg(long, default_value = "self")]
    opponent: OpponentKind,

    /// Seed for reproducible runs
    #[arg(long)]
    seed: Option<u64>,

    /// Initial beads per layer, e.g. 4,4,3,3,2,2,1,1,1
    #[arg(long)]
    beads: Option<BeadSchedule>,

    /// Beads added to each of the winner's moves
    #[arg(long, default_value_t = 3)]
    win_reward: u32,

    /// Beads added to each move of a drawn game
    #[arg(long, default_value_t = 1)]
    draw_reward: u32,

    /// Suppress the progress bar
    #[arg(long)]
    quiet: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum SideArg {
    X,
    O,
}

impl SideArg {
    fn player(self) -> Player {
        match self {
            SideArg::X => Player::X,
            SideArg::O => Player::O,
        }
    }
}

#[derive(Args)]
struct PlayArgs {
    /// Which side MENACE plays
    #[arg(long, value_enum, default_value_t = SideArg::X)]
    menace_as: SideArg,

    /// Self-play games to warm the engine up before the match
    #[arg(long, default_value_t = 0)]
    train_games: usize,

    /// Seed for reproducible engine draws
    #[arg(long)]
    seed: Option<u64>,
}

#[derive(Args)]
struct StatsArgs {
    /// Emit JSON instead of plain text
    #[arg(long)]
    json: bool,

    /// Initial beads per layer, e.g. 4,4,3,3,2,2,1,1,1
    #[arg(long)]
    beads: Option<BeadSchedule>,
}

fn build_engine(beads: Option<BeadSchedule>, win_reward: u32, draw_reward: u32, seed: Option<u64>) -> Result<Menace> {
    let options = Options {
        beads: beads.unwrap_or_default(),
        win_reward,
        draw_reward,
    };
    let engine = match seed {
        Some(seed) => Menace::with_seed(options, seed)?,
        None => Menace::new(options)?,
    };
    Ok(engine)
}

fn execute_train(args: TrainArgs) -> Result<()> {
    let engine = build_engine(args.beads, args.win_reward, args.draw_reward, args.seed)?;
    let config = TrainingConfig {
        games: args.games,
        opponent: args.opponent,
        seed: args.seed,
        progress: !args.quiet,
    };

    let mut session = TrainingSession::new(engine, config);
    let report = session.run().context("training session failed")?;

    println!("Training done!");
    println!("  games:        {}", report.games);
    println!("  wins:         {}", report.wins);
    println!("  draws:        {}", report.draws);
    println!("  losses:       {}", report.losses);
    println!("  resignations: {}", report.resignations);
    println!("  win rate:     {:.3}", report.win_rate());
    Ok(())
}

fn execute_play(args: PlayArgs) -> Result<()> {
    let mut engine = build_engine(None, 3, 1, args.seed)?;

    if args.train_games > 0 {
        println!("Warming up with {} self-play games...", args.train_games);
        let config = TrainingConfig {
            games: args.train_games,
            opponent: OpponentKind::SelfPlay,
            seed: args.seed,
            progress: true,
        };
        let mut session = TrainingSession::new(engine, config);
        session.run()?;
        engine = session.into_engine();
    }

    let menace_side = args.menace_as.player();
    let stdin = io::stdin();
    let mut lines = stdin.lock().lines();
    let mut state = GameState::new();
    let mut record = MoveRecord::new();

    while state.outcome().is_none() {
        println!("\n{state}");
        if state.turn() == menace_side {
            match engine.select_move(&state)? {
                MoveDecision::Played {
                    position,
                    state: next,
                } => {
                    println!("MENACE plays {position}");
                    record.insert(state, position);
                    state = next;
                }
                MoveDecision::Resigned => {
                    println!("MENACE resigns!");
                    engine.punish(&record);
                    return Ok(());
                }
            }
        } else {
            state = prompt_move(&mut lines, &state)?;
        }
    }

    println!("\n{state}");
    match state.outcome() {
        Some(GameOutcome::Win(winner)) if winner == menace_side => {
            println!("MENACE wins");
            engine.reward(&record, true);
        }
        Some(GameOutcome::Win(_)) => {
            println!("MENACE loses");
            engine.punish(&record);
        }
        Some(GameOutcome::Draw) => {
            println!("Draw");
            engine.reward(&record, false);
        }
        None => unreachable!("game loop exits only on a terminal state"),
    }
    Ok(())
}

/// Prompt until the human enters a legal move, then apply it
fn prompt_move(
    lines: &mut impl Iterator<Item = io::Result<String>>,
    state: &GameState,
) -> Result<GameState> {
    loop {
        println!("Enter move (row col, 0-2):");
        let line = lines
            .next()
            .context("input closed before the game finished")??;

        let mut parts = line.split_whitespace();
        let (Some(row), Some(col)) = (parts.next(), parts.next()) else {
            println!("Invalid move: expected two numbers");
            continue;
        };
        let (Ok(row), Ok(col)) = (row.parse::<usize>(), col.parse::<usize>()) else {
            println!("Invalid move: expected two numbers");
            continue;
        };

        match state.apply_move(Position::new(row, col)) {
            Ok(next) => return Ok(next),
            Err(err) => println!("Invalid move: {err}"),
        }
    }
}

fn execute_stats(args: StatsArgs) -> Result<()> {
    let engine = build_engine(args.beads, 3, 1, Some(0))?;
    let per_ply = engine.per_ply_counts();
    let root = engine
        .matchbox(&Board::default())
        .context("initial board must resolve to a matchbox")?;

    let mut opening: Vec<(Position, u32)> = root.beads().into_iter().collect();
    opening.sort_by_key(|&(pos, _)| pos);

    if args.json {
        let payload = serde_json::json!({
            "boxes": engine.box_count(),
            "per_ply": per_ply.to_vec(),
            "opening": opening
                .iter()
                .map(|(pos, beads)| {
                    serde_json::json!({ "position": pos.to_string(), "beads": beads })
                })
                .collect::<Vec<_>>(),
        });
        println!("{}", serde_json::to_string_pretty(&payload)?);
        return Ok(());
    }

    println!("canonical boxes: {}", engine.box_count());
    println!("boxes per ply:");
    for (ply, count) in per_ply.iter().enumerate() {
        println!("  ply {ply}: {count}");
    }
    println!("opening box ({} beads total):", root.total_beads());
    for (pos, beads) in opening {
        println!("  {pos}: {beads}");
    }
    Ok(())
}
