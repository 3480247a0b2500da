use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::Parser;
use log::info;

use arena_app::game_loop::{LoopOptions, Session};
use arena_app::logging;
use arena_app::state::AppState;
use arena_core::config::GameConfig;
use arena_core::level::LevelData;
use arena_sim::SimConfig;

const TRAINING_GROUND: &str = include_str!("../levels/training_ground.json");

/// Headless wave arena: runs a level until it is won, lost or timed out
#[derive(Parser)]
#[command(author, version, about, long_about = None)]
struct Args {
    /// Game tuning JSON; built-in defaults when omitted
    #[arg(short, long)]
    config: Option<PathBuf>,
    /// Level JSON; the bundled training ground when omitted
    #[arg(short, long)]
    level: Option<PathBuf>,
    /// RNG seed
    #[arg(long, default_value_t = 42)]
    seed: u64,
    /// Stop after this many seconds of ticks, paused time included
    #[arg(long, default_value_t = 300.0)]
    seconds: f64,
    /// Run ticks back to back instead of at the tick rate
    #[arg(long)]
    fast: bool,
    /// Do not shoot at units
    #[arg(long)]
    no_auto_fire: bool,
    /// Enable verbose logging
    #[arg(short, long)]
    verbose: bool,
}

fn main() -> Result<()> {
    let args = Args::parse();
    logging::init(args.verbose);

    let game = match &args.config {
        Some(path) => GameConfig::from_path(path)
            .with_context(|| format!("loading config {}", path.display()))?,
        None => GameConfig::default(),
    };
    let level = match &args.level {
        Some(path) => {
            LevelData::from_path(path).with_context(|| format!("loading level {}", path.display()))?
        }
        None => LevelData::from_json_str(TRAINING_GROUND).context("parsing bundled level")?,
    };

    let state = AppState::new();
    state.start(Session {
        sim: SimConfig {
            seed: args.seed,
            game,
        },
        level,
        options: LoopOptions {
            realtime: !args.fast,
            auto_fire: !args.no_auto_fire,
            time_limit_secs: args.seconds,
        },
    })?;
    state.wait()?;

    if let Some(snapshot) = state.snapshot()? {
        info!(
            "{}: {:?} at {:.1}s, wave {}/{}, objective \"{}\" {:?}",
            snapshot.level,
            snapshot.phase,
            snapshot.time.elapsed_secs,
            snapshot.wave.wave_number,
            snapshot.wave.total_waves,
            snapshot.objective.title,
            snapshot.objective.state,
        );
        println!("{}", serde_json::to_string_pretty(&snapshot)?);
    }
    Ok(())
}
