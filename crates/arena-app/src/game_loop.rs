//! Game loop thread: runs the arena engine at the tick rate and publishes snapshots.
//!
//! The engine is created inside this thread because its observers are
//! single-threaded. Commands arrive via `mpsc` channel. Snapshots are stored
//! in shared state for polling.

use std::cell::RefCell;
use std::io;
use std::rc::Rc;
use std::sync::mpsc;
use std::sync::{Arc, Mutex};
use std::thread::JoinHandle;
use std::time::{Duration, Instant};

use log::info;

use arena_core::commands::HostCommand;
use arena_core::constants::{DT, TICK_RATE};
use arena_core::enums::GamePhase;
use arena_core::level::LevelData;
use arena_core::state::ArenaSnapshot;
use arena_core::types::SimTime;
use arena_sim::engine::{ArenaEngine, SimConfig};

use crate::autofire::AutoFire;
use crate::status::WaveStatus;

/// Nominal duration of one tick.
const TICK_DURATION: Duration = Duration::from_nanos(1_000_000_000 / TICK_RATE as u64);

/// Commands sent from the host to the game loop thread.
#[derive(Debug)]
pub enum GameLoopCommand {
    /// A host command to forward to the simulation engine.
    Command(HostCommand),
    /// Shut down the game loop thread gracefully.
    Shutdown,
}

/// How the loop paces and drives itself.
#[derive(Debug, Clone, Copy)]
pub struct LoopOptions {
    /// Sleep to hold the tick rate. Off runs ticks back to back.
    pub realtime: bool,
    /// Let the scripted fire policy shoot at units.
    pub auto_fire: bool,
    /// Stop after this many seconds of ticks, paused ticks included.
    pub time_limit_secs: f64,
}

/// Everything the loop needs to build and run one engine.
#[derive(Debug, Clone)]
pub struct Session {
    pub sim: SimConfig,
    pub level: LevelData,
    pub options: LoopOptions,
}

/// Spawns the game loop in a new thread.
///
/// Returns the command sender and the thread handle.
pub fn spawn_game_loop(
    session: Session,
    latest_snapshot: Arc<Mutex<Option<ArenaSnapshot>>>,
) -> io::Result<(mpsc::Sender<GameLoopCommand>, JoinHandle<()>)> {
    let (cmd_tx, cmd_rx) = mpsc::channel::<GameLoopCommand>();

    let handle = std::thread::Builder::new()
        .name("arena-game-loop".into())
        .spawn(move || {
            run_game_loop(session, cmd_rx, &latest_snapshot);
        })?;

    Ok((cmd_tx, handle))
}

/// The game loop. Runs until the mission ends, the time limit passes, a
/// Shutdown command arrives or the channel disconnects.
fn run_game_loop(
    session: Session,
    cmd_rx: mpsc::Receiver<GameLoopCommand>,
    latest_snapshot: &Mutex<Option<ArenaSnapshot>>,
) {
    let Session {
        sim,
        level,
        options,
    } = session;

    let mut auto_fire = options.auto_fire.then(|| AutoFire::new(&sim.game.combat));
    let status = Rc::new(RefCell::new(WaveStatus::new(
        sim.game.enemies.default_type.clone(),
    )));
    let mut engine = ArenaEngine::new(sim);
    engine.subscribe(status);
    engine.load_level(&level);

    // Advances while paused, unlike the engine's clock.
    let mut loop_clock = SimTime::default();
    let mut next_tick_time = Instant::now();

    loop {
        // 1. Drain all pending commands
        loop {
            match cmd_rx.try_recv() {
                Ok(GameLoopCommand::Command(cmd)) => {
                    engine.queue_command(cmd);
                }
                Ok(GameLoopCommand::Shutdown) => return,
                Err(mpsc::TryRecvError::Empty) => break,
                Err(mpsc::TryRecvError::Disconnected) => return,
            }
        }

        // 2. Advance one tick (engine handles pause semantics internally)
        let snapshot = engine.tick(DT);
        loop_clock.advance(DT);

        // 3. Scripted fire lands at the next tick boundary
        if let Some(shot) = auto_fire
            .as_mut()
            .and_then(|gun| gun.next_shot(DT, &snapshot))
        {
            engine.queue_command(shot);
        }

        let finished = matches!(snapshot.phase, GamePhase::Victory | GamePhase::Defeated)
            || loop_clock.elapsed_secs >= options.time_limit_secs;
        if finished {
            info!(
                "session over after {:.1}s: {:?}",
                snapshot.time.elapsed_secs, snapshot.phase
            );
        }

        // 4. Store latest snapshot for polling
        if let Ok(mut lock) = latest_snapshot.lock() {
            *lock = Some(snapshot);
        }

        if finished {
            return;
        }

        // 5. Sleep until next tick
        if !options.realtime {
            continue;
        }
        next_tick_time += TICK_DURATION;
        let now = Instant::now();
        if next_tick_time > now {
            std::thread::sleep(next_tick_time - now);
        } else if now - next_tick_time > TICK_DURATION * 2 {
            // Too far behind, reset to avoid catch-up spiral
            next_tick_time = now;
        }
    }
}
