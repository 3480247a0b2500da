//! Application state shared between the host and the game loop thread.

use std::sync::mpsc;
use std::sync::{Arc, Mutex, MutexGuard};
use std::thread::JoinHandle;

use anyhow::{anyhow, bail, Context, Result};

use arena_core::commands::HostCommand;
use arena_core::state::ArenaSnapshot;

use crate::game_loop::{self, GameLoopCommand, Session};

/// Host-side handle on a running session.
///
/// - `mpsc::Sender` is wrapped in `Mutex` (Sender is Send but not Sync)
/// - `Mutex<Option<...>>` holds state that does not exist before `start`
/// - `Arc<Mutex<...>>` is the latest snapshot, shared with the loop thread
#[derive(Default)]
pub struct AppState {
    /// `None` before `start` is called.
    pub command_tx: Mutex<Option<mpsc::Sender<GameLoopCommand>>>,
    /// Updated by the game loop thread after each tick.
    pub latest_snapshot: Arc<Mutex<Option<ArenaSnapshot>>>,
    pub loop_handle: Mutex<Option<JoinHandle<()>>>,
}

impl AppState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Spawn the game loop for `session`. Fails if one is already running.
    pub fn start(&self, session: Session) -> Result<()> {
        let mut handle = lock(&self.loop_handle)?;
        if handle.as_ref().is_some_and(|h| !h.is_finished()) {
            bail!("simulation already running");
        }

        let (cmd_tx, loop_handle) =
            game_loop::spawn_game_loop(session, self.latest_snapshot.clone())
                .context("failed to spawn game loop thread")?;
        *lock(&self.command_tx)? = Some(cmd_tx);
        *handle = Some(loop_handle);
        Ok(())
    }

    /// Forward a host command to the simulation.
    pub fn send_command(&self, command: HostCommand) -> Result<()> {
        let tx = lock(&self.command_tx)?;
        match tx.as_ref() {
            Some(tx) => tx
                .send(GameLoopCommand::Command(command))
                .map_err(|e| anyhow!("failed to send command: {e}")),
            None => bail!("simulation not started"),
        }
    }

    /// Latest snapshot, if a tick has run.
    pub fn snapshot(&self) -> Result<Option<ArenaSnapshot>> {
        Ok(lock(&self.latest_snapshot)?.clone())
    }

    /// Block until the game loop exits on its own.
    pub fn wait(&self) -> Result<()> {
        let handle = lock(&self.loop_handle)?.take();
        if let Some(handle) = handle {
            handle
                .join()
                .map_err(|_| anyhow!("game loop thread panicked"))?;
        }
        Ok(())
    }

    /// Ask the game loop to stop and wait for it.
    pub fn shutdown(&self) -> Result<()> {
        if let Some(tx) = lock(&self.command_tx)?.take() {
            // The loop may already be gone.
            let _ = tx.send(GameLoopCommand::Shutdown);
        }
        self.wait()
    }
}

fn lock<T>(mutex: &Mutex<T>) -> Result<MutexGuard<'_, T>> {
    mutex.lock().map_err(|_| anyhow!("app state lock poisoned"))
}
