//! Commands sent from the host to the simulation.
//!
//! Commands are queued and processed at the next tick boundary.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// All host actions the simulation understands.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum HostCommand {
    /// Request a player displacement for the next tick. Resolved against obstacles.
    MovePlayer { delta: Vec3 },
    /// Apply damage to a hostile unit (reported by the combat layer).
    DamageUnit { unit_id: u32, amount: f32 },
    /// The primary actor was defeated.
    PlayerDown,
    Pause,
    Resume,
}
