//! Arena state snapshot: the complete visible state handed to presentation each tick.

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::enums::*;
use crate::events::{ObjectiveBanner, ObjectiveEvent, ScheduleEvent};
use crate::types::SimTime;

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ArenaSnapshot {
    pub time: SimTime,
    pub phase: GamePhase,
    pub level: String,
    pub player: PlayerView,
    pub wave: WaveView,
    pub units: Vec<UnitView>,
    pub objective: ObjectiveView,
    /// Scheduler events emitted during this tick.
    pub schedule_events: Vec<ScheduleEvent>,
    /// Objective transitions during this tick.
    pub objective_events: Vec<ObjectiveEvent>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PlayerView {
    pub position: Vec3,
    /// Axes the last requested move was blocked on.
    pub blocked: Vec<Axis>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct WaveView {
    pub phase: WavePhase,
    /// 1-based; 0 before the first wave.
    pub wave_number: u32,
    pub total_waves: u32,
    pub spawned_this_wave: u32,
    pub active_units: usize,
    pub intermission_remaining: f32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UnitView {
    pub unit_id: u32,
    pub archetype: String,
    pub position: Vec3,
    pub health: f32,
    pub phase: UnitPhase,
}

/// Objective panel contents.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveView {
    pub title: String,
    pub description: String,
    /// Remaining time as `mm:ss`, when the active objective has a timer.
    pub timer: Option<String>,
    /// Full duration as `mm:ss`.
    pub timer_total: Option<String>,
    pub state: Option<ObjectiveState>,
    pub banner: Option<ObjectiveBanner>,
}
