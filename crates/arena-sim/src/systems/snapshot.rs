//! Snapshot system: queries the unit world and builds a complete ArenaSnapshot.
//!
//! This system is read-only; it never modifies the world.

use hecs::World;

use arena_core::components::{Health, Hostile, Position, UnitBehavior};
use arena_core::enums::GamePhase;
use arena_core::events::{ObjectiveEvent, ScheduleEvent};
use arena_core::state::*;
use arena_core::types::SimTime;

/// Engine-owned state copied into the snapshot.
pub struct FrameState<'a> {
    pub time: SimTime,
    pub phase: GamePhase,
    pub level: &'a str,
    pub player: PlayerView,
    pub wave: WaveView,
    pub objective: ObjectiveView,
}

/// Build a complete ArenaSnapshot from the unit world and frame state.
pub fn build_snapshot(
    world: &World,
    frame: FrameState<'_>,
    schedule_events: Vec<ScheduleEvent>,
    objective_events: Vec<ObjectiveEvent>,
) -> ArenaSnapshot {
    ArenaSnapshot {
        time: frame.time,
        phase: frame.phase,
        level: frame.level.to_string(),
        player: frame.player,
        wave: frame.wave,
        units: build_units(world),
        objective: frame.objective,
        schedule_events,
        objective_events,
    }
}

/// Build UnitView list, sorted by unit id for stable output.
fn build_units(world: &World) -> Vec<UnitView> {
    let mut units: Vec<UnitView> = world
        .query::<(&Hostile, &Position, &Health, &UnitBehavior)>()
        .iter()
        .map(|(_, (hostile, pos, health, behavior))| UnitView {
            unit_id: hostile.unit_id,
            archetype: hostile.archetype.clone(),
            position: pos.0,
            health: health.current,
            phase: behavior.phase,
        })
        .collect();
    units.sort_by_key(|u| u.unit_id);
    units
}
