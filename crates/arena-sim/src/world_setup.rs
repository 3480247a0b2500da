//! Entity spawn factories for hostile units.

use glam::Vec3;
use hecs::World;

use arena_core::components::{Health, Hostile, Position, UnitBehavior};
use arena_core::config::ArchetypeProfile;
use arena_core::constants::UNIT_RADIUS;
use arena_core::enums::UnitPhase;

/// Spawn a hostile unit at `point` with tuning copied from `profile`.
pub fn spawn_unit(
    world: &mut World,
    unit_id: u32,
    archetype: &str,
    point: Vec3,
    profile: &ArchetypeProfile,
) -> hecs::Entity {
    world.spawn((
        Hostile {
            unit_id,
            archetype: archetype.to_string(),
        },
        Position(point),
        Health {
            current: profile.health,
            max: profile.health,
        },
        UnitBehavior {
            speed: profile.speed,
            aggro_range: profile.aggro_range,
            attack_range: profile.attack_range,
            radius: UNIT_RADIUS,
            phase: UnitPhase::Idle,
        },
    ))
}
