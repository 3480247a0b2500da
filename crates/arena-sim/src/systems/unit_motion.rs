//! Per-unit movement toward the current target.
//!
//! Units idle outside aggro range, hold inside attack range and chase in
//! between. Every step goes through the collision resolver.

use glam::Vec3;
use hecs::World;

use arena_core::components::{Health, Position, UnitBehavior};
use arena_core::enums::UnitPhase;
use arena_core::types::Obstacle;

use crate::collision;

pub fn run(world: &mut World, dt: f32, target: Vec3, obstacles: &[Obstacle]) {
    for (_entity, (pos, behavior, health)) in
        world.query_mut::<(&mut Position, &mut UnitBehavior, &Health)>()
    {
        if health.current <= 0.0 {
            continue;
        }

        let distance = pos.horizontal_distance_to(target);
        behavior.phase = if distance > behavior.aggro_range {
            UnitPhase::Idle
        } else if distance <= behavior.attack_range {
            UnitPhase::Attack
        } else {
            UnitPhase::Chase
        };

        if behavior.phase != UnitPhase::Chase {
            continue;
        }

        // Never overshoot into attack range.
        let step = (behavior.speed * dt).min(distance - behavior.attack_range);
        let heading = Vec3::new(target.x - pos.0.x, 0.0, target.z - pos.0.z).normalize_or_zero();
        pos.0 = collision::resolve_movement(pos.0, heading * step, obstacles, behavior.radius).position;
    }
}
