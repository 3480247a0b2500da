//! Cleanup system: removes units that reported their own death.

use hecs::{Entity, World};

use arena_core::components::Health;

/// Despawn every unit whose health reached zero. Returns how many were removed.
/// Uses a caller-owned buffer to avoid per-tick allocation.
pub fn run(world: &mut World, despawn_buffer: &mut Vec<Entity>) -> usize {
    despawn_buffer.clear();

    for (entity, health) in world.query_mut::<&Health>() {
        if health.current <= 0.0 {
            despawn_buffer.push(entity);
        }
    }

    let removed = despawn_buffer.len();
    for entity in despawn_buffer.drain(..) {
        let _ = world.despawn(entity);
    }
    removed
}
