//! Axis-separated collision resolution against static obstacles.
//!
//! X is resolved before Z, and a committed X move becomes the base for the
//! Z test, so an entity pushed diagonally into a wall slides along it.
//! Obstacles block only on the floor plane; elevation is never changed.

use glam::Vec3;

use arena_core::enums::Axis;
use arena_core::types::Obstacle;

/// Axes on which the requested displacement was rejected.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct BlockedAxes {
    pub x: bool,
    pub z: bool,
}

impl BlockedAxes {
    #[cfg(test)]
    pub fn any(&self) -> bool {
        self.x || self.z
    }

    pub fn contains(&self, axis: Axis) -> bool {
        match axis {
            Axis::X => self.x,
            Axis::Z => self.z,
        }
    }

    /// Blocked axes in resolution order.
    pub fn to_vec(self) -> Vec<Axis> {
        [(self.x, Axis::X), (self.z, Axis::Z)]
            .into_iter()
            .filter_map(|(blocked, axis)| blocked.then_some(axis))
            .collect()
    }
}

/// Result of a single movement request.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MoveResolution {
    pub position: Vec3,
    pub blocked: BlockedAxes,
}

/// Furthest position reachable from `current` along `delta` without entering
/// any obstacle inflated by `radius`.
pub fn resolve_movement(
    current: Vec3,
    delta: Vec3,
    obstacles: &[Obstacle],
    radius: f32,
) -> MoveResolution {
    let mut resolved = current;
    let mut blocked = BlockedAxes::default();

    if delta.x != 0.0 {
        let candidate = Vec3::new(resolved.x + delta.x, resolved.y, resolved.z);
        if intersects_any(candidate, obstacles, radius) {
            blocked.x = true;
        } else {
            resolved.x = candidate.x;
        }
    }

    if delta.z != 0.0 {
        let candidate = Vec3::new(resolved.x, resolved.y, resolved.z + delta.z);
        if intersects_any(candidate, obstacles, radius) {
            blocked.z = true;
        } else {
            resolved.z = candidate.z;
        }
    }

    resolved.y = current.y;

    MoveResolution {
        position: resolved,
        blocked,
    }
}

/// Whether `point` overlaps any obstacle on the floor plane.
pub fn intersects_any(point: Vec3, obstacles: &[Obstacle], radius: f32) -> bool {
    obstacles
        .iter()
        .any(|obstacle| obstacle.contains_horizontal(point, radius))
}
