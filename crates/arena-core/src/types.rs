//! Fundamental geometric and simulation types.
//!
//! World space is Y-up. X and Z span the floor plane, which is the only
//! plane collision is resolved in.

use glam::Vec3;
use serde::{Deserialize, Serialize};

/// World-space position of an entity.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct Position(pub Vec3);

impl Position {
    pub fn new(x: f32, y: f32, z: f32) -> Self {
        Self(Vec3::new(x, y, z))
    }

    /// Distance on the floor plane, ignoring elevation.
    pub fn horizontal_distance_to(&self, other: Vec3) -> f32 {
        let dx = other.x - self.0.x;
        let dz = other.z - self.0.z;
        (dx * dx + dz * dz).sqrt()
    }
}

/// Static axis-aligned obstacle volume.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Obstacle {
    pub min: Vec3,
    pub max: Vec3,
}

impl Obstacle {
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Build bounds from a center point and full extents, as level files store them.
    pub fn from_center_size(center: Vec3, size: Vec3) -> Self {
        let half = size * 0.5;
        Self {
            min: center - half,
            max: center + half,
        }
    }

    /// Whether `point` lies inside the box inflated by `padding` on X and Z.
    /// Bounds are inclusive. Elevation is ignored.
    pub fn contains_horizontal(&self, point: Vec3, padding: f32) -> bool {
        let within_x = point.x >= self.min.x - padding && point.x <= self.max.x + padding;
        let within_z = point.z >= self.min.z - padding && point.z <= self.max.z + padding;
        within_x && within_z
    }
}

/// Simulation time tracking.
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
pub struct SimTime {
    /// Number of ticks simulated while active.
    pub tick: u64,
    /// Elapsed simulation time in seconds.
    pub elapsed_secs: f64,
}

impl SimTime {
    /// Advance by one tick of `dt` seconds.
    pub fn advance(&mut self, dt: f32) {
        self.tick += 1;
        self.elapsed_secs += f64::from(dt);
    }
}
