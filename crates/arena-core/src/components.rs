//! ECS components for hecs entities.
//!
//! Components are plain data structs with no methods.
//! Game logic lives in systems, not components.

use serde::{Deserialize, Serialize};

use crate::enums::UnitPhase;

// Position is defined in types.rs and doubles as a component.
pub use crate::types::Position;

/// Marks an entity as a hostile unit and carries its identity.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Hostile {
    /// Stable id handed to collaborators (HUD, combat).
    pub unit_id: u32,
    /// Archetype tag from the catalog.
    pub archetype: String,
}

/// Hit points. The unit is removed once `current` reaches zero.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct Health {
    pub current: f32,
    pub max: f32,
}

/// Movement tuning copied from the archetype at spawn time.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct UnitBehavior {
    /// Floor speed (units/s).
    pub speed: f32,
    /// Range at which the unit starts chasing its target.
    pub aggro_range: f32,
    /// Range at which the unit stops to attack.
    pub attack_range: f32,
    /// Collision probe radius.
    pub radius: f32,
    pub phase: UnitPhase,
}
