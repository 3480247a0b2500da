//! Game tuning configuration.
//!
//! Loaded once per session and handed to components by value; nothing in
//! here is mutated after load. Every field has a serde default so partial
//! config files are valid.

use std::collections::BTreeMap;
use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::*;
use crate::error::ConfigError;
use crate::level::{ObjectiveSpec, WaveDefinition};

/// Root of the tuning file.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct GameConfig {
    pub movement: MovementConfig,
    pub combat: CombatConfig,
    pub enemies: EnemyConfig,
    pub objectives: ObjectiveConfig,
}

impl GameConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(json)?)
    }

    pub fn from_path(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&json)
    }
}

/// Player locomotion tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct MovementConfig {
    /// Floor speed cap (units/s). Non-positive uses the default.
    pub max_speed: f32,
}

impl Default for MovementConfig {
    fn default() -> Self {
        Self {
            max_speed: PLAYER_MAX_SPEED,
        }
    }
}

impl MovementConfig {
    /// Longest horizontal step the player may take in `dt` seconds.
    pub fn max_step(&self, dt: f32) -> f32 {
        let speed = if self.max_speed > 0.0 {
            self.max_speed
        } else {
            PLAYER_MAX_SPEED
        };
        speed * dt
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CombatConfig {
    pub fire_rate: f32,
    pub projectile_speed: f32,
    pub projectile_lifetime: f32,
    pub damage: f32,
}

impl Default for CombatConfig {
    fn default() -> Self {
        Self {
            fire_rate: FIRE_RATE,
            projectile_speed: PROJECTILE_SPEED,
            projectile_lifetime: PROJECTILE_LIFETIME_SECS,
            damage: PROJECTILE_DAMAGE,
        }
    }
}

/// Population and wave pacing, plus the archetype catalog.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct EnemyConfig {
    /// Global spawn interval (seconds).
    pub spawn_interval: f32,
    /// Population cap.
    pub max_simultaneous: usize,
    /// Fallback archetype tag.
    pub default_type: String,
    /// Archetype catalog keyed by tag. Ordered so pool building is deterministic.
    pub archetypes: BTreeMap<String, ArchetypeProfile>,
    /// Waves used when a level declares none.
    pub waves: Vec<WaveDefinition>,
    /// Global intermission between waves (seconds).
    pub wave_intermission: f32,
}

impl Default for EnemyConfig {
    fn default() -> Self {
        Self {
            spawn_interval: DEFAULT_SPAWN_INTERVAL_SECS,
            max_simultaneous: DEFAULT_MAX_SIMULTANEOUS,
            default_type: DEFAULT_ARCHETYPE.to_string(),
            archetypes: default_archetypes(),
            waves: Vec::new(),
            wave_intermission: DEFAULT_WAVE_INTERMISSION_SECS,
        }
    }
}

impl EnemyConfig {
    /// Tuning for `tag`, falling back to the default archetype.
    pub fn profile(&self, tag: &str) -> Option<&ArchetypeProfile> {
        self.archetypes
            .get(tag)
            .or_else(|| self.archetypes.get(&self.default_type))
    }
}

/// Per-archetype tuning.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ArchetypeProfile {
    pub speed: f32,
    pub health: f32,
    pub aggro_range: f32,
    pub attack_range: f32,
}

impl Default for ArchetypeProfile {
    fn default() -> Self {
        grunt()
    }
}

fn grunt() -> ArchetypeProfile {
    ArchetypeProfile {
        speed: 6.0,
        health: 6.0,
        aggro_range: 28.0,
        attack_range: 3.5,
    }
}

fn ranger() -> ArchetypeProfile {
    ArchetypeProfile {
        speed: 5.0,
        health: 4.0,
        aggro_range: 34.0,
        attack_range: 16.0,
    }
}

fn default_archetypes() -> BTreeMap<String, ArchetypeProfile> {
    BTreeMap::from([
        ("grunt".to_string(), grunt()),
        ("ranger".to_string(), ranger()),
    ])
}

/// Objective type catalog and per-level objective tables.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ObjectiveConfig {
    pub types: BTreeMap<String, ObjectiveTypeInfo>,
    /// Objectives by level name; `"default"` applies to unlisted levels.
    pub levels: BTreeMap<String, Vec<ObjectiveSpec>>,
}

impl Default for ObjectiveConfig {
    fn default() -> Self {
        Self {
            types: BTreeMap::from([
                (
                    "elimination".to_string(),
                    ObjectiveTypeInfo::new("Elimination", "Clear every hostile wave."),
                ),
                (
                    "survival".to_string(),
                    ObjectiveTypeInfo::new("Survival", "Stay alive until the timer runs out."),
                ),
                (
                    "defend".to_string(),
                    ObjectiveTypeInfo::new("Defend", "Hold the position until the timer runs out."),
                ),
            ]),
            levels: BTreeMap::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ObjectiveTypeInfo {
    pub label: Option<String>,
    pub default_description: Option<String>,
}

impl ObjectiveTypeInfo {
    pub fn new(label: &str, description: &str) -> Self {
        Self {
            label: Some(label.to_string()),
            default_description: Some(description.to_string()),
        }
    }
}
