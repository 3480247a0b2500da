//! Level data as stored in level JSON files.
//!
//! Fetching the file is the host's job; this module only describes and
//! parses its contents.

use std::fs;
use std::path::Path;

use glam::Vec3;
use serde::{Deserialize, Serialize};

use crate::constants::{ALL_WAVES, UNKNOWN_LEVEL};
use crate::enums::ObjectiveKind;
use crate::error::ConfigError;
use crate::types::Obstacle;

/// A single wave of the schedule.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct WaveDefinition {
    /// Units that must be spawned (and then cleared) to finish the wave.
    pub count: u32,
    /// Seconds between spawns. Missing or non-positive uses the global default.
    pub spawn_interval: Option<f32>,
    /// Pause after the wave. Missing or non-positive uses the global default.
    pub intermission: Option<f32>,
    /// Archetype allow-list. Missing or empty allows every known archetype.
    pub types: Option<Vec<String>>,
}

impl WaveDefinition {
    pub fn new(count: u32) -> Self {
        Self {
            count,
            ..Default::default()
        }
    }

    pub fn with_spawn_interval(mut self, secs: f32) -> Self {
        self.spawn_interval = Some(secs);
        self
    }

    pub fn with_intermission(mut self, secs: f32) -> Self {
        self.intermission = Some(secs);
        self
    }

    pub fn with_types<S: Into<String>>(mut self, types: impl IntoIterator<Item = S>) -> Self {
        self.types = Some(types.into_iter().map(Into::into).collect());
        self
    }

    pub fn spawn_interval_or(&self, default: f32) -> f32 {
        self.spawn_interval.filter(|secs| *secs > 0.0).unwrap_or(default)
    }

    pub fn intermission_or(&self, default: f32) -> f32 {
        self.intermission.filter(|secs| *secs > 0.0).unwrap_or(default)
    }

    /// The declared allow-list, if it names anything.
    pub fn allowed_types(&self) -> Option<&[String]> {
        self.types.as_deref().filter(|types| !types.is_empty())
    }
}

/// Which waves an objective tracks: an explicit list or a keyword.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum WaveSelector {
    List(Vec<u32>),
    /// `"all"` expands to every wave; any other keyword selects nothing.
    Keyword(String),
}

impl Default for WaveSelector {
    fn default() -> Self {
        Self::List(Vec::new())
    }
}

impl WaveSelector {
    pub fn all() -> Self {
        Self::Keyword(ALL_WAVES.to_string())
    }

    /// Concrete wave numbers for a level with `total_waves` waves.
    pub fn expand(&self, total_waves: u32) -> Vec<u32> {
        match self {
            Self::List(waves) => waves.clone(),
            Self::Keyword(word) if word == ALL_WAVES => (1..=total_waves).collect(),
            Self::Keyword(_) => Vec::new(),
        }
    }
}

/// Raw objective entry, before normalization.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ObjectiveSpec {
    #[serde(default)]
    pub id: Option<String>,
    /// Missing means a custom objective that never auto-completes.
    #[serde(default, rename = "type")]
    pub kind: ObjectiveKind,
    #[serde(default)]
    pub waves: WaveSelector,
    #[serde(default)]
    pub start_wave: Option<u32>,
    #[serde(default)]
    pub duration_seconds: Option<f32>,
    #[serde(default)]
    pub label: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
}

impl ObjectiveSpec {
    pub fn new(kind: ObjectiveKind, waves: WaveSelector) -> Self {
        Self {
            id: None,
            kind,
            waves,
            start_wave: None,
            duration_seconds: None,
            label: None,
            description: None,
        }
    }

    pub fn with_id(mut self, id: impl Into<String>) -> Self {
        self.id = Some(id.into());
        self
    }

    pub fn with_duration(mut self, secs: f32) -> Self {
        self.duration_seconds = Some(secs);
        self
    }

    pub fn with_start_wave(mut self, wave: u32) -> Self {
        self.start_wave = Some(wave);
        self
    }
}

/// Obstacle as authored: center and full size.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ObstacleSpec {
    pub position: Vec3,
    pub size: Vec3,
}

/// Everything the simulation reads from a level file.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct LevelData {
    pub name: String,
    pub player_start: Vec3,
    pub enemy_spawn_points: Vec<Vec3>,
    pub obstacles: Vec<ObstacleSpec>,
    /// Empty falls back to the configured default waves.
    pub waves: Vec<WaveDefinition>,
    /// Level-wide archetype restriction. Empty allows everything.
    pub enemy_types: Vec<String>,
    /// Overrides the config's objective table for this level when present.
    pub objectives: Option<Vec<ObjectiveSpec>>,
}

impl Default for LevelData {
    fn default() -> Self {
        Self {
            name: UNKNOWN_LEVEL.to_string(),
            player_start: Vec3::ZERO,
            enemy_spawn_points: Vec::new(),
            obstacles: Vec::new(),
            waves: Vec::new(),
            enemy_types: Vec::new(),
            objectives: None,
        }
    }
}

impl LevelData {
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

    /// Obstacle bounds in world space.
    pub fn obstacle_bounds(&self) -> Vec<Obstacle> {
        self.obstacles
            .iter()
            .map(|spec| Obstacle::from_center_size(spec.position, spec.size))
            .collect()
    }
}
