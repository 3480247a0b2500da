//! Enumeration types used throughout the simulation.

use std::fmt;

use serde::{Deserialize, Serialize};

/// Horizontal movement axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Axis {
    X,
    Z,
}

/// Top-level session phase.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum GamePhase {
    /// No level loaded yet.
    #[default]
    Loading,
    Active,
    Paused,
    /// Every wave of the level has been cleared.
    Victory,
    /// The player went down.
    Defeated,
}

/// Scheduler progression, as exposed to presentation.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum WavePhase {
    #[default]
    NotStarted,
    Running,
    Intermission,
    Complete,
}

/// Objective lifecycle. `Completed` and `Failed` are terminal.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ObjectiveState {
    #[default]
    Pending,
    Active,
    Completed,
    Failed,
}

impl ObjectiveState {
    pub fn is_terminal(self) -> bool {
        matches!(self, Self::Completed | Self::Failed)
    }
}

/// Objective type. Unknown type names are kept verbatim and never auto-complete.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(from = "String", into = "String")]
pub enum ObjectiveKind {
    /// Clear every tracked wave.
    Elimination,
    /// Clear every tracked wave and outlast the timer.
    Survival,
    /// Same completion rule as survival; distinct for presentation.
    Defend,
    Custom(String),
}

impl ObjectiveKind {
    pub fn as_str(&self) -> &str {
        match self {
            Self::Elimination => "elimination",
            Self::Survival => "survival",
            Self::Defend => "defend",
            Self::Custom(name) => name,
        }
    }
}

/// An entry without a type has no completion rule.
impl Default for ObjectiveKind {
    fn default() -> Self {
        Self::Custom(String::new())
    }
}

impl From<String> for ObjectiveKind {
    fn from(name: String) -> Self {
        match name.as_str() {
            "elimination" => Self::Elimination,
            "survival" => Self::Survival,
            "defend" => Self::Defend,
            _ => Self::Custom(name),
        }
    }
}

impl From<ObjectiveKind> for String {
    fn from(kind: ObjectiveKind) -> Self {
        match kind {
            ObjectiveKind::Custom(name) => name,
            other => other.as_str().to_string(),
        }
    }
}

impl fmt::Display for ObjectiveKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Why an objective completed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CompletionReason {
    WavesCleared,
    TimerAndWavesComplete,
}

/// Why an objective failed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FailureReason {
    PlayerDown,
}

/// Banner style for objective transitions.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum BannerKind {
    Complete,
    Failed,
}

/// Per-unit movement state.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitPhase {
    /// Target outside aggro range.
    #[default]
    Idle,
    /// Closing on the target.
    Chase,
    /// Holding position inside attack range.
    Attack,
}
