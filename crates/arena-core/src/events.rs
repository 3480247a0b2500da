//! Events emitted by the simulation for presentation feedback.

use serde::{Deserialize, Serialize};

use crate::enums::*;

/// Scheduler lifecycle notification, in the order it was emitted.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ScheduleEvent {
    WaveStart {
        wave_number: u32,
        total_waves: u32,
        count: u32,
    },
    WaveComplete {
        wave_number: u32,
        total_waves: u32,
    },
    /// Emitted every tick while an intermission counts down.
    Intermission {
        next_wave: u32,
        total_waves: u32,
        time_remaining: f32,
    },
    ScheduleComplete,
}

/// Objective transition worth a banner or log line.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum ObjectiveEvent {
    Started {
        objective_id: String,
        kind: ObjectiveKind,
    },
    Completed {
        objective_id: String,
        reason: CompletionReason,
    },
    Failed {
        objective_id: String,
        reason: FailureReason,
    },
}

/// Banner shown on a terminal objective transition.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ObjectiveBanner {
    pub kind: BannerKind,
    pub text: String,
}
