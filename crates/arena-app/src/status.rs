//! Wave status line, as a HUD would show it.

use log::{debug, info};

use arena_core::level::WaveDefinition;
use arena_sim::ScheduleObserver;

/// Scheduler observer that keeps a one-line wave status and logs changes.
pub struct WaveStatus {
    default_type: String,
    text: String,
}

impl WaveStatus {
    /// `default_type` is shown for waves without an archetype allow-list.
    pub fn new(default_type: impl Into<String>) -> Self {
        Self {
            default_type: default_type.into(),
            text: String::new(),
        }
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    fn show(&mut self, text: String, announce: bool) {
        if text == self.text {
            return;
        }
        if announce {
            info!("{text}");
        } else {
            debug!("{text}");
        }
        self.text = text;
    }
}

impl ScheduleObserver for WaveStatus {
    fn on_wave_start(&mut self, wave_number: u32, total_waves: u32, wave: &WaveDefinition) {
        let types = wave
            .allowed_types()
            .map_or_else(|| self.default_type.clone(), |types| types.join(", "));
        self.show(format!("Wave {wave_number}/{total_waves}: {types}"), true);
    }

    fn on_wave_complete(&mut self, wave_number: u32, total_waves: u32) {
        self.show(format!("Wave {wave_number}/{total_waves} cleared"), true);
    }

    fn on_intermission(&mut self, next_wave: u32, total_waves: u32, time_remaining: f32) {
        self.show(
            format!("Next wave ({next_wave}/{total_waves}) in {time_remaining:.1}s"),
            false,
        );
    }

    fn on_schedule_complete(&mut self) {
        self.show("All waves defeated!".to_string(), true);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_wave_start_lists_allowed_types() {
        let mut status = WaveStatus::new("grunt");
        let wave = WaveDefinition::new(4).with_types(["grunt", "ranger"]);
        status.on_wave_start(1, 3, &wave);
        assert_eq!(status.text(), "Wave 1/3: grunt, ranger");
    }

    #[test]
    fn test_wave_start_without_types_shows_default() {
        let mut status = WaveStatus::new("grunt");
        status.on_wave_start(2, 3, &WaveDefinition::new(4));
        assert_eq!(status.text(), "Wave 2/3: grunt");
    }

    #[test]
    fn test_progress_lines() {
        let mut status = WaveStatus::new("grunt");
        status.on_wave_complete(1, 3);
        assert_eq!(status.text(), "Wave 1/3 cleared");
        status.on_intermission(2, 3, 2.94);
        assert_eq!(status.text(), "Next wave (2/3) in 2.9s");
        status.on_schedule_complete();
        assert_eq!(status.text(), "All waves defeated!");
    }
}
