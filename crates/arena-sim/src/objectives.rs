//! Objective state tracker.
//!
//! Turns scheduler lifecycle events and the external "player down" signal
//! into mission pass/fail state. Objectives activate strictly in list order,
//! at most one at a time, once the wave they start on has begun.

use std::collections::{BTreeMap, BTreeSet};
use std::mem;

use log::{error, info, warn};
use serde::Serialize;

use arena_core::config::{ObjectiveConfig, ObjectiveTypeInfo};
use arena_core::constants::*;
use arena_core::enums::*;
use arena_core::events::{ObjectiveBanner, ObjectiveEvent};
use arena_core::level::{ObjectiveSpec, WaveDefinition, WaveSelector};
use arena_core::state::ObjectiveView;

use crate::observer::ScheduleObserver;

/// Read-only objective catalog: type descriptions and per-level tables.
#[derive(Debug, Clone, Default)]
pub struct ObjectiveCatalog {
    types: BTreeMap<String, ObjectiveTypeInfo>,
    levels: BTreeMap<String, Vec<ObjectiveSpec>>,
}

impl ObjectiveCatalog {
    pub fn type_info(&self, kind: &ObjectiveKind) -> Option<&ObjectiveTypeInfo> {
        self.types.get(kind.as_str())
    }

    /// Objectives configured for `level`, falling back to the default table.
    pub fn level_objectives(&self, level: &str) -> &[ObjectiveSpec] {
        self.levels
            .get(level)
            .or_else(|| self.levels.get(DEFAULT_LEVEL_KEY))
            .map_or(&[], Vec::as_slice)
    }
}

impl From<ObjectiveConfig> for ObjectiveCatalog {
    fn from(config: ObjectiveConfig) -> Self {
        Self {
            types: config.types,
            levels: config.levels,
        }
    }
}

/// A normalized objective.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Objective {
    pub id: String,
    pub kind: ObjectiveKind,
    pub label: String,
    pub description: String,
    /// Every wave the objective covers.
    pub waves: Vec<u32>,
    /// Waves still to be cleared.
    pub tracked_waves: BTreeSet<u32>,
    pub start_wave: u32,
    pub duration_seconds: Option<f32>,
    pub timer_remaining: Option<f32>,
    pub state: ObjectiveState,
}

pub struct ObjectiveTracker {
    catalog: ObjectiveCatalog,
    level_name: String,
    total_waves: u32,
    objectives: Vec<Objective>,
    active: Option<usize>,
    display: ObjectiveView,
    events: Vec<ObjectiveEvent>,
}

impl ObjectiveTracker {
    pub fn new(catalog: ObjectiveCatalog) -> Self {
        Self {
            catalog,
            level_name: UNKNOWN_LEVEL.to_string(),
            total_waves: 0,
            objectives: Vec::new(),
            active: None,
            display: awaiting_orders(),
            events: Vec::new(),
        }
    }

    /// Load and normalize the objectives for a level. `overrides` (from the
    /// level file) take precedence over the catalog's table for the level.
    /// A level with no objectives gets a single elimination objective over
    /// every wave.
    pub fn set_level(&mut self, level_name: &str, total_waves: u32, overrides: Option<&[ObjectiveSpec]>) {
        self.level_name = if level_name.is_empty() {
            UNKNOWN_LEVEL.to_string()
        } else {
            level_name.to_string()
        };
        self.total_waves = total_waves;

        let specs = overrides
            .unwrap_or_else(|| self.catalog.level_objectives(&self.level_name))
            .to_vec();
        self.objectives = specs
            .iter()
            .enumerate()
            .map(|(index, spec)| self.normalize(spec, index))
            .collect();

        if self.objectives.is_empty() {
            warn!(
                "no objectives defined for level {}; falling back to elimination",
                self.level_name
            );
            let fallback = ObjectiveSpec::new(ObjectiveKind::Elimination, WaveSelector::all())
                .with_id(format!("{}-elimination", self.level_name));
            self.objectives = vec![self.normalize(&fallback, 0)];
        }

        self.active = None;
        self.events.clear();
        self.display = awaiting_orders();
    }

    fn normalize(&self, spec: &ObjectiveSpec, index: usize) -> Objective {
        let waves = spec.waves.expand(self.total_waves);
        let start_wave = spec
            .start_wave
            .or_else(|| waves.iter().copied().min())
            .unwrap_or(1);
        let type_info = self.catalog.type_info(&spec.kind);

        Objective {
            id: spec
                .id
                .clone()
                .unwrap_or_else(|| format!("{}-objective-{}", self.level_name, index + 1)),
            kind: spec.kind.clone(),
            label: spec
                .label
                .clone()
                .or_else(|| type_info.and_then(|info| info.label.clone()))
                .unwrap_or_else(|| spec.kind.to_string()),
            description: spec
                .description
                .clone()
                .or_else(|| type_info.and_then(|info| info.default_description.clone()))
                .unwrap_or_default(),
            tracked_waves: waves.iter().copied().collect(),
            waves,
            start_wave,
            duration_seconds: spec.duration_seconds,
            timer_remaining: spec.duration_seconds,
            state: ObjectiveState::Pending,
        }
    }

    /// Count down the active objective's timer and re-evaluate it.
    pub fn update(&mut self, dt: f32) {
        let Some(index) = self.active else {
            return;
        };

        if let Some(remaining) = self.objectives[index].timer_remaining.as_mut() {
            *remaining = (*remaining - dt).max(0.0);
            self.display.timer = Some(format_time(*remaining));
        }

        self.evaluate(false);
    }

    /// Complete the active objective if its type's rule is satisfied.
    /// `force_complete` treats both the timer and the tracked waves as done.
    pub fn evaluate(&mut self, force_complete: bool) {
        let Some(index) = self.active else {
            return;
        };
        let objective = &self.objectives[index];
        if objective.state != ObjectiveState::Active {
            return;
        }

        let timer_satisfied =
            objective.timer_remaining.map_or(true, |remaining| remaining <= 0.0) || force_complete;
        let waves_satisfied = objective.tracked_waves.is_empty() || force_complete;

        let reason = match objective.kind {
            ObjectiveKind::Elimination if waves_satisfied => Some(CompletionReason::WavesCleared),
            ObjectiveKind::Survival | ObjectiveKind::Defend
                if timer_satisfied && waves_satisfied =>
            {
                Some(CompletionReason::TimerAndWavesComplete)
            }
            // Custom types need their own rule.
            _ => None,
        };

        if let Some(reason) = reason {
            self.complete(reason);
        }
    }

    /// The primary actor went down: fail the active objective outright.
    pub fn on_actor_defeated(&mut self) {
        if self.active.is_some() {
            self.fail(FailureReason::PlayerDown);
        }
    }

    pub fn objectives(&self) -> &[Objective] {
        &self.objectives
    }

    pub fn active(&self) -> Option<&Objective> {
        self.active.map(|index| &self.objectives[index])
    }

    pub fn level_name(&self) -> &str {
        &self.level_name
    }

    /// Objective panel contents for presentation.
    pub fn display(&self) -> &ObjectiveView {
        &self.display
    }

    /// Drain transitions since the last call.
    pub fn take_events(&mut self) -> Vec<ObjectiveEvent> {
        mem::take(&mut self.events)
    }

    fn maybe_start(&mut self, wave_number: u32) {
        if self.active.is_some() {
            return;
        }
        let Some(index) = self
            .objectives
            .iter()
            .position(|o| o.state == ObjectiveState::Pending && wave_number >= o.start_wave)
        else {
            return;
        };

        let objective = &mut self.objectives[index];
        objective.state = ObjectiveState::Active;
        objective.timer_remaining = objective.duration_seconds;
        self.active = Some(index);

        self.display = ObjectiveView {
            title: format!("{}: Wave {}+", objective.label, objective.start_wave),
            description: objective.description.clone(),
            timer: objective.timer_remaining.map(format_time),
            timer_total: objective.duration_seconds.map(format_time),
            state: Some(ObjectiveState::Active),
            banner: None,
        };

        info!(
            "objective {} started: type={} level={} waves={:?} duration={:?}",
            objective.id, objective.kind, self.level_name, objective.tracked_waves, objective.duration_seconds
        );
        self.events.push(ObjectiveEvent::Started {
            objective_id: objective.id.clone(),
            kind: objective.kind.clone(),
        });
    }

    fn complete(&mut self, reason: CompletionReason) {
        let Some(index) = self.active.take() else {
            return;
        };
        let objective = &mut self.objectives[index];
        objective.state = ObjectiveState::Completed;

        self.display.state = Some(ObjectiveState::Completed);
        self.display.banner = Some(ObjectiveBanner {
            kind: BannerKind::Complete,
            text: BANNER_COMPLETE_TEXT.to_string(),
        });

        info!(
            "objective {} completed: type={} level={} waves={:?} reason={reason:?}",
            objective.id, objective.kind, self.level_name, objective.waves
        );
        self.events.push(ObjectiveEvent::Completed {
            objective_id: objective.id.clone(),
            reason,
        });
    }

    fn fail(&mut self, reason: FailureReason) {
        let Some(index) = self.active.take() else {
            return;
        };
        let objective = &mut self.objectives[index];
        objective.state = ObjectiveState::Failed;

        self.display.state = Some(ObjectiveState::Failed);
        self.display.banner = Some(ObjectiveBanner {
            kind: BannerKind::Failed,
            text: BANNER_FAILED_TEXT.to_string(),
        });

        error!(
            "objective {} failed: type={} level={} reason={reason:?}",
            objective.id, objective.kind, self.level_name
        );
        self.events.push(ObjectiveEvent::Failed {
            objective_id: objective.id.clone(),
            reason,
        });
    }
}

impl ScheduleObserver for ObjectiveTracker {
    fn on_wave_start(&mut self, wave_number: u32, total_waves: u32, _wave: &WaveDefinition) {
        self.total_waves = total_waves;
        self.maybe_start(wave_number);
    }

    fn on_wave_complete(&mut self, wave_number: u32, _total_waves: u32) {
        if let Some(index) = self.active {
            self.objectives[index].tracked_waves.remove(&wave_number);
        }
        self.evaluate(false);
    }

    fn on_schedule_complete(&mut self) {
        self.evaluate(true);
    }
}

fn awaiting_orders() -> ObjectiveView {
    ObjectiveView {
        title: AWAITING_TITLE.to_string(),
        description: AWAITING_DESCRIPTION.to_string(),
        ..Default::default()
    }
}

/// `mm:ss`, rounded up to the next whole second and clamped at zero.
pub fn format_time(seconds: f32) -> String {
    let clamped = seconds.max(0.0).ceil() as u32;
    format!("{:02}:{:02}", clamped / 60, clamped % 60)
}

#[cfg(test)]
mod tests {
    use arena_core::level::LevelData;

    use super::*;

    fn tracker() -> ObjectiveTracker {
        ObjectiveTracker::new(ObjectiveCatalog::from(ObjectiveConfig::default()))
    }

    fn wave() -> WaveDefinition {
        WaveDefinition::new(1)
    }

    fn elimination(waves: Vec<u32>) -> ObjectiveSpec {
        ObjectiveSpec::new(ObjectiveKind::Elimination, WaveSelector::List(waves))
    }

    fn survival(waves: Vec<u32>, secs: f32) -> ObjectiveSpec {
        ObjectiveSpec::new(ObjectiveKind::Survival, WaveSelector::List(waves)).with_duration(secs)
    }

    fn active_count(tracker: &ObjectiveTracker) -> usize {
        tracker
            .objectives()
            .iter()
            .filter(|o| o.state == ObjectiveState::Active)
            .count()
    }

    #[test]
    fn test_elimination_completes_after_last_tracked_wave() {
        let mut t = tracker();
        t.set_level("arena", 3, Some(&[elimination(vec![1, 2, 3])]));

        t.on_wave_start(1, 3, &wave());
        assert_eq!(t.objectives()[0].state, ObjectiveState::Active);

        t.on_wave_complete(1, 3);
        assert_eq!(t.objectives()[0].state, ObjectiveState::Active);
        t.on_wave_complete(2, 3);
        assert_eq!(t.objectives()[0].state, ObjectiveState::Active);
        t.on_wave_complete(3, 3);
        assert_eq!(t.objectives()[0].state, ObjectiveState::Completed);
        assert!(t.active().is_none());
        assert!(t.objectives()[0].state.is_terminal());
    }

    #[test]
    fn test_elimination_ignores_timer() {
        let mut t = tracker();
        let spec = elimination(vec![1]).with_duration(999.0);
        t.set_level("arena", 1, Some(&[spec]));
        t.on_wave_start(1, 1, &wave());
        t.on_wave_complete(1, 1);
        assert_eq!(t.objectives()[0].state, ObjectiveState::Completed);
        assert_eq!(t.objectives()[0].timer_remaining, Some(999.0));
    }

    #[test]
    fn test_survival_needs_waves_even_after_timer() {
        let mut t = tracker();
        t.set_level("arena", 2, Some(&[survival(vec![1, 2], 5.0)]));
        t.on_wave_start(1, 2, &wave());

        for _ in 0..10 {
            t.update(1.0);
        }
        assert_eq!(t.objectives()[0].timer_remaining, Some(0.0));
        assert_eq!(t.objectives()[0].state, ObjectiveState::Active);

        t.on_wave_complete(1, 2);
        assert_eq!(t.objectives()[0].state, ObjectiveState::Active);
        t.on_wave_complete(2, 2);
        assert_eq!(t.objectives()[0].state, ObjectiveState::Completed);
    }

    #[test]
    fn test_defend_needs_timer_after_waves() {
        let mut t = tracker();
        let spec = ObjectiveSpec::new(ObjectiveKind::Defend, WaveSelector::List(vec![1]))
            .with_duration(3.0);
        t.set_level("arena", 1, Some(&[spec]));
        t.on_wave_start(1, 1, &wave());
        t.on_wave_complete(1, 1);
        assert_eq!(t.objectives()[0].state, ObjectiveState::Active);

        t.update(2.0);
        assert_eq!(t.objectives()[0].state, ObjectiveState::Active);
        t.update(1.0);
        assert_eq!(t.objectives()[0].state, ObjectiveState::Completed);
        let events = t.take_events();
        assert!(matches!(
            events.last(),
            Some(ObjectiveEvent::Completed {
                reason: CompletionReason::TimerAndWavesComplete,
                ..
            })
        ));
    }

    #[test]
    fn test_defeat_fails_even_when_complete_is_due() {
        let mut t = tracker();
        t.set_level("arena", 1, Some(&[survival(vec![], 0.0)]));
        t.on_wave_start(1, 1, &wave());
        // Both conditions hold, but defeat lands first.
        t.on_actor_defeated();
        t.update(0.1);
        t.on_schedule_complete();

        assert_eq!(t.objectives()[0].state, ObjectiveState::Failed);
        assert_eq!(t.display().banner.as_ref().unwrap().kind, BannerKind::Failed);
        let events = t.take_events();
        assert!(matches!(
            events.last(),
            Some(ObjectiveEvent::Failed {
                reason: FailureReason::PlayerDown,
                ..
            })
        ));
    }

    #[test]
    fn test_defeat_without_active_objective_is_noop() {
        let mut t = tracker();
        t.set_level("arena", 2, Some(&[elimination(vec![2])]));
        t.on_wave_start(1, 2, &wave());
        t.on_actor_defeated();
        assert_eq!(t.objectives()[0].state, ObjectiveState::Pending);
    }

    #[test]
    fn test_one_active_at_a_time_in_order() {
        let mut t = tracker();
        let specs = [elimination(vec![1]), elimination(vec![1, 2])];
        t.set_level("arena", 2, Some(&specs));

        t.on_wave_start(1, 2, &wave());
        assert_eq!(active_count(&t), 1);
        assert_eq!(t.active().unwrap().id, "arena-objective-1");
        assert_eq!(t.objectives()[1].state, ObjectiveState::Pending);

        t.on_wave_complete(1, 2);
        assert_eq!(t.objectives()[0].state, ObjectiveState::Completed);
        assert_eq!(active_count(&t), 0, "next objective waits for a wave start");

        t.on_wave_start(2, 2, &wave());
        assert_eq!(t.active().unwrap().id, "arena-objective-2");
        assert_eq!(active_count(&t), 1);
        // Wave 1 was cleared before this objective was active.
        assert!(t.active().unwrap().tracked_waves.contains(&1));
    }

    #[test]
    fn test_start_wave_not_reached_stays_pending() {
        let mut t = tracker();
        t.set_level("arena", 3, Some(&[elimination(vec![3])]));
        t.on_wave_start(1, 3, &wave());
        t.on_wave_start(2, 3, &wave());
        assert_eq!(t.objectives()[0].start_wave, 3);
        assert_eq!(t.objectives()[0].state, ObjectiveState::Pending);
        t.on_wave_start(3, 3, &wave());
        assert_eq!(t.objectives()[0].state, ObjectiveState::Active);
    }

    #[test]
    fn test_explicit_start_wave_overrides_minimum() {
        let mut t = tracker();
        t.set_level("arena", 3, Some(&[elimination(vec![1, 2, 3]).with_start_wave(2)]));
        assert_eq!(t.objectives()[0].start_wave, 2);
    }

    #[test]
    fn test_empty_wave_list_starts_at_one() {
        let mut t = tracker();
        t.set_level("arena", 3, Some(&[survival(vec![], 10.0)]));
        assert_eq!(t.objectives()[0].start_wave, 1);
    }

    #[test]
    fn test_fallback_objective_covers_all_waves() {
        let mut t = tracker();
        t.set_level("yard", 4, None);
        assert_eq!(t.objectives().len(), 1);
        let fallback = &t.objectives()[0];
        assert_eq!(fallback.id, "yard-elimination");
        assert_eq!(fallback.kind, ObjectiveKind::Elimination);
        assert_eq!(fallback.waves, vec![1, 2, 3, 4]);
        assert_eq!(fallback.label, "Elimination");
    }

    #[test]
    fn test_catalog_level_tables() {
        let mut config = ObjectiveConfig::default();
        config
            .levels
            .insert("yard".into(), vec![survival(vec![1], 20.0).with_id("hold")]);
        config
            .levels
            .insert(DEFAULT_LEVEL_KEY.into(), vec![elimination(vec![1]).with_id("any")]);
        let mut t = ObjectiveTracker::new(ObjectiveCatalog::from(config));

        t.set_level("yard", 1, None);
        assert_eq!(t.objectives()[0].id, "hold");
        t.set_level("elsewhere", 1, None);
        assert_eq!(t.objectives()[0].id, "any");
        t.set_level("yard", 1, Some(&[elimination(vec![1]).with_id("level-file")]));
        assert_eq!(t.objectives()[0].id, "level-file");
    }

    #[test]
    fn test_schedule_complete_forces_completion() {
        let mut t = tracker();
        // Tracks a wave the schedule never reports.
        t.set_level("arena", 2, Some(&[elimination(vec![1, 5])]));
        t.on_wave_start(1, 2, &wave());
        t.on_wave_complete(1, 2);
        t.on_wave_complete(2, 2);
        assert_eq!(t.objectives()[0].state, ObjectiveState::Active);
        t.on_schedule_complete();
        assert_eq!(t.objectives()[0].state, ObjectiveState::Completed);
    }

    #[test]
    fn test_custom_type_never_auto_completes() {
        let mut t = tracker();
        let spec = ObjectiveSpec::new(ObjectiveKind::Custom("escort".into()), WaveSelector::List(vec![]));
        t.set_level("arena", 1, Some(&[spec]));
        t.on_wave_start(1, 1, &wave());
        t.update(1.0);
        t.on_schedule_complete();
        assert_eq!(t.objectives()[0].state, ObjectiveState::Active);
        assert_eq!(t.objectives()[0].label, "escort");
    }

    #[test]
    fn test_objective_without_type_never_completes() {
        let level = LevelData::from_json_str(
            r#"{"name":"yard","waves":[{"count":1}],"objectives":[{"id":"a","waves":"all"}]}"#,
        )
        .unwrap();
        let mut t = tracker();
        t.set_level(&level.name, 1, level.objectives.as_deref());
        t.on_wave_start(1, 1, &wave());
        t.on_wave_complete(1, 1);
        t.update(10.0);
        t.on_schedule_complete();

        let objective = &t.objectives()[0];
        assert_eq!(objective.id, "a");
        assert_eq!(objective.kind, ObjectiveKind::default());
        assert_eq!(objective.state, ObjectiveState::Active);

        t.on_actor_defeated();
        assert_eq!(t.objectives()[0].state, ObjectiveState::Failed);
    }

    #[test]
    fn test_display_and_timer_text() {
        let mut t = tracker();
        assert_eq!(t.display().title, AWAITING_TITLE);

        t.set_level("arena", 2, Some(&[survival(vec![2], 90.0)]));
        t.on_wave_start(2, 2, &wave());
        let display = t.display();
        assert_eq!(display.title, "Survival: Wave 2+");
        assert_eq!(display.timer.as_deref(), Some("01:30"));
        assert_eq!(display.timer_total.as_deref(), Some("01:30"));

        t.update(0.5);
        assert_eq!(t.display().timer.as_deref(), Some("01:30"), "rounds up");
        t.update(60.0);
        assert_eq!(t.display().timer.as_deref(), Some("00:30"));
    }

    #[test]
    fn test_format_time() {
        assert_eq!(format_time(0.0), "00:00");
        assert_eq!(format_time(-3.0), "00:00");
        assert_eq!(format_time(59.2), "01:00");
        assert_eq!(format_time(125.0), "02:05");
    }
}
