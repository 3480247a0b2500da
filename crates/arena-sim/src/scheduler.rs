//! Wave/population scheduler.
//!
//! Owns the hostile-unit world, the wave queue and the per-wave timers.
//! Progression is `NotStarted -> Running(k) -> Intermission -> Running(k+1)
//! -> ... -> Complete`, and `Complete` is terminal.
//!
//! Malformed wave data never errors. Missing values fall back to the global
//! spawn interval, the global intermission and the default archetype. A
//! level without spawn points stalls on its first wave, and a level without
//! waves never starts (and so never signals completion). Both are logged.

use glam::Vec3;
use hecs::{Entity, World};
use log::{debug, info, warn};
use rand::Rng;
use rand_chacha::ChaCha8Rng;

use arena_core::components::{Health, Hostile};
use arena_core::config::EnemyConfig;
use arena_core::enums::WavePhase;
use arena_core::level::WaveDefinition;
use arena_core::state::WaveView;
use arena_core::types::Obstacle;

use crate::observer::{ObserverHandle, Observers};
use crate::systems;
use crate::world_setup;

#[derive(Debug, Clone, Copy, PartialEq)]
enum Phase {
    NotStarted,
    Running,
    Intermission { remaining: f32 },
    Complete,
}

/// Read-only view of the schedule counters.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScheduleState {
    /// Zero-based index of the current wave, `None` before the first wave.
    pub current_wave_index: Option<usize>,
    pub spawned_this_wave: u32,
    pub spawn_timer: f32,
    /// Non-zero only between waves.
    pub intermission_timer: f32,
    pub schedule_complete: bool,
}

pub struct WaveScheduler<R = ChaCha8Rng> {
    config: EnemyConfig,
    rng: R,
    units: World,
    next_unit_id: u32,
    spawn_points: Vec<Vec3>,
    obstacles: Vec<Obstacle>,
    allowed_types: Vec<String>,
    waves: Vec<WaveDefinition>,
    phase: Phase,
    current_wave_index: Option<usize>,
    spawned_this_wave: u32,
    spawn_timer: f32,
    stall_reported: bool,
    observers: Observers,
    despawn_buffer: Vec<Entity>,
}

impl<R: Rng> WaveScheduler<R> {
    /// Create a scheduler with the enemy tuning and an injected random source.
    pub fn new(config: EnemyConfig, rng: R) -> Self {
        Self {
            config,
            rng,
            units: World::new(),
            next_unit_id: 0,
            spawn_points: Vec::new(),
            obstacles: Vec::new(),
            allowed_types: Vec::new(),
            waves: Vec::new(),
            phase: Phase::NotStarted,
            current_wave_index: None,
            spawned_this_wave: 0,
            spawn_timer: 0.0,
            stall_reported: false,
            observers: Observers::default(),
            despawn_buffer: Vec::new(),
        }
    }

    /// Register a lifecycle observer.
    pub fn subscribe(&mut self, observer: ObserverHandle) {
        self.observers.subscribe(observer);
    }

    pub fn observer_count(&self) -> usize {
        self.observers.len()
    }

    pub fn load_spawn_points(&mut self, points: impl IntoIterator<Item = Vec3>) {
        self.spawn_points = points.into_iter().collect();
    }

    pub fn set_obstacles(&mut self, obstacles: Vec<Obstacle>) {
        self.obstacles = obstacles;
    }

    pub fn obstacles(&self) -> &[Obstacle] {
        &self.obstacles
    }

    /// Level-wide archetype restriction. Empty allows every catalog archetype.
    pub fn set_allowed_types(&mut self, types: Vec<String>) {
        self.allowed_types = types;
    }

    /// Replace the wave queue and reset progression. An empty list falls back
    /// to the configured default waves.
    pub fn configure_waves(&mut self, waves: Vec<WaveDefinition>) {
        self.waves = if waves.is_empty() {
            self.config.waves.clone()
        } else {
            waves
        };
        if self.waves.is_empty() {
            warn!("no waves configured; the schedule will never start or complete");
        }
        self.phase = Phase::NotStarted;
        self.current_wave_index = None;
        self.spawned_this_wave = 0;
        self.spawn_timer = 0.0;
        self.stall_reported = false;
    }

    /// Advance the schedule by `dt` seconds. `target` is what units chase.
    pub fn update(&mut self, dt: f32, target: Vec3) {
        self.spawn_timer -= dt;

        if self.phase == Phase::NotStarted && !self.waves.is_empty() {
            self.start_next_wave();
        }

        if let Phase::Intermission { remaining } = self.phase {
            let remaining = remaining - dt;
            self.phase = Phase::Intermission { remaining };
            let next_wave = self.current_wave_number() + 1;
            let total_waves = self.total_waves();
            let shown = remaining.max(0.0);
            self.observers
                .notify(|o| o.on_intermission(next_wave, total_waves, shown));
            if remaining <= 0.0 {
                self.start_next_wave();
            }
        }

        if self.phase == Phase::Running {
            if let Some(index) = self.current_wave_index {
                self.run_wave(index);
            }
        }

        systems::unit_motion::run(&mut self.units, dt, target, &self.obstacles);
    }

    /// Apply damage reported by the combat layer. Returns false for unknown ids.
    pub fn damage_unit(&mut self, unit_id: u32, amount: f32) -> bool {
        for (_entity, (hostile, health)) in self.units.query_mut::<(&Hostile, &mut Health)>() {
            if hostile.unit_id == unit_id {
                health.current = (health.current - amount).max(0.0);
                return true;
            }
        }
        false
    }

    /// Remove units whose health reached zero. Returns how many were removed.
    pub fn remove_dead_units(&mut self) -> usize {
        let removed = systems::cleanup::run(&mut self.units, &mut self.despawn_buffer);
        if removed > 0 {
            debug!("removed {removed} defeated units, {} active", self.active_count());
        }
        removed
    }

    /// Drop every unit, e.g. on level unload.
    pub fn clear_units(&mut self) {
        self.units.clear();
    }

    /// The hostile-unit world.
    pub fn units(&self) -> &World {
        &self.units
    }

    pub fn active_count(&self) -> usize {
        self.units.query::<&Hostile>().iter().count()
    }

    pub fn total_waves(&self) -> u32 {
        self.waves.len() as u32
    }

    /// 1-based number of the current wave, 0 before the first.
    pub fn current_wave_number(&self) -> u32 {
        self.current_wave_index.map_or(0, |index| index as u32 + 1)
    }

    pub fn is_complete(&self) -> bool {
        self.phase == Phase::Complete
    }

    pub fn state(&self) -> ScheduleState {
        ScheduleState {
            current_wave_index: self.current_wave_index,
            spawned_this_wave: self.spawned_this_wave,
            spawn_timer: self.spawn_timer,
            intermission_timer: match self.phase {
                Phase::Intermission { remaining } => remaining.max(0.0),
                _ => 0.0,
            },
            schedule_complete: self.is_complete(),
        }
    }

    pub fn wave_view(&self) -> WaveView {
        let state = self.state();
        WaveView {
            phase: match self.phase {
                Phase::NotStarted => WavePhase::NotStarted,
                Phase::Running => WavePhase::Running,
                Phase::Intermission { .. } => WavePhase::Intermission,
                Phase::Complete => WavePhase::Complete,
            },
            wave_number: self.current_wave_number(),
            total_waves: self.total_waves(),
            spawned_this_wave: state.spawned_this_wave,
            active_units: self.active_count(),
            intermission_remaining: state.intermission_timer,
        }
    }

    fn run_wave(&mut self, index: usize) {
        let count = self.waves[index].count;
        let interval = self.waves[index].spawn_interval_or(self.config.spawn_interval);

        if self.spawn_timer <= 0.0
            && self.spawned_this_wave < count
            && self.active_count() < self.config.max_simultaneous
            && self.try_spawn(index)
        {
            self.spawn_timer = interval;
            self.spawned_this_wave += 1;
        }

        if self.spawned_this_wave >= count && self.active_count() == 0 {
            self.finish_wave(index);
        }
    }

    /// Spawn one unit for wave `index`. A missing spawn point set is a silent
    /// stall: nothing spawns and the wave budget is untouched.
    fn try_spawn(&mut self, index: usize) -> bool {
        if self.spawn_points.is_empty() {
            if !self.stall_reported {
                warn!(
                    "wave {} cannot spawn: level has no spawn points; schedule stalled",
                    index + 1
                );
                self.stall_reported = true;
            }
            return false;
        }

        let archetype = self.pick_archetype(index);
        let point = self.spawn_points[self.rng.gen_range(0..self.spawn_points.len())];
        let profile = self.config.profile(&archetype).cloned().unwrap_or_default();

        let unit_id = self.next_unit_id;
        self.next_unit_id += 1;
        world_setup::spawn_unit(&mut self.units, unit_id, &archetype, point, &profile);
        debug!("spawned {archetype} #{unit_id} at {point}");
        true
    }

    /// Wave allow-list (or the whole catalog) intersected with the catalog and
    /// the level restriction, picked uniformly. An empty pool yields the
    /// default archetype.
    fn pick_archetype(&mut self, index: usize) -> String {
        let catalog = &self.config.archetypes;
        let level_types = &self.allowed_types;
        let declared: Vec<&String> = match self.waves[index].allowed_types() {
            Some(types) => types.iter().collect(),
            None => catalog.keys().collect(),
        };
        let pool: Vec<&String> = declared
            .into_iter()
            .filter(|tag| catalog.contains_key(tag.as_str()))
            .filter(|tag| level_types.is_empty() || level_types.contains(*tag))
            .collect();

        if pool.is_empty() {
            warn!(
                "wave {} has no allowed archetypes after filtering; using {}",
                index + 1,
                self.config.default_type
            );
            return self.config.default_type.clone();
        }
        pool[self.rng.gen_range(0..pool.len())].clone()
    }

    fn start_next_wave(&mut self) {
        let index = self.current_wave_index.map_or(0, |index| index + 1);
        self.current_wave_index = Some(index);
        self.spawned_this_wave = 0;
        self.spawn_timer = 0.0;
        self.stall_reported = false;

        let total_waves = self.total_waves();
        match self.waves.get(index) {
            Some(wave) => {
                self.phase = Phase::Running;
                let wave_number = index as u32 + 1;
                info!("wave {wave_number}/{total_waves} started ({} units)", wave.count);
                self.observers
                    .notify(|o| o.on_wave_start(wave_number, total_waves, wave));
            }
            None => {
                self.phase = Phase::Complete;
                self.observers.notify(|o| o.on_schedule_complete());
            }
        }
    }

    fn finish_wave(&mut self, index: usize) {
        let wave_number = index as u32 + 1;
        let total_waves = self.total_waves();
        info!("wave {wave_number}/{total_waves} cleared");
        self.observers
            .notify(|o| o.on_wave_complete(wave_number, total_waves));

        if wave_number >= total_waves {
            self.phase = Phase::Complete;
            info!("all {total_waves} waves cleared");
            self.observers.notify(|o| o.on_schedule_complete());
        } else {
            let remaining = self.waves[index].intermission_or(self.config.wave_intermission);
            self.phase = Phase::Intermission { remaining };
        }
    }
}
