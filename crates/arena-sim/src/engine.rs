//! Simulation engine: drives the scheduler, objective tracker and player
//! movement on one fixed-order tick.
//!
//! `ArenaEngine` is headless. It processes host commands, runs every
//! subsystem and produces `ArenaSnapshot`s, which keeps it fully
//! deterministic for a given seed and command stream.

use std::cell::{Ref, RefCell};
use std::collections::VecDeque;
use std::rc::Rc;

use glam::Vec3;
use log::{debug, info, warn};
use rand::SeedableRng;
use rand_chacha::ChaCha8Rng;

use arena_core::commands::HostCommand;
use arena_core::config::{GameConfig, MovementConfig};
use arena_core::constants::{PLAYER_RADIUS, UNKNOWN_LEVEL};
use arena_core::enums::GamePhase;
use arena_core::level::LevelData;
use arena_core::state::{ArenaSnapshot, PlayerView};
use arena_core::types::SimTime;

use crate::collision::{self, BlockedAxes};
use crate::objectives::{ObjectiveCatalog, ObjectiveTracker};
use crate::observer::{EventRecorder, ObserverHandle};
use crate::scheduler::WaveScheduler;
use crate::systems;

/// Configuration for starting a new simulation.
#[derive(Debug, Clone)]
pub struct SimConfig {
    /// RNG seed for determinism. Same seed = same simulation.
    pub seed: u64,
    pub game: GameConfig,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: 42,
            game: GameConfig::default(),
        }
    }
}

pub struct ArenaEngine {
    scheduler: WaveScheduler<ChaCha8Rng>,
    objectives: Rc<RefCell<ObjectiveTracker>>,
    recorder: Rc<RefCell<EventRecorder>>,
    movement: MovementConfig,
    time: SimTime,
    phase: GamePhase,
    level_name: String,
    player_position: Vec3,
    pending_move: Vec3,
    blocked: BlockedAxes,
    command_queue: VecDeque<HostCommand>,
}

impl ArenaEngine {
    pub fn new(config: SimConfig) -> Self {
        let rng = ChaCha8Rng::seed_from_u64(config.seed);
        let mut scheduler = WaveScheduler::new(config.game.enemies, rng);

        let objectives = Rc::new(RefCell::new(ObjectiveTracker::new(ObjectiveCatalog::from(
            config.game.objectives,
        ))));
        let recorder = Rc::new(RefCell::new(EventRecorder::new()));
        // Tracker first: objective state is current for later observers.
        scheduler.subscribe(objectives.clone());
        scheduler.subscribe(recorder.clone());

        Self {
            scheduler,
            objectives,
            recorder,
            movement: config.game.movement,
            time: SimTime::default(),
            phase: GamePhase::default(),
            level_name: UNKNOWN_LEVEL.to_string(),
            player_position: Vec3::ZERO,
            pending_move: Vec3::ZERO,
            blocked: BlockedAxes::default(),
            command_queue: VecDeque::new(),
        }
    }

    /// Register an additional lifecycle observer (HUD, audio, logging).
    pub fn subscribe(&mut self, observer: ObserverHandle) {
        self.scheduler.subscribe(observer);
        debug!("{} schedule observers registered", self.scheduler.observer_count());
    }

    /// Wire a level into every subsystem and start the mission.
    pub fn load_level(&mut self, level: &LevelData) {
        self.level_name = if level.name.is_empty() {
            UNKNOWN_LEVEL.to_string()
        } else {
            level.name.clone()
        };

        if level.enemy_spawn_points.is_empty() && !level.waves.is_empty() {
            warn!("level {} has waves but no enemy spawn points", self.level_name);
        }

        self.scheduler.clear_units();
        self.scheduler
            .load_spawn_points(level.enemy_spawn_points.iter().copied());
        self.scheduler.set_obstacles(level.obstacle_bounds());
        self.scheduler.set_allowed_types(level.enemy_types.clone());
        self.scheduler.configure_waves(level.waves.clone());

        let total_waves = self.scheduler.total_waves();
        self.objectives
            .borrow_mut()
            .set_level(&self.level_name, total_waves, level.objectives.as_deref());
        self.recorder.borrow_mut().take();

        self.player_position = level.player_start;
        self.pending_move = Vec3::ZERO;
        self.blocked = BlockedAxes::default();
        self.command_queue.clear();
        self.time = SimTime::default();
        self.phase = GamePhase::Active;

        info!(
            "level {} loaded: {} waves, {} spawn points, {} obstacles",
            self.level_name,
            total_waves,
            level.enemy_spawn_points.len(),
            level.obstacles.len()
        );
    }

    /// Queue a host command for processing at the next tick boundary.
    pub fn queue_command(&mut self, command: HostCommand) {
        self.command_queue.push_back(command);
    }

    pub fn queue_commands(&mut self, commands: impl IntoIterator<Item = HostCommand>) {
        self.command_queue.extend(commands);
    }

    /// Advance the simulation by `dt` seconds and return the resulting snapshot.
    pub fn tick(&mut self, dt: f32) -> ArenaSnapshot {
        self.process_commands();

        if self.phase == GamePhase::Active {
            self.run_systems(dt);
            self.time.advance(dt);
        }

        let schedule_events = self.recorder.borrow_mut().take();
        let mut objectives = self.objectives.borrow_mut();
        let objective_events = objectives.take_events();

        systems::snapshot::build_snapshot(
            self.scheduler.units(),
            systems::snapshot::FrameState {
                time: self.time,
                phase: self.phase,
                level: &self.level_name,
                player: PlayerView {
                    position: self.player_position,
                    blocked: self.blocked.to_vec(),
                },
                wave: self.scheduler.wave_view(),
                objective: objectives.display().clone(),
            },
            schedule_events,
            objective_events,
        )
    }

    pub fn phase(&self) -> GamePhase {
        self.phase
    }

    pub fn time(&self) -> SimTime {
        self.time
    }

    pub fn level_name(&self) -> &str {
        &self.level_name
    }

    pub fn player_position(&self) -> Vec3 {
        self.player_position
    }

    pub fn scheduler(&self) -> &WaveScheduler<ChaCha8Rng> {
        &self.scheduler
    }

    /// Read access to the objective tracker. Do not hold across `tick`.
    pub fn objectives(&self) -> Ref<'_, ObjectiveTracker> {
        self.objectives.borrow()
    }

    fn process_commands(&mut self) {
        while let Some(command) = self.command_queue.pop_front() {
            self.handle_command(command);
        }
    }

    fn handle_command(&mut self, command: HostCommand) {
        match command {
            HostCommand::MovePlayer { delta } => {
                self.pending_move += delta;
            }
            HostCommand::DamageUnit { unit_id, amount } => {
                if !self.scheduler.damage_unit(unit_id, amount) {
                    warn!("damage for unknown unit #{unit_id} ignored");
                }
            }
            HostCommand::PlayerDown => {
                if matches!(self.phase, GamePhase::Active | GamePhase::Paused) {
                    self.objectives.borrow_mut().on_actor_defeated();
                    self.phase = GamePhase::Defeated;
                    info!("player down at tick {}", self.time.tick);
                }
            }
            HostCommand::Pause => {
                if self.phase == GamePhase::Active {
                    self.phase = GamePhase::Paused;
                }
            }
            HostCommand::Resume => {
                if self.phase == GamePhase::Paused {
                    self.phase = GamePhase::Active;
                }
            }
        }
    }

    fn run_systems(&mut self, dt: f32) {
        // 1. Waves, spawning and unit motion (notifies observers)
        self.scheduler.update(dt, self.player_position);
        // 2. Objective timers
        self.objectives.borrow_mut().update(dt);
        // 3. Player movement, capped at max speed on the floor plane
        let requested = std::mem::take(&mut self.pending_move);
        let delta = Vec3::new(requested.x, 0.0, requested.z)
            .clamp_length_max(self.movement.max_step(dt));
        let resolution = collision::resolve_movement(
            self.player_position,
            delta,
            self.scheduler.obstacles(),
            PLAYER_RADIUS,
        );
        self.player_position = resolution.position;
        self.blocked = resolution.blocked;
        // 4. Cleanup
        self.scheduler.remove_dead_units();

        if self.scheduler.is_complete() {
            self.phase = GamePhase::Victory;
            info!("schedule complete at tick {}: victory", self.time.tick);
        }
    }
}
