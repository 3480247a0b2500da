//! Simulation core for ARENA.
//!
//! Owns the wave scheduler (with its hecs world of hostile units), the
//! objective tracker and the collision resolver, and drives them in a
//! fixed per-tick order through `ArenaEngine`.

pub mod collision;
pub mod engine;
pub mod objectives;
pub mod observer;
pub mod scheduler;
pub mod systems;
pub mod world_setup;

pub use arena_core as core;
pub use engine::{ArenaEngine, SimConfig};
pub use objectives::{ObjectiveCatalog, ObjectiveTracker};
pub use observer::{EventRecorder, ObserverHandle, ScheduleObserver};
pub use scheduler::WaveScheduler;
