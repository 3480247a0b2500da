//! ARENA host application.
//!
//! Runs the simulation engine on its own thread at the fixed tick rate and
//! reports wave and objective progress through the log.

pub mod autofire;
pub mod game_loop;
pub mod logging;
pub mod state;
pub mod status;

pub use arena_core as core;
