//! Systems that operate on the hostile-unit world each tick.
//!
//! Systems are plain functions taking `&mut World` (or `&World` for read-only).
//! They do not own state; all state lives in components.

pub mod cleanup;
pub mod snapshot;
pub mod unit_motion;
