//! Core types and definitions for the ARENA simulation.
//!
//! This crate defines the vocabulary shared across the other crates:
//! geometry, components, commands, lifecycle events, snapshots, tuning
//! configuration and level data. It has no dependency on any renderer
//! or runtime framework.

pub mod commands;
pub mod components;
pub mod config;
pub mod constants;
pub mod enums;
pub mod error;
pub mod events;
pub mod level;
pub mod state;
pub mod types;

pub use error::ConfigError;

#[cfg(test)]
mod tests;
