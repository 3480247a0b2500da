//! Simulation constants and tuning defaults.
//!
//! These back the serde defaults in `config` and the fallbacks the
//! scheduler and objective tracker substitute for missing data.

/// Host loop tick rate (Hz).
pub const TICK_RATE: u32 = 60;

/// Seconds per tick at the host tick rate.
pub const DT: f32 = 1.0 / TICK_RATE as f32;

// --- Enemies ---

/// Seconds between spawns when a wave has no override.
pub const DEFAULT_SPAWN_INTERVAL_SECS: f32 = 4.0;

/// Maximum simultaneously active hostile units.
pub const DEFAULT_MAX_SIMULTANEOUS: usize = 10;

/// Archetype used when a wave's pool filters down to nothing.
pub const DEFAULT_ARCHETYPE: &str = "grunt";

/// Pause between waves when neither the wave nor the config sets one.
pub const DEFAULT_WAVE_INTERMISSION_SECS: f32 = 0.0;

// --- Collision ---

/// Player collision radius.
pub const PLAYER_RADIUS: f32 = 1.0;

/// Hostile unit collision radius.
pub const UNIT_RADIUS: f32 = 1.0;

// --- Player ---

/// Player floor speed cap (units/s).
pub const PLAYER_MAX_SPEED: f32 = 24.0;

// --- Combat (scripted fire policy in the host) ---

pub const FIRE_RATE: f32 = 6.0;
pub const PROJECTILE_SPEED: f32 = 120.0;
pub const PROJECTILE_LIFETIME_SECS: f32 = 2.5;
pub const PROJECTILE_DAMAGE: f32 = 1.0;

// --- Objectives ---

/// Wave selector keyword that expands to every wave of the level.
pub const ALL_WAVES: &str = "all";

/// Key of the objective table used when a level has no table of its own.
pub const DEFAULT_LEVEL_KEY: &str = "default";

/// Level name used when none is provided.
pub const UNKNOWN_LEVEL: &str = "unknown";

/// Objective panel text before any objective activates.
pub const AWAITING_TITLE: &str = "Awaiting orders";
pub const AWAITING_DESCRIPTION: &str = "Stand by for mission parameters.";

pub const BANNER_COMPLETE_TEXT: &str = "Objective complete";
pub const BANNER_FAILED_TEXT: &str = "Objective failed";
