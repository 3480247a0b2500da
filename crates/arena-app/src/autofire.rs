//! Scripted fire policy for headless runs.
//!
//! Stands in for the player's weapon: at the configured fire rate it hits
//! the nearest live unit within projectile reach.

use arena_core::commands::HostCommand;
use arena_core::config::CombatConfig;
use arena_core::state::ArenaSnapshot;
use arena_core::types::Position;

#[derive(Debug, Clone)]
pub struct AutoFire {
    interval: f32,
    cooldown: f32,
    damage: f32,
    range: f32,
}

impl AutoFire {
    pub fn new(combat: &CombatConfig) -> Self {
        Self {
            interval: if combat.fire_rate > 0.0 {
                1.0 / combat.fire_rate
            } else {
                f32::INFINITY
            },
            cooldown: 0.0,
            damage: combat.damage,
            range: combat.projectile_speed * combat.projectile_lifetime,
        }
    }

    /// The shot to fire this tick, if the weapon is ready and a target is in reach.
    pub fn next_shot(&mut self, dt: f32, snapshot: &ArenaSnapshot) -> Option<HostCommand> {
        self.cooldown = (self.cooldown - dt).max(0.0);
        if self.cooldown > 0.0 {
            return None;
        }

        let player = snapshot.player.position;
        let (unit_id, _) = snapshot
            .units
            .iter()
            .filter(|unit| unit.health > 0.0)
            .map(|unit| {
                let distance = Position(unit.position).horizontal_distance_to(player);
                (unit.unit_id, distance)
            })
            .filter(|(_, distance)| *distance <= self.range)
            .min_by(|a, b| a.1.total_cmp(&b.1))?;

        self.cooldown = self.interval;
        Some(HostCommand::DamageUnit {
            unit_id,
            amount: self.damage,
        })
    }
}
