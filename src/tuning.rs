//! Data-driven game balance
//!
//! Defaults reproduce the arcade tuning. A JSON file can override any subset
//! of fields.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::settings::SettingsError;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Tuning {
    /// Lives at the start of a run
    pub starting_lives: u32,
    /// Seconds before spawning, AI and collisions switch on
    pub warmup_seconds: u32,
    /// Ticks between fighter spawns while under the cap
    pub fighter_spawn_interval: u32,
    /// Concurrent fighter cap at the start of a run
    pub initial_fighter_cap: u32,
    /// Kills needed to raise the fighter cap by one
    pub kills_per_cap_increase: u32,
    /// Total kills that summon the boss
    pub boss_kill_threshold: u32,
    /// One in this many qualifying kills drops a power-up
    pub power_up_drop_odds: u32,
    /// Player bullets pierce when power level is above this
    pub pierce_power_level: u32,
    /// Health an enemy loses when it rams the player
    pub contact_damage: i32,
    /// Power level the player starts with
    pub player_start_power: u32,
    /// Ticks the wreck stays down before the player re-arrives
    pub respawn_delay_ticks: u32,
    /// Ticks of invulnerability after (re)arriving
    pub invulnerable_ticks: u32,
    /// How far past the screen an entity may drift before the bounds sweep drops it
    pub bounds_margin: i32,
}

impl Default for Tuning {
    fn default() -> Self {
        Self {
            starting_lives: 3,
            warmup_seconds: 10,
            fighter_spawn_interval: 20,
            initial_fighter_cap: 5,
            kills_per_cap_increase: 25,
            boss_kill_threshold: 99,
            power_up_drop_odds: 20,
            pierce_power_level: 2,
            contact_damage: 10,
            player_start_power: 1,
            respawn_delay_ticks: 90,
            invulnerable_ticks: 120,
            bounds_margin: 600,
        }
    }
}

impl Tuning {
    /// Tuning with no warm-up, for harnesses that want action on tick one
    pub fn immediate() -> Self {
        Self {
            warmup_seconds: 0,
            ..Self::default()
        }
    }

    /// Load overrides from a JSON file
    pub fn load(path: &Path) -> Result<Self, SettingsError> {
        let json = std::fs::read_to_string(path)?;
        let tuning = serde_json::from_str(&json)?;
        log::info!("Loaded tuning from {}", path.display());
        Ok(tuning)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_partial_json_keeps_defaults() {
        let tuning: Tuning = serde_json::from_str(r#"{ "starting_lives": 5 }"#).unwrap();
        assert_eq!(tuning.starting_lives, 5);
        assert_eq!(tuning.boss_kill_threshold, 99);
        assert_eq!(tuning.power_up_drop_odds, 20);
    }

    #[test]
    fn test_missing_file_is_an_error() {
        assert!(Tuning::load(Path::new("/nonexistent/tuning.json")).is_err());
    }
}
