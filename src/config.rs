//! Simulation tunables
//!
//! Loaded from a JSON file by the harness; every field has a default so a
//! partial file only overrides what it names.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::consts::*;
use crate::error::ConfigError;

/// Tunable parameters for one game session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SimConfig {
    /// RNG seed (None = harness picks one from the clock)
    pub seed: Option<u64>,
    /// Fixed tick duration in seconds
    pub tick_duration: f32,
    /// Level cap
    pub max_level: u32,
    /// Lives at the start of every game
    pub starting_lives: u8,
    /// 1-in-N power-up drop chance for bullet kills
    pub power_up_chance: u32,
    /// Invulnerability granted when a new game starts after a restart
    pub restart_invulnerability: f32,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            seed: None,
            tick_duration: SIM_DT,
            max_level: MAX_LEVEL,
            starting_lives: STARTING_LIVES,
            power_up_chance: POWER_UP_CHANCE,
            restart_invulnerability: RESTART_INVULNERABILITY,
        }
    }
}

impl SimConfig {
    /// Config with an explicit seed and all other fields at their defaults
    pub fn with_seed(seed: u64) -> Self {
        Self {
            seed: Some(seed),
            ..Self::default()
        }
    }

    /// Parse and validate a config from JSON text
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: SimConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    /// Read, parse and validate a config file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let config = Self::from_json_str(&json)?;
        log::info!("Loaded config from {}", path.display());
        Ok(config)
    }

    /// Reject values the simulation cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !(self.tick_duration > 0.0 && self.tick_duration.is_finite()) {
            return Err(ConfigError::Invalid {
                field: "tick_duration",
                reason: "must be a positive number of seconds",
            });
        }
        if self.max_level == 0 {
            return Err(ConfigError::Invalid {
                field: "max_level",
                reason: "must be at least 1",
            });
        }
        if self.starting_lives == 0 {
            return Err(ConfigError::Invalid {
                field: "starting_lives",
                reason: "must be at least 1",
            });
        }
        // Rocket kills roll against chance / 2, which must stay >= 1
        if self.power_up_chance < 2 {
            return Err(ConfigError::Invalid {
                field: "power_up_chance",
                reason: "must be at least 2",
            });
        }
        if self.restart_invulnerability < 0.0 {
            return Err(ConfigError::Invalid {
                field: "restart_invulnerability",
                reason: "must not be negative",
            });
        }
        Ok(())
    }
}
