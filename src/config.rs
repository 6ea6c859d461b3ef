use serde::{Deserialize, Serialize};
use std::{env, str::FromStr};

use crate::model::{
    constants::{
        DEFAULT_K_FACTOR, DIMINISHING_RETURNS_DIVISOR, DIMINISHING_RETURNS_FLOOR, LOW_VARIANCE_THRESHOLD,
        MAX_SIMULATION_GAMES, MEDIUM_VARIANCE_THRESHOLD, SHIELDED_EFFECTIVE_DELTA, SYMMETRY_TOLERANCE
    },
    error::ValidationError
};

/// Tunable numeric constants for the rating engine
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct EngineConfig {
    /// Converts an expected-score error into ladder points (default: 27)
    pub k_factor: f64,
    /// Rating surplus over the tier baseline at which gains vanish (default: 2000)
    pub diminishing_divisor: f64,
    /// Smallest scaling applied by diminishing returns (default: 0.05)
    pub diminishing_floor: f64,
    /// Internal delta of a shielded loss (default: -12)
    pub shielded_delta: i32,
    /// Largest tolerated gap between observed and predicted deltas (default: 5)
    pub symmetry_tolerance: i32,
    /// Upper bound on simulated games (default: 100). Can only lower the hard limit of 100.
    pub max_simulation_games: u32,
    /// Below this, delta variance scores as low (default: 25)
    pub low_variance_threshold: f64,
    /// Below this, delta variance scores as medium (default: 50)
    pub medium_variance_threshold: f64
}

impl EngineConfig {
    /// Creates a configuration from `LADDER_*` environment variables.
    /// Missing or unparsable values fall back to their defaults.
    pub fn from_env() -> Self {
        let defaults = Self::default();

        Self {
            k_factor: env_or("LADDER_K_FACTOR", defaults.k_factor),
            diminishing_divisor: env_or("LADDER_DIMINISHING_DIVISOR", defaults.diminishing_divisor),
            diminishing_floor: env_or("LADDER_DIMINISHING_FLOOR", defaults.diminishing_floor),
            shielded_delta: env_or("LADDER_SHIELDED_DELTA", defaults.shielded_delta),
            symmetry_tolerance: env_or("LADDER_SYMMETRY_TOLERANCE", defaults.symmetry_tolerance),
            max_simulation_games: env_or("LADDER_MAX_SIMULATION_GAMES", defaults.max_simulation_games),
            low_variance_threshold: env_or("LADDER_LOW_VARIANCE_THRESHOLD", defaults.low_variance_threshold),
            medium_variance_threshold: env_or("LADDER_MEDIUM_VARIANCE_THRESHOLD", defaults.medium_variance_threshold)
        }
    }

    /// Rejects values the engine cannot compute with. Checked once at startup, since
    /// `from_env` falls back per field but cannot judge the values it parses.
    pub fn validate(&self) -> Result<(), ValidationError> {
        let invalid = |field: &'static str, value: f64| Err(ValidationError::InvalidConfig { field, value });

        if !(self.k_factor.is_finite() && self.k_factor > 0.0) {
            return invalid("kFactor", self.k_factor);
        }
        if !(self.diminishing_divisor.is_finite() && self.diminishing_divisor > 0.0) {
            return invalid("diminishingDivisor", self.diminishing_divisor);
        }
        if !(0.0..=1.0).contains(&self.diminishing_floor) {
            return invalid("diminishingFloor", self.diminishing_floor);
        }
        if self.shielded_delta > 0 {
            return invalid("shieldedDelta", self.shielded_delta as f64);
        }
        if self.symmetry_tolerance < 0 {
            return invalid("symmetryTolerance", self.symmetry_tolerance as f64);
        }
        if self.max_simulation_games == 0 {
            return invalid("maxSimulationGames", 0.0);
        }
        if !(self.low_variance_threshold >= 0.0 && self.low_variance_threshold.is_finite()) {
            return invalid("lowVarianceThreshold", self.low_variance_threshold);
        }
        if !(self.medium_variance_threshold >= self.low_variance_threshold
            && self.medium_variance_threshold.is_finite())
        {
            return invalid("mediumVarianceThreshold", self.medium_variance_threshold);
        }

        Ok(())
    }
}

fn env_or<T: FromStr>(key: &str, default: T) -> T {
    env::var(key).ok().and_then(|v| v.trim().parse().ok()).unwrap_or(default)
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            k_factor: DEFAULT_K_FACTOR,
            diminishing_divisor: DIMINISHING_RETURNS_DIVISOR,
            diminishing_floor: DIMINISHING_RETURNS_FLOOR,
            shielded_delta: SHIELDED_EFFECTIVE_DELTA,
            symmetry_tolerance: SYMMETRY_TOLERANCE,
            max_simulation_games: MAX_SIMULATION_GAMES,
            low_variance_threshold: LOW_VARIANCE_THRESHOLD,
            medium_variance_threshold: MEDIUM_VARIANCE_THRESHOLD
        }
    }
}
