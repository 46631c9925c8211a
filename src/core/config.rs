//! Movement configuration with documented constants
//!
//! The few tunables the movement driver depends on are collected here so a
//! level can be configured from a TOML file instead of recompiling.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::core::error::{Result, TacticsError};

/// Configuration for the per-tick movement driver
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TacticsConfig {
    /// Distance (board units) under which a waypoint counts as reached
    ///
    /// The driver snaps onto a waypoint when it consumes the full distance
    /// to it, so this only has to absorb float rounding.
    pub waypoint_epsilon: f32,

    /// Lower bound (inclusive, degrees) of the `Front` facing arc
    ///
    /// Headings in `[facing_min_deg, facing_max_deg)` face front, every
    /// other heading faces back. Angles are `atan2(dy, dx)` in board space.
    pub facing_min_deg: f32,

    /// Upper bound (exclusive, degrees) of the `Front` facing arc
    pub facing_max_deg: f32,
}

impl Default for TacticsConfig {
    fn default() -> Self {
        Self {
            waypoint_epsilon: 1e-5,
            facing_min_deg: -157.5,
            facing_max_deg: 22.5,
        }
    }
}

impl TacticsConfig {
    /// Create a new config with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Parse a config from TOML text; missing keys keep their defaults
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: TacticsConfig = toml::from_str(content)?;
        config.validate()?;
        Ok(config)
    }

    /// Load a config from a TOML file
    pub fn load(path: &Path) -> Result<Self> {
        let content = fs::read_to_string(path)?;
        Self::from_toml_str(&content)
    }

    /// Validate configuration for internal consistency
    pub fn validate(&self) -> Result<()> {
        if !(self.waypoint_epsilon > 0.0 && self.waypoint_epsilon < 1.0) {
            return Err(TacticsError::InvalidConfig(format!(
                "waypoint_epsilon ({}) must be in (0, 1)",
                self.waypoint_epsilon
            )));
        }

        if self.facing_min_deg >= self.facing_max_deg {
            return Err(TacticsError::InvalidConfig(format!(
                "facing_min_deg ({}) should be < facing_max_deg ({})",
                self.facing_min_deg, self.facing_max_deg
            )));
        }

        if self.facing_min_deg < -180.0 || self.facing_max_deg > 180.0 {
            return Err(TacticsError::InvalidConfig(
                "facing bounds must lie within [-180, 180]".into(),
            ));
        }

        Ok(())
    }
}
