//! Stage configuration.
//!
//! Every field defaults to the matching value in [`crate::constants`], so a
//! JSON config file only lists what it overrides:
//!
//! ```
//! use trek::config::StageConfig;
//! let config = StageConfig::from_json_str(r#"{ "snap_distance": 35.0 }"#).unwrap();
//! assert_eq!(config.snap_distance, 35.0);
//! assert_eq!(config.range, trek::DEFAULT_RANGE);
//! ```

use std::path::{Path as FsPath, PathBuf};

use serde::Deserialize;
use thiserror::Error;

use crate::constants::{
    DEFAULT_RANGE, DEFAULT_SPACING, HEIGHT_MULTIPLIER, INFO_SLOTS, PLAYER_TURN_STEP,
    SNAP_DISTANCE, WANDER_CHANCE, WANDER_TURN,
};

/// Failure while reading a [`StageConfig`].
#[derive(Debug, Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("failed to read config {path}: {source}")]
    Io {
        /// File that was being read.
        path: PathBuf,
        /// Underlying I/O failure.
        #[source]
        source: std::io::Error,
    },
    /// The config text is not valid JSON for [`StageConfig`].
    #[error("invalid stage config: {0}")]
    Parse(#[from] serde_json::Error),
}

/// Tunable values for a [`crate::Stage`] and the agents it spawns.
#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct StageConfig {
    /// Terrain vertices along each side.
    pub range: usize,
    /// World units between terrain vertices.
    pub spacing: f32,
    /// Multiplier applied to the height image's red channel.
    pub height_multiplier: i32,
    /// Goal-reached distance for path followers.
    pub snap_distance: f32,
    /// Yaw per turn input for player-controlled agents.
    pub player_turn_step: f32,
    /// Yaw of a single wander turn.
    pub wander_turn: f32,
    /// Per-tick probability that a wanderer turns.
    pub wander_chance: f64,
    /// Number of inspector display slots.
    pub info_slots: usize,
}

impl Default for StageConfig {
    fn default() -> Self {
        Self {
            range: DEFAULT_RANGE,
            spacing: DEFAULT_SPACING,
            height_multiplier: HEIGHT_MULTIPLIER,
            snap_distance: SNAP_DISTANCE,
            player_turn_step: PLAYER_TURN_STEP,
            wander_turn: WANDER_TURN,
            wander_chance: WANDER_CHANCE,
            info_slots: INFO_SLOTS,
        }
    }
}

impl StageConfig {
    /// Parses a config from JSON text.
    ///
    /// # Errors
    /// Returns [`ConfigError::Parse`] for malformed JSON or unknown fields.
    pub fn from_json_str(text: &str) -> Result<Self, ConfigError> {
        Ok(serde_json::from_str(text)?)
    }

    /// Reads and parses a JSON config file.
    ///
    /// # Errors
    /// Returns [`ConfigError::Io`] when the file cannot be read and
    /// [`ConfigError::Parse`] when its contents are invalid.
    pub fn load(path: impl AsRef<FsPath>) -> Result<Self, ConfigError> {
        let path = path.as_ref();
        let text = std::fs::read_to_string(path).map_err(|source| ConfigError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        Self::from_json_str(&text)
    }

    /// Width of the terrain in world units.
    #[expect(
        clippy::cast_precision_loss,
        reason = "Terrain ranges are small enough to be exact in f32."
    )]
    #[must_use]
    pub fn terrain_size(&self) -> f32 {
        self.range as f32 * self.spacing
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_object_yields_defaults() {
        let config = StageConfig::from_json_str("{}").expect("valid config");
        assert_eq!(config, StageConfig::default());
    }

    #[test]
    fn unknown_field_is_rejected() {
        let err = StageConfig::from_json_str(r#"{ "gravity": 1.0 }"#)
            .expect_err("unknown field should fail");
        assert!(matches!(err, ConfigError::Parse(_)));
    }

    #[test]
    fn terrain_size_is_range_times_spacing() {
        let config = StageConfig {
            range: 8,
            spacing: 10.0,
            ..StageConfig::default()
        };
        assert_eq!(config.terrain_size(), 80.0);
    }

    #[test]
    fn missing_file_reports_path() {
        let err = StageConfig::load("/nonexistent/trek-config.json")
            .expect_err("missing file should fail");
        assert!(err.to_string().contains("trek-config.json"));
    }
}
