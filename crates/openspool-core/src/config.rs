//! Engine configuration.
//!
//! A small JSON document selecting the temperature ladder offered to editors,
//! the edit policy applied by the validator, and how decode treats records
//! whose temperature range is out of order. Every field has a default, so an
//! empty object is a valid configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::validation::EditPolicy;

/// Current configuration format version.
pub const CONFIG_VERSION: u32 = 1;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
    #[error("config JSON error: {0}")]
    Json(#[from] serde_json::Error),
    #[error("unsupported config version {found} (newest supported is {supported})")]
    UnsupportedVersion { found: u32, supported: u32 },
    #[error("invalid temperature ladder {lowest}..={highest} step {step}: {reason}")]
    InvalidLadder {
        lowest: i32,
        highest: i32,
        step: i32,
        reason: &'static str,
    },
}

/// What decode does with a record whose `min_temp` is not below `max_temp`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeOnRead {
    /// Fail with `InvalidTemperatureRange`.
    #[default]
    Reject,
    /// Decode anyway and log a warning; writing it back still fails.
    Accept,
}

/// Discrete temperatures offered to editors: `lowest`, `lowest + step`, ...,
/// `highest`.
///
/// # Examples
/// ```
/// use openspool_core::TemperatureLadder;
///
/// let ladder = TemperatureLadder::default();
/// assert!(ladder.contains(215));
/// assert!(!ladder.contains(217));
/// assert_eq!(ladder.values().count(), 20);
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemperatureLadder {
    pub lowest: i32,
    pub highest: i32,
    pub step: i32,
}

impl Default for TemperatureLadder {
    fn default() -> Self {
        Self {
            lowest: 180,
            highest: 275,
            step: 5,
        }
    }
}

impl TemperatureLadder {
    /// Upper bound on the number of rungs a valid ladder may have.
    pub const MAX_RUNGS: i64 = 1024;

    pub fn contains(&self, value: i32) -> bool {
        let offset = i64::from(value) - i64::from(self.lowest);
        self.step > 0
            && value >= self.lowest
            && value <= self.highest
            && offset % i64::from(self.step) == 0
    }

    /// All rungs, lowest first.
    pub fn values(&self) -> impl Iterator<Item = i32> {
        let step = self.step.max(1) as usize;
        (self.lowest..=self.highest)
            .step_by(step)
            .take(Self::MAX_RUNGS as usize)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let span = i64::from(self.highest) - i64::from(self.lowest);
        let step = i64::from(self.step);
        let reason = if step <= 0 {
            Some("step must be positive")
        } else if span <= 0 {
            Some("lowest must be below highest")
        } else if span % step != 0 {
            Some("highest must be a whole number of steps above lowest")
        } else if span / step + 1 > Self::MAX_RUNGS {
            Some("too many rungs")
        } else {
            None
        };
        match reason {
            Some(reason) => Err(ConfigError::InvalidLadder {
                lowest: self.lowest,
                highest: self.highest,
                step: self.step,
                reason,
            }),
            None => Ok(()),
        }
    }
}

/// Engine configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EngineConfig {
    #[serde(default = "default_version")]
    pub version: u32,

    #[serde(default)]
    pub temperatures: TemperatureLadder,

    #[serde(default)]
    pub edit_policy: EditPolicy,

    #[serde(default)]
    pub inverted_range_on_read: RangeOnRead,
}

fn default_version() -> u32 {
    CONFIG_VERSION
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            version: CONFIG_VERSION,
            temperatures: TemperatureLadder::default(),
            edit_policy: EditPolicy::default(),
            inverted_range_on_read: RangeOnRead::default(),
        }
    }
}

impl EngineConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: EngineConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: &Path) -> Result<Self, ConfigError> {
        let json = fs::read_to_string(path)?;
        let config = Self::from_json_str(&json)?;
        log::debug!("loaded config from {}", path.display());
        Ok(config)
    }

    pub fn to_json(&self) -> Result<String, ConfigError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.version > CONFIG_VERSION {
            return Err(ConfigError::UnsupportedVersion {
                found: self.version,
                supported: CONFIG_VERSION,
            });
        }
        self.temperatures.validate()
    }
}
