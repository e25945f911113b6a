//! Tracker configuration
//!
//! Values come from defaults, the environment (`.env` is loaded first), or a
//! partial update merged over the current settings.

use crate::analysis::MAX_CATCHUP_HOURS;
use serde::{Deserialize, Serialize};
use std::env;

pub const TARGET_SLEEP_ENV: &str = "SLEEP_TARGET_HOURS";
pub const MAX_CATCHUP_ENV: &str = "SLEEP_MAX_CATCHUP_HOURS";

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ConfigError {
  #[error("Invalid value for {key}: '{value}'")]
  InvalidValue { key: String, value: String },

  #[error("Value out of range for {key}: {value}")]
  OutOfRange { key: String, value: f64 },
}

/// ---------------------------------------------------------------------------
/// Settings
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", try_from = "RawTrackerConfig")]
pub struct TrackerConfig {
  /// Nightly target used for catch-up recommendations
  pub target_sleep_hours: f64,
  /// Catch-up cap; may tighten the 4hr engine limit, never loosen it
  pub max_catchup_hours: f64,
}

impl Default for TrackerConfig {
  fn default() -> Self {
    Self {
      target_sleep_hours: 8.0,
      max_catchup_hours: MAX_CATCHUP_HOURS,
    }
  }
}

/// Deserialized form; only reaches `TrackerConfig` through `validate`
#[derive(Deserialize)]
#[serde(rename_all = "camelCase", default)]
struct RawTrackerConfig {
  target_sleep_hours: f64,
  max_catchup_hours: f64,
}

impl Default for RawTrackerConfig {
  fn default() -> Self {
    let defaults = TrackerConfig::default();
    Self {
      target_sleep_hours: defaults.target_sleep_hours,
      max_catchup_hours: defaults.max_catchup_hours,
    }
  }
}

impl TryFrom<RawTrackerConfig> for TrackerConfig {
  type Error = ConfigError;

  fn try_from(raw: RawTrackerConfig) -> Result<Self, Self::Error> {
    let config = Self {
      target_sleep_hours: raw.target_sleep_hours,
      max_catchup_hours: raw.max_catchup_hours,
    };
    config.validate()?;
    Ok(config)
  }
}

/// Partial update; `None` fields keep their current value
#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TrackerConfigUpdate {
  pub target_sleep_hours: Option<f64>,
  pub max_catchup_hours: Option<f64>,
}

impl TrackerConfig {
  /// Load from the environment, reading `.env` if present
  pub fn from_env() -> Result<Self, ConfigError> {
    dotenvy::dotenv().ok();
    Self::from_vars()
  }

  fn from_vars() -> Result<Self, ConfigError> {
    let defaults = Self::default();
    let config = Self {
      target_sleep_hours: read_hours(TARGET_SLEEP_ENV)?.unwrap_or(defaults.target_sleep_hours),
      max_catchup_hours: read_hours(MAX_CATCHUP_ENV)?.unwrap_or(defaults.max_catchup_hours),
    };
    config.validate()?;
    Ok(config)
  }

  pub fn validate(&self) -> Result<(), ConfigError> {
    if !(self.target_sleep_hours > 0.0 && self.target_sleep_hours <= 24.0) {
      return Err(ConfigError::OutOfRange {
        key: TARGET_SLEEP_ENV.to_string(),
        value: self.target_sleep_hours,
      });
    }
    if !(self.max_catchup_hours >= 0.0 && self.max_catchup_hours <= MAX_CATCHUP_HOURS) {
      return Err(ConfigError::OutOfRange {
        key: MAX_CATCHUP_ENV.to_string(),
        value: self.max_catchup_hours,
      });
    }
    Ok(())
  }

  /// Apply the `Some` fields of `update` and validate the result
  pub fn merge(&self, update: &TrackerConfigUpdate) -> Result<Self, ConfigError> {
    let merged = Self {
      target_sleep_hours: update.target_sleep_hours.unwrap_or(self.target_sleep_hours),
      max_catchup_hours: update.max_catchup_hours.unwrap_or(self.max_catchup_hours),
    };
    merged.validate()?;
    Ok(merged)
  }
}

fn read_hours(key: &str) -> Result<Option<f64>, ConfigError> {
  match env::var(key) {
    Ok(raw) => raw
      .trim()
      .parse::<f64>()
      .map(Some)
      .map_err(|_| ConfigError::InvalidValue {
        key: key.to_string(),
        value: raw.clone(),
      }),
    Err(env::VarError::NotPresent) => Ok(None),
    Err(env::VarError::NotUnicode(raw)) => Err(ConfigError::InvalidValue {
      key: key.to_string(),
      value: raw.to_string_lossy().into_owned(),
    }),
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
