//! Sleep tracker facade
//!
//! Owns the entry collection and configuration, derives each entry's
//! duration and weekend flag once at creation, and hands read-only
//! snapshots to the analysis engines.

use crate::analysis::{analyze_consistency, optimal_catchup};
use crate::config::{ConfigError, TrackerConfig, TrackerConfigUpdate};
use crate::insights::{generate_insights, quality_score};
use crate::models::{MentalHealthInsight, NewSleepEntry, SleepAnalysis, SleepEntry, WeeklyReport};
use crate::report::generate_weekly_report;
use crate::time::{self, ParseError};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum TrackerError {
  #[error(transparent)]
  Parse(#[from] ParseError),

  #[error(transparent)]
  Config(#[from] ConfigError),

  #[error("No sleep entry with id {0}")]
  EntryNotFound(Uuid),

  #[error("Invalid date range: {start} is after {end}")]
  InvalidRange { start: NaiveDate, end: NaiveDate },
}

/// ---------------------------------------------------------------------------
/// Tracker
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, Default)]
pub struct SleepTracker {
  entries: Vec<SleepEntry>,
  config: TrackerConfig,
}

impl SleepTracker {
  /// Build a tracker; the config is validated before use
  pub fn new(config: TrackerConfig) -> Result<Self, TrackerError> {
    config.validate()?;
    Ok(Self {
      entries: Vec::new(),
      config,
    })
  }

  pub fn with_defaults() -> Self {
    Self {
      entries: Vec::new(),
      config: TrackerConfig::default(),
    }
  }

  /// Record a sleep session. The time pair must parse; nothing is stored
  /// on failure.
  pub fn add_entry(&mut self, new: NewSleepEntry) -> Result<SleepEntry, TrackerError> {
    let duration = time::parse_duration(&new.start_time, &new.end_time)?;

    let entry = SleepEntry {
      id: Uuid::new_v4(),
      date: new.date,
      start_time: time::normalize_time(&new.start_time)?,
      end_time: time::normalize_time(&new.end_time)?,
      is_weekend: new.is_weekend.unwrap_or_else(|| time::is_weekend(new.date)),
      duration: Some(duration),
    };

    debug!(id = %entry.id, date = %entry.date, duration, "Added sleep entry");
    self.entries.push(entry.clone());
    Ok(entry)
  }

  pub fn remove_entry(&mut self, id: Uuid) -> Result<SleepEntry, TrackerError> {
    let idx = self
      .entries
      .iter()
      .position(|e| e.id == id)
      .ok_or(TrackerError::EntryNotFound(id))?;

    debug!(id = %id, "Removed sleep entry");
    Ok(self.entries.remove(idx))
  }

  /// Entries in insertion order
  pub fn entries(&self) -> &[SleepEntry] {
    &self.entries
  }

  pub fn clear(&mut self) {
    info!(count = self.entries.len(), "Clearing sleep entries");
    self.entries.clear();
  }

  /// Entries dated within `start..=end`
  pub fn entries_between(
    &self,
    start: NaiveDate,
    end: NaiveDate,
  ) -> Result<Vec<SleepEntry>, TrackerError> {
    if start > end {
      return Err(TrackerError::InvalidRange { start, end });
    }
    Ok(self.window(start, end))
  }

  fn window(&self, start: NaiveDate, end: NaiveDate) -> Vec<SleepEntry> {
    self
      .entries
      .iter()
      .filter(|e| e.date >= start && e.date <= end)
      .cloned()
      .collect()
  }

  pub fn config(&self) -> &TrackerConfig {
    &self.config
  }

  pub fn update_config(&mut self, update: TrackerConfigUpdate) -> Result<&TrackerConfig, TrackerError> {
    self.config = self.config.merge(&update)?;
    info!(
      target_sleep_hours = self.config.target_sleep_hours,
      max_catchup_hours = self.config.max_catchup_hours,
      "Updated tracker config"
    );
    Ok(&self.config)
  }

  // ---------------------------------------------------------------------------
  // Analysis
  // ---------------------------------------------------------------------------

  pub fn analyze(&self) -> SleepAnalysis {
    let metrics = analyze_consistency(&self.entries);
    let optimal_catchup_hours = optimal_catchup(&self.entries, self.config.target_sleep_hours)
      .min(self.config.max_catchup_hours)
      .max(0.0);

    let mut analysis = SleepAnalysis {
      metrics,
      optimal_catchup_hours,
      consistency_score: metrics.weekday_consistency,
    };
    analysis.consistency_score = quality_score(&self.entries);
    analysis
  }

  pub fn insights(&self) -> MentalHealthInsight {
    generate_insights(&self.analyze(), &self.entries)
  }

  /// Report for the Monday-Sunday week containing `date`, scored on that
  /// week's entries only
  pub fn weekly_report(&self, date: NaiveDate) -> WeeklyReport {
    let week_start = time::start_of_week(date);
    let week = self.window(week_start, time::end_of_week(week_start));
    let score = quality_score(&week);
    generate_weekly_report(&week, week_start, score)
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
