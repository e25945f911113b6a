//! Sleep consistency analysis
//!
//! Derives weekday consistency, weekend recovery, sleep debt and variability
//! from daily sleep entries, scores them, and renders recommendations and a
//! weekly report. [`SleepTracker`] owns the entries and configuration; the
//! engines in [`analysis`], [`insights`] and [`report`] are pure functions
//! over entry slices.

pub mod analysis;
pub mod config;
pub mod insights;
pub mod models;
pub mod report;
pub mod time;
pub mod tracker;

#[cfg(test)]
mod test_utils;

pub use analysis::{analyze_consistency, optimal_catchup};
pub use config::{ConfigError, TrackerConfig, TrackerConfigUpdate};
pub use insights::{generate_insights, quality_score};
pub use report::generate_weekly_report;
pub use time::ParseError;
pub use tracker::{SleepTracker, TrackerError};
