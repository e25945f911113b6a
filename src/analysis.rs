//! Deterministic metrics layer for sleep entries
//!
//! Derives weekday consistency, weekend recovery, sleep debt and variability
//! from a snapshot of entries. Every call recomputes from the full slice.

use crate::models::{SleepConsistencyMetrics, SleepEntry};
use tracing::debug;

/// Ideal nightly sleep used for the debt calculation
pub const IDEAL_SLEEP_HOURS: f64 = 8.0;

/// Weekday entries within this many hours of the weekday mean count as consistent
pub const CONSISTENCY_BAND_HOURS: f64 = 1.0;

/// Upper bound on recommended catch-up sleep in a single window
pub const MAX_CATCHUP_HOURS: f64 = 4.0;

/// ---------------------------------------------------------------------------
/// Consistency Metrics
/// ---------------------------------------------------------------------------

/// Compute consistency metrics for a set of entries. Empty input yields the
/// all-zero record.
pub fn analyze_consistency(entries: &[SleepEntry]) -> SleepConsistencyMetrics {
  if entries.is_empty() {
    return SleepConsistencyMetrics::default();
  }

  // Partition on the stored flag, never on the date
  let weekday = weekday_hours(entries);
  let weekend_recovery: f64 = entries
    .iter()
    .filter(|e| e.is_weekend)
    .map(SleepEntry::hours)
    .sum();

  let metrics = SleepConsistencyMetrics {
    weekday_consistency: weekday_consistency(&weekday),
    weekend_recovery,
    sleep_debt: sleep_debt(entries),
    sleep_variability: sample_std_dev(&weekday),
  };

  debug!(
    entries = entries.len(),
    weekday = weekday.len(),
    consistency = metrics.weekday_consistency,
    debt = metrics.sleep_debt,
    "Computed sleep consistency metrics"
  );

  metrics
}

/// Recommended catch-up hours to offset the weekday deficit against
/// `target_duration`, capped at [`MAX_CATCHUP_HOURS`]
pub fn optimal_catchup(entries: &[SleepEntry], target_duration: f64) -> f64 {
  let weekday = weekday_hours(entries);
  if weekday.is_empty() {
    return 0.0;
  }

  let total: f64 = weekday.iter().sum();
  let deficit = (weekday.len() as f64 * target_duration - total).max(0.0);

  deficit.min(MAX_CATCHUP_HOURS)
}

/// ---------------------------------------------------------------------------
/// Helpers
/// ---------------------------------------------------------------------------

fn weekday_hours(entries: &[SleepEntry]) -> Vec<f64> {
  entries
    .iter()
    .filter(|e| !e.is_weekend)
    .map(SleepEntry::hours)
    .collect()
}

fn mean(values: &[f64]) -> Option<f64> {
  if values.is_empty() {
    None
  } else {
    Some(values.iter().sum::<f64>() / values.len() as f64)
  }
}

/// Percentage of values within the band around their mean (inclusive)
fn weekday_consistency(hours: &[f64]) -> f64 {
  let Some(avg) = mean(hours) else {
    return 0.0;
  };

  let consistent = hours
    .iter()
    .filter(|h| (*h - avg).abs() <= CONSISTENCY_BAND_HOURS)
    .count();

  100.0 * consistent as f64 / hours.len() as f64
}

/// Per-entry shortfall summed across all entries. Oversleeping one night
/// never offsets another night's deficit; a missing duration counts as zero
/// hours slept.
fn sleep_debt(entries: &[SleepEntry]) -> f64 {
  entries
    .iter()
    .map(|e| (IDEAL_SLEEP_HOURS - e.hours()).max(0.0))
    .sum()
}

/// Bessel-corrected standard deviation; zero below two samples
fn sample_std_dev(values: &[f64]) -> f64 {
  if values.len() < 2 {
    return 0.0;
  }
  let avg = values.iter().sum::<f64>() / values.len() as f64;
  let variance = values
    .iter()
    .map(|v| (v - avg).powi(2))
    .sum::<f64>()
    / (values.len() - 1) as f64;

  variance.sqrt()
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
