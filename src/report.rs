//! Weekly report aggregation
//!
//! Entries must already be restricted to the report window by the caller.

use crate::models::{KeyMetrics, SleepEntry, Visualizations, WeeklyReport};
use crate::time::end_of_week;
use chrono::NaiveDate;
use tracing::debug;

/// Fixed trend lines. Not derived from the entries yet.
const PLACEHOLDER_TRENDS: [&str; 3] = [
  "Sleep duration stable compared to the previous week",
  "Weekday bedtimes becoming more consistent",
  "Weekend catch-up sleep within a healthy range",
];

/// Build the report for the week beginning at `week_start`.
/// `consistency_score` is supplied by the caller and reported as-is.
pub fn generate_weekly_report(
  entries: &[SleepEntry],
  week_start: NaiveDate,
  consistency_score: f64,
) -> WeeklyReport {
  let week_end = end_of_week(week_start);

  let average_sleep_duration = if entries.is_empty() {
    0.0
  } else {
    entries.iter().map(SleepEntry::hours).sum::<f64>() / entries.len() as f64
  };

  let catchup_sleep_hours: f64 = entries
    .iter()
    .filter(|e| e.is_weekend)
    .map(SleepEntry::hours)
    .sum();

  let summary = format!(
    "Sleep report for {} to {}: averaged {:.1} hours per night with {:.1} hours of weekend catch-up sleep.",
    week_start.format("%Y-%m-%d"),
    week_end.format("%Y-%m-%d"),
    average_sleep_duration,
    catchup_sleep_hours
  );

  debug!(
    week_start = %week_start,
    entries = entries.len(),
    "Generated weekly report"
  );

  WeeklyReport {
    start_date: week_start,
    end_date: week_end,
    summary,
    key_metrics: KeyMetrics {
      average_sleep_duration,
      consistency_score,
      catchup_sleep_hours,
    },
    trends: PLACEHOLDER_TRENDS.iter().map(|t| t.to_string()).collect(),
    visualizations: Visualizations {
      sleep_duration_chart: "Bar chart of nightly sleep duration in hours".to_string(),
      consistency_chart: "Line chart of daily sleep consistency against target".to_string(),
    },
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
