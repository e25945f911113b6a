//! Test utilities and helpers for unit testing
//!
//! This module provides common test infrastructure including:
//! - Entry factories (already-derived entries for the engines)
//! - Raw entry fixtures (for the tracker)
//! - Helper assertions

use crate::models::{NewSleepEntry, SleepEntry};
use chrono::{Duration, NaiveDate};
use uuid::Uuid;

/// Monday of the fixture week used throughout the tests
pub fn fixture_monday() -> NaiveDate {
  NaiveDate::from_ymd_opt(2024, 3, 4).unwrap()
}

/// ---------------------------------------------------------------------------
/// Entry Factories
/// ---------------------------------------------------------------------------

/// Build an entry with explicit fields; times are placeholders since the
/// engines only read `duration` and `is_weekend`
pub fn make_entry(date: NaiveDate, is_weekend: bool, duration: Option<f64>) -> SleepEntry {
  SleepEntry {
    id: Uuid::new_v4(),
    date,
    start_time: "23:00".to_string(),
    end_time: "07:00".to_string(),
    is_weekend,
    duration,
  }
}

pub fn weekday_entry(hours: f64) -> SleepEntry {
  make_entry(fixture_monday(), false, Some(hours))
}

pub fn weekend_entry(hours: f64) -> SleepEntry {
  make_entry(fixture_monday() + Duration::days(5), true, Some(hours))
}

/// Weekday entries followed by weekend entries
pub fn entries_from_durations(weekday: &[f64], weekend: &[f64]) -> Vec<SleepEntry> {
  weekday
    .iter()
    .map(|h| weekday_entry(*h))
    .chain(weekend.iter().map(|h| weekend_entry(*h)))
    .collect()
}

/// ---------------------------------------------------------------------------
/// Raw Fixtures
/// ---------------------------------------------------------------------------

pub fn new_entry(date: NaiveDate, start: &str, end: &str) -> NewSleepEntry {
  NewSleepEntry {
    date,
    start_time: start.to_string(),
    end_time: end.to_string(),
    is_weekend: None,
  }
}

/// A full Monday-Sunday week: 7h weeknights, 9h weekend nights
pub fn sample_week(monday: NaiveDate) -> Vec<NewSleepEntry> {
  (0..7)
    .map(|offset| {
      let date = monday + Duration::days(offset);
      if offset < 5 {
        new_entry(date, "23:30", "06:30")
      } else {
        new_entry(date, "23:00", "08:00")
      }
    })
    .collect()
}

/// ---------------------------------------------------------------------------
/// Assertions
/// ---------------------------------------------------------------------------

pub fn assert_approx(actual: f64, expected: f64) {
  assert!(
    (actual - expected).abs() < 1e-9,
    "expected {}, got {}",
    expected,
    actual
  );
}
