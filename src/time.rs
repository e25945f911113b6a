//! Calendar and clock helpers for sleep entries
//!
//! Weeks run Monday through Sunday. Clock strings are accepted in 24-hour
//! `HH:MM` form or 12-hour `HH:MM AM|PM` form (case-insensitive).

use chrono::{Datelike, Duration, NaiveDate, NaiveTime, Timelike, Weekday};
use serde::{Deserialize, Serialize};

const MINUTES_PER_DAY: i64 = 24 * 60;

/// ---------------------------------------------------------------------------
/// Error Handling
/// ---------------------------------------------------------------------------

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error, Serialize, Deserialize)]
#[serde(tag = "type", content = "message")]
pub enum ParseError {
  #[error("Invalid time format: '{0}' (expected HH:MM or HH:MM AM/PM)")]
  InvalidFormat(String),

  #[error("Hour out of range in '{0}'")]
  HourOutOfRange(String),

  #[error("Minute out of range in '{0}'")]
  MinuteOutOfRange(String),
}

#[derive(Debug, Clone, Copy)]
enum Meridiem {
  Am,
  Pm,
}

/// ---------------------------------------------------------------------------
/// Week Boundaries
/// ---------------------------------------------------------------------------

/// Monday of the week containing `date`. Sunday belongs to the week that
/// started six days earlier.
pub fn start_of_week(date: NaiveDate) -> NaiveDate {
  date - Duration::days(date.weekday().num_days_from_monday() as i64)
}

/// Sunday of the week containing `date`
pub fn end_of_week(date: NaiveDate) -> NaiveDate {
  start_of_week(date) + Duration::days(6)
}

pub fn is_weekend(date: NaiveDate) -> bool {
  matches!(date.weekday(), Weekday::Sat | Weekday::Sun)
}

/// ---------------------------------------------------------------------------
/// Clock Parsing
/// ---------------------------------------------------------------------------

/// Parse a wall-clock string into a time of day
pub fn parse_time(input: &str) -> Result<NaiveTime, ParseError> {
  let invalid = || ParseError::InvalidFormat(input.to_string());

  let upper = input.trim().to_ascii_uppercase();
  let (clock, meridiem) = if let Some(rest) = upper.strip_suffix("AM") {
    (rest.trim_end(), Some(Meridiem::Am))
  } else if let Some(rest) = upper.strip_suffix("PM") {
    (rest.trim_end(), Some(Meridiem::Pm))
  } else {
    (upper.as_str(), None)
  };

  let (hour_str, minute_str) = clock.split_once(':').ok_or_else(invalid)?;

  let hour_ok = matches!(hour_str.len(), 1 | 2) && hour_str.bytes().all(|b| b.is_ascii_digit());
  let minute_ok = minute_str.len() == 2 && minute_str.bytes().all(|b| b.is_ascii_digit());
  if !hour_ok || !minute_ok {
    return Err(invalid());
  }

  let hour: u32 = hour_str.parse().map_err(|_| invalid())?;
  let minute: u32 = minute_str.parse().map_err(|_| invalid())?;

  if minute > 59 {
    return Err(ParseError::MinuteOutOfRange(input.to_string()));
  }

  let hour_24 = match meridiem {
    None if hour > 23 => return Err(ParseError::HourOutOfRange(input.to_string())),
    None => hour,
    Some(_) if !(1..=12).contains(&hour) => {
      return Err(ParseError::HourOutOfRange(input.to_string()))
    }
    // 12 AM is midnight, 12 PM is noon
    Some(Meridiem::Am) => hour % 12,
    Some(Meridiem::Pm) => hour % 12 + 12,
  };

  NaiveTime::from_hms_opt(hour_24, minute, 0).ok_or_else(invalid)
}

/// Canonical 24-hour `HH:MM` form of a clock string
pub fn normalize_time(input: &str) -> Result<String, ParseError> {
  Ok(parse_time(input)?.format("%H:%M").to_string())
}

/// Hours between two clock strings. An end before the start wraps past
/// midnight.
pub fn parse_duration(start_time: &str, end_time: &str) -> Result<f64, ParseError> {
  let start = minutes_from_midnight(parse_time(start_time)?);
  let end = minutes_from_midnight(parse_time(end_time)?);

  let mut minutes = end - start;
  if minutes < 0 {
    minutes += MINUTES_PER_DAY;
  }

  Ok(minutes as f64 / 60.0)
}

fn minutes_from_midnight(time: NaiveTime) -> i64 {
  (time.num_seconds_from_midnight() / 60) as i64
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
