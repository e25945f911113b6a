use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One recorded sleep session
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepEntry {
  pub id: Uuid,
  pub date: NaiveDate,
  pub start_time: String,
  pub end_time: String,
  pub is_weekend: bool,
  /// Hours slept, derived from start/end when the entry was created
  #[serde(default)]
  pub duration: Option<f64>,
}

impl SleepEntry {
  /// Duration in hours, with an unset duration counted as zero
  pub fn hours(&self) -> f64 {
    self.duration.unwrap_or(0.0)
  }
}

/// For inserting new entries (without id, duration)
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSleepEntry {
  pub date: NaiveDate,
  pub start_time: String,
  pub end_time: String,
  /// Derived from `date` when omitted
  #[serde(default, skip_serializing_if = "Option::is_none")]
  pub is_weekend: Option<bool>,
}
