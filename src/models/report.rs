use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct WeeklyReport {
  pub start_date: NaiveDate,
  pub end_date: NaiveDate,
  pub summary: String,
  pub key_metrics: KeyMetrics,
  pub trends: Vec<String>,
  pub visualizations: Visualizations,
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct KeyMetrics {
  pub average_sleep_duration: f64,
  pub consistency_score: f64,
  pub catchup_sleep_hours: f64,
}

/// Chart descriptions only; nothing here is rendered
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Visualizations {
  pub sleep_duration_chart: String,
  pub consistency_chart: String,
}
