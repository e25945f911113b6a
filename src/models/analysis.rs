use serde::{Deserialize, Serialize};

/// Metrics derived from a set of sleep entries. Recomputed on every call.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepConsistencyMetrics {
  /// Share (0-100) of weekday entries within 1 hour of the weekday mean
  pub weekday_consistency: f64,

  /// Total weekend sleep in hours
  pub weekend_recovery: f64,

  /// Cumulative shortfall vs the 8hr ideal, no cross-day cancellation
  pub sleep_debt: f64,

  /// Sample standard deviation of weekday durations
  pub sleep_variability: f64,
}

/// Bundle passed from the metrics engine to the insight generator
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SleepAnalysis {
  pub metrics: SleepConsistencyMetrics,
  pub optimal_catchup_hours: f64,
  /// Starts as weekday consistency, overwritten with the quality score
  pub consistency_score: f64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
  High,
  Medium,
  Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum RecommendationCategory {
  SleepSchedule,
  CatchupSleep,
  Consistency,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
  Low,
  Moderate,
  High,
}

impl std::fmt::Display for Priority {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::High => write!(f, "high"),
      Self::Medium => write!(f, "medium"),
      Self::Low => write!(f, "low"),
    }
  }
}

impl std::fmt::Display for RecommendationCategory {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::SleepSchedule => write!(f, "sleep-schedule"),
      Self::CatchupSleep => write!(f, "catchup-sleep"),
      Self::Consistency => write!(f, "consistency"),
    }
  }
}

impl std::fmt::Display for RiskLevel {
  fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
    match self {
      Self::Low => write!(f, "low"),
      Self::Moderate => write!(f, "moderate"),
      Self::High => write!(f, "high"),
    }
  }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Recommendation {
  pub category: RecommendationCategory,
  pub description: String,
  pub priority: Priority,
  pub impact: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct MentalHealthInsight {
  /// In evaluation order, not sorted by priority
  pub recommendations: Vec<Recommendation>,
  pub sleep_quality_score: f64,
  pub risk_level: RiskLevel,
  pub improvement_areas: Vec<String>,
  pub success_factors: Vec<String>,
}
