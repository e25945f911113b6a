//! Quality scoring and rule-based recommendations
//!
//! Scoring is linear: weekday consistency is the base signal, variability and
//! cumulative debt are independently capped penalties. Insight checks run in
//! a fixed order and each one either adds a recommendation or records a
//! success factor.

use crate::analysis::analyze_consistency;
use crate::models::{
  MentalHealthInsight, Priority, Recommendation, RecommendationCategory, RiskLevel,
  SleepAnalysis, SleepConsistencyMetrics, SleepEntry,
};
use tracing::debug;

/// ---------------------------------------------------------------------------
/// Thresholds
/// ---------------------------------------------------------------------------

const VARIABILITY_PENALTY_PER_HOUR: f64 = 5.0;
const MAX_VARIABILITY_PENALTY: f64 = 30.0;
const DEBT_PENALTY_PER_HOUR: f64 = 5.0;
const MAX_DEBT_PENALTY: f64 = 40.0;

const LOW_CONSISTENCY_SCORE: f64 = 60.0;
const HIGH_DEBT_HOURS: f64 = 2.0;
const MIN_WEEKEND_RECOVERY_HOURS: f64 = 2.0;
const HIGH_VARIABILITY_HOURS: f64 = 1.5;

const HIGH_RISK_SCORE: f64 = 50.0;
const HIGH_RISK_DEBT_HOURS: f64 = 4.0;
const MODERATE_RISK_SCORE: f64 = 70.0;
const MODERATE_RISK_DEBT_HOURS: f64 = 2.0;

/// ---------------------------------------------------------------------------
/// Quality Score
/// ---------------------------------------------------------------------------

/// Sleep quality score (0-100, whole number) for a set of entries
pub fn quality_score(entries: &[SleepEntry]) -> f64 {
  if entries.is_empty() {
    return 0.0;
  }
  score_from_metrics(&analyze_consistency(entries))
}

/// Apply the variability and debt penalties to weekday consistency
pub fn score_from_metrics(metrics: &SleepConsistencyMetrics) -> f64 {
  let variability_penalty =
    (metrics.sleep_variability * VARIABILITY_PENALTY_PER_HOUR).min(MAX_VARIABILITY_PENALTY);
  let debt_penalty = (metrics.sleep_debt * DEBT_PENALTY_PER_HOUR).min(MAX_DEBT_PENALTY);

  let mut score = metrics.weekday_consistency.clamp(0.0, 100.0);
  score = (score - variability_penalty).clamp(0.0, 100.0);
  score = (score - debt_penalty).clamp(0.0, 100.0);

  score.round()
}

/// ---------------------------------------------------------------------------
/// Insights
/// ---------------------------------------------------------------------------

pub fn risk_level(consistency_score: f64, sleep_debt: f64) -> RiskLevel {
  if consistency_score < HIGH_RISK_SCORE || sleep_debt > HIGH_RISK_DEBT_HOURS {
    RiskLevel::High
  } else if consistency_score < MODERATE_RISK_SCORE || sleep_debt > MODERATE_RISK_DEBT_HOURS {
    RiskLevel::Moderate
  } else {
    RiskLevel::Low
  }
}

/// Build recommendations from an analysis. The quality score is taken from
/// `analysis.consistency_score` as supplied, never recomputed.
pub fn generate_insights(analysis: &SleepAnalysis, entries: &[SleepEntry]) -> MentalHealthInsight {
  let metrics = &analysis.metrics;
  let score = analysis.consistency_score;

  let mut recommendations = Vec::new();
  let mut improvement_areas = Vec::new();
  let mut success_factors = Vec::new();

  // 1. Schedule consistency
  if score < LOW_CONSISTENCY_SCORE {
    recommendations.push(Recommendation {
      category: RecommendationCategory::SleepSchedule,
      description: "Keep weeknight bedtimes and wake times within the same hour".to_string(),
      priority: Priority::High,
      impact: "Stabilizes your circadian rhythm, which supports mood and focus".to_string(),
    });
    improvement_areas.push("Sleep schedule consistency".to_string());
  } else {
    success_factors.push("Consistent sleep schedule".to_string());
  }

  // 2. Accumulated debt
  if metrics.sleep_debt > HIGH_DEBT_HOURS {
    recommendations.push(Recommendation {
      category: RecommendationCategory::CatchupSleep,
      description: format!(
        "You have {:.1} hours of sleep debt across {} nights; plan up to {:.1} hours of catch-up sleep",
        metrics.sleep_debt,
        entries.len(),
        analysis.optimal_catchup_hours
      ),
      priority: Priority::Medium,
      impact: "Paying down sleep debt reduces fatigue and irritability".to_string(),
    });
    improvement_areas.push("Sleep debt".to_string());
  } else if metrics.sleep_debt > 0.0 {
    recommendations.push(Recommendation {
      category: RecommendationCategory::CatchupSleep,
      description: format!(
        "Go to bed 15-30 minutes earlier to clear a small {:.1} hour deficit",
        metrics.sleep_debt
      ),
      priority: Priority::Low,
      impact: "Keeps a minor shortfall from building up".to_string(),
    });
  } else {
    success_factors.push("No accumulated sleep debt".to_string());
  }

  // 3. Weekend recovery
  if metrics.weekend_recovery < MIN_WEEKEND_RECOVERY_HOURS {
    recommendations.push(Recommendation {
      category: RecommendationCategory::CatchupSleep,
      description: "Allow extra rest on weekends to recover from weekday sleep loss".to_string(),
      priority: Priority::Medium,
      impact: "Weekend recovery offsets the strain of short weeknights".to_string(),
    });
  } else {
    success_factors.push("Adequate weekend recovery sleep".to_string());
  }

  // 4. Night-to-night variability
  if metrics.sleep_variability > HIGH_VARIABILITY_HOURS {
    recommendations.push(Recommendation {
      category: RecommendationCategory::Consistency,
      description: format!(
        "Reduce night-to-night swings in sleep duration (currently {:.1} hours)",
        metrics.sleep_variability
      ),
      priority: Priority::Medium,
      impact: "Steadier sleep improves emotional regulation".to_string(),
    });
    improvement_areas.push("Sleep duration variability".to_string());
  } else {
    success_factors.push("Stable sleep duration".to_string());
  }

  let risk_level = risk_level(score, metrics.sleep_debt);

  debug!(
    recommendations = recommendations.len(),
    risk = %risk_level,
    "Generated sleep insights"
  );

  MentalHealthInsight {
    recommendations,
    sleep_quality_score: score,
    risk_level,
    improvement_areas,
    success_factors,
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
  use super::*;
  use crate::test_utils::entries_from_durations;

  fn analysis(score: f64, debt: f64, weekend: f64, variability: f64) -> SleepAnalysis {
    SleepAnalysis {
      metrics: SleepConsistencyMetrics {
        weekday_consistency: score,
        weekend_recovery: weekend,
        sleep_debt: debt,
        sleep_variability: variability,
      },
      optimal_catchup_hours: debt.min(4.0),
      consistency_score: score,
    }
  }

  fn categories(insight: &MentalHealthInsight) -> Vec<RecommendationCategory> {
    insight.recommendations.iter().map(|r| r.category).collect()
  }

  #[test]
  fn test_quality_score_empty_is_zero() {
    assert_eq!(quality_score(&[]), 0.0);
  }

  #[test]
  fn test_quality_score_perfect_week() {
    let entries = entries_from_durations(&[8.0; 5], &[9.0, 9.0]);
    assert_eq!(quality_score(&entries), 100.0);
  }

  #[test]
  fn test_quality_score_reference_week() {
    // consistency 100, variability 0, debt 4 -> 100 - 20 = 80
    let entries = entries_from_durations(&[6.0, 6.0], &[10.0]);
    assert_eq!(quality_score(&entries), 80.0);
  }

  #[test]
  fn test_quality_score_penalties_are_capped() {
    let metrics = SleepConsistencyMetrics {
      weekday_consistency: 100.0,
      weekend_recovery: 0.0,
      sleep_debt: 100.0,
      sleep_variability: 100.0,
    };
    // 100 - 30 - 40
    assert_eq!(score_from_metrics(&metrics), 30.0);
  }

  #[test]
  fn test_quality_score_never_negative() {
    let metrics = SleepConsistencyMetrics {
      weekday_consistency: 20.0,
      weekend_recovery: 0.0,
      sleep_debt: 10.0,
      sleep_variability: 3.0,
    };
    assert_eq!(score_from_metrics(&metrics), 0.0);
  }

  #[test]
  fn test_quality_score_rounds_to_whole_number() {
    let metrics = SleepConsistencyMetrics {
      weekday_consistency: 66.666,
      weekend_recovery: 0.0,
      sleep_debt: 0.1,
      sleep_variability: 0.0,
    };
    // 66.666 - 0.5 = 66.166 -> 66
    assert_eq!(score_from_metrics(&metrics), 66.0);
  }

  #[test]
  fn test_quality_score_monotonic_in_variability_and_debt() {
    let base = SleepConsistencyMetrics {
      weekday_consistency: 90.0,
      weekend_recovery: 5.0,
      sleep_debt: 0.0,
      sleep_variability: 0.0,
    };

    let mut previous = score_from_metrics(&base);
    for step in 1..40 {
      let metrics = SleepConsistencyMetrics {
        sleep_variability: step as f64 * 0.25,
        ..base
      };
      let score = score_from_metrics(&metrics);
      assert!(score <= previous, "variability {} raised score", metrics.sleep_variability);
      previous = score;
    }

    let mut previous = score_from_metrics(&base);
    for step in 1..40 {
      let metrics = SleepConsistencyMetrics {
        sleep_debt: step as f64 * 0.25,
        ..base
      };
      let score = score_from_metrics(&metrics);
      assert!(score <= previous, "debt {} raised score", metrics.sleep_debt);
      previous = score;
    }
  }

  #[test]
  fn test_insights_all_checks_failing_is_moderate_risk() {
    // Arrange: score 55 (>= 50) and debt 3 (<= 4) -> not high, but moderate
    let analysis = analysis(55.0, 3.0, 1.0, 2.0);
    let entries = entries_from_durations(&[6.0, 7.0], &[1.0]);

    // Act
    let insight = generate_insights(&analysis, &entries);

    // Assert
    assert_eq!(insight.recommendations.len(), 4);
    assert_eq!(
      categories(&insight),
      vec![
        RecommendationCategory::SleepSchedule,
        RecommendationCategory::CatchupSleep,
        RecommendationCategory::CatchupSleep,
        RecommendationCategory::Consistency,
      ]
    );
    assert_eq!(insight.recommendations[0].priority, Priority::High);
    assert_eq!(insight.recommendations[1].priority, Priority::Medium);
    assert_eq!(insight.recommendations[2].priority, Priority::Medium);
    assert_eq!(insight.recommendations[3].priority, Priority::Medium);
    assert_eq!(insight.improvement_areas.len(), 3);
    assert!(insight.success_factors.is_empty());
    assert_eq!(insight.risk_level, RiskLevel::Moderate);
  }

  #[test]
  fn test_insights_healthy_week() {
    let insight = generate_insights(&analysis(92.0, 0.0, 17.0, 0.4), &[]);

    assert!(insight.recommendations.is_empty());
    assert!(insight.improvement_areas.is_empty());
    assert_eq!(insight.success_factors.len(), 4);
    assert_eq!(insight.risk_level, RiskLevel::Low);
  }

  #[test]
  fn test_insights_small_debt_is_low_priority_without_improvement_area() {
    let insight = generate_insights(&analysis(85.0, 1.5, 16.0, 0.5), &[]);

    assert_eq!(insight.recommendations.len(), 1);
    let rec = &insight.recommendations[0];
    assert_eq!(rec.category, RecommendationCategory::CatchupSleep);
    assert_eq!(rec.priority, Priority::Low);
    assert!(insight.improvement_areas.is_empty());
    // Schedule, weekend and variability pass; debt is neither
    assert_eq!(insight.success_factors.len(), 3);
    assert_eq!(insight.risk_level, RiskLevel::Low);
  }

  #[test]
  fn test_insights_debt_boundary_at_two_hours() {
    let insight = generate_insights(&analysis(85.0, 2.0, 16.0, 0.5), &[]);
    assert_eq!(insight.recommendations[0].priority, Priority::Low);
    assert_eq!(insight.risk_level, RiskLevel::Low);
  }

  #[test]
  fn test_insights_quality_score_passes_through() {
    let insight = generate_insights(&analysis(73.0, 0.0, 10.0, 0.0), &[]);
    assert_eq!(insight.sleep_quality_score, 73.0);
  }

  #[test]
  fn test_risk_level_boundaries() {
    assert_eq!(risk_level(49.0, 0.0), RiskLevel::High);
    assert_eq!(risk_level(90.0, 4.5), RiskLevel::High);
    assert_eq!(risk_level(50.0, 4.0), RiskLevel::Moderate);
    assert_eq!(risk_level(69.0, 0.0), RiskLevel::Moderate);
    assert_eq!(risk_level(90.0, 2.5), RiskLevel::Moderate);
    assert_eq!(risk_level(70.0, 2.0), RiskLevel::Low);
  }

  #[test]
  fn test_insight_json_shape() {
    let insight = generate_insights(&analysis(55.0, 3.0, 1.0, 2.0), &[]);
    let json = serde_json::to_value(&insight).unwrap();

    assert_eq!(json["riskLevel"], "moderate");
    assert_eq!(json["sleepQualityScore"], 55.0);
    assert_eq!(json["recommendations"][0]["category"], "sleep-schedule");
    assert_eq!(json["recommendations"][0]["priority"], "high");
    assert_eq!(json["recommendations"][1]["category"], "catchup-sleep");
    assert!(json["improvementAreas"].is_array());
  }

  #[test]
  fn test_quality_score_is_idempotent() {
    let entries = entries_from_durations(&[6.3, 7.8, 5.1, 8.4], &[9.6]);
    assert_eq!(
      quality_score(&entries).to_bits(),
      quality_score(&entries).to_bits()
    );
  }

  #[test]
  fn test_insights_are_idempotent() {
    let analysis = analysis(58.0, 3.5, 1.5, 1.6);
    let entries = entries_from_durations(&[5.5, 7.5, 6.0], &[1.5]);
    assert_eq!(
      generate_insights(&analysis, &entries),
      generate_insights(&analysis, &entries)
    );
  }
}
