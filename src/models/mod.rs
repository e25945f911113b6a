pub mod entry;
pub mod analysis;
pub mod report;

pub use entry::{NewSleepEntry, SleepEntry};
pub use analysis::{
  MentalHealthInsight, Priority, Recommendation, RecommendationCategory, RiskLevel,
  SleepAnalysis, SleepConsistencyMetrics,
};
pub use report::{KeyMetrics, Visualizations, WeeklyReport};
