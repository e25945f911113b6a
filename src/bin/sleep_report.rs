//! Sleep report CLI - prints a weekly report and insights for a file of entries
//!
//! Usage:
//! ```bash
//! # Report for the week of the latest entry
//! sleep-report --entries sleep.json
//!
//! # Report for a specific week as JSON
//! sleep-report --entries sleep.json --week 2024-03-06 --format json
//! ```
//!
//! The entries file is a JSON array of
//! `{"date": "2024-03-04", "startTime": "23:00", "endTime": "07:00"}`
//! objects, with an optional `isWeekend` flag.

use anyhow::{Context, Result};
use chrono::NaiveDate;
use clap::{Parser, ValueEnum};
use serde::Serialize;
use sleep_tracker::models::{MentalHealthInsight, NewSleepEntry, WeeklyReport};
use sleep_tracker::time::start_of_week;
use sleep_tracker::{SleepTracker, TrackerConfig};
use std::fs;
use std::path::PathBuf;
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser)]
#[command(
  name = "sleep-report",
  about = "Weekly sleep consistency report",
  long_about = "Reads sleep entries from a JSON file and prints the weekly report and recommendations."
)]
struct Cli {
  /// JSON file containing sleep entries
  #[arg(long)]
  entries: PathBuf,

  /// Any date in the week to report (defaults to the week of the latest entry)
  #[arg(long, value_parser = parse_date)]
  week: Option<NaiveDate>,

  /// Output format
  #[arg(long, value_enum, default_value_t = OutputFormat::Text)]
  format: OutputFormat,

  /// Enable debug logging
  #[arg(long, short = 'v')]
  verbose: bool,
}

#[derive(Clone, Copy, ValueEnum)]
enum OutputFormat {
  Text,
  Json,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct Output<'a> {
  report: &'a WeeklyReport,
  insights: &'a MentalHealthInsight,
}

fn parse_date(s: &str) -> Result<NaiveDate, String> {
  NaiveDate::parse_from_str(s, "%Y-%m-%d").map_err(|e| format!("expected YYYY-MM-DD: {}", e))
}

fn main() -> Result<()> {
  let cli = Cli::parse();

  // Initialize logging; RUST_LOG wins over --verbose
  let default_level = if cli.verbose { "debug" } else { "info" };
  let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(default_level));
  tracing_subscriber::fmt()
    .with_env_filter(filter)
    .with_writer(std::io::stderr)
    .init();

  let config = TrackerConfig::from_env().context("Failed to load tracker config")?;

  let raw = fs::read_to_string(&cli.entries)
    .with_context(|| format!("Failed to read {}", cli.entries.display()))?;
  let tracker = load_entries(&raw, config)
    .with_context(|| format!("Failed to load entries from {}", cli.entries.display()))?;
  info!(count = tracker.entries().len(), "Loaded sleep entries");

  let week_start = report_week(cli.week, &tracker)?;

  let report = tracker.weekly_report(week_start);
  let insights = tracker.insights();

  match cli.format {
    OutputFormat::Json => {
      let output = Output {
        report: &report,
        insights: &insights,
      };
      println!("{}", serde_json::to_string_pretty(&output)?);
    }
    OutputFormat::Text => print_text(&report, &insights),
  }

  Ok(())
}

/// Build a tracker from a JSON array of entries, failing on the first bad entry
fn load_entries(raw: &str, config: TrackerConfig) -> Result<SleepTracker> {
  let new_entries: Vec<NewSleepEntry> =
    serde_json::from_str(raw).context("Failed to parse entries JSON")?;

  let mut tracker = SleepTracker::new(config)?;
  for (idx, entry) in new_entries.into_iter().enumerate() {
    tracker
      .add_entry(entry)
      .with_context(|| format!("Invalid sleep entry at index {}", idx))?;
  }
  Ok(tracker)
}

/// Monday of the requested week, or of the latest entry's week
fn report_week(week: Option<NaiveDate>, tracker: &SleepTracker) -> Result<NaiveDate> {
  let anchor = week
    .or_else(|| tracker.entries().iter().map(|e| e.date).max())
    .context("No entries and no --week given")?;
  Ok(start_of_week(anchor))
}

fn print_text(report: &WeeklyReport, insights: &MentalHealthInsight) {
  println!("{}", report.summary);
  println!();
  println!("Average sleep:    {:.1} h", report.key_metrics.average_sleep_duration);
  println!("Quality score:    {:.0}", report.key_metrics.consistency_score);
  println!("Weekend catch-up: {:.1} h", report.key_metrics.catchup_sleep_hours);
  println!();
  println!("Trends:");
  for trend in &report.trends {
    println!("  - {}", trend);
  }

  println!();
  println!(
    "Overall score {:.0}, risk {}",
    insights.sleep_quality_score, insights.risk_level
  );
  if !insights.recommendations.is_empty() {
    println!("Recommendations:");
    for rec in &insights.recommendations {
      println!("  [{}] {}: {}", rec.priority, rec.category, rec.description);
    }
  }
  if !insights.improvement_areas.is_empty() {
    println!("Improve: {}", insights.improvement_areas.join(", "));
  }
  if !insights.success_factors.is_empty() {
    println!("Going well: {}", insights.success_factors.join(", "));
  }
}

/// ---------------------------------------------------------------------------
/// Tests
/// ---------------------------------------------------------------------------
