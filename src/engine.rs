//! # Drift Engine
//! Pure, testable pipeline that maps labeled records → weekly series →
//! flagged drift weeks. No I/O; loading records and persisting results
//! belong to callers.
//!
//! One run owns one fresh detector. Monitoring several independent series
//! (e.g. one per company) means one run — and one detector — per series;
//! instances share nothing.

use std::fmt::Write as _;

use chrono::NaiveDate;
use metrics::{describe_gauge, gauge};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::info;

use crate::drift::DriftDetector;
use crate::params::DriftParams;
use crate::sentiment::SentimentRecord;
use crate::weekly::{aggregate_weekly, WeeklyAggregate};

/// One-time metrics registration.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_gauge!(
            "drift_weekly_points",
            "Weekly points produced by the last pipeline run."
        );
        describe_gauge!(
            "drift_flagged_weeks",
            "Weeks flagged as drift by the last pipeline run."
        );
    });
}

/// Outcome of one pipeline run over a single series.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DriftReport {
    /// Ordered weekly series the detector consumed.
    pub weekly: Vec<WeeklyAggregate>,
    /// Ordered week starts flagged as drift. Absence means "not flagged";
    /// there is no explicit negative record.
    pub drift_weeks: Vec<NaiveDate>,
}

impl DriftReport {
    /// Human-readable results block for CLI output.
    pub fn render_text(&self) -> String {
        let mut out = String::new();
        out.push_str("Weekly Sentiment Drift Detection Results\n");
        out.push_str("---------------------------------------\n");
        if self.drift_weeks.is_empty() {
            out.push_str("No significant weekly sentiment drift detected\n");
        } else {
            out.push_str("Drift detected on the following weeks:\n");
            for week in &self.drift_weeks {
                let _ = writeln!(out, "{week}");
            }
        }
        out
    }
}

/// Run aggregation + detection over one series with a fresh detector.
pub fn detect(records: &[SentimentRecord], params: &DriftParams) -> anyhow::Result<DriftReport> {
    ensure_metrics_described();

    let weekly = aggregate_weekly(records);
    let mut detector = DriftDetector::new(params.window_size, params.threshold)?;

    let mut drift_weeks = Vec::new();
    for point in &weekly {
        if detector.update(point.mean_score).drift_detected() {
            info!(
                week = %point.week_start,
                mean = point.mean_score,
                samples = point.sample_count,
                "weekly sentiment drift flagged"
            );
            drift_weeks.push(point.week_start);
        }
    }

    gauge!("drift_weekly_points").set(weekly.len() as f64);
    gauge!("drift_flagged_weeks").set(drift_weeks.len() as f64);

    Ok(DriftReport {
        weekly,
        drift_weeks,
    })
}

/// Convenience for reporting layers: just the ordered flagged week starts.
pub fn drift_weeks(
    records: &[SentimentRecord],
    window_size: usize,
    threshold: f64,
) -> anyhow::Result<Vec<NaiveDate>> {
    let params = DriftParams {
        window_size,
        threshold,
    };
    Ok(detect(records, &params)?.drift_weeks)
}
