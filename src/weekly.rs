//! # Weekly Aggregation
//! Buckets timestamped sentiment records into calendar weeks and computes
//! the mean score per non-empty week.
//!
//! Weeks run Monday through Sunday and are keyed by their Monday. A week
//! with zero records is absent from the output, never zero-valued — the
//! detector downstream is only valid over real observations.

use std::collections::BTreeMap;

use chrono::{DateTime, Datelike, Duration, NaiveDate, Utc};
use serde::{Deserialize, Serialize};

use crate::sentiment::SentimentRecord;

/// Mean sentiment for one non-empty calendar week.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WeeklyAggregate {
    /// Monday of the week this aggregate covers.
    pub week_start: NaiveDate,
    pub mean_score: f64,
    /// Number of records backing the mean.
    pub sample_count: usize,
}

/// Monday of the calendar week containing `ts` (UTC).
pub fn week_start_of(ts: DateTime<Utc>) -> NaiveDate {
    let d = ts.date_naive();
    d - Duration::days(d.weekday().num_days_from_monday() as i64)
}

/// Reduce records (any order) to one mean score per non-empty week,
/// ascending by `week_start`. Stateless and idempotent.
pub fn aggregate_weekly(records: &[SentimentRecord]) -> Vec<WeeklyAggregate> {
    let mut buckets: BTreeMap<NaiveDate, (i64, usize)> = BTreeMap::new();

    for r in records {
        let e = buckets.entry(week_start_of(r.created_at)).or_insert((0, 0));
        e.0 += r.score() as i64;
        e.1 += 1;
    }

    buckets
        .into_iter()
        .map(|(week_start, (sum, n))| WeeklyAggregate {
            week_start,
            mean_score: sum as f64 / n as f64,
            sample_count: n,
        })
        .collect()
}
