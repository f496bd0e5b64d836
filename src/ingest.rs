//! # Ingest
//! Parses raw review rows (string timestamp + string label) into typed
//! records. A malformed row is skipped and counted, never fatal — one bad
//! row must not abort the batch.
//!
//! Timestamps arrive in mixed shapes depending on which export produced
//! them; everything unparsable is dropped before it can reach aggregation.

use std::path::Path;

use anyhow::{Context, Result};
use chrono::{DateTime, NaiveDate, NaiveDateTime, NaiveTime, Utc};
use metrics::{counter, describe_counter};
use once_cell::sync::OnceCell;
use serde::{Deserialize, Serialize};
use tracing::{debug, warn};

use crate::sentiment::{Sentiment, SentimentRecord};

/// One-time metrics registration.
fn ensure_metrics_described() {
    static ONCE: OnceCell<()> = OnceCell::new();
    ONCE.get_or_init(|| {
        describe_counter!("ingest_rows_total", "Raw review rows seen by the parser.");
        describe_counter!("ingest_rows_kept_total", "Rows parsed into typed records.");
        describe_counter!(
            "ingest_rows_skipped_total",
            "Rows dropped for a bad timestamp or unknown label."
        );
    });
}

/// One raw row as it arrives from storage (the shape of a labeled export).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawReviewRow {
    pub created_at: String,
    pub sentiment: String,
}

/// Result of parsing a batch: kept records plus per-reason skip counts.
/// The counts are observability only; the aggregate never depends on them.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ParsedBatch {
    pub records: Vec<SentimentRecord>,
    pub skipped_timestamp: usize,
    pub skipped_label: usize,
}

impl ParsedBatch {
    pub fn skipped(&self) -> usize {
        self.skipped_timestamp + self.skipped_label
    }
}

/// Parse a timestamp in any of the shapes the exports use: RFC 3339,
/// `2025-03-04T10:00:00`, `2025-03-04 10:00:00`, or a bare date.
pub fn parse_timestamp(raw: &str) -> Option<DateTime<Utc>> {
    let s = raw.trim();
    if s.is_empty() {
        return None;
    }
    if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
        return Some(dt.with_timezone(&Utc));
    }
    for fmt in ["%Y-%m-%dT%H:%M:%S", "%Y-%m-%d %H:%M:%S"] {
        if let Ok(ndt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Some(ndt.and_utc());
        }
    }
    if let Ok(d) = NaiveDate::parse_from_str(s, "%Y-%m-%d") {
        return Some(d.and_time(NaiveTime::MIN).and_utc());
    }
    None
}

/// Convert raw rows to typed records, dropping malformed ones with counts.
pub fn parse_rows(rows: &[RawReviewRow]) -> ParsedBatch {
    ensure_metrics_described();
    counter!("ingest_rows_total").increment(rows.len() as u64);

    let mut batch = ParsedBatch::default();
    for row in rows {
        let Some(created_at) = parse_timestamp(&row.created_at) else {
            warn!(raw = %row.created_at, "dropping row with unparsable timestamp");
            batch.skipped_timestamp += 1;
            continue;
        };
        let Some(sentiment) = Sentiment::from_label(&row.sentiment) else {
            warn!(raw = %row.sentiment, "dropping row with unknown sentiment label");
            batch.skipped_label += 1;
            continue;
        };
        batch.records.push(SentimentRecord::new(created_at, sentiment));
    }

    counter!("ingest_rows_kept_total").increment(batch.records.len() as u64);
    counter!("ingest_rows_skipped_total").increment(batch.skipped() as u64);
    debug!(
        kept = batch.records.len(),
        skipped = batch.skipped(),
        "parsed review batch"
    );
    batch
}

/// Load a JSON array of raw rows from disk and parse it.
pub fn load_records<P: AsRef<Path>>(path: P) -> Result<ParsedBatch> {
    let path = path.as_ref();
    let raw = std::fs::read_to_string(path)
        .with_context(|| format!("read records file {}", path.display()))?;
    let rows: Vec<RawReviewRow> = serde_json::from_str(&raw)
        .with_context(|| format!("parse records JSON {}", path.display()))?;
    Ok(parse_rows(&rows))
}
