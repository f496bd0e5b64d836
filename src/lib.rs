// src/lib.rs
// Public library surface for integration tests (and potential reuse).

pub mod drift;
pub mod engine;
pub mod ingest;
pub mod params;
pub mod sentiment;
pub mod weekly;

// ---- Re-exports for stable public API ----
pub use crate::drift::{DriftDetector, DEFAULT_THRESHOLD, DEFAULT_WINDOW_SIZE};
pub use crate::engine::{detect, drift_weeks, DriftReport};
pub use crate::ingest::{load_records, parse_rows, ParsedBatch, RawReviewRow};
pub use crate::params::DriftParams;
pub use crate::sentiment::{Sentiment, SentimentRecord};
pub use crate::weekly::{aggregate_weekly, week_start_of, WeeklyAggregate};
