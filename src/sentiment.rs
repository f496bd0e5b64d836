//! # Sentiment Types
//! Closed three-way sentiment label with its fixed integer score mapping,
//! plus the timestamped record the pipeline consumes.
//!
//! Labels are a tagged type on purpose: an unknown label is a parse-time
//! rejection, not a silent mismatch in string comparisons.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Classification of one review, produced upstream by the classifier.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Fixed score table: Positive +1, Neutral 0, Negative -1.
    pub fn score(self) -> i32 {
        match self {
            Sentiment::Positive => 1,
            Sentiment::Neutral => 0,
            Sentiment::Negative => -1,
        }
    }

    /// Case-insensitive label lookup; anything else is `None`.
    pub fn from_label(label: &str) -> Option<Self> {
        match label.trim().to_ascii_lowercase().as_str() {
            "positive" => Some(Sentiment::Positive),
            "neutral" => Some(Sentiment::Neutral),
            "negative" => Some(Sentiment::Negative),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Sentiment::Positive => "Positive",
            Sentiment::Neutral => "Neutral",
            Sentiment::Negative => "Negative",
        }
    }
}

/// One labeled review: when it was posted and how it was classified.
/// Immutable once created.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SentimentRecord {
    pub created_at: DateTime<Utc>,
    pub sentiment: Sentiment,
}

impl SentimentRecord {
    pub fn new(created_at: DateTime<Utc>, sentiment: Sentiment) -> Self {
        Self {
            created_at,
            sentiment,
        }
    }

    pub fn score(&self) -> i32 {
        self.sentiment.score()
    }
}
