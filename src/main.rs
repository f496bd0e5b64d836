//! Employer Sentiment Drift — Binary Entrypoint
//! Loads a labeled review export, runs weekly aggregation + drift detection
//! for one series, and prints the results block.
//!
//! One invocation covers one series (one company dataset); run it once per
//! dataset when monitoring several companies.

use anyhow::{Context, Result};
use tracing::{info, warn};
use tracing_subscriber::{fmt, prelude::*, EnvFilter};

use employer_sentiment_drift::{detect, ingest, DriftParams};

const ENV_REVIEWS_PATH: &str = "REVIEWS_PATH";
const DEFAULT_REVIEWS_PATH: &str = "data/reviews.json";

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| EnvFilter::new("employer_sentiment_drift=info,warn"));

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt::layer().compact())
        .init();
}

fn main() -> Result<()> {
    // Load .env in local/dev; no-op when absent.
    let _ = dotenvy::dotenv();
    init_tracing();

    let path = std::env::args()
        .nth(1)
        .or_else(|| std::env::var(ENV_REVIEWS_PATH).ok())
        .unwrap_or_else(|| DEFAULT_REVIEWS_PATH.to_string());

    let params = DriftParams::load().context("load drift params")?;
    info!(
        window_size = params.window_size,
        threshold = params.threshold,
        %path,
        "starting drift run"
    );

    let batch = ingest::load_records(&path)?;
    if batch.skipped() > 0 {
        warn!(
            skipped_timestamp = batch.skipped_timestamp,
            skipped_label = batch.skipped_label,
            "dropped malformed rows"
        );
    }

    let report = detect(&batch.records, &params)?;
    print!("\n{}", report.render_text());
    Ok(())
}
