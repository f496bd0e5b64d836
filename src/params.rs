//! # Detector Parameters
//! Window/threshold knobs for the drift detector, loadable from a TOML file
//! with env overrides. Validation reuses the detector's own construction
//! checks so the file and the constructor can never disagree.

use std::fs;
use std::path::PathBuf;
use std::str::FromStr;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::debug;

use crate::drift::{DriftDetector, DEFAULT_THRESHOLD, DEFAULT_WINDOW_SIZE};

// --- env defaults & names ---
pub const DEFAULT_PARAMS_PATH: &str = "config/drift.toml";

pub const ENV_PARAMS_PATH: &str = "DRIFT_CONFIG_PATH";
pub const ENV_WINDOW_SIZE: &str = "DRIFT_WINDOW_SIZE";
pub const ENV_THRESHOLD: &str = "DRIFT_THRESHOLD";

/// Caller-configurable detector knobs.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DriftParams {
    /// FIFO window capacity, in weekly points.
    #[serde(default = "default_window_size")]
    pub window_size: usize,
    /// Slack added on top of the 3-sigma band.
    #[serde(default = "default_threshold")]
    pub threshold: f64,
}

fn default_window_size() -> usize {
    DEFAULT_WINDOW_SIZE
}

fn default_threshold() -> f64 {
    DEFAULT_THRESHOLD
}

impl Default for DriftParams {
    fn default() -> Self {
        Self {
            window_size: DEFAULT_WINDOW_SIZE,
            threshold: DEFAULT_THRESHOLD,
        }
    }
}

impl DriftParams {
    /// Fail fast on values the detector would refuse.
    pub fn validate(&self) -> Result<()> {
        DriftDetector::new(self.window_size, self.threshold).map(|_| ())
    }

    pub fn from_toml_str(s: &str) -> Result<Self> {
        let params: Self = toml::from_str(s).context("parse drift params TOML")?;
        params.validate()?;
        Ok(params)
    }

    /// Load from `DRIFT_CONFIG_PATH` (or the default path), then apply the
    /// `DRIFT_WINDOW_SIZE` / `DRIFT_THRESHOLD` env overrides.
    ///
    /// A missing file means defaults; an unreadable value in an existing
    /// file is an error — configuration failures are fatal, not coerced.
    pub fn load() -> Result<Self> {
        let path = std::env::var(ENV_PARAMS_PATH)
            .map(PathBuf::from)
            .unwrap_or_else(|_| PathBuf::from(DEFAULT_PARAMS_PATH));

        let mut params = match fs::read_to_string(&path) {
            Ok(s) => Self::from_toml_str(&s)
                .with_context(|| format!("load drift params from {}", path.display()))?,
            Err(_) => {
                debug!(path = %path.display(), "no params file, using defaults");
                Self::default()
            }
        };

        if let Some(w) = parse_env(ENV_WINDOW_SIZE) {
            params.window_size = w;
        }
        if let Some(t) = parse_env(ENV_THRESHOLD) {
            params.threshold = t;
        }

        params.validate()?;
        Ok(params)
    }
}

fn parse_env<T: FromStr>(name: &str) -> Option<T> {
    std::env::var(name)
        .ok()
        .and_then(|v| v.trim().parse().ok())
}
