//! # Drift Detector
//! Online monitor over a chronologically ordered scalar stream (here: mean
//! sentiment per week). Keeps a FIFO window of the most recent values; once
//! the window is full, a new value is flagged as drift when it deviates from
//! the window mean by more than `3 * std + threshold` (population std).
//!
//! The window is evaluated *after* the new value is inserted, so the tested
//! value contributes to the mean/std it is compared against. That damping is
//! the documented behavior of the rolling monitor this replaces and is kept
//! exactly; see DESIGN.md for the consequences.

use std::collections::VecDeque;

use anyhow::{bail, Result};

/// Stock window: 30 weekly points.
pub const DEFAULT_WINDOW_SIZE: usize = 30;
/// Stock slack added on top of the 3-sigma band.
pub const DEFAULT_THRESHOLD: f64 = 0.1;

/// Stateful drift monitor for a single series. One instance per series;
/// never reuse across series boundaries.
#[derive(Debug, Clone)]
pub struct DriftDetector {
    /// Most recent values, oldest at the front. Length never exceeds
    /// `window_size`.
    window: VecDeque<f64>,
    window_size: usize,
    threshold: f64,
    drift_detected: bool,
}

impl DriftDetector {
    /// Create a detector. Fails fast on a zero window or a negative or
    /// non-finite threshold; never silently coerces to defaults.
    ///
    /// `window_size == 1` is legal but degenerate: the buffer's only element
    /// is always the value just inserted, so drift is never flagged.
    pub fn new(window_size: usize, threshold: f64) -> Result<Self> {
        if window_size < 1 {
            bail!("drift window_size must be >= 1, got {window_size}");
        }
        if !threshold.is_finite() || threshold < 0.0 {
            bail!("drift threshold must be a non-negative finite number, got {threshold}");
        }
        Ok(Self {
            window: VecDeque::with_capacity(window_size),
            window_size,
            threshold,
            drift_detected: false,
        })
    }

    /// Convenience constructor with the stock parameters.
    pub fn with_defaults() -> Self {
        Self::new(DEFAULT_WINDOW_SIZE, DEFAULT_THRESHOLD)
            .expect("stock drift parameters are valid")
    }

    /// Observe the next value in the series and recompute the drift flag.
    ///
    /// Returns `&mut Self` so the flag can be read off the same call:
    /// `detector.update(v).drift_detected()`. While the window is still
    /// filling (fewer than `window_size` values seen) the flag is always
    /// false — there is not enough history to judge.
    pub fn update(&mut self, value: f64) -> &mut Self {
        self.window.push_back(value);
        if self.window.len() > self.window_size {
            self.window.pop_front();
        }

        if self.window.len() < self.window_size {
            self.drift_detected = false;
            return self;
        }

        let n = self.window.len() as f64;
        let mean = self.window.iter().sum::<f64>() / n;
        let var = self
            .window
            .iter()
            .map(|v| (v - mean) * (v - mean))
            .sum::<f64>()
            / n;
        let std = var.sqrt();

        self.drift_detected = (value - mean).abs() > 3.0 * std + self.threshold;
        self
    }

    /// Whether the most recent `update` flagged drift.
    pub fn drift_detected(&self) -> bool {
        self.drift_detected
    }

    /// Number of values currently held (useful for diagnostics/telemetry).
    pub fn samples(&self) -> usize {
        self.window.len()
    }

    pub fn window_size(&self) -> usize {
        self.window_size
    }

    pub fn threshold(&self) -> f64 {
        self.threshold
    }
}
