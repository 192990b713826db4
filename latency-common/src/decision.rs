//! Latency decision rules.
//!
//! Two thresholds exist because two different latencies are observed:
//! the load harness times full client round-trips, while the monitor reads
//! the server-side processing time reported by the gateway.

use serde::{Deserialize, Serialize};

/// Mean client round-trip latency above which a load run recommends scaling up.
pub const SCALE_UP_THRESHOLD_SECS: f64 = 1.0;

/// Server-side latency above which a monitor tick raises an alert.
pub const ALERT_THRESHOLD_SECS: f64 = 1.0;

/// Arithmetic mean of a batch of latencies. `None` for an empty batch.
pub fn mean(samples: &[f64]) -> Option<f64> {
    if samples.is_empty() {
        return None;
    }
    Some(samples.iter().sum::<f64>() / samples.len() as f64)
}

/// Advisory autoscaling output of a load test run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScaleDecision {
    ScaleUp,
    Healthy,
}

impl ScaleDecision {
    /// Decide against the fixed [`SCALE_UP_THRESHOLD_SECS`].
    pub fn from_mean(mean_secs: f64) -> Self {
        if mean_secs > SCALE_UP_THRESHOLD_SECS {
            ScaleDecision::ScaleUp
        } else {
            ScaleDecision::Healthy
        }
    }
}

impl std::fmt::Display for ScaleDecision {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ScaleDecision::ScaleUp => write!(f, "scale up (latency too high)"),
            ScaleDecision::Healthy => write!(f, "healthy"),
        }
    }
}

/// Outcome of comparing one latency sample against an alert threshold.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum AlertState {
    Alert,
    Nominal,
}

impl AlertState {
    pub fn evaluate(latency_secs: f64, threshold_secs: f64) -> Self {
        if latency_secs > threshold_secs {
            AlertState::Alert
        } else {
            AlertState::Nominal
        }
    }
}
