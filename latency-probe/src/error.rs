//! Error types for gateway calls and load test runs.

use std::time::Duration;

/// Classified outcome of a failed gateway call.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum CallError {
    /// The gateway could not be reached.
    #[error("transport error: {0}")]
    Transport(String),

    /// The gateway answered with a non-success status.
    #[error("inference failure (HTTP {status}): {message}")]
    Inference { status: u16, message: String },

    #[error("timed out after {0:?}")]
    Timeout(Duration),

    /// The gateway answered 2xx with a body we could not decode.
    #[error("invalid response: {0}")]
    InvalidResponse(String),

    /// The task running the call panicked or was cancelled.
    #[error("request task aborted: {0}")]
    Aborted(String),
}

impl CallError {
    /// Short label for structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CallError::Transport(_) => "transport",
            CallError::Inference { .. } => "inference",
            CallError::Timeout(_) => "timeout",
            CallError::InvalidResponse(_) => "invalid_response",
            CallError::Aborted(_) => "aborted",
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum LoadTestError {
    #[error("concurrency must be at least 1")]
    InvalidConcurrency,

    /// At least one request failed; no decision is made from a partial batch.
    #[error("run incomplete: {collected}/{concurrency} samples collected, error: {error}")]
    Incomplete {
        collected: usize,
        concurrency: usize,
        failures: usize,
        error: CallError,
    },
}
