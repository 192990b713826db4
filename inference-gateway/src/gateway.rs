//! Latency-measuring wrapper around the inference backend.

use std::sync::Arc;
use std::time::Duration;

use latency_common::{GenerateResponse, HealthResponse};
use tokio::time::Instant;

use crate::backend::InferenceBackend;
use crate::error::{Error, Result};

/// Generated text together with the server-side time it took to produce.
#[derive(Debug, Clone, PartialEq)]
pub struct InferenceResult {
    pub text: String,
    pub latency_seconds: f64,
}

impl From<InferenceResult> for GenerateResponse {
    fn from(result: InferenceResult) -> Self {
        Self {
            generated_text: result.text,
            latency_seconds: result.latency_seconds,
        }
    }
}

/// Measures each backend call. Holds no per-call state, so concurrent
/// `generate` calls never wait on each other.
pub struct InferenceGateway {
    backend: Arc<dyn InferenceBackend>,
    timeout: Duration,
}

impl InferenceGateway {
    pub fn new(backend: Arc<dyn InferenceBackend>, timeout: Duration) -> Self {
        Self { backend, timeout }
    }

    pub fn backend_name(&self) -> &'static str {
        self.backend.name()
    }

    /// Run one inference and time it.
    ///
    /// Backend failures are passed through unchanged; a call that outlives
    /// the configured timeout is abandoned and reported as [`Error::Timeout`].
    pub async fn generate(&self, prompt: &str) -> Result<InferenceResult> {
        let prompt_len = prompt.chars().count();
        let start = Instant::now();

        let outcome = match tokio::time::timeout(self.timeout, self.backend.infer(prompt)).await {
            Ok(outcome) => outcome,
            Err(_) => Err(Error::Timeout(self.timeout)),
        };
        let latency_seconds = start.elapsed().as_secs_f64();

        match outcome {
            Ok(text) => {
                tracing::info!(
                    prompt_len,
                    latency_seconds,
                    "Prompt length={}, Latency={:.4}s",
                    prompt_len,
                    latency_seconds
                );
                Ok(InferenceResult {
                    text,
                    latency_seconds,
                })
            }
            Err(e) => {
                tracing::warn!(
                    prompt_len,
                    latency_seconds,
                    backend = self.backend.name(),
                    "Generate failed after {:.4}s: {}",
                    latency_seconds,
                    e
                );
                Err(e)
            }
        }
    }

    /// Liveness probe. Never touches the backend.
    pub fn health(&self) -> HealthResponse {
        HealthResponse::ok()
    }
}
