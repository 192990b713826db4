//! End-to-end smoke check: health first, then a single generate call.

use latency_common::{GenerateResponse, HealthResponse};

use crate::client::{HttpGatewayClient, InferenceClient};
use crate::error::CallError;

#[derive(Debug)]
pub struct SmokeReport {
    pub health: Result<HealthResponse, CallError>,
    /// `None` when the health check failed and generate was skipped.
    pub generate: Option<Result<GenerateResponse, CallError>>,
}

impl SmokeReport {
    pub fn health_passed(&self) -> bool {
        matches!(&self.health, Ok(h) if h.is_ok())
    }

    pub fn passed(&self) -> bool {
        self.health_passed() && matches!(self.generate, Some(Ok(_)))
    }
}

pub async fn run(client: &HttpGatewayClient, prompt: &str) -> SmokeReport {
    let health = client.health().await;
    let healthy = matches!(&health, Ok(h) if h.is_ok());

    let generate = if healthy {
        Some(client.generate(prompt).await)
    } else {
        None
    };

    SmokeReport { health, generate }
}

/// First `max_chars` characters of `text`, for display.
pub fn preview(text: &str, max_chars: usize) -> &str {
    match text.char_indices().nth(max_chars) {
        Some((idx, _)) => &text[..idx],
        None => text,
    }
}
