//! HTTP client for the inference gateway.

use std::time::Duration;

use async_trait::async_trait;
use latency_common::{ErrorBody, GenerateResponse, HealthResponse};
use reqwest::Client;

use crate::error::CallError;

/// Anything that can issue a `Generate` call against the gateway.
///
/// The load harness and the monitor only depend on this trait, so tests can
/// substitute a stub with scripted latencies.
#[async_trait]
pub trait InferenceClient: Send + Sync {
    async fn generate(&self, prompt: &str) -> Result<GenerateResponse, CallError>;
}

/// reqwest-backed gateway client with a bounded per-call timeout.
#[derive(Clone)]
pub struct HttpGatewayClient {
    http_client: Client,
    base_url: String,
    timeout: Duration,
}

impl HttpGatewayClient {
    pub fn new(base_url: &str, timeout: Duration) -> Result<Self, CallError> {
        let http_client = Client::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| CallError::Transport(format!("failed to build HTTP client: {}", e)))?;

        Ok(Self {
            http_client,
            base_url: base_url.trim_end_matches('/').to_string(),
            timeout,
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// GET /health
    pub async fn health(&self) -> Result<HealthResponse, CallError> {
        let url = format!("{}/health", self.base_url);

        let response = self
            .http_client
            .get(&url)
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| self.classify_body_error(e))
    }

    fn classify(&self, e: reqwest::Error) -> CallError {
        if e.is_timeout() {
            CallError::Timeout(self.timeout)
        } else {
            CallError::Transport(e.to_string())
        }
    }

    fn classify_body_error(&self, e: reqwest::Error) -> CallError {
        if e.is_timeout() {
            CallError::Timeout(self.timeout)
        } else {
            CallError::InvalidResponse(e.to_string())
        }
    }

    async fn check_status(response: reqwest::Response) -> Result<reqwest::Response, CallError> {
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }

        let body = response.text().await.unwrap_or_default();
        // Prefer the gateway's error envelope, fall back to the raw body
        let message = serde_json::from_str::<ErrorBody>(&body)
            .map(|b| b.error.message)
            .unwrap_or(body);

        Err(CallError::Inference {
            status: status.as_u16(),
            message,
        })
    }
}

#[async_trait]
impl InferenceClient for HttpGatewayClient {
    /// POST /generate?prompt=...
    async fn generate(&self, prompt: &str) -> Result<GenerateResponse, CallError> {
        let url = format!("{}/generate", self.base_url);

        let response = self
            .http_client
            .post(&url)
            .query(&[("prompt", prompt)])
            .send()
            .await
            .map_err(|e| self.classify(e))?;

        let response = Self::check_status(response).await?;
        response
            .json()
            .await
            .map_err(|e| self.classify_body_error(e))
    }
}
