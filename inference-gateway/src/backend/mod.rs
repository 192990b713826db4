//! Inference backend abstraction layer.
//!
//! The gateway never looks inside text generation: it hands a prompt to an
//! `InferenceBackend` and times how long the answer takes. Backends are
//! constructed explicitly and injected into the gateway.

mod ollama;

pub use ollama::OllamaBackend;

use std::sync::Arc;

use async_trait::async_trait;

use crate::config::BackendConfig;
use crate::error::Result;

/// Opaque text-generation operation.
///
/// Implementations must be safe to call concurrently; the gateway holds no
/// lock around them.
#[async_trait]
pub trait InferenceBackend: Send + Sync {
    /// Short identifier used in logs (e.g., "ollama").
    fn name(&self) -> &'static str;

    /// Generate text for a prompt. Empty prompts are passed through as-is.
    async fn infer(&self, prompt: &str) -> Result<String>;
}

/// Build the configured backend.
pub fn from_config(config: &BackendConfig) -> Arc<dyn InferenceBackend> {
    Arc::new(OllamaBackend::new(&config.ollama))
}
