//! Inference Gateway - exposes a single text-generation endpoint and measures
//! how long the underlying inference backend takes to answer.

pub mod api;
pub mod backend;
pub mod config;
pub mod error;
pub mod gateway;
pub mod logging;
pub mod state;

pub use backend::{InferenceBackend, OllamaBackend};
pub use config::Config;
pub use error::{Error, Result};
pub use gateway::{InferenceGateway, InferenceResult};
pub use state::AppState;

use std::sync::Arc;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

/// Build the full HTTP application around a gateway.
pub fn app(state: Arc<AppState>) -> Router {
    api::router()
        .layer(CorsLayer::permissive())
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
