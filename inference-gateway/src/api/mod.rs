//! HTTP API.

pub mod generate;
pub mod health;

use std::sync::Arc;

use axum::routing::get;
use axum::Router;

use crate::state::AppState;

/// Build the API router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new()
        .merge(generate::router())
        .route("/health", get(health::health))
}
