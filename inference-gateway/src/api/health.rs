//! Health check endpoint.

use std::sync::Arc;

use axum::extract::State;
use axum::Json;
use latency_common::HealthResponse;

use crate::state::AppState;

/// GET /health - Liveness probe. Does not run inference.
pub async fn health(State(state): State<Arc<AppState>>) -> Json<HealthResponse> {
    Json(state.gateway.health())
}
