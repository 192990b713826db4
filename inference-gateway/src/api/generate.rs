//! Text generation endpoint.

use std::sync::Arc;

use axum::extract::{Query, State};
use axum::routing::post;
use axum::{Json, Router};
use latency_common::GenerateResponse;
use serde::Deserialize;

use crate::error::Result;
use crate::state::AppState;

/// Build the generate router.
pub fn router() -> Router<Arc<AppState>> {
    Router::new().route("/generate", post(generate))
}

/// Query string of `POST /generate`. `prompt` is required but may be empty.
#[derive(Debug, Deserialize)]
pub struct GenerateParams {
    pub prompt: String,
}

/// POST /generate?prompt=... - Run inference and report server-side latency.
async fn generate(
    State(state): State<Arc<AppState>>,
    Query(params): Query<GenerateParams>,
) -> Result<Json<GenerateResponse>> {
    let result = state.gateway.generate(&params.prompt).await?;
    Ok(Json(result.into()))
}
