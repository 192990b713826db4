//! Error types for the inference gateway.

use std::time::Duration;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use latency_common::{ErrorBody, ErrorDetail};

/// Error types for inference operations.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    #[error("Inference failed: {0}")]
    InferenceFailed(String),

    #[error("Backend communication error: {0}")]
    Communication(String),

    #[error("Inference timed out after {0:?}")]
    Timeout(Duration),
}

impl Error {
    /// Stable machine-readable error type used in response bodies.
    pub fn error_type(&self) -> &'static str {
        match self {
            Error::InferenceFailed(_) => "inference_failed",
            Error::Communication(_) => "communication_error",
            Error::Timeout(_) => "timeout",
        }
    }

    /// Any backend failure is a 500; only an exceeded deadline gets its own status.
    pub fn status_code(&self) -> StatusCode {
        match self {
            Error::InferenceFailed(_) | Error::Communication(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Error::Timeout(_) => StatusCode::GATEWAY_TIMEOUT,
        }
    }
}

impl IntoResponse for Error {
    fn into_response(self) -> Response {
        let body = Json(ErrorBody {
            error: ErrorDetail {
                error_type: self.error_type().to_string(),
                message: self.to_string(),
            },
        });

        (self.status_code(), body).into_response()
    }
}

pub type Result<T> = std::result::Result<T, Error>;
