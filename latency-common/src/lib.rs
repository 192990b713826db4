//! Latency Common Types
//!
//! Shared types used by both the inference-gateway and the latency-probe clients.

pub mod decision;
pub mod protocol;

pub use decision::{mean, AlertState, ScaleDecision, ALERT_THRESHOLD_SECS, SCALE_UP_THRESHOLD_SECS};
pub use protocol::{ErrorBody, ErrorDetail, GenerateResponse, HealthResponse};
