//! Latency Probe - client-side tools that observe the inference gateway.
//!
//! - [`LoadHarness`] fans out concurrent requests and turns the mean
//!   round-trip latency into a [`ScaleDecision`](latency_common::ScaleDecision).
//! - [`LatencyMonitor`] polls on a fixed interval and raises alerts on
//!   server-side latency.

pub mod client;
pub mod config;
pub mod error;
pub mod harness;
pub mod logging;
pub mod monitor;
pub mod smoke;

pub use client::{HttpGatewayClient, InferenceClient};
pub use config::Config;
pub use error::{CallError, LoadTestError};
pub use harness::{LatencySample, LoadHarness, LoadTestReport};
pub use monitor::{LatencyMonitor, MonitorSummary, TickOutcome, TickReport};
