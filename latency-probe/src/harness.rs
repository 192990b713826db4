//! Concurrent load harness.
//!
//! Each run fans out exactly `concurrency` requests, joins all of them, and
//! only then aggregates. Runs share nothing, so a sweep over escalating
//! concurrency levels is just a sequence of independent runs.

use std::sync::Arc;

use latency_common::{mean, ScaleDecision};
use tokio::task::JoinSet;
use tokio::time::Instant;
use uuid::Uuid;

use crate::client::InferenceClient;
use crate::error::{CallError, LoadTestError};

/// One request's latency as seen from both ends.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LatencySample {
    pub concurrency: usize,
    /// Client-observed round-trip, including network time.
    pub client_seconds: f64,
    /// Server-side processing time reported by the gateway.
    pub server_seconds: f64,
}

#[derive(Debug, Clone)]
pub struct LoadTestReport {
    pub run_id: Uuid,
    pub concurrency: usize,
    pub samples: Vec<LatencySample>,
    /// Mean client round-trip latency; the decision is derived from this.
    pub mean_seconds: f64,
    pub decision: ScaleDecision,
}

impl LoadTestReport {
    fn from_samples(run_id: Uuid, concurrency: usize, samples: Vec<LatencySample>) -> Self {
        let client: Vec<f64> = samples.iter().map(|s| s.client_seconds).collect();
        let mean_seconds = mean(&client).unwrap_or(0.0);

        Self {
            run_id,
            concurrency,
            samples,
            mean_seconds,
            decision: ScaleDecision::from_mean(mean_seconds),
        }
    }

    pub fn min_seconds(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.client_seconds)
            .fold(f64::INFINITY, f64::min)
    }

    pub fn max_seconds(&self) -> f64 {
        self.samples
            .iter()
            .map(|s| s.client_seconds)
            .fold(0.0, f64::max)
    }

    pub fn mean_server_seconds(&self) -> f64 {
        let server: Vec<f64> = self.samples.iter().map(|s| s.server_seconds).collect();
        mean(&server).unwrap_or(0.0)
    }
}

pub struct LoadHarness {
    client: Arc<dyn InferenceClient>,
    prompt: String,
}

impl LoadHarness {
    pub fn new(client: Arc<dyn InferenceClient>, prompt: impl Into<String>) -> Self {
        Self {
            client,
            prompt: prompt.into(),
        }
    }

    /// Dispatch `concurrency` simultaneous requests and decide on the mean.
    ///
    /// Every request is awaited even after a failure. If any request failed
    /// the run is reported as [`LoadTestError::Incomplete`] and no decision
    /// is made.
    pub async fn run_load_test(&self, concurrency: usize) -> Result<LoadTestReport, LoadTestError> {
        if concurrency == 0 {
            return Err(LoadTestError::InvalidConcurrency);
        }

        let run_id = Uuid::new_v4();
        tracing::info!(%run_id, concurrency, "Running load test with {} parallel requests", concurrency);

        let mut joins = JoinSet::new();
        for _ in 0..concurrency {
            let client = self.client.clone();
            let prompt = self.prompt.clone();
            joins.spawn(async move {
                let start = Instant::now();
                let response = client.generate(&prompt).await?;
                Ok::<_, CallError>(LatencySample {
                    concurrency,
                    client_seconds: start.elapsed().as_secs_f64(),
                    server_seconds: response.latency_seconds,
                })
            });
        }

        let mut samples = Vec::with_capacity(concurrency);
        let mut failures = 0;
        let mut first_error = None;

        while let Some(joined) = joins.join_next().await {
            let outcome = joined.unwrap_or_else(|e| Err(CallError::Aborted(e.to_string())));
            match outcome {
                Ok(sample) => samples.push(sample),
                Err(e) => {
                    tracing::warn!(%run_id, kind = e.kind(), "Load test request failed: {}", e);
                    failures += 1;
                    first_error.get_or_insert(e);
                }
            }
        }

        if let Some(error) = first_error {
            return Err(LoadTestError::Incomplete {
                collected: samples.len(),
                concurrency,
                failures,
                error,
            });
        }

        let report = LoadTestReport::from_samples(run_id, concurrency, samples);
        tracing::info!(
            %run_id,
            concurrency,
            mean_seconds = report.mean_seconds,
            decision = %report.decision,
            "Load test complete"
        );
        Ok(report)
    }

    /// Run one independent load test per level, in order.
    pub async fn run_sweep(
        &self,
        levels: &[usize],
    ) -> Vec<(usize, Result<LoadTestReport, LoadTestError>)> {
        let mut results = Vec::with_capacity(levels.len());
        for &concurrency in levels {
            results.push((concurrency, self.run_load_test(concurrency).await));
        }
        results
    }
}
