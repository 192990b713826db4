//! Load harness behavior against scripted gateway stubs.

use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use latency_common::{GenerateResponse, ScaleDecision};
use latency_probe::{CallError, InferenceClient, LoadHarness, LoadTestError};

/// Answers call `i` after `latencies[i % len]` seconds; calls listed in
/// `fail_on` return a transport error instead.
struct ScriptedClient {
    latencies: Vec<f64>,
    fail_on: HashSet<usize>,
    calls: AtomicUsize,
    in_flight: AtomicUsize,
    max_in_flight: AtomicUsize,
}

impl ScriptedClient {
    fn new(latencies: Vec<f64>) -> Arc<Self> {
        Self::failing_on(latencies, &[])
    }

    fn failing_on(latencies: Vec<f64>, fail_on: &[usize]) -> Arc<Self> {
        Arc::new(Self {
            latencies,
            fail_on: fail_on.iter().copied().collect(),
            calls: AtomicUsize::new(0),
            in_flight: AtomicUsize::new(0),
            max_in_flight: AtomicUsize::new(0),
        })
    }
}

#[async_trait]
impl InferenceClient for ScriptedClient {
    async fn generate(&self, _prompt: &str) -> Result<GenerateResponse, CallError> {
        let index = self.calls.fetch_add(1, Ordering::SeqCst);
        let now = self.in_flight.fetch_add(1, Ordering::SeqCst) + 1;
        self.max_in_flight.fetch_max(now, Ordering::SeqCst);

        let latency = self.latencies[index % self.latencies.len()];
        tokio::time::sleep(Duration::from_secs_f64(latency)).await;
        self.in_flight.fetch_sub(1, Ordering::SeqCst);

        if self.fail_on.contains(&index) {
            return Err(CallError::Transport("connection reset".to_string()));
        }
        Ok(GenerateResponse {
            generated_text: "ok".to_string(),
            latency_seconds: latency,
        })
    }
}

#[tokio::test(start_paused = true)]
async fn test_single_fast_request_is_healthy() {
    let client = ScriptedClient::new(vec![0.3]);
    let harness = LoadHarness::new(client, "Hello!");

    let report = harness.run_load_test(1).await.unwrap();
    assert_eq!(report.samples.len(), 1);
    assert!((report.mean_seconds - 0.3).abs() < 0.01);
    assert_eq!(report.decision, ScaleDecision::Healthy);
}

#[tokio::test(start_paused = true)]
async fn test_one_slow_outlier_triggers_scale_up() {
    let client = ScriptedClient::new(vec![0.2, 0.2, 0.2, 0.2, 5.0]);
    let harness = LoadHarness::new(client, "Hello!");

    let report = harness.run_load_test(5).await.unwrap();
    assert_eq!(report.samples.len(), 5);
    assert!((report.mean_seconds - 1.16).abs() < 0.01);
    assert_eq!(report.decision, ScaleDecision::ScaleUp);
    assert!((report.mean_server_seconds() - 1.16).abs() < 1e-9);
}

#[tokio::test(start_paused = true)]
async fn test_requests_are_dispatched_concurrently() {
    let client = ScriptedClient::new(vec![1.0]);
    let harness = LoadHarness::new(client.clone(), "Hello!");

    let started = tokio::time::Instant::now();
    let report = harness.run_load_test(30).await.unwrap();

    // Serialized dispatch would take 30s
    assert!(started.elapsed() < Duration::from_secs(2));
    assert_eq!(client.max_in_flight.load(Ordering::SeqCst), 30);
    assert_eq!(report.samples.len(), 30);
    assert!(report.samples.iter().all(|s| s.concurrency == 30));
}

#[tokio::test(start_paused = true)]
async fn test_sample_count_matches_concurrency() {
    let client = ScriptedClient::new(vec![0.1, 0.4, 0.7]);
    let harness = LoadHarness::new(client.clone(), "Hello!");

    for concurrency in [1, 5, 15, 30] {
        let report = harness.run_load_test(concurrency).await.unwrap();
        assert_eq!(report.samples.len(), concurrency);
        assert_eq!(report.concurrency, concurrency);
    }
    assert_eq!(client.calls.load(Ordering::SeqCst), 1 + 5 + 15 + 30);
}

#[tokio::test(start_paused = true)]
async fn test_failed_request_makes_run_incomplete() {
    let client = ScriptedClient::failing_on(vec![0.2], &[2]);
    let harness = LoadHarness::new(client.clone(), "Hello!");

    let err = harness.run_load_test(5).await.unwrap_err();
    match &err {
        LoadTestError::Incomplete {
            collected,
            concurrency,
            failures,
            error,
        } => {
            assert_eq!(*collected, 4);
            assert_eq!(*concurrency, 5);
            assert_eq!(*failures, 1);
            assert_eq!(error.kind(), "transport");
        }
        other => panic!("unexpected error: {other:?}"),
    }
    assert!(err
        .to_string()
        .starts_with("run incomplete: 4/5 samples collected, error:"));
    // No early termination: every request was still issued
    assert_eq!(client.calls.load(Ordering::SeqCst), 5);
}

#[tokio::test]
async fn test_zero_concurrency_is_rejected() {
    let client = ScriptedClient::new(vec![0.1]);
    let harness = LoadHarness::new(client.clone(), "Hello!");

    let err = harness.run_load_test(0).await.unwrap_err();
    assert!(matches!(err, LoadTestError::InvalidConcurrency));
    assert_eq!(client.calls.load(Ordering::SeqCst), 0);
}

#[tokio::test(start_paused = true)]
async fn test_sweep_runs_are_independent() {
    // Call 1 (the second run's first request) fails; the other runs are unaffected
    let client = ScriptedClient::failing_on(vec![0.5], &[1]);
    let harness = LoadHarness::new(client, "Hello!");

    let results = harness.run_sweep(&[1, 2, 3]).await;
    let levels: Vec<usize> = results.iter().map(|(level, _)| *level).collect();
    assert_eq!(levels, vec![1, 2, 3]);

    assert_eq!(results[0].1.as_ref().unwrap().decision, ScaleDecision::Healthy);
    assert!(results[1].1.is_err());
    assert_eq!(results[2].1.as_ref().unwrap().samples.len(), 3);
}
