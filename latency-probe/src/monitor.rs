//! Periodic latency monitor.
//!
//! One request per tick, strictly sequential: a slow call delays the next
//! tick instead of overlapping it. The loop runs until the stop signal
//! flips to `true` (or its sender is dropped).

use std::sync::Arc;
use std::time::Duration;

use chrono::{DateTime, Utc};
use latency_common::AlertState;
use tokio::sync::watch;

use crate::client::InferenceClient;
use crate::error::CallError;

#[derive(Debug, Clone, PartialEq)]
pub enum TickOutcome {
    Alert { latency_seconds: f64 },
    Nominal { latency_seconds: f64 },
    /// The call itself failed; no latency was observed.
    Unreachable(CallError),
}

impl TickOutcome {
    pub fn alert_state(&self) -> Option<AlertState> {
        match self {
            TickOutcome::Alert { .. } => Some(AlertState::Alert),
            TickOutcome::Nominal { .. } => Some(AlertState::Nominal),
            TickOutcome::Unreachable(_) => None,
        }
    }
}

#[derive(Debug, Clone)]
pub struct TickReport {
    pub observed_at: DateTime<Utc>,
    pub outcome: TickOutcome,
}

/// Tally of a finished monitor run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MonitorSummary {
    pub ticks: u64,
    pub alerts: u64,
    pub nominal: u64,
    pub unreachable: u64,
}

impl MonitorSummary {
    fn record(&mut self, outcome: &TickOutcome) {
        self.ticks += 1;
        match outcome {
            TickOutcome::Alert { .. } => self.alerts += 1,
            TickOutcome::Nominal { .. } => self.nominal += 1,
            TickOutcome::Unreachable(_) => self.unreachable += 1,
        }
    }
}

pub struct LatencyMonitor {
    client: Arc<dyn InferenceClient>,
    prompt: String,
    interval: Duration,
    threshold_secs: f64,
}

impl LatencyMonitor {
    pub fn new(
        client: Arc<dyn InferenceClient>,
        prompt: impl Into<String>,
        interval: Duration,
        threshold_secs: f64,
    ) -> Self {
        Self {
            client,
            prompt: prompt.into(),
            interval,
            threshold_secs,
        }
    }

    /// Issue one request and classify it against the threshold.
    pub async fn tick(&self) -> TickReport {
        let outcome = match self.client.generate(&self.prompt).await {
            Ok(response) => {
                let latency_seconds = response.latency_seconds;
                match AlertState::evaluate(latency_seconds, self.threshold_secs) {
                    AlertState::Alert => {
                        tracing::warn!(
                            latency_seconds,
                            threshold_secs = self.threshold_secs,
                            "ALERT: High latency detected"
                        );
                        TickOutcome::Alert { latency_seconds }
                    }
                    AlertState::Nominal => {
                        tracing::debug!(latency_seconds, "Latency nominal");
                        TickOutcome::Nominal { latency_seconds }
                    }
                }
            }
            Err(e) => {
                tracing::warn!(kind = e.kind(), "tick failed: {}", e);
                TickOutcome::Unreachable(e)
            }
        };

        TickReport {
            observed_at: Utc::now(),
            outcome,
        }
    }

    /// Tick until stopped, handing every report to `on_tick`.
    ///
    /// A tick already in flight when the stop signal arrives runs to completion.
    pub async fn run<F>(&self, mut shutdown: watch::Receiver<bool>, mut on_tick: F) -> MonitorSummary
    where
        F: FnMut(&TickReport),
    {
        let mut summary = MonitorSummary::default();

        loop {
            if *shutdown.borrow() {
                break;
            }

            let report = self.tick().await;
            summary.record(&report.outcome);
            on_tick(&report);

            let sleep = tokio::time::sleep(self.interval);
            tokio::pin!(sleep);
            let stopped = loop {
                tokio::select! {
                    _ = &mut sleep => break false,
                    changed = shutdown.changed() => {
                        if changed.is_err() || *shutdown.borrow() {
                            break true;
                        }
                    }
                }
            };
            if stopped {
                break;
            }
        }

        tracing::info!(
            ticks = summary.ticks,
            alerts = summary.alerts,
            unreachable = summary.unreachable,
            "Monitor stopped"
        );
        summary
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_summary_counts_each_outcome() {
        let mut summary = MonitorSummary::default();
        summary.record(&TickOutcome::Alert { latency_seconds: 2.0 });
        summary.record(&TickOutcome::Nominal { latency_seconds: 0.5 });
        summary.record(&TickOutcome::Unreachable(CallError::Transport("refused".into())));
        summary.record(&TickOutcome::Nominal { latency_seconds: 0.1 });

        assert_eq!(
            summary,
            MonitorSummary {
                ticks: 4,
                alerts: 1,
                nominal: 2,
                unreachable: 1,
            }
        );
    }

    #[test]
    fn test_unreachable_has_no_alert_state() {
        let outcome = TickOutcome::Unreachable(CallError::Timeout(Duration::from_secs(30)));
        assert_eq!(outcome.alert_state(), None);
        assert_eq!(
            TickOutcome::Alert { latency_seconds: 2.0 }.alert_state(),
            Some(AlertState::Alert)
        );
    }
}
