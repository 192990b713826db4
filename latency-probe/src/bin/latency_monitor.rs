//! Latency monitor - polls the gateway on a fixed interval until Ctrl-C.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use latency_probe::{logging, Config, HttpGatewayClient, LatencyMonitor, TickOutcome};
use tokio::sync::watch;

fn print_version() {
    println!("latency-monitor {}", env!("CARGO_PKG_VERSION"));
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "--version" || a == "-V") {
        print_version();
        return Ok(());
    }

    let config = Config::load().map_err(|e| format!("Failed to load configuration: {}", e))?;
    logging::init(&config.logging.level);

    let client = HttpGatewayClient::new(&config.gateway_url, config.request_timeout())?;
    tracing::info!(
        "Monitoring {} every {}s (alert above {:.2}s)",
        client.base_url(),
        config.monitor.interval_secs,
        config.monitor.alert_threshold_secs
    );

    let monitor = LatencyMonitor::new(
        Arc::new(client),
        config.monitor.prompt.clone(),
        Duration::from_secs(config.monitor.interval_secs),
        config.monitor.alert_threshold_secs,
    );

    let (stop_tx, stop_rx) = watch::channel(false);
    tokio::spawn(async move {
        match tokio::signal::ctrl_c().await {
            Ok(()) => {
                let _ = stop_tx.send(true);
            }
            Err(e) => {
                tracing::error!("Failed to listen for shutdown signal: {}", e);
                // Keep the sender alive so the monitor is not stopped by the drop
                std::future::pending::<()>().await;
            }
        }
    });

    let summary = monitor
        .run(stop_rx, |report| {
            let at = report.observed_at.format("%Y-%m-%d %H:%M:%S");
            match &report.outcome {
                TickOutcome::Alert { latency_seconds } => {
                    println!("[{}] Latency: {:.4}s", at, latency_seconds);
                    println!("[{}] ALERT: High latency detected!", at);
                }
                TickOutcome::Nominal { latency_seconds } => {
                    println!("[{}] Latency: {:.4}s", at, latency_seconds);
                }
                TickOutcome::Unreachable(e) => {
                    println!("[{}] tick failed: {}", at, e);
                }
            }
        })
        .await;

    println!(
        "\nStopped after {} ticks: {} alerts, {} nominal, {} failed",
        summary.ticks, summary.alerts, summary.nominal, summary.unreachable
    );
    Ok(())
}
