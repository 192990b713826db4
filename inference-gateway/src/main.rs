//! Inference Gateway - serves `POST /generate` and `GET /health`.

use std::env;
use std::sync::Arc;
use std::time::Duration;

use inference_gateway::{backend, logging, AppState, Config, InferenceGateway};
use tokio::net::TcpListener;

const VERSION: &str = env!("CARGO_PKG_VERSION");

fn print_version() {
    println!("inference-gateway {}", VERSION);
}

#[tokio::main]
async fn main() -> Result<(), Box<dyn std::error::Error>> {
    // Handle --version / -V
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "--version" || a == "-V") {
        print_version();
        return Ok(());
    }

    // Load configuration
    let config = Config::load().map_err(|e| {
        format!(
            "Failed to load configuration: {}. \
             Check config.toml or the GATEWAY__SECTION__KEY environment variables.",
            e
        )
    })?;

    logging::init(&config.logging)
        .map_err(|e| format!("Failed to open log file: {}", e))?;

    let backend = backend::from_config(&config.backend);
    tracing::info!(
        "Using {} backend at {} (model={}, max_tokens={})",
        backend.name(),
        config.backend.ollama.base_url,
        config.backend.ollama.model,
        config.backend.ollama.max_tokens
    );

    let gateway = InferenceGateway::new(
        backend,
        Duration::from_secs(config.inference.timeout_secs),
    );
    let app = inference_gateway::app(Arc::new(AppState::new(gateway)));

    // Start server
    let addr = format!("{}:{}", config.api.host, config.api.port);
    tracing::info!("Listening on {}", addr);

    let listener = TcpListener::bind(&addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;

    tracing::info!("Shut down");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(e) = tokio::signal::ctrl_c().await {
        tracing::error!("Failed to listen for shutdown signal: {}", e);
        std::future::pending::<()>().await;
    }
}
