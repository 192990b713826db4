//! Smoke check - verifies a running gateway answers /health and /generate.

use std::env;
use std::process::ExitCode;

use latency_probe::{logging, smoke, Config, HttpGatewayClient};

const SMOKE_PROMPT: &str = "Hello, how are you?";

#[tokio::main]
async fn main() -> Result<ExitCode, Box<dyn std::error::Error>> {
    let args: Vec<String> = env::args().collect();
    if args.iter().any(|a| a == "--version" || a == "-V") {
        println!("smoke-check {}", env!("CARGO_PKG_VERSION"));
        return Ok(ExitCode::SUCCESS);
    }

    let config = Config::load().map_err(|e| format!("Failed to load configuration: {}", e))?;
    logging::init(&config.logging.level);

    let client = HttpGatewayClient::new(&config.gateway_url, config.request_timeout())?;

    println!("Testing inference gateway at {}", client.base_url());
    let report = smoke::run(&client, SMOKE_PROMPT).await;

    match &report.health {
        Ok(health) if health.is_ok() => println!("Health check passed: status={}", health.status),
        Ok(health) => println!("Health check failed: status={}", health.status),
        Err(e) => println!("Health check failed: {}", e),
    }

    match &report.generate {
        Some(Ok(response)) => {
            println!("Generate endpoint works");
            println!("   Generated text: {}...", smoke::preview(&response.generated_text, 100));
            println!("   Latency: {:.4}s", response.latency_seconds);
        }
        Some(Err(e)) => println!("Generate endpoint failed: {}", e),
        None => println!("Gateway is not healthy; skipping generate check"),
    }

    if report.passed() {
        println!("All checks passed.");
        Ok(ExitCode::SUCCESS)
    } else {
        println!("Some checks failed.");
        Ok(ExitCode::FAILURE)
    }
}
