//! Configuration for the probe binaries.

use std::time::Duration;

use config::{Config as ConfigLoader, ConfigError, Environment, File};
use latency_common::ALERT_THRESHOLD_SECS;
use serde::Deserialize;

#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    #[serde(default = "default_gateway_url")]
    pub gateway_url: String,
    /// Per-call client timeout; a stalled gateway is reported instead of awaited forever.
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,
    #[serde(default)]
    pub load_test: LoadTestConfig,
    #[serde(default)]
    pub monitor: MonitorConfig,
    #[serde(default)]
    pub logging: LoggingConfig,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            gateway_url: default_gateway_url(),
            request_timeout_secs: default_request_timeout(),
            load_test: LoadTestConfig::default(),
            monitor: MonitorConfig::default(),
            logging: LoggingConfig::default(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoadTestConfig {
    #[serde(default = "default_load_test_prompt")]
    pub prompt: String,
    /// Concurrency sweep, run in order.
    #[serde(default = "default_concurrency_levels")]
    pub concurrency_levels: Vec<usize>,
}

impl Default for LoadTestConfig {
    fn default() -> Self {
        Self {
            prompt: default_load_test_prompt(),
            concurrency_levels: default_concurrency_levels(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct MonitorConfig {
    #[serde(default = "default_monitor_prompt")]
    pub prompt: String,
    #[serde(default = "default_interval")]
    pub interval_secs: u64,
    /// Compared against the server-side latency reported by the gateway.
    #[serde(default = "default_alert_threshold")]
    pub alert_threshold_secs: f64,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            prompt: default_monitor_prompt(),
            interval_secs: default_interval(),
            alert_threshold_secs: default_alert_threshold(),
        }
    }
}

#[derive(Debug, Clone, Deserialize)]
pub struct LoggingConfig {
    #[serde(default = "default_log_level")]
    pub level: String,
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
        }
    }
}

// Default values
fn default_gateway_url() -> String {
    "http://127.0.0.1:8000".to_string()
}
fn default_request_timeout() -> u64 {
    30
}
fn default_load_test_prompt() -> String {
    "Hello!".to_string()
}
fn default_concurrency_levels() -> Vec<usize> {
    vec![1, 5, 15, 30]
}
fn default_monitor_prompt() -> String {
    "Hello, how are you?".to_string()
}
fn default_interval() -> u64 {
    2
}
fn default_alert_threshold() -> f64 {
    ALERT_THRESHOLD_SECS
}
fn default_log_level() -> String {
    "info".to_string()
}

impl Config {
    /// Load configuration from file and environment variables.
    ///
    /// Configuration sources (in order of precedence):
    /// 1. Environment variables (PROBE__SECTION__KEY format)
    /// 2. The file named by PROBE_CONFIG, or probe.toml (if present)
    /// 3. Built-in defaults
    pub fn load() -> Result<Self, ConfigError> {
        let path = std::env::var("PROBE_CONFIG").unwrap_or_else(|_| "probe".to_string());
        Self::load_from(&path)
    }

    pub fn load_from(path: &str) -> Result<Self, ConfigError> {
        let config = ConfigLoader::builder()
            .set_default("gateway_url", default_gateway_url())?
            .set_default("request_timeout_secs", default_request_timeout() as i64)?
            .add_source(File::with_name(path).required(false))
            .add_source(
                Environment::with_prefix("PROBE")
                    .separator("__")
                    .try_parsing(true),
            )
            .build()?;

        config.try_deserialize()
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }
}
