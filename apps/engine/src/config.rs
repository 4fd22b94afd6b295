use anyhow::{Context, Result};
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt, EnvFilter};

/// Engine configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Base URL of the job-search backend, e.g. `http://localhost:8000/api`.
    pub api_base_url: String,
    /// Resume-parsing inference endpoint. Defaults to `{api_base_url}/resume`.
    pub inference_url: String,
    pub request_timeout_secs: u64,
    pub rust_log: String,
}

impl Config {
    pub fn from_env() -> Result<Self> {
        dotenvy::dotenv().ok(); // load .env if present; ignore if missing

        let api_base_url = require_env("API_BASE_URL")?;
        let inference_url = std::env::var("INFERENCE_URL")
            .unwrap_or_else(|_| format!("{}/resume", api_base_url.trim_end_matches('/')));

        Ok(Config {
            api_base_url,
            inference_url,
            request_timeout_secs: std::env::var("REQUEST_TIMEOUT_SECS")
                .unwrap_or_else(|_| "120".to_string())
                .parse::<u64>()
                .context("REQUEST_TIMEOUT_SECS must be a number of seconds")?,
            rust_log: std::env::var("RUST_LOG").unwrap_or_else(|_| "info".to_string()),
        })
    }
}

fn require_env(key: &str) -> Result<String> {
    std::env::var(key).with_context(|| format!("Required environment variable '{key}' is not set"))
}

/// Initializes structured logging for binaries or tests embedding the engine.
/// Safe to call more than once; later calls are no-ops.
pub fn init_tracing(config: &Config) {
    let _ = tracing_subscriber::registry()
        .with(
            EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| EnvFilter::new(config.rust_log.clone())),
        )
        .with(tracing_subscriber::fmt::layer())
        .try_init();
}
