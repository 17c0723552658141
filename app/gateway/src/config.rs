//! Gateway configuration sourced from the environment.

use anyhow::{Context, Result};
use compact_str::CompactString;

/// Default chat-completions endpoint (Cerebras, OpenAI-compatible).
pub const DEFAULT_BASE_URL: &str = "https://api.cerebras.ai/v1/chat/completions";
/// Default model identifier.
pub const DEFAULT_MODEL: &str = "llama-3.3-70b";
/// Default bind address.
pub const DEFAULT_BIND: &str = "127.0.0.1:8080";
/// Default provider request budget (requests per minute).
pub const DEFAULT_RPM: f64 = 30.0;

/// Top-level gateway configuration.
///
/// Required variables: `TALLY_API_KEY` (model provider credential) and
/// `TALLY_DB` (store location). Missing required configuration is a
/// fatal startup failure.
#[derive(Debug, Clone)]
pub struct GatewayConfig {
    /// Model provider API key.
    pub api_key: String,
    /// Path of the SQLite database file.
    pub db_path: String,
    /// Chat-completions endpoint URL.
    pub base_url: String,
    /// Model identifier.
    pub model: CompactString,
    /// Server bind address.
    pub bind_address: String,
    /// Provider request budget in requests per minute.
    pub requests_per_minute: f64,
}

impl GatewayConfig {
    /// Load configuration from process environment variables.
    pub fn from_env() -> Result<Self> {
        Self::from_vars(|name| std::env::var(name).ok())
    }

    /// Load configuration from the given variable lookup.
    pub fn from_vars(var: impl Fn(&str) -> Option<String>) -> Result<Self> {
        let requests_per_minute = match var("TALLY_RPM") {
            Some(raw) => raw
                .parse::<f64>()
                .with_context(|| format!("TALLY_RPM is not a number: {raw}"))?,
            None => DEFAULT_RPM,
        };

        Ok(Self {
            api_key: require(&var, "TALLY_API_KEY")?,
            db_path: require(&var, "TALLY_DB")?,
            base_url: var("TALLY_BASE_URL").unwrap_or_else(|| DEFAULT_BASE_URL.into()),
            model: var("TALLY_MODEL")
                .map(CompactString::from)
                .unwrap_or_else(|| DEFAULT_MODEL.into()),
            bind_address: var("TALLY_BIND").unwrap_or_else(|| DEFAULT_BIND.into()),
            requests_per_minute,
        })
    }
}

/// Fetch a required variable, failing with its name when absent.
fn require(var: &impl Fn(&str) -> Option<String>, name: &str) -> Result<String> {
    var(name).with_context(|| format!("missing required environment variable: {name}"))
}
