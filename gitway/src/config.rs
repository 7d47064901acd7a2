//! Configuration module for environment variable parsing.
//!
//! `Config::from_env()` is the only place that reads the process environment.
//! The relay core receives its settings as an explicit [`IngestorConfig`]
//! value, and the sink stub as a [`SinkConfig`].

use std::env;
use std::time::Duration;

use anyhow::{Context, Result};
use tracing::warn;
use url::Url;

/// Sink address used when `SINK_ENDPOINT` is not set.
pub const DEFAULT_SINK_ENDPOINT: &str = "http://localhost:8080";

/// Application configuration loaded from environment variables.
#[derive(Debug, Clone)]
pub struct Config {
    /// Shared secret GitHub uses to sign webhook deliveries
    pub webhook_secret: Option<String>,

    /// Where envelopes are forwarded
    pub sink_endpoint: String,

    /// Credential attached to forwarded requests and expected by the sink
    pub sink_auth_token: Option<String>,

    /// Bound on the outbound forward call, in milliseconds
    pub request_timeout_ms: u64,

    /// Port for the ingest web server to listen on
    pub port: u16,

    // =========================================================================
    // Sink Configuration
    // =========================================================================

    /// Port for the sink web server to listen on
    pub sink_port: u16,

    /// Storage host the sink connects to
    pub db_host: String,

    /// Storage port the sink connects to
    pub db_port: u16,

    /// Bound on the storage connection attempt, in milliseconds
    pub db_connect_timeout_ms: u64,
}

/// Settings injected into the relay pipeline at construction time.
#[derive(Debug, Clone)]
pub struct IngestorConfig {
    /// HMAC key for `x-hub-signature-256`. Empty means every request is rejected.
    pub secret: Vec<u8>,
    pub sink_endpoint: Url,
    pub auth_token: String,
    /// Upper bound for the single forward attempt.
    pub timeout: Duration,
}

/// Settings for the sink stub.
#[derive(Debug, Clone)]
pub struct SinkConfig {
    /// Expected `X-Require-Whisk-Auth` value; `None` disables the check.
    pub auth_token: Option<String>,
    /// `host:port` of the storage engine.
    pub storage_addr: String,
    pub connect_timeout: Duration,
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Self {
        Config {
            webhook_secret: non_empty_var("GH_WEBHOOK_SECRET"),

            sink_endpoint: env::var("SINK_ENDPOINT")
                .unwrap_or_else(|_| DEFAULT_SINK_ENDPOINT.to_string()),

            sink_auth_token: non_empty_var("WSK_AUTH"),

            request_timeout_ms: parse_var("REQUEST_TIMEOUT_MS", 10_000),

            port: parse_var("PORT", 3000),

            sink_port: parse_var("SINK_PORT", 8080),

            db_host: env::var("DB_HOST").unwrap_or_else(|_| "localhost".to_string()),

            db_port: parse_var("DB_PORT", 5432),

            db_connect_timeout_ms: parse_var("DB_CONNECT_TIMEOUT_MS", 5_000),
        }
    }

    /// Build the value injected into the `Ingestor`.
    ///
    /// Fails only when the sink endpoint is not a valid URL.
    pub fn ingestor_config(&self) -> Result<IngestorConfig> {
        let sink_endpoint = Url::parse(&self.sink_endpoint)
            .with_context(|| format!("Invalid SINK_ENDPOINT: {}", self.sink_endpoint))?;

        Ok(IngestorConfig {
            secret: self
                .webhook_secret
                .as_deref()
                .unwrap_or_default()
                .as_bytes()
                .to_vec(),
            sink_endpoint,
            auth_token: self.sink_auth_token.clone().unwrap_or_default(),
            timeout: Duration::from_millis(self.request_timeout_ms),
        })
    }

    /// Build the value injected into the sink handlers.
    pub fn sink_config(&self) -> SinkConfig {
        SinkConfig {
            auth_token: self.sink_auth_token.clone(),
            storage_addr: format!("{}:{}", self.db_host, self.db_port),
            connect_timeout: Duration::from_millis(self.db_connect_timeout_ms),
        }
    }
}

/// Parse a numeric variable, falling back to `default` when unset or invalid.
fn parse_var<T: std::str::FromStr>(name: &str, default: T) -> T {
    let raw = match env::var(name) {
        Ok(v) => v,
        Err(_) => return default,
    };

    match raw.trim().parse() {
        Ok(v) => v,
        Err(_) => {
            warn!(env_var = name, value = %raw, "Invalid value, using default");
            default
        }
    }
}

/// Read a variable, treating blank values as unset.
fn non_empty_var(name: &str) -> Option<String> {
    env::var(name).ok().filter(|v| !v.trim().is_empty())
}
