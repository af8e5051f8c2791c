//! Configuration management for the MCP server.
//!
//! Configuration starts from defaults and is overridden from environment
//! variables (a `.env` file is loaded first when present).

use serde::{Deserialize, Serialize};
use tracing::{info, warn};

use crate::domains::maps::{EndpointConfig, HttpConfig, RateLimitConfig};
use crate::domains::maps::rate_limiter::{DEFAULT_MAX_REQUESTS, DEFAULT_WINDOW_MS};

/// Main configuration structure for the MCP server.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Config {
    /// Server identification and metadata.
    pub server: ServerConfig,

    /// Logging configuration.
    pub logging: LoggingConfig,

    /// Maps provider access: credential, limits, retry and base URLs.
    pub maps: MapsConfig,
}

/// Server identification configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    /// The name of the server as reported to clients.
    pub name: String,

    /// The version of the server.
    pub version: String,
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LoggingConfig {
    /// Log level filter (e.g., "info", "debug", "trace").
    pub level: String,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct MapsConfig {
    pub credentials: CredentialsConfig,
    pub rate_limit: RateLimitConfig,
    pub http: HttpConfig,
    pub endpoints: EndpointConfig,
}

/// Configuration for the provider credential.
#[derive(Clone, Default, Serialize, Deserialize)]
pub struct CredentialsConfig {
    /// Google Maps Platform API key. Required to start the server.
    #[serde(skip_serializing)]
    pub api_key: Option<String>,
}

/// Custom Debug implementation to redact secrets from logs.
impl std::fmt::Debug for CredentialsConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CredentialsConfig")
            .field("api_key", &self.api_key.as_ref().map(|_| "[REDACTED]"))
            .finish()
    }
}

impl Default for Config {
    fn default() -> Self {
        Self {
            server: ServerConfig {
                name: "google-maps-mcp".to_string(),
                version: env!("CARGO_PKG_VERSION").to_string(),
            },
            logging: LoggingConfig {
                level: "info".to_string(),
            },
            maps: MapsConfig::default(),
        }
    }
}

impl Config {
    /// Create a new configuration with default values.
    pub fn new() -> Self {
        Self::default()
    }

    /// Load configuration from environment variables.
    ///
    /// Recognized variables: `MCP_SERVER_NAME`, `MCP_LOG_LEVEL`,
    /// `GOOGLE_MAPS_API_KEY`, `GOOGLE_MAPS_RATE_LIMIT_ENABLED`,
    /// `GOOGLE_MAPS_RATE_LIMIT_WINDOW_MS`, `GOOGLE_MAPS_RATE_LIMIT_MAX_REQUESTS`,
    /// `GOOGLE_MAPS_REQUEST_TIMEOUT_SECS`, `GOOGLE_MAPS_MAX_ATTEMPTS` and
    /// `GOOGLE_MAPS_RETRY_BASE_DELAY_MS`.
    pub fn from_env() -> Self {
        dotenvy::dotenv().ok();

        let mut config = Self::default();

        if let Ok(name) = std::env::var("MCP_SERVER_NAME") {
            config.server.name = name;
        }

        if let Ok(level) = std::env::var("MCP_LOG_LEVEL") {
            config.logging.level = level;
        }

        match std::env::var("GOOGLE_MAPS_API_KEY") {
            Ok(key) if !key.trim().is_empty() => {
                config.maps.credentials.api_key = Some(key.trim().to_string());
                info!("Google Maps API key loaded from environment");
            }
            _ => warn!("GOOGLE_MAPS_API_KEY is not set"),
        }

        let rate_limit = &mut config.maps.rate_limit;
        if let Ok(enabled) = std::env::var("GOOGLE_MAPS_RATE_LIMIT_ENABLED") {
            rate_limit.enabled = !enabled.trim().eq_ignore_ascii_case("false");
        }
        rate_limit.window_ms = positive_from_env("GOOGLE_MAPS_RATE_LIMIT_WINDOW_MS", DEFAULT_WINDOW_MS);
        rate_limit.max_requests =
            positive_from_env("GOOGLE_MAPS_RATE_LIMIT_MAX_REQUESTS", DEFAULT_MAX_REQUESTS);

        let http = &mut config.maps.http;
        http.timeout_secs = positive_from_env("GOOGLE_MAPS_REQUEST_TIMEOUT_SECS", http.timeout_secs);
        http.max_attempts = u32::try_from(positive_from_env(
            "GOOGLE_MAPS_MAX_ATTEMPTS",
            u64::from(http.max_attempts),
        ))
        .unwrap_or(http.max_attempts);
        if let Ok(raw) = std::env::var("GOOGLE_MAPS_RETRY_BASE_DELAY_MS") {
            match raw.trim().parse::<u64>() {
                Ok(delay) => http.retry_base_delay_ms = delay,
                Err(_) => warn!(
                    value = %raw,
                    fallback = http.retry_base_delay_ms,
                    "Invalid GOOGLE_MAPS_RETRY_BASE_DELAY_MS, using default"
                ),
            }
        }

        config
    }
}

/// Read a strictly positive integer, falling back with a warning otherwise.
fn positive_from_env(name: &str, default: u64) -> u64 {
    let Ok(raw) = std::env::var(name) else {
        return default;
    };
    match raw.trim().parse::<i64>() {
        Ok(value) if value > 0 => value.unsigned_abs(),
        _ => {
            warn!(variable = name, value = %raw, fallback = default, "Invalid value, using default");
            default
        }
    }
}
