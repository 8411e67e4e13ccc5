// SPDX-License-Identifier: MIT

//! Application configuration loaded from environment variables.

use std::env;

/// Which provider response format the deployment consumes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProviderMode {
    /// Scrape an HTML results table
    Html,
    /// Decode a JSON `records` array
    Json,
}

/// Application configuration, loaded once at startup.
#[derive(Debug, Clone)]
pub struct Config {
    /// Server port
    pub port: u16,
    /// Base URL of the timing provider
    pub provider_base_url: String,
    /// Event/race identifier used in provider request paths
    pub event_id: String,
    /// Response format the provider serves for this event
    pub provider_mode: ProviderMode,
    /// Polling period for the refresh scheduler, in milliseconds
    pub poll_interval_ms: u64,
    /// Per-fetch timeout against the provider, in seconds
    pub fetch_timeout_secs: u64,
    /// Full race distance in kilometres; finished runners stop polling
    pub race_distance_km: f64,
    /// Shared administrative secret for runner deletion
    pub admin_password: String,
    /// Path of the flat-file roster store
    pub roster_path: String,
    /// Frontend URL allowed by CORS
    pub frontend_url: String,
}

impl Default for Config {
    /// Default config for testing only.
    fn default() -> Self {
        Self {
            port: 8080,
            provider_base_url: "http://localhost:9000".to_string(),
            event_id: "133".to_string(),
            provider_mode: ProviderMode::Json,
            poll_interval_ms: 10_000,
            fetch_timeout_secs: 15,
            race_distance_km: 42.195,
            admin_password: "8282".to_string(),
            roster_path: "runners.json".to_string(),
            frontend_url: "http://localhost:5173".to_string(),
        }
    }
}

impl Config {
    /// Load configuration from environment variables.
    pub fn from_env() -> Result<Self, ConfigError> {
        dotenvy::dotenv().ok(); // Load .env file if present

        let provider_mode = match env::var("PROVIDER_MODE")
            .unwrap_or_else(|_| "json".to_string())
            .to_ascii_lowercase()
            .as_str()
        {
            "html" => ProviderMode::Html,
            "json" => ProviderMode::Json,
            other => return Err(ConfigError::Invalid("PROVIDER_MODE", other.to_string())),
        };

        Ok(Self {
            port: env::var("PORT")
                .unwrap_or_else(|_| "8080".to_string())
                .parse()
                .unwrap_or(8080),
            provider_base_url: env::var("PROVIDER_BASE_URL")
                .map(|v| v.trim_end_matches('/').to_string())
                .map_err(|_| ConfigError::Missing("PROVIDER_BASE_URL"))?,
            event_id: env::var("EVENT_ID").map_err(|_| ConfigError::Missing("EVENT_ID"))?,
            provider_mode,
            poll_interval_ms: env::var("POLL_INTERVAL_MS")
                .unwrap_or_else(|_| "10000".to_string())
                .parse()
                .unwrap_or(10_000),
            fetch_timeout_secs: env::var("FETCH_TIMEOUT_SECS")
                .unwrap_or_else(|_| "15".to_string())
                .parse()
                .unwrap_or(15),
            race_distance_km: env::var("RACE_DISTANCE_KM")
                .unwrap_or_else(|_| "42.195".to_string())
                .parse()
                .unwrap_or(42.195),
            admin_password: env::var("ADMIN_PASSWORD")
                .map(|v| v.trim().to_string())
                .map_err(|_| ConfigError::Missing("ADMIN_PASSWORD"))?,
            roster_path: env::var("ROSTER_PATH").unwrap_or_else(|_| "runners.json".to_string()),
            frontend_url: env::var("FRONTEND_URL")
                .unwrap_or_else(|_| "http://localhost:5173".to_string()),
        })
    }
}

/// Configuration errors
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Missing required environment variable: {0}")]
    Missing(&'static str),

    #[error("Invalid value for {0}: {1}")]
    Invalid(&'static str, String),
}
