//! API configuration

use serde::Deserialize;
use std::time::Duration;

/// Log output format
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human readable lines
    #[default]
    Pretty,
    /// One JSON object per line
    Json,
}

/// API configuration, read from `API_*` environment variables
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct ApiConfig {
    pub host: String,
    pub port: u16,
    pub database_url: String,
    pub db_max_connections: u32,
    /// Default filter when `RUST_LOG` is unset
    pub log_level: String,
    pub log_format: LogFormat,
    /// Capacity of the consumption event channel
    pub event_buffer: usize,
    /// How long a publish waits on a full event channel
    pub event_send_timeout_ms: u64,
}

impl Default for ApiConfig {
    fn default() -> Self {
        Self {
            host: "0.0.0.0".to_string(),
            port: 8080,
            database_url: "postgres://localhost/cobranca".to_string(),
            db_max_connections: 10,
            log_level: "info".to_string(),
            log_format: LogFormat::Pretty,
            event_buffer: 1024,
            event_send_timeout_ms: 2000,
        }
    }
}

impl ApiConfig {
    /// Loads configuration from environment, defaulting absent keys
    pub fn from_env() -> Result<Self, config::ConfigError> {
        config::Config::builder()
            .add_source(config::Environment::with_prefix("API").try_parsing(true))
            .build()?
            .try_deserialize()
    }

    pub fn event_send_timeout(&self) -> Duration {
        Duration::from_millis(self.event_send_timeout_ms)
    }

    /// Returns the server address
    pub fn server_addr(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
