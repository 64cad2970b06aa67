//! HTTP server settings.
//!
//! # Environment Variables
//!
//! - `HOST`: bind address (default `0.0.0.0`)
//! - `PORT`: bind port (default `3000`)
//! - `STORE_BACKEND`: `postgres` (default) or `memory`
//! - `METRICS_ENABLED`: expose `/metrics` unless `false` or `0`

use std::env;
use std::str::FromStr;

use crate::error::ConfigError;

/// Which `EntityStore` implementation backs the running server.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum StoreBackend {
    #[default]
    Postgres,
    /// Volatile, process-local store. Data is lost on restart.
    Memory,
}

impl FromStr for StoreBackend {
    type Err = ConfigError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "postgres" | "postgresql" => Ok(StoreBackend::Postgres),
            "memory" => Ok(StoreBackend::Memory),
            other => Err(ConfigError::invalid(
                "STORE_BACKEND",
                format!("expected `postgres` or `memory`, got `{}`", other),
            )),
        }
    }
}

#[derive(Clone, Debug, PartialEq, Eq)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
    pub store_backend: StoreBackend,
    pub metrics_enabled: bool,
}

impl ServerConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    pub fn from_lookup(lookup: impl Fn(&str) -> Option<String>) -> Result<Self, ConfigError> {
        let port = match lookup("PORT") {
            Some(raw) => raw
                .trim()
                .parse::<u16>()
                .map_err(|e| ConfigError::invalid("PORT", e.to_string()))?,
            None => 3000,
        };

        let store_backend = match lookup("STORE_BACKEND") {
            Some(raw) => raw.parse()?,
            None => StoreBackend::default(),
        };

        let metrics_enabled = lookup("METRICS_ENABLED")
            .map(|v| v.to_lowercase() != "false" && v != "0")
            .unwrap_or(true);

        Ok(Self {
            host: lookup("HOST").unwrap_or_else(|| "0.0.0.0".to_string()),
            port,
            store_backend,
            metrics_enabled,
        })
    }

    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.host, self.port)
    }
}
