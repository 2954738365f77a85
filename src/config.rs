//! Application configuration loaded from environment variables.

use std::net::{Ipv4Addr, SocketAddr};

use serde::Deserialize;

/// Log output format.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LogFormat {
    /// Human-readable lines.
    #[default]
    Text,
    /// One JSON object per line.
    Json,
}

/// Application configuration loaded from environment variables.
///
/// Built once at startup and shared read-only with every handler.
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    // === Service Identity ===
    /// Version reported by the endpoints (`APP_VERSION`).
    #[serde(default = "default_version")]
    pub app_version: String,

    /// Deployment environment name (`ENVIRONMENT`).
    #[serde(default = "default_environment")]
    pub environment: String,

    // === Server Configuration ===
    /// HTTP listen port (`PORT`).
    #[serde(default = "default_port")]
    pub port: u16,

    /// Port for the Prometheus exporter; disabled when unset.
    #[serde(default)]
    pub metrics_port: Option<u16>,

    // === Logging ===
    /// Log filter directive (trace, debug, info, warn, error).
    #[serde(default = "default_log_level")]
    pub rust_log: String,

    /// Log output format: text or json.
    #[serde(default)]
    pub log_format: LogFormat,
}

fn default_version() -> String {
    "1.0.0".to_string()
}

fn default_environment() -> String {
    "development".to_string()
}

fn default_port() -> u16 {
    8080
}

fn default_log_level() -> String {
    "info".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            app_version: default_version(),
            environment: default_environment(),
            port: default_port(),
            metrics_port: None,
            rust_log: default_log_level(),
            log_format: LogFormat::default(),
        }
    }
}

impl Config {
    /// Load configuration from environment, reading .env file first.
    pub fn load() -> Result<Self, envy::Error> {
        dotenvy::dotenv().ok();
        Self::from_vars(std::env::vars())
    }

    /// Build configuration from an explicit set of `KEY=value` pairs.
    pub fn from_vars<I>(vars: I) -> Result<Self, envy::Error>
    where
        I: IntoIterator<Item = (String, String)>,
    {
        envy::from_iter(vars)
    }

    /// Check if the configuration is valid.
    pub fn validate(&self) -> Result<(), String> {
        if self.metrics_port.is_some_and(|p| p == self.port) {
            return Err("METRICS_PORT must differ from PORT".to_string());
        }

        Ok(())
    }

    /// Address the HTTP server binds to: all interfaces on `port`.
    pub fn bind_addr(&self) -> SocketAddr {
        SocketAddr::from((Ipv4Addr::UNSPECIFIED, self.port))
    }

    /// Address the metrics exporter binds to, if enabled.
    pub fn metrics_addr(&self) -> Option<SocketAddr> {
        self.metrics_port
            .map(|port| SocketAddr::from((Ipv4Addr::UNSPECIFIED, port)))
    }
}
