//! HTTP server settings.

use serde::Deserialize;
use std::net::SocketAddr;
use std::time::Duration;

use super::error::ValidationError;

/// Bind address, environment and per-request limits.
#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    /// Interface to bind
    #[serde(default = "default_host")]
    pub host: String,

    /// TCP port to listen on
    #[serde(default = "default_port")]
    pub port: u16,

    /// Deployment environment
    #[serde(default = "default_environment")]
    pub environment: Environment,

    /// Tracing filter directive used when RUST_LOG is unset
    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// Whole-request timeout in seconds
    #[serde(default = "default_request_timeout")]
    pub request_timeout_secs: u64,

    /// Comma-separated CORS origins; unset means allow any
    pub cors_origins: Option<String>,
}

/// Deployment environment
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum Environment {
    #[default]
    Development,
    Staging,
    Production,
}

impl ServerConfig {
    /// Address the TCP listener binds to.
    pub fn socket_addr(&self) -> SocketAddr {
        format!("{}:{}", self.host, self.port)
            .parse()
            .expect("Invalid socket address")
    }

    pub fn is_production(&self) -> bool {
        self.environment == Environment::Production
    }

    /// Whole-request timeout as a `Duration`.
    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    /// Configured CORS origins, split on commas and trimmed.
    ///
    /// Empty when unset; blank segments from stray commas are dropped.
    pub fn cors_origins_list(&self) -> Vec<String> {
        match &self.cors_origins {
            Some(raw) => raw
                .split(',')
                .map(|origin| origin.trim().to_string())
                .filter(|origin| !origin.is_empty())
                .collect(),
            None => Vec::new(),
        }
    }

    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.port == 0 {
            return Err(ValidationError::InvalidPort);
        }
        if self.request_timeout_secs == 0 || self.request_timeout_secs > 300 {
            return Err(ValidationError::InvalidTimeout);
        }
        Ok(())
    }
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            environment: default_environment(),
            log_level: default_log_level(),
            request_timeout_secs: default_request_timeout(),
            cors_origins: None,
        }
    }
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}

fn default_port() -> u16 {
    8000
}

fn default_environment() -> Environment {
    Environment::Development
}

fn default_log_level() -> String {
    "info,rebuttal=debug".to_string()
}

fn default_request_timeout() -> u64 {
    30
}
