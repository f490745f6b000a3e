//! Application configuration module
//!
//! This module provides type-safe configuration loading from environment
//! variables using the `config` and `dotenvy` crates. Configuration is loaded
//! with the `REBUTTAL_` prefix and nested values use underscores as
//! separators.
//!
//! # Example
//!
//! ```no_run
//! use rebuttal::config::AppConfig;
//!
//! let config = AppConfig::load().expect("Failed to load configuration");
//! config.validate().expect("Invalid configuration");
//!
//! println!("Server running on {}", config.server.socket_addr());
//! ```

mod ai;
mod error;
mod server;
mod store;

pub use ai::{AiConfig, ReplyMode};
pub use error::{ConfigError, ValidationError};
pub use server::{Environment, ServerConfig};
pub use store::{StoreBackend, StoreConfig};

use serde::Deserialize;

/// Root application configuration
///
/// Contains all configuration sections for the debate service. Load using
/// [`AppConfig::load()`] which reads from environment variables.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AppConfig {
    /// Server configuration (host, port, environment)
    #[serde(default)]
    pub server: ServerConfig,

    /// Conversation store configuration (memory/Redis)
    #[serde(default)]
    pub store: StoreConfig,

    /// Language-model configuration (mock/ai mode, OpenAI)
    #[serde(default)]
    pub ai: AiConfig,
}

impl AppConfig {
    /// Load configuration from environment variables
    ///
    /// This function:
    /// 1. Loads `.env` file if present (for development)
    /// 2. Reads environment variables with `REBUTTAL` prefix
    /// 3. Uses `__` (double underscore) to separate nested values
    /// 4. Deserializes into typed configuration structs
    ///
    /// # Environment Variable Format
    ///
    /// - `REBUTTAL__SERVER__PORT=8000` -> `server.port = 8000`
    /// - `REBUTTAL__STORE__REDIS_URL=...` -> `store.redis_url = ...`
    /// - `REBUTTAL__AI__MODE=ai` -> `ai.mode = ReplyMode::Ai`
    ///
    /// Every section has defaults, so an empty environment yields a working
    /// development configuration (in-memory store, mock replies).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if values cannot be parsed into expected types.
    pub fn load() -> Result<Self, ConfigError> {
        // Load .env file if present (development)
        dotenvy::dotenv().ok();

        let config = config::Config::builder()
            .add_source(
                config::Environment::default()
                    .prefix("REBUTTAL")
                    .separator("__"),
            )
            .build()?
            .try_deserialize()?;

        Ok(config)
    }

    /// Validate all configuration values
    ///
    /// Performs semantic validation of configuration:
    /// - Port and timeout ranges
    /// - Redis URL scheme when the Redis backend is selected
    /// - Model parameters (temperature, token and retry bounds)
    ///
    /// # Errors
    ///
    /// Returns `ValidationError` if any configuration value is invalid.
    pub fn validate(&self) -> Result<(), ValidationError> {
        self.server.validate()?;
        self.store.validate()?;
        self.ai.validate()?;
        Ok(())
    }

    /// Check if running in production environment
    pub fn is_production(&self) -> bool {
        self.server.is_production()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::env;
    use std::sync::Mutex;

    // Mutex to ensure tests don't run in parallel (env vars are global)
    static ENV_MUTEX: Mutex<()> = Mutex::new(());

    /// Helper to clear environment variables after testing
    /// Uses double underscores to separate nested config values
    fn clear_env() {
        env::remove_var("REBUTTAL__SERVER__PORT");
        env::remove_var("REBUTTAL__SERVER__ENVIRONMENT");
        env::remove_var("REBUTTAL__STORE__BACKEND");
        env::remove_var("REBUTTAL__STORE__REDIS_URL");
        env::remove_var("REBUTTAL__AI__MODE");
        env::remove_var("REBUTTAL__AI__OPENAI_API_KEY");
    }

    #[test]
    fn test_load_from_empty_environment() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let result = AppConfig::load();

        assert!(result.is_ok(), "Failed to load config: {:?}", result.err());
        let config = result.unwrap();
        assert_eq!(config.store.backend, StoreBackend::Memory);
        assert_eq!(config.ai.mode, ReplyMode::Mock);
    }

    #[test]
    fn test_validate_default_config() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_server_defaults() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        let config = AppConfig::load().unwrap();

        assert_eq!(config.server.host, "0.0.0.0");
        assert_eq!(config.server.port, 8000);
        assert_eq!(config.server.environment, Environment::Development);
    }

    #[test]
    fn test_is_production() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("REBUTTAL__SERVER__ENVIRONMENT", "production");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert!(config.is_production());
    }

    #[test]
    fn test_custom_server_port() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("REBUTTAL__SERVER__PORT", "3000");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.server.port, 3000);
    }

    #[test]
    fn test_backend_and_mode_from_env() {
        let _guard = ENV_MUTEX.lock().unwrap();
        clear_env();
        env::set_var("REBUTTAL__STORE__BACKEND", "redis");
        env::set_var("REBUTTAL__STORE__REDIS_URL", "redis://localhost:6379");
        env::set_var("REBUTTAL__AI__MODE", "ai");
        let result = AppConfig::load();
        clear_env();

        let config = result.unwrap();
        assert_eq!(config.store.backend, StoreBackend::Redis);
        assert_eq!(
            config.store.redis_url.as_deref(),
            Some("redis://localhost:6379")
        );
        assert_eq!(config.ai.mode, ReplyMode::Ai);
        assert!(config.validate().is_ok());
    }
}
