//! Configuration error types

use thiserror::Error;

/// Errors that can occur during configuration loading
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Configuration loading failed: {0}")]
    LoadError(#[from] config::ConfigError),

    #[error("Validation failed: {0}")]
    ValidationFailed(#[from] ValidationError),
}

/// Errors that can occur during configuration validation
#[derive(Debug, Error)]
pub enum ValidationError {
    #[error("Required configuration missing: {0}")]
    MissingRequired(&'static str),

    #[error("Invalid port number")]
    InvalidPort,

    #[error("Invalid request timeout")]
    InvalidTimeout,

    #[error("Invalid Redis URL format")]
    InvalidRedisUrl,

    #[error("Conversation TTL must be greater than zero")]
    InvalidTtl,

    #[error("History depth must be between 1 and 50")]
    InvalidHistoryDepth,

    #[error("Model name must not be empty")]
    MissingModelName,

    #[error("Temperature must be between 0.0 and 2.0")]
    InvalidTemperature,

    #[error("Max tokens must be greater than zero")]
    InvalidMaxTokens,

    #[error("Retry count exceeds maximum allowed (5)")]
    RetryCountTooLarge,
}
