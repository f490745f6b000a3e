//! Conversation store configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Conversation store configuration
///
/// Selects the storage backend for conversation state. The in-memory backend
/// keeps conversations for the lifetime of the process; the Redis backend
/// persists them with an expiry so abandoned debates age out.
#[derive(Debug, Clone, Deserialize)]
pub struct StoreConfig {
    /// Storage backend to use
    #[serde(default)]
    pub backend: StoreBackend,

    /// Redis connection URL (required when backend = redis)
    pub redis_url: Option<String>,

    /// Conversation expiry in seconds (Redis backend only)
    #[serde(default = "default_ttl")]
    pub ttl_secs: u64,

    /// Connection timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Utterances retained per role when trimming history
    #[serde(default = "default_history_keep")]
    pub history_keep: usize,
}

/// Storage backend type
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum StoreBackend {
    #[default]
    Memory,
    Redis,
}

impl StoreConfig {
    /// Get the conversation TTL as a Duration
    pub fn ttl(&self) -> Duration {
        Duration::from_secs(self.ttl_secs)
    }

    /// Get the connection timeout as a Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if the Redis backend is selected
    pub fn uses_redis(&self) -> bool {
        self.backend == StoreBackend::Redis
    }

    /// Validate store configuration
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.uses_redis() {
            let url = self
                .redis_url
                .as_deref()
                .ok_or(ValidationError::MissingRequired("STORE__REDIS_URL"))?;
            if !url.starts_with("redis://") && !url.starts_with("rediss://") {
                return Err(ValidationError::InvalidRedisUrl);
            }
        }
        if self.ttl_secs == 0 {
            return Err(ValidationError::InvalidTtl);
        }
        if self.history_keep == 0 || self.history_keep > 50 {
            return Err(ValidationError::InvalidHistoryDepth);
        }
        Ok(())
    }
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            backend: StoreBackend::default(),
            redis_url: None,
            ttl_secs: default_ttl(),
            timeout_secs: default_timeout(),
            history_keep: default_history_keep(),
        }
    }
}

// Seven days, matching the expiry of an abandoned debate.
fn default_ttl() -> u64 {
    7 * 24 * 60 * 60
}

fn default_timeout() -> u64 {
    5
}

fn default_history_keep() -> usize {
    5
}
