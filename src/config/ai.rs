//! Language-model configuration

use serde::Deserialize;
use std::time::Duration;

use super::error::ValidationError;

/// Language-model configuration
///
/// In `mock` mode replies come from the built-in debate templates and no
/// network calls are made. In `ai` mode replies are generated by an external
/// chat-completion model; if no API key is configured the service still runs
/// and answers with a fixed fallback.
#[derive(Debug, Clone, Deserialize)]
pub struct AiConfig {
    /// Reply generation mode
    #[serde(default)]
    pub mode: ReplyMode,

    /// OpenAI API key
    pub openai_api_key: Option<String>,

    /// Chat model identifier
    #[serde(default = "default_model")]
    pub model: String,

    /// Request timeout in seconds
    #[serde(default = "default_timeout")]
    pub timeout_secs: u64,

    /// Maximum tokens in a generated reply
    #[serde(default = "default_max_tokens")]
    pub max_tokens: u32,

    /// Sampling temperature
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum retries after the first failed attempt
    #[serde(default = "default_retries")]
    pub max_retries: u32,

    /// Surface error class names in fallback replies
    #[serde(default)]
    pub debug: bool,
}

/// Reply generation mode
#[derive(Debug, Clone, Deserialize, PartialEq, Eq, Default)]
#[serde(rename_all = "lowercase")]
pub enum ReplyMode {
    #[default]
    Mock,
    Ai,
}

impl AiConfig {
    /// Get timeout as Duration
    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    /// Check if an API key is configured
    pub fn has_api_key(&self) -> bool {
        self.openai_api_key.as_ref().is_some_and(|k| !k.is_empty())
    }

    /// Check if model-backed replies are selected
    pub fn uses_model(&self) -> bool {
        self.mode == ReplyMode::Ai
    }

    /// Validate language-model configuration
    ///
    /// A missing API key is not an error even in `ai` mode: the service
    /// degrades to a fixed fallback reply instead of refusing to start.
    pub fn validate(&self) -> Result<(), ValidationError> {
        if self.model.trim().is_empty() {
            return Err(ValidationError::MissingModelName);
        }
        if self.timeout_secs == 0 || self.timeout_secs > 120 {
            return Err(ValidationError::InvalidTimeout);
        }
        if !(0.0..=2.0).contains(&self.temperature) {
            return Err(ValidationError::InvalidTemperature);
        }
        if self.max_tokens == 0 {
            return Err(ValidationError::InvalidMaxTokens);
        }
        if self.max_retries > 5 {
            return Err(ValidationError::RetryCountTooLarge);
        }
        Ok(())
    }
}

impl Default for AiConfig {
    fn default() -> Self {
        Self {
            mode: ReplyMode::default(),
            openai_api_key: None,
            model: default_model(),
            timeout_secs: default_timeout(),
            max_tokens: default_max_tokens(),
            temperature: default_temperature(),
            max_retries: default_retries(),
            debug: false,
        }
    }
}

fn default_model() -> String {
    "gpt-4o-mini".to_string()
}

fn default_timeout() -> u64 {
    15
}

fn default_max_tokens() -> u32 {
    400
}

fn default_temperature() -> f32 {
    0.6
}

fn default_retries() -> u32 {
    2
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ai_config_defaults() {
        let config = AiConfig::default();
        assert_eq!(config.mode, ReplyMode::Mock);
        assert_eq!(config.model, "gpt-4o-mini");
        assert_eq!(config.timeout_secs, 15);
        assert_eq!(config.max_tokens, 400);
        assert_eq!(config.max_retries, 2);
        assert!(!config.debug);
    }

    #[test]
    fn test_timeout_duration() {
        let config = AiConfig {
            timeout_secs: 60,
            ..Default::default()
        };
        assert_eq!(config.timeout(), Duration::from_secs(60));
    }

    #[test]
    fn test_has_api_key() {
        let config = AiConfig {
            openai_api_key: Some("sk-xxx".to_string()),
            ..Default::default()
        };
        assert!(config.has_api_key());

        let config = AiConfig {
            openai_api_key: Some(String::new()),
            ..Default::default()
        };
        assert!(!config.has_api_key());

        assert!(!AiConfig::default().has_api_key());
    }

    #[test]
    fn test_missing_key_is_not_an_error() {
        let config = AiConfig {
            mode: ReplyMode::Ai,
            openai_api_key: None,
            ..Default::default()
        };
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_validation_empty_model() {
        let config = AiConfig {
            model: "  ".to_string(),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_temperature_bounds() {
        let config = AiConfig {
            temperature: 2.5,
            ..Default::default()
        };
        assert!(config.validate().is_err());

        let config = AiConfig {
            temperature: -0.1,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_zero_max_tokens() {
        let config = AiConfig {
            max_tokens: 0,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }

    #[test]
    fn test_validation_retry_cap() {
        let config = AiConfig {
            max_retries: 6,
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
