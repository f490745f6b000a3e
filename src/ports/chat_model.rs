//! Chat Model Port - Interface to the external language model.
//!
//! This port abstracts a single chat-completion call. One request yields one
//! text completion or a classified error; retry policy belongs to the
//! caller, not the implementation.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

/// Port for chat-completion models.
///
/// Implementations connect to an external provider and translate between
/// its wire format and these types.
#[async_trait]
pub trait ChatModel: Send + Sync {
    /// Generates one completion for the request.
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ModelError>;
}

/// Request for a chat completion.
#[derive(Debug, Clone, PartialEq)]
pub struct CompletionRequest {
    /// System instruction guiding model behavior.
    pub system_prompt: String,
    /// Bounded conversation history plus the current user message.
    pub messages: Vec<ChatMessage>,
    /// Maximum tokens to generate.
    pub max_tokens: Option<u32>,
    /// Sampling temperature.
    pub temperature: Option<f32>,
}

impl CompletionRequest {
    /// Creates a request with the given system instruction.
    pub fn new(system_prompt: impl Into<String>) -> Self {
        Self {
            system_prompt: system_prompt.into(),
            messages: Vec::new(),
            max_tokens: None,
            temperature: None,
        }
    }

    /// Adds a message to the conversation.
    pub fn with_message(mut self, role: ChatRole, content: impl Into<String>) -> Self {
        self.messages.push(ChatMessage {
            role,
            content: content.into(),
        });
        self
    }

    /// Sets the maximum tokens to generate.
    pub fn with_max_tokens(mut self, max: u32) -> Self {
        self.max_tokens = Some(max);
        self
    }

    /// Sets the temperature.
    pub fn with_temperature(mut self, temp: f32) -> Self {
        self.temperature = Some(temp);
        self
    }
}

/// A message in the model conversation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ChatMessage {
    /// Who sent this message.
    pub role: ChatRole,
    /// Message content.
    pub content: String,
}

impl ChatMessage {
    /// Creates a new message.
    pub fn new(role: ChatRole, content: impl Into<String>) -> Self {
        Self {
            role,
            content: content.into(),
        }
    }

    /// Creates a user message.
    pub fn user(content: impl Into<String>) -> Self {
        Self::new(ChatRole::User, content)
    }

    /// Creates an assistant message.
    pub fn assistant(content: impl Into<String>) -> Self {
        Self::new(ChatRole::Assistant, content)
    }
}

/// Role of a model-conversation message sender.
///
/// The system instruction travels separately in the request, so only the
/// two dialogue roles appear here.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ChatRole {
    /// User input.
    User,
    /// Model response.
    Assistant,
}

/// Classified failure of a chat-completion call.
#[derive(Debug, thiserror::Error)]
pub enum ModelError {
    /// API key missing or rejected.
    #[error("authentication failed")]
    Authentication,

    /// Provider rejected the request shape.
    #[error("bad request: {0}")]
    BadRequest(String),

    /// Rate limited by the provider.
    #[error("rate limited")]
    RateLimited,

    /// Non-success HTTP status outside the specific classes.
    #[error("provider returned status {status}")]
    Status {
        /// HTTP status code.
        status: u16,
    },

    /// Network-level failure reaching the provider.
    #[error("connection error: {0}")]
    Connection(String),

    /// The request exceeded its deadline.
    #[error("request timed out")]
    Timeout,

    /// The provider response could not be interpreted.
    #[error("parse error: {0}")]
    Parse(String),
}

impl ModelError {
    /// Creates a bad request error.
    pub fn bad_request(message: impl Into<String>) -> Self {
        Self::BadRequest(message.into())
    }

    /// Creates a connection error.
    pub fn connection(message: impl Into<String>) -> Self {
        Self::Connection(message.into())
    }

    /// Creates a parse error.
    pub fn parse(message: impl Into<String>) -> Self {
        Self::Parse(message.into())
    }

    /// Returns true if a retry may succeed.
    pub fn is_transient(&self) -> bool {
        matches!(
            self,
            ModelError::RateLimited | ModelError::Connection(_) | ModelError::Timeout
        )
    }

    /// Returns true for the expected failure taxonomy. Anything outside it
    /// gets the generic fallback and an error-level log.
    pub fn is_expected(&self) -> bool {
        !matches!(self, ModelError::Parse(_))
    }

    /// Short class name surfaced in debug-mode fallback replies.
    pub fn class_name(&self) -> &'static str {
        match self {
            ModelError::Authentication => "Authentication",
            ModelError::BadRequest(_) => "BadRequest",
            ModelError::RateLimited => "RateLimited",
            ModelError::Status { .. } => "Status",
            ModelError::Connection(_) => "Connection",
            ModelError::Timeout => "Timeout",
            ModelError::Parse(_) => "Parse",
        }
    }
}
