//! HTTP DTOs for the debate chat API.
//!
//! These types decouple the wire format from domain types. One naming quirk
//! is part of the contract: the response key `message` carries the history
//! array, and each history entry carries its text under `message` too.

use serde::{Deserialize, Serialize};

use crate::application::handlers::SendMessageResult;
use crate::domain::conversation::{Role, Utterance};

// ════════════════════════════════════════════════════════════════════════════
// Request DTOs
// ════════════════════════════════════════════════════════════════════════════

/// Request to send one debate message.
#[derive(Debug, Clone, Deserialize)]
pub struct ChatRequest {
    /// Conversation to continue; omit to open a new one.
    pub conversation_id: Option<String>,
    /// The user's message.
    pub message: String,
    /// Optional topic override for a new conversation.
    pub topic: Option<String>,
}

// ════════════════════════════════════════════════════════════════════════════
// Response DTOs
// ════════════════════════════════════════════════════════════════════════════

/// One utterance in the returned history.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UtteranceDto {
    /// Who spoke: `user` or `bot`.
    pub role: Role,
    /// The utterance text.
    pub message: String,
}

impl From<&Utterance> for UtteranceDto {
    fn from(utterance: &Utterance) -> Self {
        Self {
            role: utterance.role(),
            message: utterance.text().to_string(),
        }
    }
}

/// Response for one debate turn.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ChatResponse {
    /// Id to send back on the next turn.
    pub conversation_id: String,
    /// Trimmed history, oldest first, ending with the bot reply.
    pub message: Vec<UtteranceDto>,
}

impl From<SendMessageResult> for ChatResponse {
    fn from(result: SendMessageResult) -> Self {
        Self {
            conversation_id: result.conversation_id.to_string(),
            message: result.history.iter().map(UtteranceDto::from).collect(),
        }
    }
}

/// Liveness response for the root endpoint.
#[derive(Debug, Clone, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub message: String,
}

impl HealthResponse {
    /// The service-is-up payload.
    pub fn ok() -> Self {
        Self {
            status: "ok".to_string(),
            message: "Rebuttal API is running".to_string(),
        }
    }
}

/// Error payload for non-success statuses.
#[derive(Debug, Clone, Serialize)]
pub struct ErrorResponse {
    pub code: String,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl ErrorResponse {
    /// A request field failed validation.
    pub fn validation(field: &str, message: impl Into<String>) -> Self {
        Self {
            code: "VALIDATION_FAILED".to_string(),
            message: message.into(),
            details: Some(serde_json::json!({ "field": field })),
        }
    }

    /// The addressed resource does not exist.
    pub fn not_found(message: impl Into<String>) -> Self {
        Self {
            code: "NOT_FOUND".to_string(),
            message: message.into(),
            details: None,
        }
    }

    /// Something failed server-side; the message stays opaque.
    pub fn internal(message: impl Into<String>) -> Self {
        Self {
            code: "INTERNAL_ERROR".to_string(),
            message: message.into(),
            details: None,
        }
    }
}
