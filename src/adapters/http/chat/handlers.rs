//! HTTP handlers for the debate chat API.

use std::sync::Arc;

use axum::{
    extract::State,
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use tracing::error;

use crate::application::handlers::{SendMessageCommand, SendMessageError, SendMessageHandler};

use super::dto::{ChatRequest, ChatResponse, ErrorResponse, HealthResponse};

// ════════════════════════════════════════════════════════════════════════════
// Handler state
// ════════════════════════════════════════════════════════════════════════════

/// Shared state for the chat routes.
#[derive(Clone)]
pub struct ChatHandlers {
    send_message_handler: Arc<SendMessageHandler>,
}

impl ChatHandlers {
    pub fn new(send_message_handler: Arc<SendMessageHandler>) -> Self {
        Self {
            send_message_handler,
        }
    }
}

// ════════════════════════════════════════════════════════════════════════════
// HTTP handlers
// ════════════════════════════════════════════════════════════════════════════

/// POST /chat - One debate turn
pub async fn send_chat_message(
    State(handlers): State<ChatHandlers>,
    Json(req): Json<ChatRequest>,
) -> Response {
    let command = SendMessageCommand {
        conversation_id: req.conversation_id,
        message: req.message,
        topic: req.topic,
    };

    match handlers.send_message_handler.handle(command).await {
        Ok(result) => {
            let response = ChatResponse::from(result);
            (StatusCode::OK, Json(response)).into_response()
        }
        Err(e) => handle_chat_error(e),
    }
}

/// GET / - Service liveness
pub async fn health_check() -> Response {
    (StatusCode::OK, Json(HealthResponse::ok())).into_response()
}

// ════════════════════════════════════════════════════════════════════════════
// Error mapping
// ════════════════════════════════════════════════════════════════════════════

fn handle_chat_error(err: SendMessageError) -> Response {
    match &err {
        SendMessageError::EmptyMessage | SendMessageError::MessageTooLong => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::validation("message", err.to_string())),
        )
            .into_response(),
        SendMessageError::TopicTooLong => (
            StatusCode::UNPROCESSABLE_ENTITY,
            Json(ErrorResponse::validation("topic", err.to_string())),
        )
            .into_response(),
        SendMessageError::ConversationNotFound => (
            StatusCode::NOT_FOUND,
            Json(ErrorResponse::not_found(err.to_string())),
        )
            .into_response(),
        SendMessageError::Store(e) => {
            error!(error = %e, "conversation store failure");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(ErrorResponse::internal("An unexpected error occurred")),
            )
                .into_response()
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::ports::StoreError;

    #[test]
    fn empty_message_maps_to_422() {
        let response = handle_chat_error(SendMessageError::EmptyMessage);
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn overlong_topic_maps_to_422() {
        let response = handle_chat_error(SendMessageError::TopicTooLong);
        assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
    }

    #[test]
    fn unknown_conversation_maps_to_404() {
        let response = handle_chat_error(SendMessageError::ConversationNotFound);
        assert_eq!(response.status(), StatusCode::NOT_FOUND);
    }

    #[test]
    fn store_failure_maps_to_500() {
        let response =
            handle_chat_error(SendMessageError::Store(StoreError::backend("redis gone")));
        assert_eq!(response.status(), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
