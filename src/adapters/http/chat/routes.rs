//! HTTP routes for the debate chat API.

use axum::{
    routing::{get, post},
    Router,
};

use super::handlers::{health_check, send_chat_message, ChatHandlers};

/// Creates the chat router with all endpoints.
pub fn chat_routes(handlers: ChatHandlers) -> Router {
    Router::new()
        .route("/", get(health_check))
        .route("/chat", post(send_chat_message))
        .with_state(handlers)
}
