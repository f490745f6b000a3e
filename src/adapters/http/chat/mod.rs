//! HTTP adapter for the debate chat API.

mod dto;
mod handlers;
mod routes;

pub use dto::{ChatRequest, ChatResponse, ErrorResponse, HealthResponse, UtteranceDto};
pub use handlers::ChatHandlers;
pub use routes::chat_routes;
