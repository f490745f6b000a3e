//! Application layer - commands and handlers.
//!
//! This layer orchestrates domain operations and coordinates between ports.
//! Handlers own the turn lifecycle; reply composition sits behind the
//! `ReplyEngine` port so mock and AI modes share one code path.

pub mod handlers;

pub use handlers::{
    // Turn handling
    SendMessageCommand, SendMessageError, SendMessageHandler, SendMessageResult,
    // Reply engines
    ModelReplyEngine, TemplateReplyEngine,
};
