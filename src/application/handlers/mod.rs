//! Application handlers.
//!
//! Command handlers that orchestrate domain operations through the ports.

pub mod chat;

pub use chat::{
    ModelReplyEngine, SendMessageCommand, SendMessageError, SendMessageHandler,
    SendMessageResult, TemplateReplyEngine,
};
