//! Chat command handling: one debate turn per command.
//!
//! The handler orchestrates validation, conversation lifecycle and
//! persistence; the two reply engines implement the mock and AI reply
//! strategies behind the same port.

mod model_reply;
mod send_message;
mod template_reply;

pub use send_message::{
    // Command
    SendMessageCommand,
    SendMessageError,
    SendMessageHandler,
    SendMessageResult,
    // Wire-field caps
    MAX_MESSAGE_CHARS,
    MAX_TOPIC_CHARS,
};

pub use model_reply::ModelReplyEngine;
pub use template_reply::TemplateReplyEngine;
