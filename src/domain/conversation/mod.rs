//! Conversation domain module.
//!
//! Holds the persisted unit of debate state: conversations keyed by opaque
//! id, their utterance history, and the history trim rule.

mod conversation;
mod message;

pub use conversation::{trim_history, Conversation};
pub use message::{ConversationId, Role, Utterance};
