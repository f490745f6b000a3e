//! Ports - Interfaces for external dependencies.
//!
//! Following hexagonal architecture, ports define the contracts between
//! the domain and the outside world. Adapters implement these ports.
//!
//! - `ConversationStore` - conversation persistence by opaque id
//! - `ChatModel` - single-completion call to an external language model
//! - `ReplyEngine` - produces the bot reply for one turn
//! - `Sleeper` - injectable delay used between retry attempts

mod chat_model;
mod conversation_store;
mod reply_engine;
mod sleeper;

pub use chat_model::{ChatMessage, ChatModel, ChatRole, CompletionRequest, ModelError};
pub use conversation_store::{ConversationStore, StoreError};
pub use reply_engine::ReplyEngine;
pub use sleeper::{Sleeper, TokioSleeper};
