//! Adapters - Implementations of port interfaces.
//!
//! Adapters connect the domain to external systems:
//! - `ai` - Chat-model clients (OpenAI, mock)
//! - `http` - REST API exposure
//! - `store` - Conversation persistence (in-memory, Redis)

pub mod ai;
pub mod http;
pub mod store;

pub use ai::{MockChatModel, OpenAIChatModel, OpenAIConfig};
pub use store::{InMemoryConversationStore, RedisConversationStore};
