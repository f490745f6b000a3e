//! Conversation store adapters.
//!
//! Two implementations of the `ConversationStore` port:
//! - `memory` - process-local map, the default backend
//! - `redis` - Redis-backed store with per-conversation TTL

pub mod memory;
pub mod redis;

pub use memory::InMemoryConversationStore;
pub use redis::RedisConversationStore;
