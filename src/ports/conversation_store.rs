//! Conversation Store Port - Persistence for debate conversations.

use async_trait::async_trait;

use crate::domain::conversation::{Conversation, ConversationId};

/// Port for conversation persistence, keyed by opaque id.
///
/// Concurrent turns against the same id race: writes are last-write-wins.
/// Callers needing stronger guarantees must serialize externally.
#[async_trait]
pub trait ConversationStore: Send + Sync {
    /// Returns the conversation, or None when the id is unknown.
    async fn get(&self, id: &ConversationId) -> Result<Option<Conversation>, StoreError>;

    /// Creates or replaces the conversation under its own id.
    async fn set(&self, conversation: &Conversation) -> Result<(), StoreError>;

    /// Returns true when the id exists.
    async fn exists(&self, id: &ConversationId) -> Result<bool, StoreError>;

    /// Loads the conversation, trims its history to at most `keep_last`
    /// utterances per role, persists the result and returns it; None when
    /// the id is unknown.
    async fn trim(
        &self,
        id: &ConversationId,
        keep_last: usize,
    ) -> Result<Option<Conversation>, StoreError>;

    /// Removes the conversation. Unknown ids are a no-op.
    async fn delete(&self, id: &ConversationId) -> Result<(), StoreError>;
}

/// Failures from the conversation store.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    /// The backend could not be reached or answered abnormally.
    #[error("store backend error: {0}")]
    Backend(String),

    /// A stored payload could not be decoded.
    #[error("corrupt stored conversation: {0}")]
    Corrupt(String),
}

impl StoreError {
    /// Creates a backend error.
    pub fn backend(message: impl Into<String>) -> Self {
        Self::Backend(message.into())
    }

    /// Creates a corrupt-payload error.
    pub fn corrupt(message: impl Into<String>) -> Self {
        Self::Corrupt(message.into())
    }
}
