//! In-memory conversation store.
//!
//! The default backend: a process-local map guarded by an async RwLock.
//! State does not survive a restart and is not shared across instances,
//! which is fine for development and single-instance deployments. Nothing
//! expires; abandoned conversations live until the process does.

use async_trait::async_trait;
use std::collections::HashMap;
use tokio::sync::RwLock;

use crate::domain::conversation::{Conversation, ConversationId};
use crate::ports::{ConversationStore, StoreError};

/// Process-local conversation store.
///
/// Writes are last-write-wins: two turns racing on the same conversation
/// overwrite each other without error.
#[derive(Debug, Default)]
pub struct InMemoryConversationStore {
    conversations: RwLock<HashMap<ConversationId, Conversation>>,
}

impl InMemoryConversationStore {
    /// Creates an empty store.
    pub fn new() -> Self {
        Self {
            conversations: RwLock::new(HashMap::new()),
        }
    }

    /// Returns the number of stored conversations.
    pub async fn len(&self) -> usize {
        self.conversations.read().await.len()
    }

    /// Returns true when no conversations are stored.
    pub async fn is_empty(&self) -> bool {
        self.conversations.read().await.is_empty()
    }
}

#[async_trait]
impl ConversationStore for InMemoryConversationStore {
    async fn get(&self, id: &ConversationId) -> Result<Option<Conversation>, StoreError> {
        Ok(self.conversations.read().await.get(id).cloned())
    }

    async fn set(&self, conversation: &Conversation) -> Result<(), StoreError> {
        self.conversations
            .write()
            .await
            .insert(conversation.id().clone(), conversation.clone());
        Ok(())
    }

    async fn exists(&self, id: &ConversationId) -> Result<bool, StoreError> {
        Ok(self.conversations.read().await.contains_key(id))
    }

    async fn trim(
        &self,
        id: &ConversationId,
        keep_last: usize,
    ) -> Result<Option<Conversation>, StoreError> {
        let mut conversations = self.conversations.write().await;
        match conversations.get_mut(id) {
            Some(conversation) => {
                conversation.trim(keep_last);
                Ok(Some(conversation.clone()))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &ConversationId) -> Result<(), StoreError> {
        self.conversations.write().await.remove(id);
        Ok(())
    }
}
