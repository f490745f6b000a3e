//! Redis-backed conversation store for multi-instance deployments.
//!
//! Conversations are stored as JSON under `conv:{id}` with a TTL that is
//! refreshed on every write, so an abandoned debate expires on its own.

use async_trait::async_trait;
use redis::aio::MultiplexedConnection;
use redis::AsyncCommands;
use serde::{Deserialize, Serialize};
use std::time::Duration;

use crate::domain::conversation::{Conversation, ConversationId, Role, Utterance};
use crate::ports::{ConversationStore, StoreError};

/// Redis-backed conversation store.
///
/// Writes are last-write-wins, same as the in-memory backend: SET replaces
/// the whole payload, and two turns racing on one conversation overwrite
/// each other without error.
#[derive(Clone)]
pub struct RedisConversationStore {
    conn: MultiplexedConnection,
    ttl: Duration,
}

impl RedisConversationStore {
    /// Creates a store over an established connection.
    pub fn new(conn: MultiplexedConnection, ttl: Duration) -> Self {
        Self { conn, ttl }
    }

    fn key(id: &ConversationId) -> String {
        format!("conv:{}", id.as_str())
    }

    async fn write(&self, key: &str, stored: &StoredConversation) -> Result<(), StoreError> {
        let json = serde_json::to_string(stored)
            .map_err(|e| StoreError::backend(format!("encode conversation: {}", e)))?;

        let mut conn = self.conn.clone();
        conn.set_ex::<_, _, ()>(key, json, self.ttl.as_secs())
            .await
            .map_err(|e: redis::RedisError| StoreError::backend(e.to_string()))?;
        Ok(())
    }
}

#[async_trait]
impl ConversationStore for RedisConversationStore {
    async fn get(&self, id: &ConversationId) -> Result<Option<Conversation>, StoreError> {
        let mut conn = self.conn.clone();

        let raw: Option<String> = conn
            .get(Self::key(id))
            .await
            .map_err(|e: redis::RedisError| StoreError::backend(e.to_string()))?;

        match raw {
            Some(json) => {
                let stored: StoredConversation = serde_json::from_str(&json)
                    .map_err(|e| StoreError::corrupt(format!("conversation {}: {}", id, e)))?;
                Ok(Some(stored.into_domain(id.clone())))
            }
            None => Ok(None),
        }
    }

    async fn set(&self, conversation: &Conversation) -> Result<(), StoreError> {
        let stored = StoredConversation::from_domain(conversation);
        self.write(&Self::key(conversation.id()), &stored).await
    }

    async fn exists(&self, id: &ConversationId) -> Result<bool, StoreError> {
        let mut conn = self.conn.clone();

        conn.exists(Self::key(id))
            .await
            .map_err(|e: redis::RedisError| StoreError::backend(e.to_string()))
    }

    async fn trim(
        &self,
        id: &ConversationId,
        keep_last: usize,
    ) -> Result<Option<Conversation>, StoreError> {
        match self.get(id).await? {
            Some(mut conversation) => {
                conversation.trim(keep_last);
                self.set(&conversation).await?;
                Ok(Some(conversation))
            }
            None => Ok(None),
        }
    }

    async fn delete(&self, id: &ConversationId) -> Result<(), StoreError> {
        let mut conn = self.conn.clone();

        conn.del::<_, ()>(Self::key(id))
            .await
            .map_err(|e: redis::RedisError| StoreError::backend(e.to_string()))?;
        Ok(())
    }
}

impl std::fmt::Debug for RedisConversationStore {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("RedisConversationStore")
            .field("ttl", &self.ttl)
            .finish_non_exhaustive()
    }
}

/// Flat persistence shape. The key carries the id, so the payload does not
/// repeat it.
#[derive(Debug, Serialize, Deserialize)]
struct StoredConversation {
    topic: String,
    stance: String,
    thesis: String,
    history: Vec<StoredUtterance>,
}

#[derive(Debug, Serialize, Deserialize)]
struct StoredUtterance {
    role: Role,
    text: String,
}

impl StoredConversation {
    fn from_domain(conversation: &Conversation) -> Self {
        Self {
            topic: conversation.topic().to_string(),
            stance: conversation.stance().to_string(),
            thesis: conversation.thesis().to_string(),
            history: conversation
                .history()
                .iter()
                .map(|u| StoredUtterance {
                    role: u.role(),
                    text: u.text().to_string(),
                })
                .collect(),
        }
    }

    fn into_domain(self, id: ConversationId) -> Conversation {
        let history = self
            .history
            .into_iter()
            .map(|u| Utterance::new(u.role, u.text))
            .collect();
        Conversation::reconstitute(id, self.topic, self.stance, self.thesis, history)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sample_conversation() -> Conversation {
        let mut conversation =
            Conversation::new("pepsi is better than coke", "against", "pepsi is better than coke");
        conversation.push_user("Why is Pepsi better than Coke?");
        conversation.push_bot("My stance remains: pepsi is better than coke.");
        conversation
    }

    mod mapping {
        use super::*;

        #[test]
        fn payload_is_flat_and_omits_the_id() {
            let stored = StoredConversation::from_domain(&sample_conversation());
            let value = serde_json::to_value(&stored).unwrap();

            let object = value.as_object().unwrap();
            assert_eq!(object.len(), 4);
            assert!(object.contains_key("topic"));
            assert!(object.contains_key("stance"));
            assert!(object.contains_key("thesis"));
            assert!(object.contains_key("history"));
            assert!(!object.contains_key("id"));

            assert_eq!(value["history"][0]["role"], "user");
            assert_eq!(value["history"][1]["role"], "bot");
        }

        #[test]
        fn domain_roundtrip_preserves_everything() {
            let conversation = sample_conversation();

            let stored = StoredConversation::from_domain(&conversation);
            let json = serde_json::to_string(&stored).unwrap();
            let back: StoredConversation = serde_json::from_str(&json).unwrap();
            let restored = back.into_domain(conversation.id().clone());

            assert_eq!(restored, conversation);
        }

        #[test]
        fn key_uses_the_conv_prefix() {
            let id = ConversationId::from("abc-123");
            assert_eq!(RedisConversationStore::key(&id), "conv:abc-123");
        }
    }

    // Live tests need a local Redis. Run with: cargo test -- --ignored
    mod live {
        use super::*;

        async fn connect() -> RedisConversationStore {
            let client = redis::Client::open("redis://127.0.0.1/").unwrap();
            let conn = client.get_multiplexed_tokio_connection().await.unwrap();
            RedisConversationStore::new(conn, Duration::from_secs(60))
        }

        #[tokio::test]
        #[ignore]
        async fn roundtrip_through_redis() {
            let store = connect().await;
            let conversation = sample_conversation();

            store.set(&conversation).await.unwrap();
            let loaded = store.get(conversation.id()).await.unwrap().unwrap();
            assert_eq!(loaded, conversation);

            store.delete(conversation.id()).await.unwrap();
            assert!(!store.exists(conversation.id()).await.unwrap());
        }

        #[tokio::test]
        #[ignore]
        async fn set_applies_the_configured_ttl() {
            let store = connect().await;
            let conversation = sample_conversation();

            store.set(&conversation).await.unwrap();

            let mut conn = store.conn.clone();
            let ttl: i64 = conn
                .ttl(RedisConversationStore::key(conversation.id()))
                .await
                .unwrap();
            assert!(ttl > 0 && ttl <= 60, "unexpected expiry: {}", ttl);

            store.delete(conversation.id()).await.unwrap();
        }

        #[tokio::test]
        #[ignore]
        async fn trim_persists_the_capped_history() {
            let store = connect().await;
            let mut conversation = Conversation::new("tea", "pro tea", "tea beats coffee");
            for i in 0..8 {
                conversation.push_user(format!("point {}", i));
                conversation.push_bot(format!("counter {}", i));
            }
            store.set(&conversation).await.unwrap();

            let trimmed = store.trim(conversation.id(), 3).await.unwrap().unwrap();
            assert_eq!(trimmed.history().len(), 6);

            let reloaded = store.get(conversation.id()).await.unwrap().unwrap();
            assert_eq!(reloaded.history(), trimmed.history());

            store.delete(conversation.id()).await.unwrap();
        }
    }
}
