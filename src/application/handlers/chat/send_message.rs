//! SendMessage command handler.
//!
//! One debate turn end to end: validate the wire fields, resolve the
//! conversation (creating it from the first message when no id is given),
//! append the user utterance, compose the bot reply, persist, and return
//! the trimmed history view.

use std::sync::Arc;

use thiserror::Error;
use tracing::debug;

use crate::domain::conversation::{Conversation, ConversationId, Utterance};
use crate::domain::debate::{inline_topic_hint, parse};
use crate::ports::{ConversationStore, ReplyEngine, StoreError};

/// Longest accepted user message, in characters.
pub const MAX_MESSAGE_CHARS: usize = 2000;

/// Longest accepted caller-supplied topic, in characters.
pub const MAX_TOPIC_CHARS: usize = 200;

/// Command to send one user message to a debate conversation.
#[derive(Debug, Clone)]
pub struct SendMessageCommand {
    /// Existing conversation to continue, or None to open a new one.
    pub conversation_id: Option<String>,
    /// The user's message, taken as written.
    pub message: String,
    /// Optional topic override for a new conversation.
    pub topic: Option<String>,
}

/// Errors from sending a message.
#[derive(Debug, Error)]
pub enum SendMessageError {
    /// Message was empty or whitespace.
    #[error("Message cannot be empty.")]
    EmptyMessage,

    /// Message exceeded the length cap.
    #[error("Message is too long (max {} characters).", MAX_MESSAGE_CHARS)]
    MessageTooLong,

    /// Topic exceeded the length cap.
    #[error("Topic is too long (max {} characters).", MAX_TOPIC_CHARS)]
    TopicTooLong,

    /// The given conversation id is unknown.
    #[error("Conversation not found.")]
    ConversationNotFound,

    /// The conversation store failed.
    #[error(transparent)]
    Store(#[from] StoreError),
}

/// Result of one debate turn: the id to continue with and the trimmed
/// history, ending with the bot's reply.
#[derive(Debug, Clone)]
pub struct SendMessageResult {
    /// Conversation id, generated on the first turn.
    pub conversation_id: ConversationId,
    /// Trimmed chronological history including the new turn.
    pub history: Vec<Utterance>,
}

/// Handler for the SendMessage command.
pub struct SendMessageHandler {
    store: Arc<dyn ConversationStore>,
    engine: Arc<dyn ReplyEngine>,
    history_keep: usize,
}

impl SendMessageHandler {
    /// Creates the handler. `history_keep` caps stored and returned history
    /// at that many utterances per role.
    pub fn new(
        store: Arc<dyn ConversationStore>,
        engine: Arc<dyn ReplyEngine>,
        history_keep: usize,
    ) -> Self {
        Self {
            store,
            engine,
            history_keep,
        }
    }

    /// Executes one debate turn.
    pub async fn handle(
        &self,
        command: SendMessageCommand,
    ) -> Result<SendMessageResult, SendMessageError> {
        if command.message.trim().is_empty() {
            return Err(SendMessageError::EmptyMessage);
        }
        if command.message.chars().count() > MAX_MESSAGE_CHARS {
            return Err(SendMessageError::MessageTooLong);
        }
        if let Some(topic) = &command.topic {
            if topic.chars().count() > MAX_TOPIC_CHARS {
                return Err(SendMessageError::TopicTooLong);
            }
        }

        let mut conversation = match &command.conversation_id {
            Some(id) => {
                let id = ConversationId::from(id.as_str());
                self.store
                    .get(&id)
                    .await?
                    .ok_or(SendMessageError::ConversationNotFound)?
            }
            None => self.open_conversation(&command),
        };

        let previous_user_text = conversation.last_user_text().map(str::to_string);
        conversation.push_user(&command.message);

        let reply = self
            .engine
            .compose(&conversation, &command.message, previous_user_text.as_deref())
            .await;
        conversation.push_bot(reply);

        self.store.set(&conversation).await?;
        let trimmed = match self.store.trim(conversation.id(), self.history_keep).await? {
            Some(trimmed) => trimmed,
            // Gone between set and trim (e.g. TTL expiry); trim the local
            // copy so the response view is capped either way.
            None => {
                conversation.trim(self.history_keep);
                conversation
            }
        };

        Ok(SendMessageResult {
            conversation_id: trimmed.id().clone(),
            history: trimmed.history().to_vec(),
        })
    }

    /// Opens a conversation from the first message. The debate frame comes
    /// from the parser; an explicit topic wins over an inline "topic:" hint,
    /// which wins over the parsed topic.
    fn open_conversation(&self, command: &SendMessageCommand) -> Conversation {
        let frame = parse(&command.message);
        let topic = command
            .topic
            .as_deref()
            .map(str::trim)
            .filter(|topic| !topic.is_empty())
            .map(str::to_string)
            .or_else(|| inline_topic_hint(&command.message))
            .unwrap_or(frame.topic);
        debug!(topic = %topic, stance = %frame.stance, "opening conversation");
        Conversation::new(topic, frame.stance, frame.thesis)
    }
}
