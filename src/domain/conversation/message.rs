//! Conversation primitives: identifiers, roles, utterances.
//!
//! An utterance is an immutable record of one turn in a debate. Roles are
//! limited to the two visible speakers; system instructions never enter the
//! stored history.

use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

/// Unique identifier for a debate conversation.
///
/// Opaque: ids are generated here as UUID text but never parsed or
/// interpreted afterwards, so a lookup with an id this service never issued
/// simply misses instead of failing to decode.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConversationId(String);

impl ConversationId {
    /// Creates a new random ConversationId.
    pub fn new() -> Self {
        Self(Uuid::new_v4().to_string())
    }

    /// Returns the inner string slice.
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl Default for ConversationId {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for ConversationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<String> for ConversationId {
    fn from(id: String) -> Self {
        Self(id)
    }
}

impl From<&str> for ConversationId {
    fn from(id: &str) -> Self {
        Self(id.to_string())
    }
}

/// Role of an utterance's speaker.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    /// The human debater.
    User,
    /// The debate opponent.
    Bot,
}

impl Role {
    /// Returns the wire name of the role.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::User => "user",
            Self::Bot => "bot",
        }
    }
}

/// A single turn in a debate conversation.
///
/// Immutable once created. Text is normally non-empty; fallback paths may
/// produce short canned text but never empty strings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Utterance {
    role: Role,
    text: String,
}

impl Utterance {
    /// Creates an utterance with the given role and text.
    pub fn new(role: Role, text: impl Into<String>) -> Self {
        Self {
            role,
            text: text.into(),
        }
    }

    /// Creates a user utterance.
    pub fn user(text: impl Into<String>) -> Self {
        Self::new(Role::User, text)
    }

    /// Creates a bot utterance.
    pub fn bot(text: impl Into<String>) -> Self {
        Self::new(Role::Bot, text)
    }

    /// Returns the speaker role.
    pub fn role(&self) -> Role {
        self.role
    }

    /// Returns the utterance text.
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Returns true if this utterance is from the user.
    pub fn is_user(&self) -> bool {
        self.role == Role::User
    }

    /// Returns true if this utterance is from the bot.
    pub fn is_bot(&self) -> bool {
        self.role == Role::Bot
    }
}
