//! Conversation aggregate: the persisted unit of debate state.

use super::message::{ConversationId, Role, Utterance};

/// A debate conversation.
///
/// Topic, stance and thesis are fixed when the conversation is created from
/// the first message and never change afterwards, so every reply stays
/// anchored to the original thesis. History is chronological and grows by
/// one user and one bot utterance per turn.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Conversation {
    id: ConversationId,
    topic: String,
    stance: String,
    thesis: String,
    history: Vec<Utterance>,
}

impl Conversation {
    /// Creates a new conversation with a generated id and empty history.
    pub fn new(
        topic: impl Into<String>,
        stance: impl Into<String>,
        thesis: impl Into<String>,
    ) -> Self {
        Self {
            id: ConversationId::new(),
            topic: topic.into(),
            stance: stance.into(),
            thesis: thesis.into(),
            history: Vec::new(),
        }
    }

    /// Rebuilds a conversation from persisted parts (no validation).
    pub fn reconstitute(
        id: ConversationId,
        topic: String,
        stance: String,
        thesis: String,
        history: Vec<Utterance>,
    ) -> Self {
        Self {
            id,
            topic,
            stance,
            thesis,
            history,
        }
    }

    /// Returns the conversation id.
    pub fn id(&self) -> &ConversationId {
        &self.id
    }

    /// Returns the debate topic.
    pub fn topic(&self) -> &str {
        &self.topic
    }

    /// Returns the stance the bot argues from.
    pub fn stance(&self) -> &str {
        &self.stance
    }

    /// Returns the thesis the bot defends.
    pub fn thesis(&self) -> &str {
        &self.thesis
    }

    /// Returns the chronological history.
    pub fn history(&self) -> &[Utterance] {
        &self.history
    }

    /// Returns the text of the most recent user utterance, if any.
    ///
    /// Call this before appending the current turn to obtain the previous
    /// user text for repetition checks.
    pub fn last_user_text(&self) -> Option<&str> {
        self.history
            .iter()
            .rev()
            .find(|u| u.is_user())
            .map(Utterance::text)
    }

    /// Returns the text of the most recent bot utterance, if any.
    pub fn last_bot_text(&self) -> Option<&str> {
        self.history
            .iter()
            .rev()
            .find(|u| u.is_bot())
            .map(Utterance::text)
    }

    /// Appends a user utterance.
    pub fn push_user(&mut self, text: impl Into<String>) {
        self.history.push(Utterance::user(text));
    }

    /// Appends a bot utterance.
    pub fn push_bot(&mut self, text: impl Into<String>) {
        self.history.push(Utterance::bot(text));
    }

    /// Trims history in place to at most `keep_last` utterances per role.
    pub fn trim(&mut self, keep_last: usize) {
        self.history = trim_history(&self.history, keep_last);
    }
}

/// Trims a history to at most `keep_last` utterances per role.
///
/// Walks from the most recent utterance backward keeping up to `keep_last`
/// per role, then restores chronological order. Ties always favor the most
/// recent occurrences. Idempotent.
pub fn trim_history(history: &[Utterance], keep_last: usize) -> Vec<Utterance> {
    let mut kept: Vec<Utterance> = Vec::with_capacity(history.len().min(keep_last * 2));
    let mut users = 0;
    let mut bots = 0;

    for utterance in history.iter().rev() {
        let count = match utterance.role() {
            Role::User => &mut users,
            Role::Bot => &mut bots,
        };
        if *count < keep_last {
            kept.push(utterance.clone());
            *count += 1;
        }
    }

    kept.reverse();
    kept
}
