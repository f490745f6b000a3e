//! Reply Engine Port - Produces the bot's reply for one turn.

use async_trait::async_trait;

use crate::domain::conversation::Conversation;

/// Port for composing the bot reply to the current user turn.
///
/// The conversation already contains the current user utterance when this
/// is called. `previous_user_text` is the user's prior turn, captured
/// before the current one was appended, for repetition checks.
///
/// Engines never fail: every failure mode inside an implementation must
/// degrade to safe fallback text.
#[async_trait]
pub trait ReplyEngine: Send + Sync {
    /// Composes the reply text for the current turn.
    async fn compose(
        &self,
        conversation: &Conversation,
        user_text: &str,
        previous_user_text: Option<&str>,
    ) -> String;
}
