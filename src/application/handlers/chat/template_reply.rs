//! Deterministic reply engine for mock mode.
//!
//! Composes every reply from the domain templates, no model call involved.
//! Decision order for a turn: repeated user point, off-topic drift, then the
//! alternating rebuttal templates.

use async_trait::async_trait;

use crate::domain::conversation::Conversation;
use crate::domain::debate::reply::{
    alternate_reply, same_point_reply, stance_claim, stay_on_topic_reply,
};
use crate::domain::debate::{is_on_topic, is_repeat};
use crate::ports::ReplyEngine;

/// Template-driven reply engine.
///
/// Every reply embeds the literal thesis, so the bot's position stays
/// anchored no matter where the user steers.
#[derive(Debug, Clone, Copy, Default)]
pub struct TemplateReplyEngine;

impl TemplateReplyEngine {
    /// Creates the engine.
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl ReplyEngine for TemplateReplyEngine {
    async fn compose(
        &self,
        conversation: &Conversation,
        user_text: &str,
        previous_user_text: Option<&str>,
    ) -> String {
        if let Some(previous) = previous_user_text {
            if is_repeat(user_text, previous) {
                return same_point_reply(&stance_claim(conversation.thesis()));
            }
        }

        if !is_on_topic(user_text, conversation.thesis()) {
            return stay_on_topic_reply(conversation.topic(), conversation.thesis());
        }

        alternate_reply(conversation.thesis(), conversation.last_bot_text())
    }
}
