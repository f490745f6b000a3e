//! Topic, stance and thesis extraction from the first message.
//!
//! Three phrase patterns are tried in order; the first match wins. Anything
//! else falls back to treating the whole message as both topic and thesis
//! with an unknown stance.

use once_cell::sync::Lazy;
use regex::Regex;

/// The fixed frame of a debate, derived once from the opening message.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DebateFrame {
    /// Subject of the debate.
    pub topic: String,
    /// Side the bot argues from ("pro X", "con X", or "unknown").
    pub stance: String,
    /// The claim the bot defends for the whole conversation.
    pub thesis: String,
}

static BETTER_THAN_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)why\s+(.+?)\s+is\s+better\s+than\s+(.+)").expect("better-than pattern compiles")
});
static AGAINST_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)(?:argue|debate|explain)\s+against\s+(.+)").expect("against pattern compiles")
});
static IS_WRONG_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)why\s+(.+?)\s+is\s+wrong").expect("is-wrong pattern compiles"));
static TOPIC_HINT_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?:topic|debate)\s*:\s*(.+)$").expect("topic hint pattern compiles")
});

/// Infers topic, stance and thesis from the user's first free-form message.
///
/// Ordered heuristics, no model call:
/// - "why X is better than Y" -> pro X
/// - "argue against X" / "debate against X" / "explain against X" -> con X
/// - "why X is wrong" -> con X
/// - otherwise the trimmed message is both topic and thesis
pub fn parse(first_message: &str) -> DebateFrame {
    let text = first_message.trim();

    if let Some(caps) = BETTER_THAN_RE.captures(text) {
        let x = caps[1].trim();
        let y = caps[2].trim().trim_end_matches(['.', '!', '?']);
        return DebateFrame {
            topic: format!("{} vs {}", x, y),
            stance: format!("pro {}", x),
            thesis: format!("{} is better than {}", x, y),
        };
    }

    if let Some(caps) = AGAINST_RE.captures(text) {
        let x = caps[1].trim().trim_end_matches(['.', '!', '?']);
        return DebateFrame {
            topic: x.to_string(),
            stance: format!("con {}", x),
            thesis: format!("{} is not correct", x),
        };
    }

    if let Some(caps) = IS_WRONG_RE.captures(text) {
        let x = caps[1].trim().trim_end_matches(['.', '!', '?']);
        return DebateFrame {
            topic: x.to_string(),
            stance: format!("con {}", x),
            thesis: format!("{} is wrong", x),
        };
    }

    DebateFrame {
        topic: text.to_string(),
        stance: "unknown".to_string(),
        thesis: text.to_string(),
    }
}

/// Extracts an inline topic hint of the form "topic: X" or "debate: X".
///
/// Hints only override the derived topic; stance and thesis always come
/// from [`parse`].
pub fn inline_topic_hint(text: &str) -> Option<String> {
    let lowered = text.trim().to_lowercase();
    TOPIC_HINT_RE
        .captures(&lowered)
        .map(|caps| caps[1].trim().to_string())
}
