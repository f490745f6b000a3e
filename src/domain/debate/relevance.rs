//! Topic-relevance classification for user turns.
//!
//! A turn is judged on-topic by cheap lexical signals, checked in order:
//! keyword overlap with the thesis, then a small follow-up vocabulary that
//! marks engagement without overlap ("why?", "give me an example"). Identity
//! probes and keyword-poor turns are off-topic, as is anything left over.

use once_cell::sync::Lazy;
use regex::Regex;
use std::collections::HashSet;

/// Turns with this many distinct keywords or fewer are off-topic unless an
/// earlier signal matched. Policy constant, not a tuned value.
pub const MIN_DISTINCT_KEYWORDS: usize = 2;

/// Common function and debate words that carry no topical signal.
static STOPWORDS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "the", "and", "for", "that", "this", "with", "have", "you", "but", "not", "are", "was",
        "has", "why", "better", "than", "can", "your", "about", "what", "when", "where", "which",
        "who", "would", "could", "should", "please", "explain", "tell", "more",
    ])
});

/// Generic continuation words that signal engagement with the debate even
/// without lexical overlap with the thesis.
static FOLLOWUPS: Lazy<HashSet<&'static str>> = Lazy::new(|| {
    HashSet::from([
        "why",
        "how",
        "example",
        "examples",
        "explain",
        "more",
        "details",
        "prove",
        "evidence",
        "source",
        "sources",
        "clarify",
        "elaborate",
        "convinced",
        "convince",
        "agree",
        "disagree",
        "believe",
        "think",
    ])
});

static KEYWORD_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z]{3,}").expect("keyword pattern compiles"));
static SHORT_TOKEN_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"[a-zA-Z]{2,}").expect("short token pattern compiles"));
static IDENTITY_PROBE_RE: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"\b(your name|who are you|what\s+is\s+your\s+name)\b")
        .expect("identity probe pattern compiles")
});

/// Extracts the topical keywords of a text: alphabetic tokens of three or
/// more characters, lower-cased, minus the stop-word set.
pub fn keywords(text: &str) -> HashSet<String> {
    let lowered = text.to_lowercase();
    KEYWORD_RE
        .find_iter(&lowered)
        .map(|m| m.as_str().to_string())
        .filter(|word| !STOPWORDS.contains(word.as_str()))
        .collect()
}

/// Decides whether a user turn is relevant to the debate thesis.
pub fn is_on_topic(user_text: &str, thesis: &str) -> bool {
    let user_keywords = keywords(user_text);
    let thesis_keywords = keywords(thesis);

    // Shared keywords with the thesis settle it immediately.
    if user_keywords
        .intersection(&thesis_keywords)
        .next()
        .is_some()
    {
        return true;
    }

    // Generic follow-ups ("why?", "any evidence?") count as engagement.
    let lowered = user_text.to_lowercase();
    if SHORT_TOKEN_RE
        .find_iter(&lowered)
        .any(|m| FOLLOWUPS.contains(m.as_str()))
    {
        return true;
    }

    if IDENTITY_PROBE_RE.is_match(&lowered) {
        return false;
    }

    if user_keywords.len() <= MIN_DISTINCT_KEYWORDS {
        return false;
    }

    false
}
