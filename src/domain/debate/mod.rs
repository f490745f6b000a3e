//! Debate heuristics: the pure components of the reply-decision engine.
//!
//! # Module Organization
//!
//! - `parser` - topic/stance/thesis extraction from the opening message
//! - `injection` - prompt-injection detection and text sanitization
//! - `similarity` - near-duplicate detection between user turns
//! - `relevance` - on-topic classification against the thesis
//! - `reply` - canned reply templates anchored to the thesis
//!
//! Everything here is a pure function of its inputs; no IO, no state.

pub mod injection;
pub mod parser;
pub mod relevance;
pub mod reply;
pub mod similarity;

pub use injection::{detect_injection, sanitize_text};
pub use parser::{inline_topic_hint, parse, DebateFrame};
pub use relevance::is_on_topic;
pub use similarity::{is_repeat, REPEAT_SIMILARITY};
