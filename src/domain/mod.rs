//! Domain layer containing business logic and domain types.
//!
//! # Module Organization
//!
//! - `conversation` - Conversation state: ids, utterances, history trimming
//! - `debate` - Pure debate heuristics: parsing, injection screening,
//!   repetition, relevance, reply templates

pub mod conversation;
pub mod debate;
