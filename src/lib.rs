//! Rebuttal - HTTP Debate-Opponent Service
//!
//! The first message of a conversation fixes a topic, a stance, and a thesis;
//! every later reply argues that same side, composed either from canned
//! templates or by an external chat model with local screening and fallbacks.

pub mod adapters;
pub mod application;
pub mod config;
pub mod domain;
pub mod ports;
