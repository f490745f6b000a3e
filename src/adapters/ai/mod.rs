//! AI adapters - implementations of the `ChatModel` port.
//!
//! - `OpenAIChatModel` - OpenAI chat-completions client
//! - `MockChatModel` - configurable test double

mod mock_model;
mod openai;

pub use mock_model::MockChatModel;
pub use openai::{OpenAIChatModel, OpenAIConfig};
