//! Mock chat model for testing.
//!
//! Queues pre-configured replies or errors, records every request for
//! verification, and never touches the network.
//!
//! # Example
//!
//! ```ignore
//! let model = MockChatModel::new()
//!     .with_reply("Tea has no edge over coffee.")
//!     .with_error(ModelError::RateLimited);
//!
//! let reply = model.complete(&request).await?;
//! assert_eq!(model.call_count(), 1);
//! ```

use async_trait::async_trait;
use std::collections::VecDeque;
use std::sync::{Arc, Mutex};

use crate::ports::{ChatModel, CompletionRequest, ModelError};

/// Configurable test double for the `ChatModel` port.
///
/// Responses are consumed in order; once the queue is empty every call
/// yields a default reply.
#[derive(Debug, Clone, Default)]
pub struct MockChatModel {
    /// Pre-configured outcomes (consumed in order).
    outcomes: Arc<Mutex<VecDeque<Result<String, ModelError>>>>,
    /// Call history for verification.
    calls: Arc<Mutex<Vec<CompletionRequest>>>,
}

impl MockChatModel {
    /// Creates a mock with an empty queue.
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a successful reply to the queue.
    pub fn with_reply(self, content: impl Into<String>) -> Self {
        self.outcomes.lock().unwrap().push_back(Ok(content.into()));
        self
    }

    /// Adds an error to the queue.
    pub fn with_error(self, error: ModelError) -> Self {
        self.outcomes.lock().unwrap().push_back(Err(error));
        self
    }

    /// Returns the number of calls made to this model.
    pub fn call_count(&self) -> usize {
        self.calls.lock().unwrap().len()
    }

    /// Returns all recorded requests.
    pub fn requests(&self) -> Vec<CompletionRequest> {
        self.calls.lock().unwrap().clone()
    }

    /// Gets the next outcome or a default reply.
    fn next_outcome(&self) -> Result<String, ModelError> {
        self.outcomes
            .lock()
            .unwrap()
            .pop_front()
            .unwrap_or_else(|| Ok("Mock reply".to_string()))
    }
}

#[async_trait]
impl ChatModel for MockChatModel {
    async fn complete(&self, request: &CompletionRequest) -> Result<String, ModelError> {
        self.calls.lock().unwrap().push(request.clone());
        self.next_outcome()
    }
}
