//! Sleeper Port - Injectable delay between retry attempts.

use async_trait::async_trait;
use std::time::Duration;

/// Port for the delay between retry attempts.
///
/// Production uses the tokio timer; tests substitute a no-op so backoff
/// paths run instantly and deterministically.
#[async_trait]
pub trait Sleeper: Send + Sync {
    /// Waits for the given duration.
    async fn sleep(&self, duration: Duration);
}

/// Production sleeper backed by the tokio timer.
#[derive(Debug, Clone, Copy, Default)]
pub struct TokioSleeper;

#[async_trait]
impl Sleeper for TokioSleeper {
    async fn sleep(&self, duration: Duration) {
        tokio::time::sleep(duration).await;
    }
}
