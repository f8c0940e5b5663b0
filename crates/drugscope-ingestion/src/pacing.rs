//! Inter-request pacing.
//!
//! The pipeline pauses after each unit of remote work to avoid overwhelming
//! the source services. The pause sits behind a single trait so the fixed
//! delay can later be replaced with adaptive throttling without touching the
//! pipeline.

use async_trait::async_trait;
use std::time::Duration;

#[async_trait]
pub trait Pacer: Send + Sync {
    async fn pause(&self);
}

/// Fixed delay between units of work. No adaptive backoff, no retry.
pub struct FixedDelay {
    delay: Duration,
}

impl FixedDelay {
    pub fn new(delay: Duration) -> Self {
        Self { delay }
    }
}

impl Default for FixedDelay {
    fn default() -> Self {
        Self::new(Duration::from_millis(500))
    }
}

#[async_trait]
impl Pacer for FixedDelay {
    async fn pause(&self) {
        tokio::time::sleep(self.delay).await;
    }
}

/// No-op pacer for tests.
pub struct NoPause;

#[async_trait]
impl Pacer for NoPause {
    async fn pause(&self) {}
}
