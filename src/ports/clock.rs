//! # Clock port.
//!
//! [`Clock`] abstracts time for the reaper's periodic scheduling. The
//! default [`TokioClock`] delegates to the tokio timer, so tests running
//! under a paused runtime (`start_paused`) drive the reaper deterministically
//! with `tokio::time::advance`.

use std::time::Duration;

use async_trait::async_trait;
use tokio::time::Instant;

/// Monotonic clock.
#[async_trait]
pub trait Clock: Send + Sync + 'static {
    /// Returns the current instant.
    fn now(&self) -> Instant;

    /// Sleeps for the given duration.
    async fn sleep(&self, dur: Duration);
}

/// Clock backed by the tokio timer.
pub struct TokioClock;

#[async_trait]
impl Clock for TokioClock {
    fn now(&self) -> Instant {
        Instant::now()
    }

    async fn sleep(&self, dur: Duration) {
        tokio::time::sleep(dur).await;
    }
}
