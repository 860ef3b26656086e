//! # Reaper: periodic bookkeeping sweep.
//!
//! The reaper is defense in depth: the worker runner already removes a
//! task's handle when its body returns, so correctness of the limit does not
//! depend on the reaper. What does depend on it is the freshness of the
//! live-count gauge and resilience against a removal that never ran.
//!
//! Each tick (every `reaper_interval`, slept through the [`Clock`] port):
//! 1. Snapshot the live set.
//! 2. Remove every handle whose done flag is set.
//! 3. Publish the live count as the [`LIVE_GAUGE`] gauge.
//!
//! ## Rules
//! - The reaper only removes entries whose body has already returned; it
//!   never cancels or touches running tasks.
//! - Port panics are caught and reported out-of-band; the loop continues.
//! - The loop token is a child of the budget's root token, so
//!   [`Budget::shutdown`](crate::Budget::shutdown) stops the reaper too.

use std::sync::Arc;

use tokio::task::JoinHandle;
use tokio_util::sync::CancellationToken;

use crate::core::budget::Budget;
use crate::ports::{guarded_gauge, guarded_log, Clock, LogLevel, Metrics};

/// Gauge name under which the reaper publishes the live-task count.
pub const LIVE_GAUGE: &str = "thread_budget.live";

/// Handle to a running reaper loop.
pub struct ReaperHandle {
    token: CancellationToken,
    join: JoinHandle<()>,
}

impl ReaperHandle {
    /// Requests the loop to stop. Idempotent.
    pub fn stop(&self) {
        self.token.cancel();
    }

    /// Awaits the loop's exit, consuming the handle.
    pub async fn stopped(self) {
        let _ = self.join.await;
    }

    /// True once the loop has exited.
    pub fn is_finished(&self) -> bool {
        self.join.is_finished()
    }
}

/// Periodic bookkeeping process for a [`Budget`].
pub struct Reaper;

impl Reaper {
    /// Spawns the reaper loop for `budget`.
    ///
    /// The interval comes from the budget's [`Config`](crate::Config); the
    /// metrics and clock ports are passed explicitly. Stop the loop via
    /// [`ReaperHandle::stop`] or by shutting the budget down.
    pub fn spawn(
        budget: &Budget,
        metrics: Arc<dyn Metrics>,
        clock: Arc<dyn Clock>,
    ) -> ReaperHandle {
        let token = budget.root_token().child_token();
        let live = Arc::clone(budget.live());
        let logger = Arc::clone(budget.logger());
        let interval = budget.config().reaper_interval_clamped();

        let loop_token = token.clone();
        let join = tokio::spawn(async move {
            loop {
                tokio::select! {
                    _ = loop_token.cancelled() => break,
                    _ = clock.sleep(interval) => {}
                }

                let mut reaped = 0usize;
                for handle in live.snapshot().await {
                    if handle.is_done() {
                        live.remove(handle.id()).await;
                        reaped += 1;
                    }
                }
                if reaped > 0 {
                    let msg = format!("reaped {reaped} finished entries");
                    guarded_log(&logger, LogLevel::Debug, &msg).await;
                }

                let size = live.size().await;
                guarded_gauge(&metrics, LIVE_GAUGE, size as u64).await;
            }
        });

        ReaperHandle { token, join }
    }
}
