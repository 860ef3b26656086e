//! # Budget: the admission gate and shutdown driver.
//!
//! [`Budget`] decides, under a single critical section over the live set,
//! whether a presented task may run. Admitted tasks execute detached via the
//! worker runner; over-budget tasks are dropped with one `info` record whose
//! message contains `"out of budget"`.
//!
//! ## Rules
//! - An admission never pushes the live count past the configured limit.
//! - Exactly one log record per rejection; none per acceptance.
//! - The critical section holds for O(1) time; the spawn happens after it is
//!   released, and the rejection record is emitted after it is released (so
//!   a serial caller still observes records in admission order).
//! - Admissions racing [`shutdown`](Budget::shutdown) resolve to
//!   [`Admission::Rejected`] without a record: the closed flag is checked
//!   under the same critical section as the size check, so an admission
//!   never lands once shutdown has closed the gate.

use std::sync::Arc;

use tokio::time::timeout;
use tokio_util::sync::CancellationToken;

use crate::config::Config;
use crate::core::live::{Admit, LiveSet, TaskId};
use crate::core::runner;
use crate::ports::{guarded_log, LogLevel, Logger};
use crate::tasks::TaskRef;

/// Outcome of presenting a task to the gate.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Admission {
    /// The task is live and runs detached under the returned id.
    Admitted(TaskId),
    /// The task was dropped: the budget is full or shutting down.
    Rejected,
}

impl Admission {
    /// True when the task was admitted.
    pub fn is_admitted(&self) -> bool {
        matches!(self, Admission::Admitted(_))
    }
}

/// Admission controller over a fixed live-task ceiling.
///
/// Cheap to clone; clones share the same live set, limit, and logger. Ports
/// are passed in explicitly at construction — there is no ambient context.
#[derive(Clone)]
pub struct Budget {
    cfg: Config,
    live: Arc<LiveSet>,
    logger: Arc<dyn Logger>,
    root: CancellationToken,
}

impl Budget {
    /// Creates a budget with the given configuration and logger port.
    pub fn new(cfg: Config, logger: Arc<dyn Logger>) -> Self {
        Self {
            cfg,
            live: Arc::new(LiveSet::new()),
            logger,
            root: CancellationToken::new(),
        }
    }

    /// Returns the configuration the budget was built with.
    pub fn config(&self) -> &Config {
        &self.cfg
    }

    /// Presents a task to the gate.
    ///
    /// On admission the body starts detached with a child token of the
    /// budget's root token and the handle is already observable in
    /// [`size`](Budget::size) by the time this returns. On rejection the body
    /// is never run; one `info` record containing `"out of budget"` is
    /// emitted, except when the budget is shutting down.
    pub async fn try_run(&self, task: TaskRef) -> Admission {
        let limit = self.cfg.limit_clamped();
        let admitted = self
            .live
            .admit(limit, task.name(), self.root.child_token())
            .await;

        match admitted {
            Admit::Admitted(handle) => {
                let id = handle.id();
                runner::spawn_worker(
                    Arc::clone(&self.live),
                    handle,
                    task,
                    Arc::clone(&self.logger),
                );
                Admission::Admitted(id)
            }
            Admit::Full => {
                let msg = format!("task={} out of budget (limit={limit})", task.name());
                guarded_log(&self.logger, LogLevel::Info, &msg).await;
                Admission::Rejected
            }
            Admit::Closed => Admission::Rejected,
        }
    }

    /// Current number of live tasks.
    pub async fn size(&self) -> usize {
        self.live.size().await
    }

    /// Requests every live task to stop. Does not wait.
    pub async fn cancel_all(&self) {
        self.live.cancel_all().await;
    }

    /// Gracefully shuts the budget down.
    ///
    /// 1. Closes the gate under the admission critical section (subsequent
    ///    and concurrently racing [`try_run`](Budget::try_run) calls return
    ///    [`Admission::Rejected`] without logging).
    /// 2. Cancels the root token, which stops the reaper and signals every
    ///    live task.
    /// 3. Waits up to [`Config::grace`] for the live set to drain.
    ///
    /// Idempotent and total: never returns an error. If the grace period
    /// elapses with tasks still live, the stuck ids are reported as a debug
    /// record and shutdown returns anyway.
    pub async fn shutdown(&self) {
        self.live.close().await;
        self.root.cancel();
        self.live.cancel_all().await;

        if timeout(self.cfg.grace, self.live.wait_empty()).await.is_err() {
            let stuck: Vec<String> = self
                .live
                .snapshot()
                .await
                .iter()
                .map(|h| h.id().to_string())
                .collect();
            let msg = format!(
                "shutdown grace {:?} exceeded; stuck ids: [{}]",
                self.cfg.grace,
                stuck.join(", ")
            );
            guarded_log(&self.logger, LogLevel::Debug, &msg).await;
        }
    }

    // ---------------------------
    // Internal accessors (reaper wiring)
    // ---------------------------

    pub(crate) fn live(&self) -> &Arc<LiveSet> {
        &self.live
    }

    pub(crate) fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    pub(crate) fn root_token(&self) -> &CancellationToken {
        &self.root
    }
}
