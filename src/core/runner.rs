//! # Worker runner: detached execution of one admitted body.
//!
//! The runner owns a task from the moment the gate registers its handle. It
//! runs the body to completion and then settles the bookkeeping, whatever the
//! body did:
//!
//! ```text
//! Success:       body → Ok(())            → mark_done → remove
//! Cancellation:  body → Err(Canceled)     → mark_done → remove
//! Failure:       body → Err(Fail)         → mark_done → remove + debug record
//! Panic:         body → panic (caught)    → mark_done → remove + debug record
//! ```
//!
//! ## Rules
//! - `mark_done` happens **before** `remove`, so the reaper only ever removes
//!   entries whose body has actually returned.
//! - Failures never propagate to the caller of `try_run` and never prevent
//!   the removal.
//! - The runner installs nothing beyond the handle's token; cancellation is
//!   cooperative and the body may ignore it (occupying its slot until it
//!   returns).

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

use crate::core::live::{LiveSet, TaskHandle};
use crate::ports::{guarded_log, LogLevel, Logger};
use crate::tasks::TaskRef;

/// Spawns the body detached and settles bookkeeping on termination.
pub(crate) fn spawn_worker(
    live: Arc<LiveSet>,
    handle: TaskHandle,
    task: TaskRef,
    logger: Arc<dyn Logger>,
) {
    tokio::spawn(async move {
        let body = task.run(handle.token());
        let outcome = AssertUnwindSafe(body).catch_unwind().await;

        handle.mark_done();
        live.remove(handle.id()).await;

        match outcome {
            Ok(Ok(())) => {}
            Ok(Err(e)) if e.is_canceled() => {}
            Ok(Err(e)) => {
                let msg = format!(
                    "task={} id={} {}: {e}",
                    handle.name(),
                    handle.id(),
                    e.as_label()
                );
                guarded_log(&logger, LogLevel::Debug, &msg).await;
            }
            Err(_panic) => {
                let msg = format!("task={} id={} panicked", handle.name(), handle.id());
                guarded_log(&logger, LogLevel::Debug, &msg).await;
            }
        }
    });
}
