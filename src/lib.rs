//! # taskbudget
//!
//! **Taskbudget** is a lightweight admission controller for async worker tasks.
//!
//! It caps the number of tasks that may be in flight simultaneously: an
//! admission either runs detached under the budget or is rejected with a
//! structured "out of budget" log record. A background reaper keeps the
//! bookkeeping honest, and shutdown cancels everything that is still live.
//!
//! ## Features
//!
//! | Area              | Description                                                       | Key types / traits                 |
//! |-------------------|-------------------------------------------------------------------|------------------------------------|
//! | **Admission**     | Admit-or-reject gate over a configurable live-task ceiling.       | [`Budget`], [`Admission`]          |
//! | **Reaping**       | Periodic cleanup of finished entries plus a live-count gauge.     | [`Reaper`], [`ReaperHandle`]       |
//! | **Ports**         | Explicit sinks for logs and metrics, and a clock seam for tests.  | [`Logger`], [`Metrics`], [`Clock`] |
//! | **Tasks**         | Define cancellable task bodies as functions or trait impls.       | [`TaskRef`], [`TaskFn`], [`Task`]  |
//! | **Errors**        | Typed outcomes for task bodies; never surfaced from the core API. | [`TaskError`]                      |
//! | **Configuration** | Centralize the ceiling, reaper cadence, and shutdown grace.       | [`Config`]                         |
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//! use tokio_util::sync::CancellationToken;
//! use taskbudget::{
//!     Admission, Budget, Config, NullMetrics, Reaper, StdoutLogger, TaskFn, TaskRef, TokioClock,
//! };
//!
//! #[tokio::main(flavor = "current_thread")]
//! async fn main() {
//!     let mut cfg = Config::default();
//!     cfg.limit = 8;
//!     cfg.reaper_interval = Duration::from_millis(50);
//!
//!     let budget = Budget::new(cfg, Arc::new(StdoutLogger));
//!     let reaper = Reaper::spawn(&budget, Arc::new(NullMetrics), Arc::new(TokioClock));
//!
//!     // A delivery that may block on an external server for a while.
//!     let push: TaskRef = TaskFn::arc("push", |ctx: CancellationToken| async move {
//!         tokio::select! {
//!             _ = ctx.cancelled() => Err(taskbudget::TaskError::Canceled),
//!             _ = tokio::time::sleep(Duration::from_secs(2)) => Ok(()),
//!         }
//!     });
//!
//!     match budget.try_run(push).await {
//!         Admission::Admitted(id) => println!("delivery {id} is in flight"),
//!         Admission::Rejected => println!("over budget, dropped"),
//!     }
//!
//!     budget.shutdown().await;
//!     reaper.stopped().await;
//! }
//! ```
//!
//! ---

mod config;
mod core;
mod error;
mod ports;
mod tasks;

// ---- Public re-exports ----

pub use crate::core::{Admission, Budget, Reaper, ReaperHandle, TaskId, LIVE_GAUGE};
pub use config::Config;
pub use error::TaskError;
pub use ports::{Clock, LogLevel, Logger, Metrics, NullMetrics, StdoutLogger, TokioClock};
pub use tasks::{BoxTaskFuture, Task, TaskFn, TaskRef};
