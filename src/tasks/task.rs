//! # Task abstraction for budgeted execution.
//!
//! Defines the core [`Task`] trait for async, cancellable units of work.
//!
//! ## Rules
//! - The crate provides [`TaskFn`](crate::TaskFn) — a function-backed
//!   implementation that wraps closures as tasks.
//! - Bodies receive a [`CancellationToken`] and must check it at their
//!   suspension points; a body that ignores cancellation keeps occupying its
//!   budget slot until it returns.

use std::{future::Future, pin::Pin, sync::Arc};

use tokio_util::sync::CancellationToken;

use crate::error::TaskError;

/// Boxed future returned by [`Task::run`].
pub type BoxTaskFuture = Pin<Box<dyn Future<Output = Result<(), TaskError>> + Send + 'static>>;

/// Shared handle to a task object, as accepted by
/// [`Budget::try_run`](crate::Budget::try_run).
pub type TaskRef = Arc<dyn Task>;

/// Asynchronous, cancellable unit of work.
///
/// A `Task` produces one fresh, independent future per [`run`](Task::run)
/// call. Each admission owns its own future; nothing is shared between
/// admissions unless the implementation does so explicitly.
///
/// ## Cancellation requirements
/// The returned future must observe `ctx` at its suspension points (waits,
/// sleeps, I/O) and exit promptly once cancelled, conventionally with
/// `Err(TaskError::Canceled)`. Cancellation is cooperative: the budget never
/// aborts a body from the outside.
///
/// ## Example
///
/// ```rust
/// use tokio_util::sync::CancellationToken;
/// use taskbudget::{BoxTaskFuture, Task, TaskError};
///
/// struct Delivery;
///
/// impl Task for Delivery {
///     fn name(&self) -> &str {
///         "delivery"
///     }
///
///     fn run(&self, ctx: CancellationToken) -> BoxTaskFuture {
///         Box::pin(async move {
///             if ctx.is_cancelled() {
///                 return Err(TaskError::Canceled);
///             }
///             // contact the push server...
///             Ok(())
///         })
///     }
/// }
/// ```
pub trait Task: Send + Sync + 'static {
    /// Returns a stable, human-readable task name.
    ///
    /// Used in rejection records and debug diagnostics. Names need not be
    /// unique; the budget keys live tasks by id, not by name.
    fn name(&self) -> &str;

    /// Creates a new future that runs the body until completion or
    /// cancellation.
    fn run(&self, ctx: CancellationToken) -> BoxTaskFuture;
}
