//! # Error types for task bodies.
//!
//! [`TaskError`] is what a task body returns when it does not complete
//! normally. It never crosses the crate's public API boundary as an `Err`:
//! the worker runner absorbs it, flips the handle's done flag, and reports
//! the failure as a debug record.

use thiserror::Error;

/// Outcome of a task body that did not complete normally.
///
/// `Canceled` signals intentional termination (shutdown or an explicit
/// cancel) and is treated as a graceful exit, not a failure.
#[non_exhaustive]
#[derive(Error, Debug)]
pub enum TaskError {
    /// Task execution failed.
    #[error("execution failed: {reason}")]
    Fail {
        /// Human-readable failure description.
        reason: String,
    },

    /// Task observed its cancellation token and stopped.
    #[error("context canceled")]
    Canceled,
}

impl TaskError {
    /// Convenience constructor for [`TaskError::Fail`].
    pub fn fail(reason: impl Into<String>) -> Self {
        TaskError::Fail {
            reason: reason.into(),
        }
    }

    /// Returns a short stable label (snake_case) for use in logs.
    pub fn as_label(&self) -> &'static str {
        match self {
            TaskError::Fail { .. } => "task_failed",
            TaskError::Canceled => "task_canceled",
        }
    }

    /// True when the body stopped because it was cancelled.
    pub fn is_canceled(&self) -> bool {
        matches!(self, TaskError::Canceled)
    }
}
