//! # Task abstractions.
//!
//! - [`Task`] — trait for async, cancellable units of work
//! - [`TaskFn`] — function-backed implementation wrapping closures
//! - [`TaskRef`] — shared handle (`Arc<dyn Task>`) accepted by the gate

mod task;
mod task_fn;

pub use task::{BoxTaskFuture, Task, TaskRef};
pub use task_fn::TaskFn;
