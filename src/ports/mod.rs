//! # Ports: explicit seams for logging, metrics, and time.
//!
//! The budget never talks to a logging or metrics backend directly. Callers
//! hand it trait objects ([`Logger`], [`Metrics`], [`Clock`]) at construction
//! time; there is no ambient or globally scoped sink.
//!
//! Port implementations run outside the budget's critical section, and a
//! panicking port must never corrupt the bookkeeping. Every call from the
//! core goes through the guarded helpers below, which catch the panic and
//! report it to stderr.

mod clock;
mod logger;
mod metrics;

pub use clock::{Clock, TokioClock};
pub use logger::{LogLevel, Logger, StdoutLogger};
pub use metrics::{Metrics, NullMetrics};

use std::panic::AssertUnwindSafe;
use std::sync::Arc;

use futures::FutureExt;

/// Logs through the port, isolating panics from the caller.
pub(crate) async fn guarded_log(logger: &Arc<dyn Logger>, level: LogLevel, message: &str) {
    let fut = logger.log(level, message);
    if AssertUnwindSafe(fut).catch_unwind().await.is_err() {
        eprintln!("[taskbudget] logger '{}' panicked", logger.name());
    }
}

/// Publishes a gauge through the port, isolating panics from the caller.
pub(crate) async fn guarded_gauge(metrics: &Arc<dyn Metrics>, name: &str, value: u64) {
    let fut = metrics.gauge(name, value);
    if AssertUnwindSafe(fut).catch_unwind().await.is_err() {
        eprintln!("[taskbudget] metrics sink '{}' panicked", metrics.name());
    }
}
