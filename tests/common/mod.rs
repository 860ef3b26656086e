//! Shared test doubles and helpers for the integration suite.
//!
//! Observation is event-driven: tests run under a paused tokio clock and use
//! [`settle`] / [`wait_for_size`] instead of wall-clock sleeps.

#![allow(dead_code)]

use std::sync::{Arc, Mutex};
use std::time::Duration;

use async_trait::async_trait;
use tokio_util::sync::CancellationToken;

use taskbudget::{Budget, LogLevel, Logger, Metrics, TaskError, TaskFn, TaskRef};

/// Logger that records every `(level, message)` pair it receives.
#[derive(Default)]
pub struct RecordingLogger {
    records: Mutex<Vec<(LogLevel, String)>>,
}

impl RecordingLogger {
    pub fn arc() -> Arc<Self> {
        Arc::new(Self::default())
    }

    pub fn records(&self) -> Vec<(LogLevel, String)> {
        self.records.lock().unwrap().clone()
    }

    /// Non-debug records whose message contains `"out of budget"`.
    pub fn out_of_budget_count(&self) -> usize {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|(level, msg)| !level.is_debug() && msg.contains("out of budget"))
            .count()
    }

    /// All records above debug level.
    pub fn non_debug_count(&self) -> usize {
        self.records
            .lock()
            .unwrap()
            .iter()
            .filter(|(level, _)| !level.is_debug())
            .count()
    }

    /// True when some debug record contains `needle`.
    pub fn debug_contains(&self, needle: &str) -> bool {
        self.records
            .lock()
            .unwrap()
            .iter()
            .any(|(level, msg)| level.is_debug() && msg.contains(needle))
    }
}

#[async_trait]
impl Logger for RecordingLogger {
    async fn log(&self, level: LogLevel, message: &str) {
        self.records.lock().unwrap().push((level, message.to_string()));
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Metrics sink that records every gauge update.
#[derive(Default)]
pub struct RecordingMetrics {
    gauges: Mutex<Vec<(String, u64)>>,
}

impl RecordingMetrics {
    pub fn arc() -> Arc<Self> {
        Arc::new(Self::default())
    }

    /// Last value published under `name`, if any.
    pub fn last(&self, name: &str) -> Option<u64> {
        self.gauges
            .lock()
            .unwrap()
            .iter()
            .rev()
            .find(|(n, _)| n == name)
            .map(|(_, v)| *v)
    }

    /// Total number of gauge updates received.
    pub fn update_count(&self) -> usize {
        self.gauges.lock().unwrap().len()
    }
}

#[async_trait]
impl Metrics for RecordingMetrics {
    async fn gauge(&self, name: &str, value: u64) {
        self.gauges.lock().unwrap().push((name.to_string(), value));
    }

    fn name(&self) -> &'static str {
        "recording"
    }
}

/// Logger that panics on every record.
pub struct PanickyLogger;

#[async_trait]
impl Logger for PanickyLogger {
    async fn log(&self, _level: LogLevel, _message: &str) {
        panic!("logger backend is down");
    }

    fn name(&self) -> &'static str {
        "panicky"
    }
}

/// Metrics sink that panics on every update.
pub struct PanickyMetrics;

#[async_trait]
impl Metrics for PanickyMetrics {
    async fn gauge(&self, _name: &str, _value: u64) {
        panic!("metrics backend is down");
    }

    fn name(&self) -> &'static str {
        "panicky"
    }
}

/// Sleeping body that exits with `Canceled` once its token fires.
pub fn sleeper(dur: Duration) -> TaskRef {
    TaskFn::arc("sleeper", move |ctx: CancellationToken| async move {
        tokio::select! {
            _ = ctx.cancelled() => Err(TaskError::Canceled),
            _ = tokio::time::sleep(dur) => Ok(()),
        }
    })
}

/// Body that never observes its token and sleeps the full duration.
pub fn stubborn(dur: Duration) -> TaskRef {
    TaskFn::arc("stubborn", move |_ctx: CancellationToken| async move {
        tokio::time::sleep(dur).await;
        Ok::<_, TaskError>(())
    })
}

/// Body that fails immediately.
pub fn failing() -> TaskRef {
    TaskFn::arc("failing", |_ctx: CancellationToken| async {
        Err::<(), _>(TaskError::fail("boom"))
    })
}

/// Body that panics immediately.
pub fn panicking() -> TaskRef {
    TaskFn::arc("panicking", |_ctx: CancellationToken| async {
        panic!("task blew up")
    })
}

/// Lets spawned workers run to their next suspension point without
/// advancing the clock.
pub async fn settle() {
    for _ in 0..64 {
        tokio::task::yield_now().await;
    }
}

/// Yields until the live count reaches `expected`.
pub async fn wait_for_size(budget: &Budget, expected: usize) {
    for _ in 0..1024 {
        if budget.size().await == expected {
            return;
        }
        tokio::task::yield_now().await;
    }
    panic!(
        "live count did not reach {expected}, still {}",
        budget.size().await
    );
}
