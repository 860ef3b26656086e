//! # Budget configuration.
//!
//! Provides [`Config`] — centralized settings for the admission gate, the
//! reaper cadence, and graceful shutdown.
//!
//! Config is consumed once by [`Budget::new`](crate::Budget::new); the limit
//! is immutable for the lifetime of the budget.
//!
//! ## Sentinel values
//! - `limit = 0` → treated as 1 by [`Config::limit_clamped`] (a budget that
//!   admits nothing would be useless and is assumed to be a misconfiguration)
//! - `reaper_interval = 0` → clamped to 1ms by [`Config::reaper_interval_clamped`]

use std::time::Duration;

/// Configuration for a [`Budget`](crate::Budget) and its reaper.
///
/// ## Field semantics
/// - `limit`: maximum number of tasks live simultaneously (clamped to >= 1)
/// - `reaper_interval`: cadence of the background reaper (clamped to > 0)
/// - `grace`: maximum wait for live tasks to drain during shutdown
#[derive(Clone, Debug)]
pub struct Config {
    /// Maximum number of tasks that may be live at once.
    ///
    /// Admissions that would push the live count past this ceiling are
    /// rejected and logged. Immutable after the budget is created.
    pub limit: usize,

    /// Interval between reaper scans.
    ///
    /// Each scan removes bookkeeping entries for tasks that already finished
    /// and publishes the live-count gauge.
    pub reaper_interval: Duration,

    /// Maximum time to wait for live tasks to drain during shutdown.
    ///
    /// When the grace period elapses with tasks still live, shutdown returns
    /// anyway and reports the stuck task ids as a debug record.
    pub grace: Duration,
}

impl Config {
    /// Returns the live-task ceiling clamped to a minimum of 1.
    #[inline]
    pub fn limit_clamped(&self) -> usize {
        self.limit.max(1)
    }

    /// Returns the reaper interval clamped to a minimum of 1ms.
    #[inline]
    pub fn reaper_interval_clamped(&self) -> Duration {
        self.reaper_interval.max(Duration::from_millis(1))
    }
}

impl Default for Config {
    /// Default configuration:
    ///
    /// - `limit = 16`
    /// - `reaper_interval = 100ms`
    /// - `grace = 30s`
    fn default() -> Self {
        Self {
            limit: 16,
            reaper_interval: Duration::from_millis(100),
            grace: Duration::from_secs(30),
        }
    }
}
