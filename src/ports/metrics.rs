//! # Metrics port.
//!
//! [`Metrics`] is the gauge sink used by the reaper, which publishes the
//! current live-task count as [`LIVE_GAUGE`](crate::LIVE_GAUGE) on every
//! tick.

use async_trait::async_trait;

/// Gauge sink.
///
/// Implementations may be slow or fail; the core isolates panics and keeps
/// going. Gauge values are last-write-wins.
#[async_trait]
pub trait Metrics: Send + Sync + 'static {
    /// Sets the gauge `name` to `value`.
    async fn gauge(&self, name: &str, value: u64);

    /// Returns the sink name for out-of-band diagnostics.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Metrics sink that discards every value.
pub struct NullMetrics;

#[async_trait]
impl Metrics for NullMetrics {
    async fn gauge(&self, _name: &str, _value: u64) {}

    fn name(&self) -> &'static str {
        "null"
    }
}
