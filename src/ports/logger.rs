//! # Logger port.
//!
//! [`Logger`] is the structured record sink for the budget. The admission
//! gate emits exactly one `info` record per rejection (its message contains
//! the substring `"out of budget"`); everything else the core produces is
//! `debug` diagnostics.

use async_trait::async_trait;

/// Severity of a log record.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum LogLevel {
    /// Diagnostic chatter; not part of the rejection contract.
    Debug,
    /// Operationally relevant records, e.g. out-of-budget rejections.
    Info,
}

impl LogLevel {
    /// Returns the lowercase level name.
    pub fn as_str(&self) -> &'static str {
        match self {
            LogLevel::Debug => "debug",
            LogLevel::Info => "info",
        }
    }

    /// True for [`LogLevel::Debug`].
    pub fn is_debug(&self) -> bool {
        matches!(self, LogLevel::Debug)
    }
}

/// Structured record sink.
///
/// Implementations are called outside the budget's critical section and may
/// be slow. A panicking implementation is isolated by the core and never
/// affects bookkeeping.
#[async_trait]
pub trait Logger: Send + Sync + 'static {
    /// Records one message at the given level.
    async fn log(&self, level: LogLevel, message: &str);

    /// Returns the sink name for out-of-band diagnostics.
    fn name(&self) -> &'static str {
        std::any::type_name::<Self>()
    }
}

/// Simple stdout logger.
///
/// Prints one bracketed line per record. Intended for development and
/// demos; implement [`Logger`] against a real backend for production use.
pub struct StdoutLogger;

#[async_trait]
impl Logger for StdoutLogger {
    async fn log(&self, level: LogLevel, message: &str) {
        println!("[{}] {message}", level.as_str());
    }

    fn name(&self) -> &'static str {
        "stdout"
    }
}
