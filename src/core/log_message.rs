//! Log message structure
//!
//! A [`LogMessage`] is built once per logging call and consumed synchronously
//! by every sink before the call returns; it borrows the logger name and the
//! already-rendered payload and is never stored beyond the call.

use super::level::Level;
use std::cell::Cell;
use std::sync::atomic::{AtomicU64, Ordering};
use std::time::SystemTime;

static NEXT_THREAD_ID: AtomicU64 = AtomicU64::new(1);

thread_local! {
    // Small dense ids, assigned on first log from a thread.
    static THREAD_ID: u64 = NEXT_THREAD_ID.fetch_add(1, Ordering::Relaxed);
}

/// Numeric id of the calling thread, cached per thread.
pub(crate) fn current_thread_id() -> u64 {
    THREAD_ID.with(|id| *id)
}

/// Call-site location captured by the logging macros.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SourceLocation {
    pub file: &'static str,
    pub line: u32,
    pub module_path: &'static str,
}

impl SourceLocation {
    pub const fn new(file: &'static str, line: u32, module_path: &'static str) -> Self {
        Self {
            file,
            line,
            module_path,
        }
    }
}

/// One log record, borrowed from the call site.
///
/// The payload is fully materialized before construction; user-template
/// formatting happens at the call site, never inside sinks.
#[derive(Debug)]
pub struct LogMessage<'a> {
    pub logger_name: &'a str,
    pub level: Level,
    pub time: SystemTime,
    pub source: Option<SourceLocation>,
    pub payload: &'a str,
    pub thread_id: u64,
    // Byte range a formatter may mark for an interactive renderer to colorize.
    pub color_range_start: Cell<usize>,
    pub color_range_end: Cell<usize>,
}

impl<'a> LogMessage<'a> {
    pub fn new(logger_name: &'a str, level: Level, payload: &'a str) -> Self {
        Self::with_source(logger_name, level, None, payload)
    }

    pub fn with_source(
        logger_name: &'a str,
        level: Level,
        source: Option<SourceLocation>,
        payload: &'a str,
    ) -> Self {
        Self {
            logger_name,
            level,
            time: SystemTime::now(),
            source,
            payload,
            thread_id: current_thread_id(),
            color_range_start: Cell::new(0),
            color_range_end: Cell::new(0),
        }
    }

    /// Replace the timestamp, for deterministic formatting in tests.
    #[must_use]
    pub fn at_time(mut self, time: SystemTime) -> Self {
        self.time = time;
        self
    }
}
