//! Sink implementations
//!
//! A sink is an independently leveled, independently formatted output
//! destination. Sinks are shared as `Arc<dyn Sink>` because one sink may be
//! attached to several loggers; the per-sink mutex inside [`BaseSink`] is
//! the sole correctness mechanism for concurrent callers.

pub mod console;
pub mod file;
pub mod rotating_file;

pub use console::{ColorConsoleSink, ConsoleSink};
pub use file::FileSink;
pub use rotating_file::RotatingFileSink;

use crate::core::error::Result;
use crate::core::formatter::Formatter;
use crate::core::level::{should_log, Level};
use crate::core::log_message::LogMessage;
use crate::core::pattern::PatternFormatter;
use parking_lot::Mutex;
use std::sync::atomic::{AtomicU8, Ordering};
use std::sync::Arc;

/// Shared handle to a sink; loggers hold sinks this way.
pub type SinkRef = Arc<dyn Sink>;

/// Output destination contract.
///
/// `log` renders and writes only if the sink's own level admits the message.
/// All mutating operations on one sink instance are serialized by its mutex;
/// `should_log` alone is a lock-free level comparison.
pub trait Sink: Send + Sync {
    fn log(&self, msg: &LogMessage<'_>) -> Result<()>;
    fn flush(&self) -> Result<()>;
    fn set_level(&self, level: Level);
    fn level(&self) -> Level;
    fn should_log(&self, level: Level) -> bool;
    fn set_formatter(&self, formatter: Box<dyn Formatter>);
}

/// Destination-specific half of a sink: receives the already-formatted line.
///
/// Implementations run under the owning [`BaseSink`]'s mutex and never need
/// their own locking.
pub trait SinkBackend: Send {
    fn write(&mut self, msg: &LogMessage<'_>, formatted: &str) -> Result<()>;
    fn flush(&mut self) -> Result<()>;
}

struct BaseSinkInner<B> {
    formatter: Box<dyn Formatter>,
    // Render buffer reused across messages; cleared before each format.
    buf: String,
    backend: B,
}

/// Generic thread-safety wrapper shared by every concrete sink.
///
/// One mutex serializes `log`, `flush`, `set_level` and `set_formatter` for
/// their full duration. The level additionally lives in an atomic so
/// `should_log` stays lock-free; a read racing a concurrent `set_level` may
/// observe either value, which is accepted (level changes are not expected
/// to be linearizable with in-flight log calls).
pub struct BaseSink<B> {
    level: AtomicU8,
    inner: Mutex<BaseSinkInner<B>>,
}

impl<B: SinkBackend> BaseSink<B> {
    pub(crate) fn with_backend(backend: B) -> Self {
        Self {
            level: AtomicU8::new(Level::default() as u8),
            inner: Mutex::new(BaseSinkInner {
                formatter: Box::new(PatternFormatter::default()),
                buf: String::new(),
                backend,
            }),
        }
    }
}

impl<B: SinkBackend> Sink for BaseSink<B> {
    fn log(&self, msg: &LogMessage<'_>) -> Result<()> {
        let mut inner = self.inner.lock();
        if !self.should_log(msg.level) {
            return Ok(());
        }
        let BaseSinkInner {
            formatter,
            buf,
            backend,
        } = &mut *inner;
        buf.clear();
        formatter.format(msg, buf);
        backend.write(msg, buf)
    }

    fn flush(&self) -> Result<()> {
        self.inner.lock().backend.flush()
    }

    fn set_level(&self, level: Level) {
        let _guard = self.inner.lock();
        self.level.store(level as u8, Ordering::Relaxed);
    }

    fn level(&self) -> Level {
        let _guard = self.inner.lock();
        Level::from_repr(self.level.load(Ordering::Relaxed))
    }

    fn should_log(&self, level: Level) -> bool {
        should_log(Level::from_repr(self.level.load(Ordering::Relaxed)), level)
    }

    fn set_formatter(&self, formatter: Box<dyn Formatter>) {
        self.inner.lock().formatter = formatter;
    }
}
