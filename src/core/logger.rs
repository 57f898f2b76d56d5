//! Logger: level gate, fan-out, and auto-flush
//!
//! A logger owns a name and an ordered list of shared sinks. A logging call
//! runs entirely on the calling thread: the logger gate, message
//! construction, each sink's own gate, rendering and the write all happen
//! before the call returns.

use super::level::{should_log, Level};
use super::log_message::{LogMessage, SourceLocation};
use crate::sinks::SinkRef;
use parking_lot::RwLock;
use std::sync::Arc;

/// A named, leveled front-end fanning messages out to its sinks.
///
/// Sinks are shared (`Arc<dyn Sink>`), so one sink may serve several
/// loggers; all interior state is lock-protected and methods take `&self`,
/// which lets loggers themselves be shared through the registry.
///
/// # Examples
///
/// ```
/// use std::sync::Arc;
/// use patternlog::{Level, Logger};
/// use patternlog::sinks::ConsoleSink;
///
/// let logger = Logger::with_sink("app", Arc::new(ConsoleSink::stdout()));
/// logger.info("server started");
/// logger.log(Level::Warn, format!("retry {} of {}", 1, 3));
/// ```
pub struct Logger {
    name: String,
    level: RwLock<Level>,
    flush_level: RwLock<Level>,
    sinks: RwLock<Vec<SinkRef>>,
}

impl Logger {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            level: RwLock::new(Level::Trace),
            // Plain `>=` comparison; Off means only explicit off-level
            // messages force a flush.
            flush_level: RwLock::new(Level::Off),
            sinks: RwLock::new(Vec::new()),
        }
    }

    #[must_use]
    pub fn with_sink(name: impl Into<String>, sink: SinkRef) -> Self {
        Self::with_sinks(name, vec![sink])
    }

    #[must_use]
    pub fn with_sinks(name: impl Into<String>, sinks: Vec<SinkRef>) -> Self {
        let logger = Self::new(name);
        *logger.sinks.write() = sinks;
        logger
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn set_level(&self, level: Level) {
        *self.level.write() = level;
    }

    pub fn level(&self) -> Level {
        *self.level.read()
    }

    pub fn should_log(&self, message_level: Level) -> bool {
        should_log(*self.level.read(), message_level)
    }

    /// Minimum message level at which all sinks are flushed right after
    /// fan-out.
    pub fn flush_on(&self, level: Level) {
        *self.flush_level.write() = level;
    }

    pub fn flush_level(&self) -> Level {
        *self.flush_level.read()
    }

    /// Append a sink; messages are delivered to sinks in attach order.
    pub fn add_sink(&self, sink: SinkRef) {
        self.sinks.write().push(sink);
    }

    /// Remove a sink by identity (the same `Arc`, not an equal one).
    pub fn remove_sink(&self, sink: &SinkRef) {
        self.sinks
            .write()
            .retain(|existing| !Arc::ptr_eq(existing, sink));
    }

    pub fn sinks(&self) -> Vec<SinkRef> {
        self.sinks.read().clone()
    }

    /// Flush every attached sink, reporting per-sink failures to stderr.
    pub fn flush(&self) {
        for sink in self.sinks.read().iter() {
            if let Err(e) = sink.flush() {
                eprintln!("[patternlog] flush failed for logger '{}': {}", self.name, e);
            }
        }
    }

    /// Log an already-rendered payload at `level`.
    ///
    /// No-op when the logger's own threshold rejects the level; each sink
    /// then applies its own independent gate.
    pub fn log(&self, level: Level, payload: impl AsRef<str>) {
        self.log_with_source(level, None, payload);
    }

    /// Like [`Logger::log`] with an explicit call-site location; the logging
    /// macros route through this.
    pub fn log_with_source(
        &self,
        level: Level,
        source: Option<SourceLocation>,
        payload: impl AsRef<str>,
    ) {
        if !self.should_log(level) {
            return;
        }
        let message = LogMessage::with_source(&self.name, level, source, payload.as_ref());
        self.sink_message(&message);
    }

    pub fn trace(&self, payload: impl AsRef<str>) {
        self.log(Level::Trace, payload);
    }

    pub fn debug(&self, payload: impl AsRef<str>) {
        self.log(Level::Debug, payload);
    }

    pub fn info(&self, payload: impl AsRef<str>) {
        self.log(Level::Info, payload);
    }

    pub fn warn(&self, payload: impl AsRef<str>) {
        self.log(Level::Warn, payload);
    }

    pub fn error(&self, payload: impl AsRef<str>) {
        self.log(Level::Error, payload);
    }

    pub fn critical(&self, payload: impl AsRef<str>) {
        self.log(Level::Critical, payload);
    }

    /// Log at `off` level; such a message passes every threshold, including
    /// a gate set to `Off`.
    pub fn off(&self, payload: impl AsRef<str>) {
        self.log(Level::Off, payload);
    }

    /// Deliver one message sink-by-sink in attach order, then auto-flush if
    /// the message level reaches the flush threshold. A failing sink does
    /// not stop delivery to the remaining sinks.
    fn sink_message(&self, message: &LogMessage<'_>) {
        let sinks = self.sinks.read();
        for sink in sinks.iter() {
            if sink.should_log(message.level) {
                if let Err(e) = sink.log(message) {
                    eprintln!(
                        "[patternlog] sink write failed for logger '{}': {}",
                        self.name, e
                    );
                }
            }
        }
        if message.level >= *self.flush_level.read() {
            for sink in sinks.iter() {
                if let Err(e) = sink.flush() {
                    eprintln!(
                        "[patternlog] auto-flush failed for logger '{}': {}",
                        self.name, e
                    );
                }
            }
        }
    }
}
