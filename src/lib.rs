//! # patternlog
//!
//! A pattern-based logging library: applications create named loggers,
//! attach one or more sinks, and emit leveled messages rendered through a
//! compiled `%`-flag pattern.
//!
//! ## Features
//!
//! - **Compiled patterns**: a pattern string is compiled once into flag
//!   handlers and replayed per message, with the calendar-time breakdown
//!   cached per whole second
//! - **Independent sinks**: each sink has its own level, its own formatter
//!   clone, and its own mutex; one sink can serve several loggers
//! - **Size-based rotation**: the rotating file sink renames numbered
//!   backups and evicts the oldest, never losing the live file
//! - **Synchronous and thread safe**: no background threads; a logging call
//!   completes on the calling thread
//!
//! ## Quick start
//!
//! ```
//! use std::sync::Arc;
//! use patternlog::{Level, Logger};
//! use patternlog::sinks::ConsoleSink;
//!
//! let sink = Arc::new(ConsoleSink::stdout());
//! let logger = Logger::with_sink("app", sink);
//! logger.set_level(Level::Debug);
//! logger.info("service started");
//! ```

pub mod core;
pub mod macros;
pub mod sinks;

pub mod prelude {
    pub use crate::core::{
        Formatter, Level, LogMessage, Logger, LoggerError, PatternFormatter, Registry, Result,
        SourceLocation, DEFAULT_PATTERN,
    };
    pub use crate::sinks::{
        ColorConsoleSink, ConsoleSink, FileSink, RotatingFileSink, Sink, SinkRef,
    };
}

pub use crate::core::{
    should_log, Formatter, Level, LogMessage, Logger, LoggerError, PatternFormatter, Registry,
    Result, SourceLocation, DEFAULT_PATTERN,
};
pub use crate::sinks::{Sink, SinkRef};

use std::path::Path;
use std::sync::Arc;

/// Look up a registered logger by name.
pub fn get_logger(name: &str) -> Option<Arc<Logger>> {
    Registry::global().get(name)
}

/// Register a logger in the process-wide registry.
///
/// # Errors
///
/// Fails if a logger with the same name is already registered.
pub fn register_logger(logger: Arc<Logger>) -> Result<()> {
    Registry::global().register(logger)
}

/// Remove a logger by name; removing the default logger recreates it.
pub fn drop_logger(name: &str) {
    Registry::global().drop_logger(name);
}

/// Remove every registered logger and reset the default logger.
pub fn drop_all() {
    Registry::global().drop_all();
}

/// The process-wide default logger (a color console logger until replaced).
pub fn default_logger() -> Arc<Logger> {
    Registry::global().default_logger()
}

/// Replace the default logger, registering it by name as well.
pub fn set_default_logger(logger: Arc<Logger>) {
    Registry::global().set_default_logger(logger);
}

/// Set the level of the default logger and every registered logger.
pub fn set_all_level(level: Level) {
    Registry::global().set_all_level(level);
}

/// Flush the default logger and every registered logger.
pub fn flush_all() {
    Registry::global().flush_all();
}

/// Log through the default logger at an explicit level.
pub fn log(level: Level, payload: impl AsRef<str>) {
    default_logger().log(level, payload);
}

/// Log a trace-level message through the default logger.
pub fn trace(payload: impl AsRef<str>) {
    default_logger().trace(payload);
}

/// Log a debug-level message through the default logger.
pub fn debug(payload: impl AsRef<str>) {
    default_logger().debug(payload);
}

/// Log an info-level message through the default logger.
pub fn info(payload: impl AsRef<str>) {
    default_logger().info(payload);
}

/// Log a warning-level message through the default logger.
pub fn warn(payload: impl AsRef<str>) {
    default_logger().warn(payload);
}

/// Log an error-level message through the default logger.
pub fn error(payload: impl AsRef<str>) {
    default_logger().error(payload);
}

/// Log a critical-level message through the default logger.
pub fn critical(payload: impl AsRef<str>) {
    default_logger().critical(payload);
}

/// Log an off-level message through the default logger; it passes every
/// threshold.
pub fn off(payload: impl AsRef<str>) {
    default_logger().off(payload);
}

fn register_with_sink(name: &str, sink: SinkRef) -> Result<Arc<Logger>> {
    let logger = Arc::new(Logger::with_sink(name, sink));
    register_logger(logger.clone())?;
    Ok(logger)
}

/// Create and register a logger writing colorized lines to stdout.
pub fn stdout_color(name: &str) -> Result<Arc<Logger>> {
    register_with_sink(name, Arc::new(sinks::ColorConsoleSink::stdout()))
}

/// Create and register a logger writing colorized lines to stderr.
pub fn stderr_color(name: &str) -> Result<Arc<Logger>> {
    register_with_sink(name, Arc::new(sinks::ColorConsoleSink::stderr()))
}

/// Create and register a logger writing plain lines to stdout.
pub fn stdout_logger(name: &str) -> Result<Arc<Logger>> {
    register_with_sink(name, Arc::new(sinks::ConsoleSink::stdout()))
}

/// Create and register a logger writing to a single file.
pub fn basic_logger<P: AsRef<Path>>(name: &str, path: P, truncate: bool) -> Result<Arc<Logger>> {
    register_with_sink(name, Arc::new(sinks::FileSink::new(path, truncate)?))
}

/// Create and register a logger writing to a size-rotating file.
pub fn rotating_logger<P: AsRef<Path>>(
    name: &str,
    path: P,
    max_size: u64,
    max_files: usize,
) -> Result<Arc<Logger>> {
    register_with_sink(
        name,
        Arc::new(sinks::RotatingFileSink::new(path, max_size, max_files)?),
    )
}
