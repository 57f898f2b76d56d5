//! Logging macros for ergonomic log message formatting.
//!
//! These macros render the user's template with `format!` at the call site
//! and capture the call site's source location into the message.
//!
//! # Examples
//!
//! ```
//! use std::sync::Arc;
//! use patternlog::{info, warn, Logger};
//! use patternlog::sinks::ConsoleSink;
//!
//! let logger = Logger::with_sink("app", Arc::new(ConsoleSink::stdout()));
//!
//! info!(logger, "server listening on port {}", 8080);
//! warn!(logger, "retry attempt {} of {}", 3, 5);
//! ```

/// Log a message with automatic formatting.
///
/// # Examples
///
/// ```
/// # use patternlog::{Level, Logger};
/// # let logger = Logger::new("app");
/// use patternlog::log;
/// log!(logger, Level::Info, "simple message");
/// log!(logger, Level::Error, "error code: {}", 500);
/// ```
#[macro_export]
macro_rules! log {
    ($logger:expr, $level:expr, $($arg:tt)+) => {
        $logger.log_with_source(
            $level,
            Some($crate::core::SourceLocation::new(file!(), line!(), module_path!())),
            format!($($arg)+),
        )
    };
}

/// Log a trace-level message.
#[macro_export]
macro_rules! trace {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Trace, $($arg)+)
    };
}

/// Log a debug-level message.
#[macro_export]
macro_rules! debug {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Debug, $($arg)+)
    };
}

/// Log an info-level message.
#[macro_export]
macro_rules! info {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Info, $($arg)+)
    };
}

/// Log a warning-level message.
#[macro_export]
macro_rules! warn {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Warn, $($arg)+)
    };
}

/// Log an error-level message.
#[macro_export]
macro_rules! error {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Error, $($arg)+)
    };
}

/// Log a critical-level message.
#[macro_export]
macro_rules! critical {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Critical, $($arg)+)
    };
}

/// Log an off-level message, which passes every threshold.
#[macro_export]
macro_rules! off {
    ($logger:expr, $($arg:tt)+) => {
        $crate::log!($logger, $crate::Level::Off, $($arg)+)
    };
}
