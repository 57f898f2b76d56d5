//! Core logger types and traits

pub mod error;
pub mod formatter;
pub mod level;
pub mod log_message;
pub mod logger;
pub mod pattern;
pub mod registry;

pub use error::{LoggerError, Result};
pub use formatter::Formatter;
pub use level::{should_log, Level};
pub use log_message::{LogMessage, SourceLocation};
pub use logger::Logger;
pub use pattern::{PatternFormatter, DEFAULT_PATTERN};
pub use registry::Registry;
