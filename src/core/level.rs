//! Log level definitions

use serde::{Deserialize, Serialize};
use std::fmt;

/// Severity of a log message, totally ordered from `Trace` to `Off`.
///
/// A threshold of `Off` rejects every ordinary message; `Off` used as a
/// message level passes every gate.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[derive(Default)]
#[serde(rename_all = "lowercase")]
pub enum Level {
    Trace = 0,
    Debug = 1,
    #[default]
    Info = 2,
    Warn = 3,
    Error = 4,
    Critical = 5,
    Off = 6,
}

/// Whether a message at `message_level` passes a gate set to `threshold`.
#[inline]
pub fn should_log(threshold: Level, message_level: Level) -> bool {
    message_level >= threshold
}

impl Level {
    /// Full lowercase name, as rendered by the `%L` pattern flag.
    pub fn as_str(&self) -> &'static str {
        match self {
            Level::Trace => "trace",
            Level::Debug => "debug",
            Level::Info => "info",
            Level::Warn => "warn",
            Level::Error => "error",
            Level::Critical => "critical",
            Level::Off => "off",
        }
    }

    /// Single-letter code, as rendered by the `%l` pattern flag.
    pub fn short_code(&self) -> &'static str {
        match self {
            Level::Trace => "T",
            Level::Debug => "D",
            Level::Info => "I",
            Level::Warn => "W",
            Level::Error => "E",
            Level::Critical => "C",
            Level::Off => "O",
        }
    }

    /// Case-insensitive lookup by full name.
    ///
    /// Unrecognized names fall back to `Info` rather than failing; callers
    /// must not rely on bad input being rejected.
    ///
    /// # Examples
    ///
    /// ```
    /// use patternlog::Level;
    ///
    /// assert_eq!(Level::from_name("WARN"), Level::Warn);
    /// assert_eq!(Level::from_name("bogus"), Level::Info);
    /// ```
    pub fn from_name(name: &str) -> Self {
        match name.to_lowercase().as_str() {
            "trace" => Level::Trace,
            "debug" => Level::Debug,
            "info" => Level::Info,
            "warn" => Level::Warn,
            "error" => Level::Error,
            "critical" => Level::Critical,
            "off" => Level::Off,
            _ => Level::Info,
        }
    }

    pub fn color_code(&self) -> colored::Color {
        use colored::Color::*;
        match self {
            Level::Trace => White,
            Level::Debug => Cyan,
            Level::Info => Green,
            Level::Warn => Yellow,
            Level::Error => Red,
            Level::Critical => BrightRed,
            Level::Off => White,
        }
    }

    /// Inverse of `level as u8`. Out-of-range values map to `Info`, the same
    /// fallback `from_name` uses.
    pub(crate) fn from_repr(value: u8) -> Self {
        match value {
            0 => Level::Trace,
            1 => Level::Debug,
            2 => Level::Info,
            3 => Level::Warn,
            4 => Level::Error,
            5 => Level::Critical,
            6 => Level::Off,
            _ => Level::Info,
        }
    }
}

impl fmt::Display for Level {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
