//! Pattern compilation and message formatting
//!
//! A pattern string is compiled once into an ordered list of flag handlers;
//! rendering a message replays the handlers in order. Recognized flags:
//!
//! | Flag | Output                                  |
//! |------|-----------------------------------------|
//! | `%Y` | 4-digit year                            |
//! | `%m` | 2-digit month                           |
//! | `%d` | 2-digit day                             |
//! | `%H` | 2-digit hour (24h)                      |
//! | `%M` | 2-digit minute                          |
//! | `%S` | 2-digit second                          |
//! | `%l` | single-letter level code                |
//! | `%L` | full lowercase level name               |
//! | `%n` | logger name                             |
//! | `%v` | message payload                         |
//! | `%t` | thread id (decimal)                     |
//! | `%%` | literal `%`                             |
//!
//! Any other `%X` passes through literally as `%X`.

use super::formatter::Formatter;
use super::log_message::LogMessage;
use chrono::{DateTime, Datelike, Local, Timelike};
use std::fmt::Write;
use std::time::{SystemTime, UNIX_EPOCH};

/// Pattern used by sinks that were not given an explicit one.
pub const DEFAULT_PATTERN: &str = "[%Y-%m-%d %H:%M:%S][%L]%v";

/// One compiled unit of a pattern: a literal emitter or a field extractor.
#[derive(Debug, Clone, PartialEq, Eq)]
enum FlagHandler {
    Literal(String),
    Year,
    Month,
    Day,
    Hour,
    Minute,
    Second,
    ShortLevel,
    FullLevel,
    LoggerName,
    Payload,
    ThreadId,
}

/// Broken-down local calendar time of the last formatted message.
#[derive(Debug, Clone, Copy, Default)]
struct CachedTime {
    year: i32,
    month: u32,
    day: u32,
    hour: u32,
    minute: u32,
    second: u32,
}

impl CachedTime {
    fn from_local(local: &DateTime<Local>) -> Self {
        Self {
            year: local.year(),
            month: local.month(),
            day: local.day(),
            hour: local.hour(),
            minute: local.minute(),
            second: local.second(),
        }
    }
}

/// Compiles a `%`-flag pattern and renders messages against it.
///
/// The timezone-aware calendar conversion dominates formatting cost, so the
/// broken-down time is cached and only recomputed when the message's
/// whole-second timestamp changes.
///
/// # Examples
///
/// ```
/// use patternlog::core::{Formatter, LogMessage, PatternFormatter, Level};
///
/// let mut formatter = PatternFormatter::new("[%l] %n: %v");
/// let msg = LogMessage::new("app", Level::Warn, "low disk space");
/// let mut out = String::new();
/// formatter.format(&msg, &mut out);
/// assert_eq!(out, "[W] app: low disk space\n");
/// ```
pub struct PatternFormatter {
    pattern: String,
    handlers: Vec<FlagHandler>,
    last_second: Option<u64>,
    cached: CachedTime,
}

impl PatternFormatter {
    pub fn new(pattern: impl Into<String>) -> Self {
        let mut formatter = Self {
            pattern: pattern.into(),
            handlers: Vec::new(),
            last_second: None,
            cached: CachedTime::default(),
        };
        formatter.compile();
        formatter
    }

    pub fn pattern(&self) -> &str {
        &self.pattern
    }

    /// Replace the pattern and recompile the whole handler list.
    pub fn set_pattern(&mut self, pattern: impl Into<String>) {
        self.pattern = pattern.into();
        self.handlers.clear();
        self.compile();
    }

    /// Single left-to-right scan over the pattern. Literal characters
    /// accumulate in `pending`; each `%` flushes the pending literal and
    /// dispatches on the flag character. A trailing lone `%` is dropped.
    fn compile(&mut self) {
        let mut pending = String::new();
        let mut chars = self.pattern.chars();

        while let Some(ch) = chars.next() {
            if ch != '%' {
                pending.push(ch);
                continue;
            }
            if !pending.is_empty() {
                self.handlers
                    .push(FlagHandler::Literal(std::mem::take(&mut pending)));
            }
            let Some(flag) = chars.next() else {
                break;
            };
            match flag {
                'Y' => self.handlers.push(FlagHandler::Year),
                'm' => self.handlers.push(FlagHandler::Month),
                'd' => self.handlers.push(FlagHandler::Day),
                'H' => self.handlers.push(FlagHandler::Hour),
                'M' => self.handlers.push(FlagHandler::Minute),
                'S' => self.handlers.push(FlagHandler::Second),
                'l' => self.handlers.push(FlagHandler::ShortLevel),
                'L' => self.handlers.push(FlagHandler::FullLevel),
                'n' => self.handlers.push(FlagHandler::LoggerName),
                'v' => self.handlers.push(FlagHandler::Payload),
                't' => self.handlers.push(FlagHandler::ThreadId),
                '%' => pending.push('%'),
                unknown => {
                    // Unknown flag: emit `%X` literally.
                    pending.push('%');
                    pending.push(unknown);
                }
            }
        }
        if !pending.is_empty() {
            self.handlers.push(FlagHandler::Literal(pending));
        }
    }

    fn refresh_time_cache(&mut self, time: SystemTime) {
        let local: DateTime<Local> = time.into();
        self.cached = CachedTime::from_local(&local);
    }
}

impl Formatter for PatternFormatter {
    fn format(&mut self, msg: &LogMessage<'_>, dest: &mut String) {
        let seconds = msg
            .time
            .duration_since(UNIX_EPOCH)
            .map(|d| d.as_secs())
            .unwrap_or(0);
        if self.last_second != Some(seconds) {
            self.last_second = Some(seconds);
            self.refresh_time_cache(msg.time);
        }

        for handler in &self.handlers {
            // String formatting never fails; discard the fmt::Result.
            let _ = match handler {
                FlagHandler::Literal(text) => {
                    dest.push_str(text);
                    Ok(())
                }
                FlagHandler::Year => write!(dest, "{:04}", self.cached.year),
                FlagHandler::Month => write!(dest, "{:02}", self.cached.month),
                FlagHandler::Day => write!(dest, "{:02}", self.cached.day),
                FlagHandler::Hour => write!(dest, "{:02}", self.cached.hour),
                FlagHandler::Minute => write!(dest, "{:02}", self.cached.minute),
                FlagHandler::Second => write!(dest, "{:02}", self.cached.second),
                FlagHandler::ShortLevel => {
                    dest.push_str(msg.level.short_code());
                    Ok(())
                }
                FlagHandler::FullLevel => {
                    dest.push_str(msg.level.as_str());
                    Ok(())
                }
                FlagHandler::LoggerName => {
                    dest.push_str(msg.logger_name);
                    Ok(())
                }
                FlagHandler::Payload => {
                    dest.push_str(msg.payload);
                    Ok(())
                }
                FlagHandler::ThreadId => write!(dest, "{}", msg.thread_id),
            };
        }
        dest.push('\n');
    }

    fn clone_box(&self) -> Box<dyn Formatter> {
        Box::new(PatternFormatter::new(self.pattern.clone()))
    }
}

impl Default for PatternFormatter {
    fn default() -> Self {
        Self::new(DEFAULT_PATTERN)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::level::Level;
    use std::time::Duration;

    fn render(pattern: &str, msg: &LogMessage<'_>) -> String {
        let mut formatter = PatternFormatter::new(pattern);
        let mut out = String::new();
        formatter.format(msg, &mut out);
        out
    }

    #[test]
    fn test_payload_and_levels() {
        let msg = LogMessage::new("core", Level::Error, "boom");
        assert_eq!(render("%l|%L|%n|%v", &msg), "E|error|core|boom\n");
    }

    #[test]
    fn test_escaped_percent() {
        let msg = LogMessage::new("app", Level::Info, "ok");
        assert_eq!(render("50%% done: %v", &msg), "50% done: ok\n");
    }

    #[test]
    fn test_unknown_flag_passes_through() {
        let msg = LogMessage::new("app", Level::Info, "x");
        assert_eq!(render("[%Z] %v", &msg), "[%Z] x\n");
    }

    #[test]
    fn test_trailing_percent_dropped() {
        let msg = LogMessage::new("app", Level::Info, "x");
        assert_eq!(render("%v%", &msg), "x\n");
        assert_eq!(render("%", &msg), "\n");
    }

    #[test]
    fn test_thread_id_decimal() {
        let msg = LogMessage::new("app", Level::Info, "x");
        assert_eq!(render("%t", &msg), format!("{}\n", msg.thread_id));
    }

    #[test]
    fn test_date_round_trip_against_chrono() {
        let time = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let msg = LogMessage::new("app", Level::Info, "payload").at_time(time);
        let local: DateTime<Local> = time.into();
        let expected = format!("{}\n", local.format("%Y-%m-%d"));
        assert_eq!(render("%Y-%m-%d", &msg), expected);
    }

    #[test]
    fn test_default_pattern_output() {
        let time = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let msg = LogMessage::new("app", Level::Info, "hello").at_time(time);
        let local: DateTime<Local> = time.into();
        let expected = format!("[{}][info]hello\n", local.format("%Y-%m-%d %H:%M:%S"));
        assert_eq!(render(DEFAULT_PATTERN, &msg), expected);
    }

    #[test]
    fn test_time_cache_within_same_second() {
        let base = UNIX_EPOCH + Duration::from_secs(1_700_000_000);
        let mut formatter = PatternFormatter::new("%H:%M:%S");

        let mut first = String::new();
        formatter.format(
            &LogMessage::new("app", Level::Info, "a").at_time(base),
            &mut first,
        );

        // One millisecond later, same whole second: identical time fields.
        let mut second = String::new();
        formatter.format(
            &LogMessage::new("app", Level::Info, "b")
                .at_time(base + Duration::from_millis(1)),
            &mut second,
        );
        assert_eq!(first, second);

        // Next second: fields move on.
        let mut third = String::new();
        formatter.format(
            &LogMessage::new("app", Level::Info, "c").at_time(base + Duration::from_secs(1)),
            &mut third,
        );
        assert_ne!(first, third);
    }

    #[test]
    fn test_clone_produces_identical_output() {
        let time = UNIX_EPOCH + Duration::from_secs(1_699_999_999);
        let msg = LogMessage::new("clone", Level::Debug, "same bytes").at_time(time);

        let mut original = PatternFormatter::new("[%Y-%m-%d %H:%M:%S][%l][%n]%v");
        let mut copy = original.clone_box();

        let mut a = String::new();
        let mut b = String::new();
        original.format(&msg, &mut a);
        copy.format(&msg, &mut b);
        assert_eq!(a, b);
        assert_eq!(original.pattern(), "[%Y-%m-%d %H:%M:%S][%l][%n]%v");
    }

    #[test]
    fn test_set_pattern_recompiles() {
        let msg = LogMessage::new("app", Level::Info, "x");
        let mut formatter = PatternFormatter::new("%v");
        let mut out = String::new();
        formatter.format(&msg, &mut out);
        assert_eq!(out, "x\n");

        formatter.set_pattern(">>> %v <<<");
        out.clear();
        formatter.format(&msg, &mut out);
        assert_eq!(out, ">>> x <<<\n");
    }

    #[test]
    fn test_literal_only_pattern() {
        let msg = LogMessage::new("app", Level::Info, "ignored");
        assert_eq!(render("plain text", &msg), "plain text\n");
        assert_eq!(render("", &msg), "\n");
    }
}
