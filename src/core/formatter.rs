//! Formatter trait for rendering log messages

use super::log_message::LogMessage;

/// Renders a [`LogMessage`] into an output buffer.
///
/// Every sink owns its own formatter instance: `format` mutates internal
/// state (the calendar-time cache), so a formatter must never be shared
/// between sinks. [`Formatter::clone_box`] exists so one configured
/// formatter can be handed to several sinks as independent copies.
pub trait Formatter: Send {
    /// Append the rendered message, including the trailing newline, to `dest`.
    fn format(&mut self, msg: &LogMessage<'_>, dest: &mut String);

    /// Independent copy with the same configuration and a cold cache.
    fn clone_box(&self) -> Box<dyn Formatter>;
}
