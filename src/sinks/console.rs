//! Console and stderr sinks, plain and colorized

use super::{BaseSink, SinkBackend};
use crate::core::error::Result;
use crate::core::log_message::LogMessage;
use colored::Colorize;
use std::io::{self, Write};

#[derive(Debug, Clone, Copy)]
enum Stream {
    Stdout,
    Stderr,
}

impl Stream {
    fn write_all(self, bytes: &[u8]) -> io::Result<()> {
        match self {
            Stream::Stdout => io::stdout().lock().write_all(bytes),
            Stream::Stderr => io::stderr().lock().write_all(bytes),
        }
    }

    fn flush(self) -> io::Result<()> {
        match self {
            Stream::Stdout => io::stdout().lock().flush(),
            Stream::Stderr => io::stderr().lock().flush(),
        }
    }
}

pub struct PlainBackend {
    stream: Stream,
}

impl SinkBackend for PlainBackend {
    fn write(&mut self, _msg: &LogMessage<'_>, formatted: &str) -> Result<()> {
        self.stream.write_all(formatted.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stream.flush()?;
        Ok(())
    }
}

pub struct ColorBackend {
    stream: Stream,
}

impl SinkBackend for ColorBackend {
    fn write(&mut self, msg: &LogMessage<'_>, formatted: &str) -> Result<()> {
        let colored_line = formatted.color(msg.level.color_code()).to_string();
        self.stream.write_all(colored_line.as_bytes())?;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        self.stream.flush()?;
        Ok(())
    }
}

/// Writes formatted lines to stdout or stderr.
pub type ConsoleSink = BaseSink<PlainBackend>;

/// Writes formatted lines to stdout or stderr, colorized by message level.
pub type ColorConsoleSink = BaseSink<ColorBackend>;

impl ConsoleSink {
    pub fn stdout() -> Self {
        BaseSink::with_backend(PlainBackend {
            stream: Stream::Stdout,
        })
    }

    pub fn stderr() -> Self {
        BaseSink::with_backend(PlainBackend {
            stream: Stream::Stderr,
        })
    }
}

impl ColorConsoleSink {
    pub fn stdout() -> Self {
        BaseSink::with_backend(ColorBackend {
            stream: Stream::Stdout,
        })
    }

    pub fn stderr() -> Self {
        BaseSink::with_backend(ColorBackend {
            stream: Stream::Stderr,
        })
    }
}
