//! Plain file sink

use super::{BaseSink, SinkBackend};
use crate::core::error::{LoggerError, Result};
use crate::core::log_message::LogMessage;
use std::fs::{File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

pub struct FileBackend {
    path: PathBuf,
    writer: BufWriter<File>,
}

impl SinkBackend for FileBackend {
    fn write(&mut self, _msg: &LogMessage<'_>, formatted: &str) -> Result<()> {
        self.writer.write_all(formatted.as_bytes()).map_err(|e| {
            LoggerError::file_sink(
                self.path.display().to_string(),
                "failed to write log entry",
                e,
            )
        })
    }

    fn flush(&mut self) -> Result<()> {
        self.writer.flush().map_err(|e| {
            LoggerError::file_sink(self.path.display().to_string(), "failed to flush", e)
        })
    }
}

impl Drop for FileBackend {
    fn drop(&mut self) {
        let _ = self.writer.flush();
    }
}

/// Appends (or truncates and rewrites) a single log file, buffered.
pub type FileSink = BaseSink<FileBackend>;

impl FileSink {
    /// Open `path` for logging; `truncate` discards existing content,
    /// otherwise new lines are appended.
    ///
    /// # Errors
    ///
    /// Returns an error if the file cannot be created or opened.
    pub fn new<P: AsRef<Path>>(path: P, truncate: bool) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let mut options = OpenOptions::new();
        options.create(true).write(true);
        if truncate {
            options.truncate(true);
        } else {
            options.append(true);
        }
        let file = options.open(&path).map_err(|e| {
            LoggerError::file_sink(path.display().to_string(), "failed to open", e)
        })?;
        Ok(BaseSink::with_backend(FileBackend {
            path,
            writer: BufWriter::new(file),
        }))
    }
}
