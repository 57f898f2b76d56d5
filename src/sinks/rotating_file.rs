//! Size-rotating file sink
//!
//! The live file is rotated before any write that would push it past
//! `max_size`: `app.log` becomes `app.1.log`, an existing `app.1.log`
//! becomes `app.2.log`, and so on up to `max_files` numbered backups. The
//! oldest backup falls off the end because nothing is renamed past
//! `max_files`.

use super::{BaseSink, SinkBackend};
use crate::core::error::{LoggerError, Result};
use crate::core::log_message::LogMessage;
use std::fs::{self, File, OpenOptions};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

/// Backup path for `index`, with index 0 denoting the live file.
///
/// The index is inserted between stem and extension (`app.log` ->
/// `app.1.log`); paths without an extension get it appended (`app` ->
/// `app.1`). Only the last dot of the file name splits the extension.
fn rotated_path(base: &Path, index: usize) -> PathBuf {
    if index == 0 {
        return base.to_path_buf();
    }
    let name = base
        .file_name()
        .map(|n| n.to_string_lossy().into_owned())
        .unwrap_or_default();
    let rotated = match name.rfind('.') {
        Some(dot) => format!("{}.{}{}", &name[..dot], index, &name[dot..]),
        None => format!("{}.{}", name, index),
    };
    base.with_file_name(rotated)
}

fn open_append(path: &Path) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .append(true)
        .open(path)
        .map_err(|e| LoggerError::file_sink(path.display().to_string(), "failed to open", e))
}

fn open_truncated(path: &Path, context: &str) -> Result<File> {
    OpenOptions::new()
        .create(true)
        .write(true)
        .truncate(true)
        .open(path)
        .map_err(|e| LoggerError::file_rotation(path.display().to_string(), context.to_string(), e))
}

pub struct RotatingFileBackend {
    base_path: PathBuf,
    max_size: u64,
    max_files: usize,
    current_size: u64,
    writer: Option<BufWriter<File>>,
}

impl RotatingFileBackend {
    /// Shift backups one index up, oldest first, then start a fresh live
    /// file.
    ///
    /// If a rename fails (for example the destination is locked by another
    /// process), rotation is abandoned and logging continues into the
    /// truncated live file. That fail-open policy discards the live file's
    /// previous content without telling the caller; it is kept as-is
    /// deliberately. Only a total inability to open any file is surfaced as
    /// an error, because logging cannot proceed at all in that case.
    fn rotate(&mut self) -> Result<()> {
        if let Some(mut writer) = self.writer.take() {
            // Release the handle before renaming; flush errors are moot
            // since the file is about to be renamed or truncated.
            let _ = writer.flush();
        }

        for i in (1..=self.max_files).rev() {
            let src = rotated_path(&self.base_path, i - 1);
            if !src.exists() {
                continue;
            }
            let dst = rotated_path(&self.base_path, i);
            // Last-write-wins for the oldest retained backup.
            let _ = fs::remove_file(&dst);
            if fs::rename(&src, &dst).is_err() {
                let file = open_truncated(
                    &self.base_path,
                    "cannot reopen live file after failed rotation",
                )?;
                self.writer = Some(BufWriter::new(file));
                return Ok(());
            }
        }

        let file = open_truncated(&self.base_path, "cannot create new file after rotation")?;
        self.writer = Some(BufWriter::new(file));
        Ok(())
    }
}

impl SinkBackend for RotatingFileBackend {
    fn write(&mut self, _msg: &LogMessage<'_>, formatted: &str) -> Result<()> {
        let message_size = formatted.len() as u64;
        // Rotate before the write that would exceed max_size. The write
        // itself may still push the fresh file slightly over; that
        // imprecision is accepted.
        if self.current_size + message_size > self.max_size {
            self.rotate()?;
            self.current_size = 0;
        }
        let writer = self
            .writer
            .as_mut()
            .ok_or_else(|| LoggerError::writer("rotating file writer not initialized"))?;
        writer.write_all(formatted.as_bytes()).map_err(|e| {
            LoggerError::file_sink(
                self.base_path.display().to_string(),
                "failed to write log entry",
                e,
            )
        })?;
        self.current_size += message_size;
        Ok(())
    }

    fn flush(&mut self) -> Result<()> {
        if let Some(ref mut writer) = self.writer {
            writer.flush().map_err(|e| {
                LoggerError::file_sink(self.base_path.display().to_string(), "failed to flush", e)
            })?;
        }
        Ok(())
    }
}

impl Drop for RotatingFileBackend {
    fn drop(&mut self) {
        if let Some(mut writer) = self.writer.take() {
            let _ = writer.flush();
        }
    }
}

/// File sink that rotates numbered backups once the live file would exceed
/// `max_size` bytes, keeping at most `max_files` backups.
///
/// # Examples
///
/// ```no_run
/// use patternlog::sinks::RotatingFileSink;
///
/// let sink = RotatingFileSink::new("/var/log/app.log", 10 * 1024 * 1024, 5).unwrap();
/// ```
pub type RotatingFileSink = BaseSink<RotatingFileBackend>;

impl RotatingFileSink {
    /// # Errors
    ///
    /// Returns an invalid-configuration error if `max_size` or `max_files`
    /// is zero, and a file sink error if the live file cannot be opened for
    /// append. A pre-existing live file seeds the running byte counter so
    /// rotation stays correct across process restarts.
    pub fn new<P: AsRef<Path>>(path: P, max_size: u64, max_files: usize) -> Result<Self> {
        if max_size == 0 {
            return Err(LoggerError::config(
                "RotatingFileSink",
                "max_size cannot be 0",
            ));
        }
        if max_files == 0 {
            return Err(LoggerError::config(
                "RotatingFileSink",
                "max_files cannot be 0",
            ));
        }

        let base_path = path.as_ref().to_path_buf();
        let file = open_append(&base_path)?;
        let current_size = file.metadata().map(|m| m.len()).unwrap_or(0);

        Ok(BaseSink::with_backend(RotatingFileBackend {
            base_path,
            max_size,
            max_files,
            current_size,
            writer: Some(BufWriter::new(file)),
        }))
    }
}
