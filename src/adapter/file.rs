//! Append-only file sink.

use std::fs::{File, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

use crate::adapter::{render_line, Cause, LogAdapter};
use crate::error::{AdapterError, Result};
use crate::level::Level;

/// Appends lines to a file, flushing after each one.
#[derive(Debug)]
pub struct FileAdapter {
    threshold: Level,
    path: PathBuf,
    file: Mutex<File>,
}

impl FileAdapter {
    /// Opens `path` in append mode, creating it if it doesn't exist.
    ///
    /// # Errors
    ///
    /// Returns error if the file cannot be created or opened.
    pub fn open(path: impl AsRef<Path>, threshold: Level) -> Result<Self> {
        let path = path.as_ref().to_path_buf();
        let file = OpenOptions::new().create(true).append(true).open(&path)?;
        Ok(Self {
            threshold,
            path,
            file: Mutex::new(file),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl LogAdapter for FileAdapter {
    fn threshold(&self) -> Level {
        self.threshold
    }

    fn log(&self, _level: Level, line: &str, cause: Option<Cause<'_>>) -> Result<()> {
        let text = render_line(line, cause);
        let mut file = self
            .file
            .lock()
            .map_err(|_| AdapterError::Sink(format!("{} writer poisoned", self.path.display())))?;
        file.write_all(text.as_bytes())?;
        file.flush()?;
        Ok(())
    }

    fn flush(&self) -> Result<()> {
        let mut file = self
            .file
            .lock()
            .map_err(|_| AdapterError::Sink(format!("{} writer poisoned", self.path.display())))?;
        file.flush()?;
        Ok(())
    }
}
