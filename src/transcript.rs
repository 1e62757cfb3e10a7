use std::fs::{self, OpenOptions};
use std::io::Write;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};

/// Append-only plain-text transcript of the session.
///
/// Every rendered output line and every submitted command line is appended
/// verbatim. Writes are synchronous and serial; a failed write or remove is a
/// recoverable error for the caller to report, never a reason to terminate.
#[derive(Debug)]
pub struct Transcript {
    path: PathBuf,
}

impl Transcript {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Appends text verbatim, creating the file on first use.
    pub fn append(&self, text: &str) -> Result<()> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .with_context(|| format!("failed to open transcript {}", self.path.display()))?;
        file.write_all(text.as_bytes())
            .with_context(|| format!("failed to append to transcript {}", self.path.display()))
    }

    /// Appends text followed by a newline.
    pub fn append_line(&self, line: &str) -> Result<()> {
        self.append(line)?;
        self.append("\n")
    }

    /// Deletes the transcript file wholesale. Errors (including a missing
    /// file) are recoverable and reported to the caller.
    pub fn remove(&self) -> Result<()> {
        fs::remove_file(&self.path)
            .with_context(|| format!("failed to remove transcript {}", self.path.display()))
    }
}
