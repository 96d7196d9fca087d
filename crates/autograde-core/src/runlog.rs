//! Append-only run log.
//!
//! One timestamped line per message. Logging is best-effort: `append`
//! reports its own success and every caller discards that result, since a
//! failure to log must never take down a grading run.

use std::io::Write;
use std::path::{Path, PathBuf};

use chrono::Utc;

/// Best-effort append-only log sink.
#[derive(Debug, Clone)]
pub struct RunLog {
    path: PathBuf,
}

impl RunLog {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Append `<ISO-8601-UTC-timestamp>Z <message>`, creating the file if
    /// needed. Returns false on any I/O failure.
    pub fn append(&self, message: &str) -> bool {
        let line = format!(
            "{} {message}\n",
            Utc::now().format("%Y-%m-%dT%H:%M:%S%.6fZ")
        );
        let result = std::fs::OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .and_then(|mut file| file.write_all(line.as_bytes()));

        match result {
            Ok(()) => true,
            Err(e) => {
                tracing::debug!("run log write to {} failed: {e}", self.path.display());
                false
            }
        }
    }
}
