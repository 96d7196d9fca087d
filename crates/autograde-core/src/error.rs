//! Grading error types.

use std::path::PathBuf;

use thiserror::Error;

/// Errors from a grading run.
///
/// `KeyMissing` and `SubmissionMissing` are operational conditions: the run
/// ends cleanly without a report and the external scheduler tries again on
/// the next cycle.
#[derive(Debug, Error)]
pub enum GradeError {
    /// The answer-key file has not been generated, or was removed.
    #[error("answer key file missing: {0}")]
    KeyMissing(PathBuf),

    /// No submission document exists at any configured location.
    #[error("no submission document found")]
    SubmissionMissing,

    /// The answer-key file exists but could not be read or parsed.
    #[error("failed to load answer key: {0:#}")]
    KeyUnreadable(anyhow::Error),

    /// The submission document could not be read.
    #[error("failed to read submission {path}")]
    SubmissionUnreadable {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl GradeError {
    /// Operational conditions end the run without error propagation.
    pub fn is_operational(&self) -> bool {
        matches!(
            self,
            GradeError::KeyMissing(_) | GradeError::SubmissionMissing
        )
    }
}
