//! Error types for completion installation.

use thiserror::Error;

/// Fatal installation errors.
///
/// Per-path write problems are not errors at this level; they are reported
/// as [`WriteOutcome`](crate::install::WriteOutcome) values so one bad
/// directory never stops the others.
#[derive(Debug, Error)]
pub enum InstallError {
    /// None of the probed completion frameworks is installed.
    #[error("No completion paths found. Supported frameworks: {guidance}")]
    NoCompletionPathFound { guidance: String },
}
