//! Error types for the archive module.

use std::path::PathBuf;
use thiserror::Error;

/// Errors that can occur while packaging merged outputs.
#[derive(Debug, Error)]
pub enum ArchiveError {
    /// The job carried no entries.
    #[error("Nada que comprimir")]
    NoEntries,

    /// A source file disappeared before it could be packaged.
    #[error("Archive source missing: {path}")]
    SourceMissing { path: PathBuf },

    /// Writing the archive failed.
    #[error("Failed to write archive {path}: {reason}")]
    WriteFailed { path: PathBuf, reason: String },

    /// Archive interpreter binary not found.
    #[error("Archive interpreter not found at path: {path}")]
    InterpreterNotFound { path: PathBuf },

    /// The packaging process exited unsuccessfully.
    #[error("Archive command failed: {reason}")]
    CommandFailed {
        reason: String,
        stderr: Option<String>,
    },

    /// The packaging process exceeded its timeout.
    #[error("Archiving timed out after {timeout_secs} seconds")]
    Timeout { timeout_secs: u64 },

    /// I/O error during packaging.
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),
}

impl ArchiveError {
    /// Creates a new write failed error.
    pub fn write_failed(path: PathBuf, reason: impl Into<String>) -> Self {
        Self::WriteFailed {
            path,
            reason: reason.into(),
        }
    }

    /// Creates a new command failed error with captured stderr.
    pub fn command_failed(reason: impl Into<String>, stderr: Option<String>) -> Self {
        Self::CommandFailed {
            reason: reason.into(),
            stderr,
        }
    }
}
