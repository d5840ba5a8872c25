//! Error types for lucy-filetests
//!
//! Only run-level failures are errors. Problems with an individual case are
//! recorded as [`crate::FailureReason`] values and never abort a run.

use std::fmt;
use std::io;
use std::path::PathBuf;

/// Error type for harness operations that abort the whole run
#[derive(Debug)]
pub enum FiletestError {
    /// The test directory does not exist or is not a directory
    DirectoryNotFound(PathBuf),
    /// The test directory exists but could not be listed
    DirectoryUnreadable { path: PathBuf, source: io::Error },
    /// The case name filter is not a valid glob pattern
    InvalidFilter { pattern: String, message: String },
    /// The configuration cannot describe a safe run
    InvalidConfig(String),
    /// Writing the report failed
    Report(io::Error),
}

impl fmt::Display for FiletestError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FiletestError::DirectoryNotFound(path) => {
                write!(f, "{} is not a valid directory", path.display())
            }
            FiletestError::DirectoryUnreadable { path, source } => {
                write!(f, "failed to list {}: {source}", path.display())
            }
            FiletestError::InvalidFilter { pattern, message } => {
                write!(f, "invalid filter pattern '{pattern}': {message}")
            }
            FiletestError::InvalidConfig(message) => write!(f, "invalid configuration: {message}"),
            FiletestError::Report(e) => write!(f, "failed to write report: {e}"),
        }
    }
}

impl std::error::Error for FiletestError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FiletestError::DirectoryUnreadable { source, .. } => Some(source),
            FiletestError::Report(e) => Some(e),
            _ => None,
        }
    }
}

impl From<io::Error> for FiletestError {
    fn from(e: io::Error) -> Self {
        FiletestError::Report(e)
    }
}
