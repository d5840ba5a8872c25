//! Run test implementation.

pub mod run;
pub mod run_summary;

use std::fmt;
use std::path::PathBuf;
use std::time::Duration;

// Re-exports
pub use run::{compare, run_test_file, run_tests};
pub use run_summary::RunSummary;

/// Outcome of running a single test case.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TestOutcome {
    Passed,
    Failed(FailureReason),
}

impl TestOutcome {
    pub fn is_passed(&self) -> bool {
        matches!(self, TestOutcome::Passed)
    }
}

/// Why a test case failed.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FailureReason {
    /// Normalized IR differs. Both sides keep their indentation for display.
    ContentMismatch { expected: String, generated: String },
    /// The compiler exited non-zero or could not be started.
    CompilerError(String),
    /// The compiler succeeded but wrote no IR file.
    MissingOutput(PathBuf),
    /// The compiler was killed after the timeout.
    Timeout(Duration),
    /// The case file itself could not be read.
    UnreadableCase(String),
    /// The IR file exists but could not be read.
    UnreadableOutput { path: PathBuf, message: String },
}

impl FailureReason {
    /// Short, stable name of the failure kind.
    pub fn kind(&self) -> &'static str {
        match self {
            FailureReason::ContentMismatch { .. } => "content-mismatch",
            FailureReason::CompilerError(_) => "compiler-invocation-error",
            FailureReason::MissingOutput(_) => "missing-output-file",
            FailureReason::Timeout(_) => "timeout",
            FailureReason::UnreadableCase(_) => "unreadable-case",
            FailureReason::UnreadableOutput { .. } => "unreadable-output",
        }
    }
}

impl fmt::Display for FailureReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            FailureReason::ContentMismatch { .. } => write!(f, "generated IR does not match"),
            FailureReason::CompilerError(detail) => write!(f, "{detail}"),
            FailureReason::MissingOutput(path) => {
                write!(f, "generated IR file {} not found", path.display())
            }
            FailureReason::Timeout(after) => {
                write!(f, "compiler timed out after {:.1}s", after.as_secs_f64())
            }
            FailureReason::UnreadableCase(message) => write!(f, "{message}"),
            FailureReason::UnreadableOutput { path, message } => {
                write!(f, "failed to read {}: {message}", path.display())
            }
        }
    }
}
