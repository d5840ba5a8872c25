//! Harness configuration

use std::ffi::OsString;
use std::path::{Path, PathBuf};
use std::time::Duration;

use glob::Pattern;

use crate::error::FiletestError;

/// Default per-invocation compiler timeout.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(60);

/// How to run the compiler under test.
///
/// The command line is `<program> <prefix_args...> -c <case-file> --emit-ir <backend_flag>`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CompilerCommand {
    pub program: OsString,
    /// Arguments placed before the standard flags, e.g. a script for an interpreter.
    pub prefix_args: Vec<OsString>,
    pub backend_flag: String,
}

impl CompilerCommand {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            prefix_args: Vec::new(),
            backend_flag: "--generator".to_string(),
        }
    }
}

impl Default for CompilerCommand {
    fn default() -> Self {
        Self::new("lucy")
    }
}

/// Everything a run needs to know besides the test directory.
#[derive(Debug, Clone)]
pub struct HarnessConfig {
    /// Extension of case files, without the dot
    pub case_extension: String,
    /// Extension of the IR file the compiler writes next to each case
    pub output_extension: String,
    /// Line prefix marking expected IR inside a case file
    pub comment_marker: String,
    pub compiler: CompilerCommand,
    /// `None` waits for the compiler forever
    pub timeout: Option<Duration>,
    /// Only case files whose name matches are run
    pub filter: Option<Pattern>,
}

impl Default for HarnessConfig {
    fn default() -> Self {
        Self {
            case_extension: "lc".to_string(),
            output_extension: "ll".to_string(),
            comment_marker: "#".to_string(),
            compiler: CompilerCommand::default(),
            timeout: Some(DEFAULT_TIMEOUT),
            filter: None,
        }
    }
}

impl HarnessConfig {
    pub fn with_compiler(mut self, compiler: CompilerCommand) -> Self {
        self.compiler = compiler;
        self
    }

    pub fn with_case_extension(mut self, extension: impl Into<String>) -> Self {
        self.case_extension = extension.into();
        self
    }

    pub fn with_output_extension(mut self, extension: impl Into<String>) -> Self {
        self.output_extension = extension.into();
        self
    }

    pub fn with_comment_marker(mut self, marker: impl Into<String>) -> Self {
        self.comment_marker = marker.into();
        self
    }

    pub fn with_timeout(mut self, timeout: Option<Duration>) -> Self {
        self.timeout = timeout;
        self
    }

    /// Restrict the run to case files whose name matches the glob `pattern`.
    pub fn with_filter(mut self, pattern: &str) -> Result<Self, FiletestError> {
        let pattern = Pattern::new(pattern).map_err(|e| FiletestError::InvalidFilter {
            pattern: pattern.to_string(),
            message: e.msg.to_string(),
        })?;
        self.filter = Some(pattern);
        Ok(self)
    }

    /// Reject settings that would make a run unsafe or meaningless.
    ///
    /// Matching case and output extensions would point the artifact guard at
    /// the case file itself. An empty marker would select every line.
    pub fn validate(&self) -> Result<(), FiletestError> {
        if self.comment_marker.is_empty() {
            return Err(FiletestError::InvalidConfig(
                "comment marker must not be empty".to_string(),
            ));
        }
        if self.case_extension == self.output_extension {
            return Err(FiletestError::InvalidConfig(format!(
                "case and output extensions are both '{}'",
                self.case_extension
            )));
        }
        Ok(())
    }

    /// Path of the IR file the compiler writes for `case_path`.
    pub fn artifact_path(&self, case_path: &Path) -> PathBuf {
        case_path.with_extension(&self.output_extension)
    }

    /// Whether a directory entry named `file_name` is a case this run should load.
    pub fn selects(&self, file_name: &str) -> bool {
        let extension_matches = Path::new(file_name)
            .extension()
            .is_some_and(|ext| ext == self.case_extension.as_str());
        let filter_matches = self
            .filter
            .as_ref()
            .is_none_or(|pattern| pattern.matches(file_name));
        extension_matches && filter_matches
    }
}
