//! Golden-file IR tests for the lucy compiler.
//!
//! Each `.lc` case file carries its expected LLVM IR in `#` comments. The
//! harness compiles the case with `lucy -c <case> --emit-ir --generator`,
//! normalizes the generated `.ll` file and the expected block the same way,
//! and compares them as text.
//!
//! Cases run sequentially, in file name order, since the compiler writes its
//! output next to the case file.

pub mod artifact;
pub mod compiler;
pub mod config;
pub mod discovery;
pub mod error;
pub mod normalize;
pub mod report;
pub mod test_case;
pub mod test_run;

use std::io::Write;
use std::path::Path;

// Re-export commonly used types
pub use compiler::{Compiler, ExternalCompiler, Invocation, InvocationStatus};
pub use config::{CompilerCommand, HarnessConfig};
pub use error::FiletestError;
pub use report::Reporter;
pub use test_case::TestCase;
pub use test_run::{FailureReason, RunSummary, TestOutcome, run_test_file, run_tests};

/// Run all cases in `dir` against the compiler configured in `config`.
pub fn run_filetests<W: Write>(
    dir: &Path,
    config: &HarnessConfig,
    reporter: &mut Reporter<W>,
) -> Result<RunSummary, FiletestError> {
    let compiler = ExternalCompiler::from_config(config);
    run_tests(dir, config, &compiler, reporter)
}
