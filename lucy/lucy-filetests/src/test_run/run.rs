//! Running test cases against the compiler.

use std::fs;
use std::io::{self, Write};
use std::path::Path;

use super::{FailureReason, RunSummary, TestOutcome};
use crate::artifact::{ArtifactGuard, ArtifactWatch};
use crate::compiler::{Compiler, InvocationStatus};
use crate::config::HarnessConfig;
use crate::discovery::discover_cases;
use crate::error::FiletestError;
use crate::normalize::{Header, canonicalize, normalize_ir};
use crate::report::Reporter;
use crate::test_case::TestCase;

/// Compare expected and generated IR, both already passed through [`normalize_ir`].
///
/// Indentation is ignored; line order and content must match exactly.
pub fn compare(expected: &str, generated: &str) -> TestOutcome {
    if canonicalize(expected) == canonicalize(generated) {
        TestOutcome::Passed
    } else {
        TestOutcome::Failed(FailureReason::ContentMismatch {
            expected: expected.to_string(),
            generated: generated.to_string(),
        })
    }
}

/// Compile one case and compare the result with its expected IR.
///
/// An IR file the compiler wrote during this call is removed before
/// returning, whatever the outcome. A file it left untouched is never read
/// as output and never removed.
pub fn run_test_file(case: &TestCase, compiler: &dyn Compiler, config: &HarnessConfig) -> TestOutcome {
    let watch = ArtifactWatch::before_compile(config.artifact_path(case.path()));
    let invocation = compiler.compile(case.path());
    let guard = watch.claim();

    match invocation.status {
        InvocationStatus::Succeeded => {}
        InvocationStatus::Failed(detail) => {
            return TestOutcome::Failed(FailureReason::CompilerError(detail));
        }
        InvocationStatus::TimedOut(after) => {
            return TestOutcome::Failed(FailureReason::Timeout(after));
        }
    }

    let Some(artifact) = invocation.artifact else {
        return TestOutcome::Failed(FailureReason::MissingOutput(watch.path().to_path_buf()));
    };
    let _adopted = if artifact == watch.path() {
        if guard.is_none() {
            return TestOutcome::Failed(FailureReason::MissingOutput(artifact));
        }
        None
    } else {
        Some(ArtifactGuard::adopt(artifact.clone()))
    };

    let generated = match fs::read_to_string(&artifact) {
        Ok(text) => text,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {
            return TestOutcome::Failed(FailureReason::MissingOutput(artifact));
        }
        Err(e) => {
            return TestOutcome::Failed(FailureReason::UnreadableOutput {
                path: artifact,
                message: e.to_string(),
            });
        }
    };

    compare(case.expected_ir(), &normalize_ir(&generated, Header::Strip))
}

/// Run every case in `dir`, reporting as it goes.
///
/// Cases run one at a time, in file name order. Per-case failures are counted
/// in the returned summary; only problems with the directory itself or with
/// writing the report are errors.
pub fn run_tests<W: Write>(
    dir: &Path,
    config: &HarnessConfig,
    compiler: &dyn Compiler,
    reporter: &mut Reporter<W>,
) -> Result<RunSummary, FiletestError> {
    config.validate()?;
    let dir = dir
        .canonicalize()
        .map_err(|_| FiletestError::DirectoryNotFound(dir.to_path_buf()))?;
    let cases = discover_cases(&dir, config)?;

    let mut summary = RunSummary::default();
    for loaded in cases {
        let (name, outcome) = match loaded {
            Ok(case) => {
                log::debug!("running {}", case.path().display());
                (case.name(), run_test_file(&case, compiler, config))
            }
            Err(e) => (
                e.name(),
                TestOutcome::Failed(FailureReason::UnreadableCase(e.to_string())),
            ),
        };

        if let TestOutcome::Failed(reason) = &outcome {
            log::debug!("{name} failed: {}", reason.kind());
        }
        summary.record(&outcome);
        reporter.case_result(&name, &outcome)?;
    }

    reporter.summary(&summary)?;
    log::info!(
        "{} passed, {} failed, {} total",
        summary.passed,
        summary.failed,
        summary.total
    );
    Ok(summary)
}
