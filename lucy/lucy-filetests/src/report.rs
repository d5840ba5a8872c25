//! Human-readable run output.

use std::io::{self, Write};

use crate::test_run::{FailureReason, RunSummary, TestOutcome};

const RESET: &str = "\x1b[0m";
const RED: &str = "\x1b[91m";
const YELLOW: &str = "\x1b[93m";
const BLUE: &str = "\x1b[34m";
const GREEN: &str = "\x1b[32m";
const DARK_RED: &str = "\x1b[31m";

/// Writes per-case status lines and the final summary.
pub struct Reporter<W> {
    out: W,
    color: bool,
}

impl<W: Write> Reporter<W> {
    pub fn new(out: W) -> Self {
        Self { out, color: true }
    }

    pub fn with_color(mut self, color: bool) -> Self {
        self.color = color;
        self
    }

    pub fn into_inner(self) -> W {
        self.out
    }

    fn paint(&self, code: &str, text: &str) -> String {
        if self.color {
            format!("{code}{text}{RESET}")
        } else {
            text.to_string()
        }
    }

    /// Report one case; failures include both sides of the comparison.
    pub fn case_result(&mut self, name: &str, outcome: &TestOutcome) -> io::Result<()> {
        let reason = match outcome {
            TestOutcome::Passed => return writeln!(self.out, "Test successful: {name}"),
            TestOutcome::Failed(reason) => reason,
        };

        match reason {
            FailureReason::ContentMismatch { expected, generated } => {
                writeln!(self.out, "Test failed    : {name}")?;
                let lines = [
                    self.paint(YELLOW, "Expected:"),
                    self.paint(RED, expected),
                    self.paint(YELLOW, "Generated:"),
                    self.paint(RED, generated),
                ];
                for line in lines {
                    writeln!(self.out, "{line}")?;
                }
                Ok(())
            }
            FailureReason::CompilerError(_) => {
                writeln!(self.out, "Error running compiler on {name}: {reason}")
            }
            _ => writeln!(self.out, "Test failed    : {name}: {reason}"),
        }
    }

    /// Report run totals.
    pub fn summary(&mut self, summary: &RunSummary) -> io::Result<()> {
        writeln!(self.out)?;
        let lines = [
            self.paint(BLUE, &format!("Total tests: {}", summary.total)),
            self.paint(GREEN, &format!("Passed: {}", summary.passed)),
            self.paint(DARK_RED, &format!("Failed: {}", summary.failed)),
        ];
        for line in lines {
            writeln!(self.out, "{line}")?;
        }
        self.out.flush()
    }
}
