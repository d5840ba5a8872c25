//! Aggregate results for a whole run.

use super::TestOutcome;

/// Totals across all test cases of a run.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RunSummary {
    /// Number of test cases that passed.
    pub passed: usize,
    /// Number of test cases that failed, for any reason.
    pub failed: usize,
    /// Total number of test cases.
    pub total: usize,
}

impl RunSummary {
    pub fn record(&mut self, outcome: &TestOutcome) {
        self.total += 1;
        if outcome.is_passed() {
            self.passed += 1;
        } else {
            self.failed += 1;
        }
    }

    /// True when nothing failed, including when no cases were found.
    pub fn all_passed(&self) -> bool {
        self.failed == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_run::FailureReason;

    #[test]
    fn test_record_keeps_totals_consistent() {
        let mut summary = RunSummary::default();
        summary.record(&TestOutcome::Passed);
        summary.record(&TestOutcome::Failed(FailureReason::CompilerError("exit 1".into())));
        summary.record(&TestOutcome::Passed);

        assert_eq!(summary.total, 3);
        assert_eq!(summary.passed, 2);
        assert_eq!(summary.failed, 1);
        assert_eq!(summary.total, summary.passed + summary.failed);
        assert!(!summary.all_passed());
    }

    #[test]
    fn test_empty_run_passes() {
        assert!(RunSummary::default().all_passed());
    }
}
