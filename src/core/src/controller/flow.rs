//! Two-step submission: gate, then confirm.

use crate::validation::GateReport;
use serde::Serialize;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum SubmissionState {
    #[default]
    Editing,
    /// Gate passed, confirmation modal open.
    Confirming,
    Submitted,
}

/// Result of a submission step.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "outcome", rename_all = "snake_case")]
pub enum SubmitOutcome {
    /// The gate failed; the form stays in editing.
    Blocked { report: GateReport },
    AwaitingConfirmation,
    Submitted,
    Cancelled,
    /// Confirm or cancel without an open confirmation.
    Ignored,
}

/// Result of the "check data" action.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CheckOutcome {
    pub report: GateReport,
    pub message: String,
}

impl CheckOutcome {
    pub fn is_valid(&self) -> bool {
        self.report.is_valid()
    }
}

/// Submission state transitions.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct SubmissionFlow {
    state: SubmissionState,
}

impl SubmissionFlow {
    pub fn state(&self) -> SubmissionState {
        self.state
    }

    /// Submit with the gate's verdict.
    pub fn submit(&mut self, report: GateReport) -> SubmitOutcome {
        if report.is_valid() {
            self.state = SubmissionState::Confirming;
            SubmitOutcome::AwaitingConfirmation
        } else {
            self.state = SubmissionState::Editing;
            SubmitOutcome::Blocked { report }
        }
    }

    pub fn confirm(&mut self) -> SubmitOutcome {
        match self.state {
            SubmissionState::Confirming => {
                self.state = SubmissionState::Submitted;
                SubmitOutcome::Submitted
            }
            _ => SubmitOutcome::Ignored,
        }
    }

    pub fn cancel(&mut self) -> SubmitOutcome {
        match self.state {
            SubmissionState::Confirming => {
                self.state = SubmissionState::Editing;
                SubmitOutcome::Cancelled
            }
            _ => SubmitOutcome::Ignored,
        }
    }

    pub fn reset(&mut self) {
        self.state = SubmissionState::Editing;
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn blocked() -> GateReport {
        GateReport {
            invalid_fields: vec!["zip".to_string()],
            missing_required: Vec::new(),
        }
    }

    #[test]
    fn test_confirm_requires_passing_gate() {
        let mut flow = SubmissionFlow::default();
        assert!(matches!(flow.submit(blocked()), SubmitOutcome::Blocked { .. }));
        assert_eq!(flow.confirm(), SubmitOutcome::Ignored);
        assert_eq!(flow.state(), SubmissionState::Editing);
    }

    #[test]
    fn test_confirm_then_submitted() {
        let mut flow = SubmissionFlow::default();
        assert_eq!(flow.submit(GateReport::default()), SubmitOutcome::AwaitingConfirmation);
        assert_eq!(flow.confirm(), SubmitOutcome::Submitted);
        assert_eq!(flow.state(), SubmissionState::Submitted);
        assert_eq!(flow.cancel(), SubmitOutcome::Ignored);
    }

    #[test]
    fn test_cancel_returns_to_editing() {
        let mut flow = SubmissionFlow::default();
        flow.submit(GateReport::default());
        assert_eq!(flow.cancel(), SubmitOutcome::Cancelled);
        assert_eq!(flow.state(), SubmissionState::Editing);
    }
}
