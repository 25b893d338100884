//! Deterministic, judge-free categorizer.
//!
//! The correctness backstop for the whole pipeline: pure functions, no
//! network, bounded time. When the judge is unreachable, times out, or
//! returns garbage, this component supplies the score, the rationale, and
//! a behavioral statement for every failure category — it can neither fail
//! nor block, which is what makes "feedback is always produced" true.

use crate::domain::models::{FailureKind, RunSummary, Trace};

/// Functional area inferred from a trace, used to keep same-kind template
/// statements distinguishable without echoing step text to the agent.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum FunctionalArea {
    Create,
    Retrieve,
    Update,
    Delete,
}

impl FunctionalArea {
    fn infer(trace: &Trace) -> Option<Self> {
        let text = format!(
            "{} {}",
            trace.scenario.to_lowercase(),
            trace.failed_step.to_lowercase()
        );
        if ["create", "creating", "add", "register"].iter().any(|w| text.contains(w)) {
            Some(Self::Create)
        } else if ["get", "fetch", "read", "retriev", "find", "list"].iter().any(|w| text.contains(w)) {
            Some(Self::Retrieve)
        } else if ["update", "updating", "modify", "change", "edit"].iter().any(|w| text.contains(w)) {
            Some(Self::Update)
        } else if ["delete", "deleting", "remove"].iter().any(|w| text.contains(w)) {
            Some(Self::Delete)
        } else {
            None
        }
    }

    fn noun(self) -> &'static str {
        match self {
            Self::Create => "create",
            Self::Retrieve => "retrieval",
            Self::Update => "update",
            Self::Delete => "deletion",
        }
    }
}

/// Deterministic summarizer used whenever the judge path is unavailable.
pub struct FallbackCategorizer;

impl FallbackCategorizer {
    /// Pass-rate score plus a non-empty rationale for any valid summary.
    ///
    /// The empty run scores 0.0: a cycle that collected no scenarios has
    /// demonstrated no satisfied behavior.
    pub fn score(summary: &RunSummary) -> (f64, String) {
        if summary.total() == 0 {
            return (
                0.0,
                "no scenarios were collected; nothing to evaluate".to_string(),
            );
        }
        let rationale = format!(
            "{}/{} scenarios passed; judge unavailable, showing pass-rate only",
            summary.passed,
            summary.total()
        );
        (summary.pass_rate(), rationale)
    }

    /// Static template statement for a failure category. Never empty.
    pub fn statement(trace: &Trace) -> String {
        let area = FunctionalArea::infer(trace);
        match trace.kind {
            FailureKind::Unimplemented => match area {
                Some(a) => format!("The {} operation has not been implemented yet.", a.noun()),
                None => "A required operation has not been implemented yet.".to_string(),
            },
            FailureKind::AssertionFailure => match area {
                Some(a) => format!(
                    "The {} behavior does not match what the specification expects.",
                    a.noun()
                ),
                None => "The implementation's behavior does not match what the specification expects."
                    .to_string(),
            },
            FailureKind::MissingField => match area {
                Some(a) => format!("A required field is missing from the {} response.", a.noun()),
                None => "A required field is missing from the produced output.".to_string(),
            },
            FailureKind::KeyError => match area {
                Some(a) => format!(
                    "The {} operation looked up data that was never stored.",
                    a.noun()
                ),
                None => "The implementation looked up data that was never stored.".to_string(),
            },
            FailureKind::Blocked => match area {
                Some(a) => format!(
                    "The {} behavior could not be exercised because an earlier behavior in the same feature failed.",
                    a.noun()
                ),
                None => "This behavior could not be exercised because an earlier behavior in the same feature failed."
                    .to_string(),
            },
            FailureKind::Unknown => match area {
                Some(a) => format!("The {} operation does not satisfy its expected behavior.", a.noun()),
                None => "The implementation does not satisfy the expected behavior for this scenario."
                    .to_string(),
            },
        }
    }
}
