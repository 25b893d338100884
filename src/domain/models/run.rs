//! The result model for one behavioral test run.

use serde::{Deserialize, Serialize};

use crate::domain::errors::{DataError, EvalResult};

/// Terminal status of a single scenario.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ScenarioStatus {
    Passed,
    Failed,
    Skipped,
}

/// Coarse failure category, classified from the runner's error text.
///
/// Categories are deliberately broad: they drive statement deduplication
/// and fallback templating, not diagnosis.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash)]
#[serde(rename_all = "kebab-case")]
pub enum FailureKind {
    /// An expectation about observable behavior was not met.
    AssertionFailure,
    /// The exercised capability is not implemented yet.
    Unimplemented,
    /// A response was produced but lacked an expected piece of data.
    MissingField,
    /// A lookup for expected data found nothing.
    KeyError,
    /// The scenario never ran because an earlier failure prevented it.
    Blocked,
    Unknown,
}

impl FailureKind {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::AssertionFailure => "assertion-failure",
            Self::Unimplemented => "unimplemented",
            Self::MissingField => "missing-field",
            Self::KeyError => "key-error",
            Self::Blocked => "blocked",
            Self::Unknown => "unknown",
        }
    }
}

impl std::fmt::Display for FailureKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Diagnostics attached to a failed (or blocked) scenario.
///
/// `message` and `location` are quarantined here: they inform failure
/// classification and logging but are never copied into a [`Trace`] or
/// any outbound payload.
///
/// [`Trace`]: super::trace::Trace
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct FailureDetail {
    /// Text of the first failing step, as authored in the behavior spec.
    pub failed_step: String,
    /// Failure category.
    pub kind: FailureKind,
    /// Raw error text from the runner. May be empty. Never leaves the
    /// ingestion and logging boundary.
    pub message: String,
    /// Source location reported by the runner, when present.
    pub location: Option<String>,
    /// Per-step status tags in execution order.
    #[serde(default)]
    pub step_statuses: Vec<String>,
}

/// Outcome of a single scenario.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ScenarioResult {
    pub name: String,
    pub status: ScenarioStatus,
    /// Present for failed scenarios and for skips caused by an upstream
    /// failure. Absent otherwise.
    pub failure: Option<FailureDetail>,
}

impl ScenarioResult {
    pub fn passed(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: ScenarioStatus::Passed,
            failure: None,
        }
    }

    pub fn failed(name: impl Into<String>, detail: FailureDetail) -> Self {
        Self {
            name: name.into(),
            status: ScenarioStatus::Failed,
            failure: Some(detail),
        }
    }

    pub fn skipped(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: ScenarioStatus::Skipped,
            failure: None,
        }
    }

    /// A skip caused by an upstream failure in the same feature. Carries
    /// the step text of the failure that blocked it.
    pub fn blocked(name: impl Into<String>, failed_step: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            status: ScenarioStatus::Skipped,
            failure: Some(FailureDetail {
                failed_step: failed_step.into(),
                kind: FailureKind::Blocked,
                message: String::new(),
                location: None,
                step_statuses: Vec::new(),
            }),
        }
    }
}

/// Aggregated outcome of one run: declared counts plus the scenario
/// sequence that backs them.
///
/// The declared counts are redundant with the sequence on purpose. They
/// arrive separately from the runner, and a mismatch means the report is
/// corrupt; [`RunSummary::validate`] enforces the agreement before any
/// downstream component reads either.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct RunSummary {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    scenarios: Vec<ScenarioResult>,
}

impl RunSummary {
    /// Build a summary from externally declared counts, rejecting any
    /// disagreement with the scenario sequence.
    pub fn new(
        passed: usize,
        failed: usize,
        skipped: usize,
        scenarios: Vec<ScenarioResult>,
    ) -> EvalResult<Self> {
        let summary = Self {
            passed,
            failed,
            skipped,
            scenarios,
        };
        summary.validate()?;
        Ok(summary)
    }

    /// Build a summary by tallying the scenario sequence itself. Cannot
    /// be inconsistent by construction.
    pub fn from_scenarios(scenarios: Vec<ScenarioResult>) -> Self {
        let mut summary = Self {
            passed: 0,
            failed: 0,
            skipped: 0,
            scenarios,
        };
        for scenario in &summary.scenarios {
            match scenario.status {
                ScenarioStatus::Passed => summary.passed += 1,
                ScenarioStatus::Failed => summary.failed += 1,
                ScenarioStatus::Skipped => summary.skipped += 1,
            }
        }
        summary
    }

    pub fn scenarios(&self) -> &[ScenarioResult] {
        &self.scenarios
    }

    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }

    /// True when at least one scenario ran and none failed.
    pub fn all_passed(&self) -> bool {
        self.failed == 0 && self.total() > 0
    }

    /// Fraction of scenarios that passed, 0.0 for an empty run.
    #[allow(clippy::cast_precision_loss)]
    pub fn pass_rate(&self) -> f64 {
        if self.total() == 0 {
            0.0
        } else {
            self.passed as f64 / self.total() as f64
        }
    }

    /// Check the declared counts against the scenario sequence.
    pub fn validate(&self) -> EvalResult<()> {
        let (mut passed, mut failed, mut skipped) = (0usize, 0usize, 0usize);
        for scenario in &self.scenarios {
            match scenario.status {
                ScenarioStatus::Passed => passed += 1,
                ScenarioStatus::Failed => failed += 1,
                ScenarioStatus::Skipped => skipped += 1,
            }
        }
        if (passed, failed, skipped) != (self.passed, self.failed, self.skipped) {
            return Err(DataError::CountMismatch {
                declared: format!(
                    "{} passed, {} failed, {} skipped",
                    self.passed, self.failed, self.skipped
                ),
                actual: format!("{passed} passed, {failed} failed, {skipped} skipped"),
            });
        }
        Ok(())
    }
}
