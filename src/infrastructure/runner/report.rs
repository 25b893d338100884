//! Ingestion of behave-style JSON runner reports.
//!
//! The pipeline never invokes the test runner itself; it consumes the
//! structured report the runner wrote (features → scenarios → steps) and
//! converts it into the normalized [`RunSummary`]. Failure-kind
//! classification from raw diagnostics happens here and nowhere else.

use serde::Deserialize;
use tracing::debug;

use crate::domain::errors::{DataError, EvalResult};
use crate::domain::models::{
    FailureDetail, FailureKind, RunSummary, ScenarioResult,
};

/// One feature block in the runner report.
#[derive(Debug, Deserialize)]
pub struct FeatureReport {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub elements: Vec<ScenarioReport>,
}

/// One scenario element.
#[derive(Debug, Deserialize)]
pub struct ScenarioReport {
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(default)]
    pub steps: Vec<StepReport>,
}

/// One step within a scenario.
#[derive(Debug, Deserialize)]
pub struct StepReport {
    #[serde(default)]
    pub keyword: String,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub status: String,
    #[serde(rename = "match")]
    pub match_info: Option<MatchReport>,
    pub error_message: Option<String>,
}

/// Step match block carrying diagnostics.
#[derive(Debug, Deserialize)]
pub struct MatchReport {
    pub message: Option<String>,
    pub location: Option<String>,
}

/// Parse a raw report document into a run summary.
pub fn parse_report(raw: &str) -> EvalResult<RunSummary> {
    if raw.trim().is_empty() {
        // An empty report file means the runner collected nothing.
        return Ok(RunSummary::from_scenarios(vec![]));
    }
    let features: Vec<FeatureReport> = serde_json::from_str(raw)?;
    Ok(convert(features))
}

/// Convert parsed features into the normalized summary.
pub fn convert(features: Vec<FeatureReport>) -> RunSummary {
    let mut scenarios = Vec::new();

    for feature in features {
        let mut feature_failed = false;

        for scenario in feature.elements {
            match scenario.status.as_str() {
                "passed" => scenarios.push(ScenarioResult::passed(scenario.name)),
                "failed" | "error" => {
                    feature_failed = true;
                    let detail = extract_detail(&scenario);
                    scenarios.push(ScenarioResult::failed(scenario.name, detail));
                }
                "skipped" => {
                    if feature_failed {
                        // Skip caused by an upstream failure in this feature.
                        let step = scenario
                            .steps
                            .first()
                            .map_or_else(|| scenario.name.clone(), |s| s.name.clone());
                        scenarios.push(ScenarioResult::blocked(scenario.name, step));
                    } else {
                        scenarios.push(ScenarioResult::skipped(scenario.name));
                    }
                }
                other => {
                    debug!(status = other, scenario = %scenario.name, "ignoring scenario with unknown status");
                }
            }
        }
    }

    RunSummary::from_scenarios(scenarios)
}

/// Validate externally supplied counts against a converted summary.
///
/// Collaborators that hand over counts alongside the report get them
/// checked before any judge call is attempted.
pub fn validate_counts(
    summary: &RunSummary,
    passed: usize,
    failed: usize,
    skipped: usize,
) -> EvalResult<()> {
    if (summary.passed, summary.failed, summary.skipped) != (passed, failed, skipped) {
        return Err(DataError::CountMismatch {
            declared: format!("{passed} passed / {failed} failed / {skipped} skipped"),
            actual: format!(
                "{} passed / {} failed / {} skipped",
                summary.passed, summary.failed, summary.skipped
            ),
        });
    }
    Ok(())
}

/// Pull failure diagnostics out of a failed scenario's steps.
fn extract_detail(scenario: &ScenarioReport) -> FailureDetail {
    let step_statuses: Vec<String> = scenario.steps.iter().map(|s| s.status.clone()).collect();

    let failing_step = scenario
        .steps
        .iter()
        .find(|s| s.status == "failed" || s.status == "error");

    match failing_step {
        Some(step) => {
            let message = step
                .error_message
                .clone()
                .or_else(|| step.match_info.as_ref().and_then(|m| m.message.clone()))
                .unwrap_or_default();
            let location = step.match_info.as_ref().and_then(|m| m.location.clone());
            FailureDetail {
                failed_step: step.name.clone(),
                kind: classify(&message),
                message,
                location,
                step_statuses,
            }
        }
        // A scenario can be marked failed by a hook without a failing
        // step; keep the scenario name as the best available step text.
        None => FailureDetail {
            failed_step: scenario.name.clone(),
            kind: FailureKind::Unknown,
            message: String::new(),
            location: None,
            step_statuses,
        },
    }
}

/// Map a raw diagnostic message to a failure category.
fn classify(message: &str) -> FailureKind {
    let lower = message.to_lowercase();
    if lower.contains("notimplementederror") || lower.contains("not implemented") {
        FailureKind::Unimplemented
    } else if lower.contains("keyerror") {
        FailureKind::KeyError
    } else if lower.contains("missing") && lower.contains("field") {
        FailureKind::MissingField
    } else if lower.contains("assert") {
        FailureKind::AssertionFailure
    } else {
        FailureKind::Unknown
    }
}
