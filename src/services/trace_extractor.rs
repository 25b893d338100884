//! Derives sanitized failure traces from a run summary.

use tracing::debug;

use crate::domain::errors::{DataError, EvalResult};
use crate::domain::models::{FailureKind, RunSummary, ScenarioStatus, Trace};

/// Projects failed scenarios into [`Trace`]s for judge consumption.
///
/// Deterministic: the same summary always yields the same traces in the
/// same (execution) order. Raw diagnostic messages and source locations
/// never survive the projection.
pub struct TraceExtractor;

impl TraceExtractor {
    /// Extract one trace per failed scenario, plus one per skipped
    /// scenario whose skip was caused by an upstream failure (kind
    /// `blocked`). Other skipped scenarios produce nothing. An empty
    /// summary yields an empty sequence.
    pub fn extract(summary: &RunSummary) -> EvalResult<Vec<Trace>> {
        let mut traces = Vec::with_capacity(summary.failed);

        for scenario in summary.scenarios() {
            match scenario.status {
                ScenarioStatus::Passed => {}
                ScenarioStatus::Failed => {
                    let detail = scenario.failure.as_ref().ok_or_else(|| {
                        DataError::MissingFailureDetail(scenario.name.clone())
                    })?;
                    traces.push(Trace {
                        scenario: scenario.name.clone(),
                        failed_step: detail.failed_step.clone(),
                        kind: detail.kind,
                        step_statuses: detail.step_statuses.clone(),
                    });
                }
                ScenarioStatus::Skipped => {
                    // Only a blocked skip carries failure detail.
                    if let Some(detail) = &scenario.failure {
                        traces.push(Trace {
                            scenario: scenario.name.clone(),
                            failed_step: detail.failed_step.clone(),
                            kind: FailureKind::Blocked,
                            step_statuses: detail.step_statuses.clone(),
                        });
                    }
                }
            }
        }

        debug!(
            scenarios = summary.total(),
            traces = traces.len(),
            "extracted failure traces"
        );
        Ok(traces)
    }
}
