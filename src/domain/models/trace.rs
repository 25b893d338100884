//! Sanitized failure traces for judge consumption.

use serde::{Deserialize, Serialize};

use super::run::FailureKind;

/// Lossy projection of one scenario failure, fit for a judge prompt.
///
/// Deliberately excludes the raw error message, the source location, and
/// any literal comparison values: a trace can be serialized into a judge
/// request without a scrubbing pass. The failing step text comes from the
/// behavior specification itself and is authored by a human — safe to show
/// a judge, never echoed verbatim to the agent.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Trace {
    /// Name of the failing scenario.
    pub scenario: String,
    /// The failing step text from the behavior specification.
    pub failed_step: String,
    /// Failure category.
    pub kind: FailureKind,
    /// Per-step status tags in execution order (e.g. `passed`, `failed`).
    #[serde(default)]
    pub step_statuses: Vec<String>,
}

impl Trace {
    /// Deduplication key: one behavioral statement is emitted per distinct
    /// (kind, failing step) pairing, however many scenarios share it.
    pub fn category(&self) -> (FailureKind, &str) {
        (self.kind, self.failed_step.as_str())
    }
}
