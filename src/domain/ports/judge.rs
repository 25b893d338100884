//! Judge port.
//!
//! The judge is an opaque network collaborator with no behavioral
//! guarantees: non-deterministic output, latency variance, malformed
//! responses. This port keeps prompt construction and response parsing out
//! of the scoring/obfuscation business logic; implementations return
//! structured results or a [`JudgeError`], nothing else.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};

use crate::domain::models::{FailureKind, Trace};

/// Request for one behavioral statement covering one failure category.
///
/// Carries only the failing step text and the category tag — never the raw
/// diagnostic message, source location, or literal comparison values.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct ObfuscationRequest {
    /// The failing step text from the behavior specification.
    pub failed_step: String,
    /// Failure category.
    pub kind: FailureKind,
    /// When true, the prompt must instruct the judge more forcefully to
    /// avoid technical detail. Set on the single retry after a leak-filter
    /// rejection.
    pub strict: bool,
}

/// Request for a satisfaction score over a full run.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoringRequest {
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
    /// Sanitized traces for every failure in execution order.
    pub traces: Vec<Trace>,
    /// Behavioral feedback already produced for this run, if any, as
    /// context for severity weighting.
    pub feedback_context: Option<String>,
}

impl ScoringRequest {
    pub fn total(&self) -> usize {
        self.passed + self.failed + self.skipped
    }
}

/// Parsed scoring response: a numeric estimate plus a short explanation.
///
/// The adapter validates that `score` is finite and within [0.0, 1.0]
/// before returning it; the scorer applies its deterministic overrides on
/// top.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ScoreVerdict {
    pub score: f64,
    pub reasoning: String,
}

/// Failure of a judge interaction. Every variant is recoverable: the
/// caller falls back to the deterministic categorizer and never surfaces
/// these to the pipeline consumer.
#[derive(Debug, thiserror::Error)]
pub enum JudgeError {
    #[error("judge endpoint unavailable: {0}")]
    Unavailable(String),

    #[error("judge request timed out after {0}s")]
    Timeout(u64),

    #[error("network error talking to judge: {0}")]
    Network(String),

    #[error("judge response could not be parsed: {0}")]
    MalformedResponse(String),

    #[error("judge returned out-of-range score: {0}")]
    OutOfRange(f64),
}

impl JudgeError {
    /// Transient transport errors earn at most one bounded retry.
    /// Timeouts deliberately do not: the timeout already bounds the wait.
    pub fn is_transient(&self) -> bool {
        matches!(self, Self::Network(_) | Self::Unavailable(_))
    }
}

/// Capability interface for the language-model judge.
///
/// Implementations must be `Send + Sync`; the two calls are independent
/// and may be issued concurrently.
#[async_trait]
pub trait Judge: Send + Sync {
    /// Identifier for logging (e.g. "ollama", "mock").
    fn judge_id(&self) -> &str;

    /// Produce one behavioral statement for a failure category.
    async fn obfuscate(&self, request: ObfuscationRequest) -> Result<String, JudgeError>;

    /// Produce a satisfaction score and rationale for a run.
    async fn score(&self, request: ScoringRequest) -> Result<ScoreVerdict, JudgeError>;
}
