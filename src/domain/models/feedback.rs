//! The feedback payload delivered to the code-generation agent.

use serde::{Deserialize, Serialize};

/// Display band for a satisfaction score.
///
/// Banding is cosmetic only; nothing in the scoring path reads it back.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Band {
    Poor,
    Moderate,
    Good,
    Excellent,
}

impl Band {
    /// Map a score in [0.0, 1.0] to its display band.
    pub fn from_score(score: f64) -> Self {
        if score >= 0.9 {
            Self::Excellent
        } else if score >= 0.7 {
            Self::Good
        } else if score >= 0.3 {
            Self::Moderate
        } else {
            Self::Poor
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Self::Poor => "Poor",
            Self::Moderate => "Moderate",
            Self::Good => "Good",
            Self::Excellent => "Excellent",
        }
    }
}

/// Which path produced the satisfaction score.
///
/// Callers should treat `Fallback` scores with lower trust: they are the
/// deterministic pass-rate computation, not a judge estimate.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Provenance {
    Judge,
    Fallback,
}

/// The sole artifact crossing the system boundary to the agent.
///
/// No file paths, line numbers, or literal assertion values may appear in
/// this payload under any code path, including every fallback path.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Feedback {
    /// Satisfaction score in [0.0, 1.0].
    pub score: f64,
    /// Display band for the score.
    pub band: Band,
    /// Short explanation of the score. Never empty.
    pub rationale: String,
    /// Behavioral statements, one per distinct failure category, in first
    /// occurrence order. Empty when everything passed.
    pub statements: Vec<String>,
    /// True when at least one scenario ran and none failed.
    pub all_passed: bool,
    /// Whether the score was judge-backed or fallback-backed.
    pub provenance: Provenance,
    /// Score meets the configured production threshold.
    pub deploy_ready: bool,
    /// Scenario counts, echoed for display.
    pub passed: usize,
    pub failed: usize,
    pub skipped: usize,
}
