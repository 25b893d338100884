//! Satisfaction scoring with deterministic guardrails around the judge.
//!
//! The judge's numeric output is advisory in the interior of the range;
//! the extremes are not delegated to it. All-passed runs score exactly
//! 1.0, zero-passed runs are clamped into the Poor band, and anything
//! non-numeric falls back to the pass rate.

use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::models::{Provenance, RunSummary, ScoringConfig, Trace};
use crate::domain::ports::{Judge, ScoringRequest};
use crate::services::fallback::FallbackCategorizer;

/// Score, rationale, and which path produced them.
#[derive(Debug, Clone, PartialEq)]
pub struct ScoreOutcome {
    pub score: f64,
    pub rationale: String,
    pub provenance: Provenance,
}

/// Computes the satisfaction score for a run.
pub struct SatisfactionScorer {
    judge: Arc<dyn Judge>,
    config: ScoringConfig,
}

impl SatisfactionScorer {
    pub fn new(judge: Arc<dyn Judge>, config: ScoringConfig) -> Self {
        Self { judge, config }
    }

    /// Score a run. Never fails: every judge-side problem degrades to the
    /// deterministic pass-rate path with `Provenance::Fallback`.
    pub async fn score(
        &self,
        summary: &RunSummary,
        traces: &[Trace],
        feedback_context: Option<String>,
    ) -> ScoreOutcome {
        // Empty run: explicit policy, no judge consulted.
        if summary.total() == 0 {
            let (score, rationale) = FallbackCategorizer::score(summary);
            return ScoreOutcome {
                score,
                rationale,
                provenance: Provenance::Fallback,
            };
        }

        // Perfect run: hard contract, not a judge opinion.
        if summary.all_passed() {
            return ScoreOutcome {
                score: 1.0,
                rationale: format!("all {} scenarios passed", summary.total()),
                provenance: Provenance::Judge,
            };
        }

        let request = ScoringRequest {
            passed: summary.passed,
            failed: summary.failed,
            skipped: summary.skipped,
            traces: traces.to_vec(),
            feedback_context,
        };

        match self.judge.score(request).await {
            Ok(verdict) => {
                if !verdict.score.is_finite() || !(0.0..=1.0).contains(&verdict.score) {
                    warn!(score = verdict.score, "judge score out of range, using pass rate");
                    return self.fallback(summary);
                }
                let score = self.apply_guardrails(summary, verdict.score);
                let rationale = if verdict.reasoning.trim().is_empty() {
                    format!("{}/{} scenarios passed", summary.passed, summary.total())
                } else {
                    verdict.reasoning
                };
                debug!(score, "judge score accepted");
                ScoreOutcome {
                    score,
                    rationale,
                    provenance: Provenance::Judge,
                }
            }
            Err(err) => {
                warn!(
                    judge = self.judge.judge_id(),
                    error = %err,
                    "judge scoring failed, using pass rate"
                );
                self.fallback(summary)
            }
        }
    }

    /// Deterministic overrides on an in-range judge score.
    fn apply_guardrails(&self, summary: &RunSummary, judged: f64) -> f64 {
        if summary.all_passed() {
            return 1.0;
        }
        if summary.passed == 0 && summary.failed > 0 {
            // Nothing passed: whatever the judge thinks, this stays Poor.
            return judged.min(self.config.poor_ceiling);
        }
        judged
    }

    fn fallback(&self, summary: &RunSummary) -> ScoreOutcome {
        let (score, rationale) = FallbackCategorizer::score(summary);
        ScoreOutcome {
            score,
            rationale,
            provenance: Provenance::Fallback,
        }
    }
}
