//! The evaluation pipeline: result model in, feedback payload out.
//!
//! One logical evaluation per invocation, stateless across cycles. The
//! obfuscation and scoring judge interactions are independent, so they run
//! concurrently; either one degrades to the deterministic fallback on its
//! own without affecting the other.

use std::sync::Arc;

use tracing::info;

use crate::domain::errors::EvalResult;
use crate::domain::models::{Band, Config, Feedback, RunSummary};
use crate::domain::ports::Judge;
use crate::services::obfuscator::ObfuscationEngine;
use crate::services::scorer::SatisfactionScorer;
use crate::services::trace_extractor::TraceExtractor;

/// Entry point for one evaluation cycle.
pub struct Evaluator {
    obfuscator: ObfuscationEngine,
    scorer: SatisfactionScorer,
    production_threshold: f64,
}

impl Evaluator {
    pub fn new(judge: Arc<dyn Judge>, config: &Config) -> Self {
        Self {
            obfuscator: ObfuscationEngine::new(judge.clone()),
            scorer: SatisfactionScorer::new(judge, config.scoring.clone()),
            production_threshold: config.scoring.production_threshold,
        }
    }

    /// Evaluate one run and assemble the feedback payload.
    ///
    /// The only error that crosses this boundary is a `DataError` for
    /// malformed input; judge-side failures are absorbed into fallback
    /// output. A run with no failures issues no judge calls at all.
    pub async fn evaluate(&self, summary: &RunSummary) -> EvalResult<Feedback> {
        summary.validate()?;
        let traces = TraceExtractor::extract(summary)?;

        info!(
            passed = summary.passed,
            failed = summary.failed,
            skipped = summary.skipped,
            categories = traces.len(),
            "evaluating run"
        );

        let (statements, outcome) = tokio::join!(
            self.obfuscator.statements(&traces),
            self.scorer.score(summary, &traces, None),
        );

        let feedback = Feedback {
            score: outcome.score,
            band: Band::from_score(outcome.score),
            rationale: outcome.rationale,
            statements,
            all_passed: summary.all_passed(),
            provenance: outcome.provenance,
            deploy_ready: outcome.score >= self.production_threshold,
            passed: summary.passed,
            failed: summary.failed,
            skipped: summary.skipped,
        };

        info!(
            score = feedback.score,
            band = feedback.band.label(),
            provenance = ?feedback.provenance,
            "evaluation complete"
        );
        Ok(feedback)
    }
}
