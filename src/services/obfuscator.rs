//! Obfuscation engine: failure traces in, behavioral statements out.
//!
//! Output contract: one non-empty, leak-free statement per distinct
//! failure category, under all conditions. Judge failures and filter
//! rejections degrade to the static templates; they never surface as
//! errors.

use std::collections::HashSet;
use std::sync::Arc;

use tracing::{debug, warn};

use crate::domain::models::{FailureKind, Trace};
use crate::domain::ports::{Judge, ObfuscationRequest};
use crate::services::fallback::FallbackCategorizer;
use crate::services::leak_filter::LeakFilter;

/// Translates failure categories into behavior-level statements via the
/// judge, with the leak filter and template fallback wrapped around it.
pub struct ObfuscationEngine {
    judge: Arc<dyn Judge>,
    filter: LeakFilter,
}

impl ObfuscationEngine {
    pub fn new(judge: Arc<dyn Judge>) -> Self {
        Self {
            judge,
            filter: LeakFilter::new(),
        }
    }

    /// Produce one statement per distinct (kind, failing step) category,
    /// in first-occurrence order. An empty trace sequence yields an empty
    /// statement list.
    pub async fn statements(&self, traces: &[Trace]) -> Vec<String> {
        let mut seen: HashSet<(FailureKind, String)> = HashSet::new();
        let mut statements = Vec::new();

        for trace in traces {
            let key = (trace.kind, trace.failed_step.clone());
            if !seen.insert(key) {
                continue;
            }
            let statement = self.statement_for(trace).await;
            // Distinct categories can still resolve to the same template
            // text; the agent never needs to read a statement twice.
            if !statements.contains(&statement) {
                statements.push(statement);
            }
        }

        statements
    }

    /// One statement for one category: judge, filter, single stricter
    /// retry, then template.
    async fn statement_for(&self, trace: &Trace) -> String {
        let request = ObfuscationRequest {
            failed_step: trace.failed_step.clone(),
            kind: trace.kind,
            strict: false,
        };

        match self.judge.obfuscate(request.clone()).await {
            Ok(text) => match self.accept(&text) {
                Some(statement) => statement,
                None => self.retry_strict(trace, request).await,
            },
            Err(err) => {
                warn!(
                    judge = self.judge.judge_id(),
                    kind = %trace.kind,
                    scenario = %trace.scenario,
                    error = %err,
                    "judge obfuscation failed, using template"
                );
                FallbackCategorizer::statement(trace)
            }
        }
    }

    async fn retry_strict(&self, trace: &Trace, mut request: ObfuscationRequest) -> String {
        debug!(
            kind = %trace.kind,
            scenario = %trace.scenario,
            "statement rejected by leak filter, retrying with strict prompt"
        );
        request.strict = true;

        match self.judge.obfuscate(request).await {
            Ok(text) => {
                if let Some(statement) = self.accept(&text) {
                    return statement;
                }
                warn!(
                    kind = %trace.kind,
                    scenario = %trace.scenario,
                    "strict retry still leaked, using template"
                );
                FallbackCategorizer::statement(trace)
            }
            Err(err) => {
                warn!(
                    kind = %trace.kind,
                    scenario = %trace.scenario,
                    error = %err,
                    "strict retry failed, using template"
                );
                FallbackCategorizer::statement(trace)
            }
        }
    }

    /// Validate a judge response: non-empty after trimming and clean per
    /// the leak filter.
    fn accept(&self, text: &str) -> Option<String> {
        let trimmed = text.trim();
        if trimmed.is_empty() {
            return None;
        }
        match self.filter.check(trimmed) {
            Ok(()) => Some(trimmed.to_string()),
            Err(violation) => {
                debug!(violation = violation.as_str(), "leak filter rejection");
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::infrastructure::judge::mock::{MockJudge, MockObfuscation};

    fn trace(scenario: &str, step: &str, kind: FailureKind) -> Trace {
        Trace {
            scenario: scenario.to_string(),
            failed_step: step.to_string(),
            kind,
            step_statuses: vec![],
        }
    }

    #[tokio::test]
    async fn judge_text_is_used_verbatim_when_clean() {
        let judge = Arc::new(MockJudge::new().with_obfuscation(MockObfuscation::success(
            "The password should be hashed before storage.",
        )));
        let engine = ObfuscationEngine::new(judge);

        let statements = engine
            .statements(&[trace("hashing", "the password is hashed", FailureKind::AssertionFailure)])
            .await;

        assert_eq!(statements, vec!["The password should be hashed before storage.".to_string()]);
    }

    #[tokio::test]
    async fn duplicate_categories_yield_one_statement() {
        let judge = Arc::new(MockJudge::new().with_obfuscation(MockObfuscation::success(
            "The user email must be unique.",
        )));
        let engine = ObfuscationEngine::new(judge.clone());

        let traces = vec![
            trace("duplicate via api", "a duplicate email is rejected", FailureKind::AssertionFailure),
            trace("duplicate via import", "a duplicate email is rejected", FailureKind::AssertionFailure),
        ];
        let statements = engine.statements(&traces).await;

        assert_eq!(statements.len(), 1);
        assert_eq!(judge.obfuscate_calls().await, 1);
    }

    #[tokio::test]
    async fn leaked_statement_retries_once_then_falls_back() {
        // First answer leaks a path, second still leaks; the template wins.
        let judge = Arc::new(MockJudge::new().with_obfuscation_sequence(vec![
            MockObfuscation::success("Broken lookup in api.py:15."),
            MockObfuscation::success("See steps/user_steps.py for details."),
        ]));
        let engine = ObfuscationEngine::new(judge.clone());

        let statements = engine
            .statements(&[trace("fetch user", "the user is returned", FailureKind::KeyError)])
            .await;

        assert_eq!(judge.obfuscate_calls().await, 2);
        assert_eq!(statements.len(), 1);
        assert!(!statements[0].contains("api.py"));
        assert!(!statements[0].contains("user_steps"));
    }

    #[tokio::test]
    async fn leaked_statement_accepted_on_clean_retry() {
        let judge = Arc::new(MockJudge::new().with_obfuscation_sequence(vec![
            MockObfuscation::success("AssertionError on line 42."),
            MockObfuscation::success("The stored user should include an email address."),
        ]));
        let engine = ObfuscationEngine::new(judge.clone());

        let statements = engine
            .statements(&[trace("fetch user", "the user has an email", FailureKind::MissingField)])
            .await;

        assert_eq!(statements, vec!["The stored user should include an email address.".to_string()]);
    }

    #[tokio::test]
    async fn judge_failure_is_absorbed_into_template() {
        let judge = Arc::new(MockJudge::unreachable());
        let engine = ObfuscationEngine::new(judge);

        let statements = engine
            .statements(&[trace("create user", "the user is stored", FailureKind::Unimplemented)])
            .await;

        assert_eq!(statements.len(), 1);
        assert!(!statements[0].is_empty());
    }

    #[tokio::test]
    async fn empty_traces_yield_empty_statements() {
        let judge = Arc::new(MockJudge::new());
        let engine = ObfuscationEngine::new(judge.clone());
        assert!(engine.statements(&[]).await.is_empty());
        assert_eq!(judge.obfuscate_calls().await, 0);
    }
}
