//! HTTP judge adapter for an Ollama-compatible generate endpoint.
//!
//! Prompt construction and response parsing live here, behind the
//! [`Judge`] port; the scoring and obfuscation services only see
//! structured results or a [`JudgeError`].

use std::fmt::Write as _;
use std::time::Duration;

use anyhow::{Context, Result};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use tracing::debug;

use crate::domain::models::JudgeConfig;
use crate::domain::ports::{
    Judge, JudgeError, ObfuscationRequest, ScoreVerdict, ScoringRequest,
};

use super::retry::RetryPolicy;
use super::types::{parse_score_response, GenerateOptions, GenerateRequest, GenerateResponse};

/// Judge backed by an Ollama-compatible HTTP endpoint.
///
/// Every request carries the configured timeout; transient transport
/// errors get at most one bounded retry, timeouts none.
pub struct OllamaJudge {
    http: ReqwestClient,
    config: JudgeConfig,
    retry: RetryPolicy,
}

impl OllamaJudge {
    pub fn new(config: JudgeConfig) -> Result<Self> {
        let http = ReqwestClient::builder()
            .timeout(Duration::from_secs(config.timeout_secs))
            .pool_max_idle_per_host(2)
            .build()
            .context("failed to build HTTP client for judge")?;

        Ok(Self {
            http,
            config,
            retry: RetryPolicy::default(),
        })
    }

    /// Issue one generate request and return the generated text.
    async fn generate(&self, prompt: &str) -> Result<String, JudgeError> {
        let payload = GenerateRequest {
            model: self.config.model.clone(),
            prompt: prompt.to_string(),
            stream: false,
            options: GenerateOptions {
                temperature: self.config.temperature,
                num_predict: self.config.max_response_tokens,
            },
        };

        let response = self
            .http
            .post(format!("{}/api/generate", self.config.base_url))
            .json(&payload)
            .send()
            .await
            .map_err(|err| self.classify_transport_error(&err))?;

        let status = response.status();
        if !status.is_success() {
            return Err(JudgeError::Network(format!(
                "judge endpoint returned HTTP {status}"
            )));
        }

        let body: GenerateResponse = response
            .json()
            .await
            .map_err(|err| JudgeError::MalformedResponse(err.to_string()))?;

        let text = body.text().trim().to_string();
        if text.is_empty() {
            return Err(JudgeError::MalformedResponse(
                "judge returned an empty response".to_string(),
            ));
        }
        debug!(chars = text.len(), "judge response received");
        Ok(text)
    }

    fn classify_transport_error(&self, err: &reqwest::Error) -> JudgeError {
        if err.is_timeout() {
            JudgeError::Timeout(self.config.timeout_secs)
        } else if err.is_connect() {
            JudgeError::Unavailable(err.to_string())
        } else {
            JudgeError::Network(err.to_string())
        }
    }

    fn obfuscation_prompt(request: &ObfuscationRequest) -> String {
        let mut prompt = String::from(
            "You are translating a test failure into behavioral feedback for an AI developer.\n\
             \n\
             Your job: describe the expected behavior that was violated, at the\n\
             specification level.\n\
             - HIDE: file names, line numbers, function names, exception class\n\
               names, stack traces, literal values\n\
             - SHOW: what behavior was expected and is not happening\n\
             - BE CONCISE: one full sentence\n\n",
        );
        if request.strict {
            prompt.push_str(
                "IMPORTANT: your previous answer contained technical detail.\n\
                 Do not mention any file, path, line, code identifier, or error\n\
                 class under any circumstances. Plain behavioral language only.\n\n",
            );
        }
        let _ = write!(
            prompt,
            "Failing step (from the behavior specification): {}\n\
             Failure category: {}\n\n\
             Return ONLY the behavioral statement, nothing else.\n",
            request.failed_step, request.kind
        );
        prompt
    }

    #[allow(clippy::cast_precision_loss)]
    fn scoring_prompt(request: &ScoringRequest) -> String {
        let total = request.total();
        let pass_rate = if total == 0 {
            0.0
        } else {
            request.passed as f64 / total as f64
        };

        let mut prompt = format!(
            "You are evaluating the behavioral satisfaction of a software implementation.\n\
             \n\
             Context:\n\
             - Total scenarios: {total}\n\
             - Passed: {}\n\
             - Failed: {}\n\
             - Skipped: {}\n\n\
             Failures by category:\n",
            request.passed, request.failed, request.skipped
        );
        for trace in &request.traces {
            let _ = writeln!(
                prompt,
                "- [{}] scenario '{}': step '{}'",
                trace.kind, trace.scenario, trace.failed_step
            );
        }
        if let Some(context) = &request.feedback_context {
            let _ = write!(prompt, "\nBehavioral feedback already produced:\n{context}\n");
        }
        let _ = write!(
            prompt,
            "\nEvaluate the overall satisfaction score (0.0-1.0) considering:\n\
             1. What percentage of scenarios passed? ({:.0}%)\n\
             2. How severe are the failures? (core functionality vs edge cases)\n\
             3. Are failures simple fixes or architectural problems?\n\n\
             Guidance:\n\
             - 0.0-0.3: major issues, needs significant rework\n\
             - 0.3-0.7: partially working, moderate improvements needed\n\
             - 0.7-0.9: mostly correct, minor issues\n\
             - 0.9-1.0: excellent, deployment-ready\n\n\
             Return ONLY this JSON, nothing else:\n\
             {{\"score\": 0.XX, \"reasoning\": \"brief explanation\"}}\n",
            pass_rate * 100.0
        );
        prompt
    }
}

#[async_trait]
impl Judge for OllamaJudge {
    fn judge_id(&self) -> &str {
        "ollama"
    }

    async fn obfuscate(&self, request: ObfuscationRequest) -> Result<String, JudgeError> {
        let prompt = Self::obfuscation_prompt(&request);
        self.retry.execute(|| self.generate(&prompt)).await
    }

    async fn score(&self, request: ScoringRequest) -> Result<ScoreVerdict, JudgeError> {
        let prompt = Self::scoring_prompt(&request);
        let raw = self.retry.execute(|| self.generate(&prompt)).await?;
        parse_score_response(&raw)
    }
}
