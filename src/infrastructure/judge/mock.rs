//! Mock judge for testing.

use std::collections::VecDeque;

use async_trait::async_trait;
use tokio::sync::Mutex;

use crate::domain::ports::{
    Judge, JudgeError, ObfuscationRequest, ScoreVerdict, ScoringRequest,
};

/// Scripted obfuscation response.
#[derive(Debug, Clone)]
pub struct MockObfuscation {
    /// Statement text to return.
    pub text: String,
    /// Whether to simulate a judge failure instead.
    pub fail: bool,
    /// Error message when failing.
    pub error: Option<String>,
}

impl MockObfuscation {
    pub fn success(text: impl Into<String>) -> Self {
        Self {
            text: text.into(),
            fail: false,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            text: String::new(),
            fail: true,
            error: Some(error.into()),
        }
    }
}

impl Default for MockObfuscation {
    fn default() -> Self {
        Self::success("The expected behavior was not satisfied.")
    }
}

/// Scripted scoring response.
///
/// The verdict is returned as-is, without range validation, so tests can
/// exercise the scorer's out-of-range handling.
#[derive(Debug, Clone)]
pub struct MockScore {
    pub score: f64,
    pub reasoning: String,
    pub fail: bool,
    pub error: Option<String>,
}

impl MockScore {
    pub fn success(score: f64, reasoning: impl Into<String>) -> Self {
        Self {
            score,
            reasoning: reasoning.into(),
            fail: false,
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            score: 0.0,
            reasoning: String::new(),
            fail: true,
            error: Some(error.into()),
        }
    }
}

impl Default for MockScore {
    fn default() -> Self {
        Self::success(0.5, "mock reasoning")
    }
}

/// Mock judge with scripted responses and call counting.
pub struct MockJudge {
    unreachable: bool,
    obfuscation_default: MockObfuscation,
    obfuscation_sequence: Mutex<VecDeque<MockObfuscation>>,
    score_response: MockScore,
    obfuscate_count: Mutex<usize>,
    score_count: Mutex<usize>,
}

impl MockJudge {
    pub fn new() -> Self {
        Self {
            unreachable: false,
            obfuscation_default: MockObfuscation::default(),
            obfuscation_sequence: Mutex::new(VecDeque::new()),
            score_response: MockScore::default(),
            obfuscate_count: Mutex::new(0),
            score_count: Mutex::new(0),
        }
    }

    /// A judge whose endpoint cannot be reached: every call fails with
    /// `JudgeError::Unavailable`.
    pub fn unreachable() -> Self {
        Self {
            unreachable: true,
            ..Self::new()
        }
    }

    /// Use the same obfuscation response for every call.
    pub fn with_obfuscation(mut self, response: MockObfuscation) -> Self {
        self.obfuscation_default = response;
        self
    }

    /// Script a sequence of obfuscation responses; once exhausted, the
    /// default response is used.
    pub fn with_obfuscation_sequence(self, responses: Vec<MockObfuscation>) -> Self {
        Self {
            obfuscation_sequence: Mutex::new(responses.into()),
            ..self
        }
    }

    pub fn with_score(mut self, response: MockScore) -> Self {
        self.score_response = response;
        self
    }

    pub async fn obfuscate_calls(&self) -> usize {
        *self.obfuscate_count.lock().await
    }

    pub async fn score_calls(&self) -> usize {
        *self.score_count.lock().await
    }
}

impl Default for MockJudge {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl Judge for MockJudge {
    fn judge_id(&self) -> &str {
        "mock"
    }

    async fn obfuscate(&self, _request: ObfuscationRequest) -> Result<String, JudgeError> {
        *self.obfuscate_count.lock().await += 1;

        if self.unreachable {
            return Err(JudgeError::Unavailable("mock endpoint down".to_string()));
        }

        let response = {
            let mut sequence = self.obfuscation_sequence.lock().await;
            sequence
                .pop_front()
                .unwrap_or_else(|| self.obfuscation_default.clone())
        };

        if response.fail {
            return Err(JudgeError::Network(
                response.error.unwrap_or_else(|| "mock failure".to_string()),
            ));
        }
        Ok(response.text)
    }

    async fn score(&self, _request: ScoringRequest) -> Result<ScoreVerdict, JudgeError> {
        *self.score_count.lock().await += 1;

        if self.unreachable {
            return Err(JudgeError::Unavailable("mock endpoint down".to_string()));
        }

        if self.score_response.fail {
            return Err(JudgeError::Network(
                self.score_response
                    .error
                    .clone()
                    .unwrap_or_else(|| "mock failure".to_string()),
            ));
        }

        Ok(ScoreVerdict {
            score: self.score_response.score,
            reasoning: self.score_response.reasoning.clone(),
        })
    }
}
