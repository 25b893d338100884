//! Judge stand-in for deliberately judge-free runs.

use async_trait::async_trait;

use crate::domain::ports::{
    Judge, JudgeError, ObfuscationRequest, ScoreVerdict, ScoringRequest,
};

/// A judge that answers nothing: every call reports `Unavailable`, so the
/// pipeline takes its deterministic fallback path end to end. Backs the
/// `--no-judge` mode, where scores must be reproducible and offline.
pub struct OfflineJudge;

#[async_trait]
impl Judge for OfflineJudge {
    fn judge_id(&self) -> &str {
        "offline"
    }

    async fn obfuscate(&self, _request: ObfuscationRequest) -> Result<String, JudgeError> {
        Err(JudgeError::Unavailable("judge disabled".to_string()))
    }

    async fn score(&self, _request: ScoringRequest) -> Result<ScoreVerdict, JudgeError> {
        Err(JudgeError::Unavailable("judge disabled".to_string()))
    }
}
