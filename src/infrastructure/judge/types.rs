//! Wire types and response parsing for the Ollama generate API.

use serde::{Deserialize, Serialize};

use crate::domain::ports::{JudgeError, ScoreVerdict};

/// Request body for `POST /api/generate`.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateRequest {
    pub model: String,
    pub prompt: String,
    pub stream: bool,
    pub options: GenerateOptions,
}

/// Generation options.
#[derive(Debug, Clone, Serialize)]
pub struct GenerateOptions {
    pub temperature: f32,
    pub num_predict: u32,
}

/// Response body for `POST /api/generate`.
///
/// Reasoning models put their text under `thinking` when `response` is
/// empty; either field may be absent.
#[derive(Debug, Clone, Deserialize)]
pub struct GenerateResponse {
    #[serde(default)]
    pub response: String,
    #[serde(default)]
    pub thinking: String,
}

impl GenerateResponse {
    /// The generated text, preferring `response` over `thinking`.
    pub fn text(&self) -> &str {
        if self.response.trim().is_empty() {
            &self.thinking
        } else {
            &self.response
        }
    }
}

/// Expected shape of a scoring response.
#[derive(Debug, Deserialize)]
struct ScorePayload {
    score: f64,
    #[serde(default)]
    reasoning: String,
}

/// Strip a wrapping markdown code fence from model output.
///
/// Models routinely wrap JSON in ```` ```json ```` fences even when told
/// not to.
pub fn strip_code_fence(output: &str) -> &str {
    let trimmed = output.trim();
    let Some(rest) = trimmed.strip_prefix("```") else {
        return trimmed;
    };
    let Some(body) = rest.strip_suffix("```") else {
        return trimmed;
    };
    // Drop the language tag on the opening fence line, if any.
    match body.find('\n') {
        Some(pos) => body[pos + 1..].trim(),
        None => body.trim(),
    }
}

/// Parse a scoring response into a verdict.
///
/// Strict JSON first; if the model padded the JSON with prose, fall back
/// to regex extraction of the `score` field. The parsed score must be
/// finite and within [0.0, 1.0].
pub fn parse_score_response(raw: &str) -> Result<ScoreVerdict, JudgeError> {
    let cleaned = strip_code_fence(raw);

    let verdict = if let Ok(payload) = serde_json::from_str::<ScorePayload>(cleaned) {
        ScoreVerdict {
            score: payload.score,
            reasoning: payload.reasoning,
        }
    } else {
        extract_score_loosely(cleaned)?
    };

    if !verdict.score.is_finite() || !(0.0..=1.0).contains(&verdict.score) {
        return Err(JudgeError::OutOfRange(verdict.score));
    }
    Ok(verdict)
}

/// Rescue a score from prose-padded output.
fn extract_score_loosely(cleaned: &str) -> Result<ScoreVerdict, JudgeError> {
    let pattern = regex::Regex::new(r#"(?i)"?score"?\s*[:=]\s*(\d+\.?\d*)"#)
        .expect("score pattern is valid");
    let captures = pattern.captures(cleaned).ok_or_else(|| {
        JudgeError::MalformedResponse("no numeric score field found".to_string())
    })?;
    let score: f64 = captures[1]
        .parse()
        .map_err(|_| JudgeError::MalformedResponse("score field is not numeric".to_string()))?;

    // Without parseable JSON there is no reasoning field; use a prefix of
    // the raw text so the rationale is never empty.
    let reasoning: String = cleaned.chars().take(200).collect();
    Ok(ScoreVerdict { score, reasoning })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_strict_json() {
        let verdict =
            parse_score_response(r#"{"score": 0.85, "reasoning": "mostly working"}"#).unwrap();
        assert!((verdict.score - 0.85).abs() < f64::EPSILON);
        assert_eq!(verdict.reasoning, "mostly working");
    }

    #[test]
    fn parses_fenced_json() {
        let raw = "```json\n{\"score\": 0.4, \"reasoning\": \"half\"}\n```";
        let verdict = parse_score_response(raw).unwrap();
        assert!((verdict.score - 0.4).abs() < f64::EPSILON);
    }

    #[test]
    fn rescues_score_from_prose() {
        let raw = "Based on the results I would say \"score\": 0.72 overall.";
        let verdict = parse_score_response(raw).unwrap();
        assert!((verdict.score - 0.72).abs() < f64::EPSILON);
        assert!(!verdict.reasoning.is_empty());
    }

    #[test]
    fn rejects_out_of_range() {
        let err = parse_score_response(r#"{"score": 1.5, "reasoning": "x"}"#).unwrap_err();
        assert!(matches!(err, JudgeError::OutOfRange(_)));
    }

    #[test]
    fn rejects_scoreless_text() {
        let err = parse_score_response("the implementation looks fine to me").unwrap_err();
        assert!(matches!(err, JudgeError::MalformedResponse(_)));
    }

    #[test]
    fn response_text_prefers_response_over_thinking() {
        let body = GenerateResponse {
            response: "answer".to_string(),
            thinking: "chain of thought".to_string(),
        };
        assert_eq!(body.text(), "answer");

        let body = GenerateResponse {
            response: String::new(),
            thinking: "only thinking".to_string(),
        };
        assert_eq!(body.text(), "only thinking");
    }
}
