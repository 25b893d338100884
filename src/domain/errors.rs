//! Domain errors for the evaluation pipeline.
//!
//! Only [`DataError`] crosses the pipeline boundary as a hard failure.
//! Judge-side failures are recoverable by contract and live with the judge
//! port (`domain::ports::judge::JudgeError`); they are always absorbed into
//! the deterministic fallback path.

use thiserror::Error;

/// Malformed or internally inconsistent input from the test-execution
/// collaborator. Fatal to the current evaluation cycle.
#[derive(Debug, Error)]
pub enum DataError {
    #[error("declared counts ({declared}) do not match scenario sequence ({actual})")]
    CountMismatch { declared: String, actual: String },

    #[error("scenario '{0}' is marked failed but carries no failure detail")]
    MissingFailureDetail(String),

    #[error("failed to read runner report: {0}")]
    ReportUnreadable(String),

    #[error("runner report is not valid JSON: {0}")]
    ReportMalformed(String),
}

pub type EvalResult<T> = Result<T, DataError>;

impl From<serde_json::Error> for DataError {
    fn from(err: serde_json::Error) -> Self {
        DataError::ReportMalformed(err.to_string())
    }
}
