//! Domain models: the result model, sanitized traces, the feedback
//! payload, and configuration.

pub mod config;
pub mod feedback;
pub mod run;
pub mod trace;

pub use config::{Config, JudgeConfig, LoggingConfig, ScoringConfig};
pub use feedback::{Band, Feedback, Provenance};
pub use run::{FailureDetail, FailureKind, RunSummary, ScenarioResult, ScenarioStatus};
pub use trace::Trace;
