//! Specgrade - Behavioral Feedback Pipeline
//!
//! Specgrade consumes the JSON report of a behavioral test run, rewrites
//! failures into assertion-free behavioral statements with the help of a
//! local LLM judge, and produces a satisfaction score with a deterministic
//! fallback when the judge is unavailable.
//!
//! # Architecture
//!
//! This crate follows Clean Architecture / Hexagonal Architecture principles:
//!
//! - **Domain Layer** (`domain`): Data model, ports, and error taxonomy
//! - **Service Layer** (`services`): Obfuscation, scoring, and the pipeline
//! - **Infrastructure Layer** (`infrastructure`): Judge adapter, report
//!   ingestion, configuration, logging
//! - **CLI Layer** (`cli`): Command-line interface
//!
//! # Example
//!
//! ```ignore
//! use std::sync::Arc;
//! use specgrade::{Evaluator, OllamaJudge};
//! use specgrade::infrastructure::config::ConfigLoader;
//! use specgrade::infrastructure::runner::parse_report;
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = ConfigLoader::load()?;
//!     let judge = Arc::new(OllamaJudge::new(config.judge.clone())?);
//!     let summary = parse_report(&std::fs::read_to_string("report.json")?)?;
//!     let feedback = Evaluator::new(judge, &config).evaluate(&summary).await?;
//!     println!("{}", feedback.score);
//!     Ok(())
//! }
//! ```

pub mod cli;
pub mod domain;
pub mod infrastructure;
pub mod services;

// Re-export commonly used types for convenience
pub use domain::errors::{DataError, EvalResult};
pub use domain::models::{
    Band, Config, FailureDetail, FailureKind, Feedback, JudgeConfig, LoggingConfig, Provenance,
    RunSummary, ScenarioResult, ScenarioStatus, ScoringConfig, Trace,
};
pub use domain::ports::{Judge, JudgeError, ObfuscationRequest, ScoreVerdict, ScoringRequest};
pub use infrastructure::config::{ConfigError, ConfigLoader};
pub use infrastructure::judge::{MockJudge, OfflineJudge, OllamaJudge};
pub use infrastructure::runner::parse_report;
pub use services::{Evaluator, FallbackCategorizer, ObfuscationEngine, SatisfactionScorer};
