//! Service layer: the evaluation pipeline and its components.

pub mod fallback;
pub mod leak_filter;
pub mod obfuscator;
pub mod pipeline;
pub mod scorer;
pub mod trace_extractor;

pub use fallback::FallbackCategorizer;
pub use leak_filter::{LeakFilter, LeakViolation};
pub use obfuscator::ObfuscationEngine;
pub use pipeline::Evaluator;
pub use scorer::{SatisfactionScorer, ScoreOutcome};
pub use trace_extractor::TraceExtractor;
