//! Configuration model.
//!
//! Loaded hierarchically by `infrastructure::config::ConfigLoader` and
//! passed explicitly into the pipeline at construction time. Core
//! components never read ambient/global state.

use serde::{Deserialize, Serialize};

/// Main configuration structure for specgrade.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct Config {
    /// Judge endpoint configuration.
    #[serde(default)]
    pub judge: JudgeConfig,

    /// Scoring thresholds.
    #[serde(default)]
    pub scoring: ScoringConfig,

    /// Logging configuration.
    #[serde(default)]
    pub logging: LoggingConfig,
}

/// LLM judge endpoint configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct JudgeConfig {
    /// Base URL of the Ollama-compatible generate endpoint.
    #[serde(default = "default_judge_url")]
    pub base_url: String,

    /// Model name.
    #[serde(default = "default_judge_model")]
    pub model: String,

    /// Per-request timeout in seconds.
    #[serde(default = "default_judge_timeout_secs")]
    pub timeout_secs: u64,

    /// Sampling temperature.
    #[serde(default = "default_temperature")]
    pub temperature: f32,

    /// Maximum tokens the judge may generate per response.
    #[serde(default = "default_max_response_tokens")]
    pub max_response_tokens: u32,
}

fn default_judge_url() -> String {
    "http://localhost:11434".to_string()
}

fn default_judge_model() -> String {
    "llama3.1".to_string()
}

const fn default_judge_timeout_secs() -> u64 {
    20
}

const fn default_temperature() -> f32 {
    0.3
}

const fn default_max_response_tokens() -> u32 {
    2000
}

impl Default for JudgeConfig {
    fn default() -> Self {
        Self {
            base_url: default_judge_url(),
            model: default_judge_model(),
            timeout_secs: default_judge_timeout_secs(),
            temperature: default_temperature(),
            max_response_tokens: default_max_response_tokens(),
        }
    }
}

/// Scoring thresholds.
///
/// The deployment thresholds grade a score for release purposes; the poor
/// ceiling caps the score of a run where nothing passed.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "snake_case")]
pub struct ScoringConfig {
    /// Minimum score considered production-ready.
    #[serde(default = "default_production_threshold")]
    pub production_threshold: f64,

    /// Minimum score considered staging-ready.
    #[serde(default = "default_staging_threshold")]
    pub staging_threshold: f64,

    /// Minimum score considered usable for development iteration.
    #[serde(default = "default_dev_threshold")]
    pub dev_threshold: f64,

    /// Ceiling applied to the judge score when zero scenarios passed and
    /// at least one failed. Kept inside the Poor band.
    #[serde(default = "default_poor_ceiling")]
    pub poor_ceiling: f64,
}

const fn default_production_threshold() -> f64 {
    0.95
}

const fn default_staging_threshold() -> f64 {
    0.80
}

const fn default_dev_threshold() -> f64 {
    0.70
}

const fn default_poor_ceiling() -> f64 {
    0.25
}

impl Default for ScoringConfig {
    fn default() -> Self {
        Self {
            production_threshold: default_production_threshold(),
            staging_threshold: default_staging_threshold(),
            dev_threshold: default_dev_threshold(),
            poor_ceiling: default_poor_ceiling(),
        }
    }
}

/// Logging configuration.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub struct LoggingConfig {
    /// Log level: trace, debug, info, warn, error.
    #[serde(default = "default_log_level")]
    pub level: String,

    /// Log format: json or pretty.
    #[serde(default = "default_log_format")]
    pub format: String,
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            level: default_log_level(),
            format: default_log_format(),
        }
    }
}
