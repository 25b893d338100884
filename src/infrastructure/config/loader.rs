use anyhow::{Context, Result};
use figment::providers::{Env, Format, Serialized, Yaml};
use figment::Figment;
use thiserror::Error;

use crate::domain::models::Config;

/// Configuration error types.
#[derive(Error, Debug)]
pub enum ConfigError {
    #[error("Judge model cannot be empty")]
    EmptyJudgeModel,

    #[error("Judge base URL cannot be empty")]
    EmptyJudgeUrl,

    #[error("Invalid judge timeout: {0}. Must be positive")]
    InvalidTimeout(u64),

    #[error("Invalid threshold {name}: {value}. Must be within 0.0..=1.0")]
    ThresholdOutOfRange { name: &'static str, value: f64 },

    #[error(
        "Thresholds out of order: production ({production}) >= staging ({staging}) >= dev ({dev}) required"
    )]
    ThresholdsOutOfOrder {
        production: f64,
        staging: f64,
        dev: f64,
    },

    #[error("Invalid poor_ceiling: {0}. Must be within 0.0..0.3")]
    InvalidPoorCeiling(f64),

    #[error("Invalid log level: {0}. Must be one of: trace, debug, info, warn, error")]
    InvalidLogLevel(String),

    #[error("Invalid log format: {0}. Must be one of: json, pretty")]
    InvalidLogFormat(String),
}

/// Configuration loader with hierarchical merging.
pub struct ConfigLoader;

impl ConfigLoader {
    /// Load configuration with hierarchical merging.
    ///
    /// Precedence (lowest to highest):
    /// 1. Programmatic defaults
    /// 2. `.specgrade/config.yaml` (project config, created by init)
    /// 3. `.specgrade/local.yaml` (local overrides, optional)
    /// 4. Environment variables (`SPECGRADE_*` prefix, highest priority)
    pub fn load() -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(".specgrade/config.yaml"))
            .merge(Yaml::file(".specgrade/local.yaml"))
            .merge(Env::prefixed("SPECGRADE_").split("__"))
            .extract()
            .context("Failed to extract configuration from figment")?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Load configuration from a specific file.
    pub fn load_from_file(path: impl AsRef<std::path::Path>) -> Result<Config> {
        let config: Config = Figment::new()
            .merge(Serialized::defaults(Config::default()))
            .merge(Yaml::file(path.as_ref()))
            .extract()
            .context(format!(
                "Failed to load config from {}",
                path.as_ref().display()
            ))?;

        Self::validate(&config)?;
        Ok(config)
    }

    /// Validate configuration after loading.
    pub fn validate(config: &Config) -> Result<(), ConfigError> {
        if config.judge.model.trim().is_empty() {
            return Err(ConfigError::EmptyJudgeModel);
        }
        if config.judge.base_url.trim().is_empty() {
            return Err(ConfigError::EmptyJudgeUrl);
        }
        if config.judge.timeout_secs == 0 {
            return Err(ConfigError::InvalidTimeout(config.judge.timeout_secs));
        }

        let scoring = &config.scoring;
        for (name, value) in [
            ("production_threshold", scoring.production_threshold),
            ("staging_threshold", scoring.staging_threshold),
            ("dev_threshold", scoring.dev_threshold),
        ] {
            if !(0.0..=1.0).contains(&value) || !value.is_finite() {
                return Err(ConfigError::ThresholdOutOfRange { name, value });
            }
        }
        if scoring.production_threshold < scoring.staging_threshold
            || scoring.staging_threshold < scoring.dev_threshold
        {
            return Err(ConfigError::ThresholdsOutOfOrder {
                production: scoring.production_threshold,
                staging: scoring.staging_threshold,
                dev: scoring.dev_threshold,
            });
        }
        // The ceiling has to stay inside the Poor band for the zero-passed
        // clamp to mean anything.
        if !(0.0..0.3).contains(&scoring.poor_ceiling) {
            return Err(ConfigError::InvalidPoorCeiling(scoring.poor_ceiling));
        }

        let valid_log_levels = ["trace", "debug", "info", "warn", "error"];
        if !valid_log_levels.contains(&config.logging.level.as_str()) {
            return Err(ConfigError::InvalidLogLevel(config.logging.level.clone()));
        }
        let valid_log_formats = ["json", "pretty"];
        if !valid_log_formats.contains(&config.logging.format.as_str()) {
            return Err(ConfigError::InvalidLogFormat(config.logging.format.clone()));
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn default_config_validates() {
        assert!(ConfigLoader::validate(&Config::default()).is_ok());
    }

    #[test]
    fn rejects_empty_model() {
        let mut config = Config::default();
        config.judge.model = "  ".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::EmptyJudgeModel)
        ));
    }

    #[test]
    fn rejects_zero_timeout() {
        let mut config = Config::default();
        config.judge.timeout_secs = 0;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidTimeout(0))
        ));
    }

    #[test]
    fn rejects_out_of_order_thresholds() {
        let mut config = Config::default();
        config.scoring.production_threshold = 0.5;
        config.scoring.staging_threshold = 0.8;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::ThresholdsOutOfOrder { .. })
        ));
    }

    #[test]
    fn rejects_poor_ceiling_outside_poor_band() {
        let mut config = Config::default();
        config.scoring.poor_ceiling = 0.5;
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidPoorCeiling(_))
        ));
    }

    #[test]
    fn rejects_unknown_log_level() {
        let mut config = Config::default();
        config.logging.level = "verbose".to_string();
        assert!(matches!(
            ConfigLoader::validate(&config),
            Err(ConfigError::InvalidLogLevel(_))
        ));
    }

    #[test]
    fn loads_yaml_file_over_defaults() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "judge:\n  model: qwen2.5\n  timeout_secs: 5\nscoring:\n  production_threshold: 0.9"
        )
        .unwrap();

        let config = ConfigLoader::load_from_file(file.path()).unwrap();
        assert_eq!(config.judge.model, "qwen2.5");
        assert_eq!(config.judge.timeout_secs, 5);
        assert!((config.scoring.production_threshold - 0.9).abs() < f64::EPSILON);
        // Untouched values keep their defaults.
        assert_eq!(config.judge.base_url, "http://localhost:11434");
    }

    #[test]
    fn invalid_file_values_fail_validation() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "logging:\n  format: xml").unwrap();
        assert!(ConfigLoader::load_from_file(file.path()).is_err());
    }
}
