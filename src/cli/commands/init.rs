//! `specgrade init` — scaffold a default configuration file.

use std::path::PathBuf;

use anyhow::{bail, Context, Result};
use clap::Args;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};

const CONFIG_TEMPLATE: &str = r#"# specgrade configuration.
#
# Every key here can be overridden by a sibling local.yaml or by
# SPECGRADE_* environment variables (nested keys use "__", e.g.
# SPECGRADE_JUDGE__MODEL=mistral).

judge:
  base_url: "http://localhost:11434"
  model: "llama3.1"
  timeout_secs: 20
  temperature: 0.3
  max_response_tokens: 2000

scoring:
  production_threshold: 0.95
  staging_threshold: 0.80
  dev_threshold: 0.70
  poor_ceiling: 0.25

logging:
  level: "info"
  format: "pretty"
"#;

#[derive(Args)]
pub struct InitArgs {
    /// Directory to initialize. Defaults to the current directory.
    #[arg(default_value = ".")]
    pub path: PathBuf,

    /// Overwrite an existing config file.
    #[arg(long)]
    pub force: bool,
}

#[derive(Serialize)]
struct InitOutput {
    config_path: PathBuf,
}

impl CommandOutput for InitOutput {
    fn to_human(&self) -> String {
        format!("Wrote {}", self.config_path.display())
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub fn execute(args: &InitArgs, json_mode: bool) -> Result<()> {
    let dir = args.path.join(".specgrade");
    let config_path = dir.join("config.yaml");

    if config_path.exists() && !args.force {
        bail!(
            "{} already exists (use --force to overwrite)",
            config_path.display()
        );
    }

    std::fs::create_dir_all(&dir)
        .with_context(|| format!("failed to create {}", dir.display()))?;
    std::fs::write(&config_path, CONFIG_TEMPLATE)
        .with_context(|| format!("failed to write {}", config_path.display()))?;

    output(&InitOutput { config_path }, json_mode);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn writes_config_file() {
        let dir = TempDir::new().unwrap();
        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        execute(&args, true).unwrap();

        let written =
            std::fs::read_to_string(dir.path().join(".specgrade/config.yaml")).unwrap();
        assert!(written.contains("production_threshold: 0.95"));
    }

    #[test]
    fn refuses_to_overwrite_without_force() {
        let dir = TempDir::new().unwrap();
        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        execute(&args, true).unwrap();
        assert!(execute(&args, true).is_err());

        let forced = InitArgs {
            path: dir.path().to_path_buf(),
            force: true,
        };
        execute(&forced, true).unwrap();
    }

    #[test]
    fn template_parses_as_valid_config() {
        let dir = TempDir::new().unwrap();
        let args = InitArgs {
            path: dir.path().to_path_buf(),
            force: false,
        };
        execute(&args, true).unwrap();

        let config = crate::infrastructure::config::ConfigLoader::load_from_file(
            &dir.path().join(".specgrade/config.yaml"),
        )
        .unwrap();
        assert_eq!(config.judge.model, "llama3.1");
    }
}
