//! `specgrade eval` — score a runner report and emit behavioral feedback.

use std::io::Read;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::{Context, Result};
use clap::Args;
use console::style;
use serde::Serialize;

use crate::cli::output::{output, CommandOutput};
use crate::domain::models::{Band, Feedback, Provenance, ScoringConfig};
use crate::domain::ports::Judge;
use crate::infrastructure::config::ConfigLoader;
use crate::infrastructure::judge::{OfflineJudge, OllamaJudge};
use crate::infrastructure::runner::parse_report;
use crate::services::Evaluator;

#[derive(Args)]
pub struct EvalArgs {
    /// Path to the runner's JSON report. Reads stdin when omitted.
    pub report: Option<PathBuf>,

    /// Load configuration from a specific file instead of the default chain.
    #[arg(short, long)]
    pub config: Option<PathBuf>,

    /// Skip the judge entirely: deterministic pass-rate scoring and
    /// template statements only.
    #[arg(long)]
    pub no_judge: bool,
}

#[derive(Serialize)]
struct EvalOutput {
    #[serde(flatten)]
    feedback: Feedback,
    thresholds: ScoringConfig,
}

impl EvalOutput {
    /// Environments whose threshold the score meets, strictest first.
    fn environments_met(&self) -> Vec<&'static str> {
        [
            ("production", self.thresholds.production_threshold),
            ("staging", self.thresholds.staging_threshold),
            ("dev", self.thresholds.dev_threshold),
        ]
        .into_iter()
        .filter(|(_, threshold)| self.feedback.score >= *threshold)
        .map(|(name, _)| name)
        .collect()
    }
}

impl CommandOutput for EvalOutput {
    fn to_human(&self) -> String {
        let f = &self.feedback;
        let score_line = format!("{:.2}/1.00 ({})", f.score, f.band.label());
        let score_styled = match f.band {
            Band::Excellent => style(score_line).green().bold(),
            Band::Good => style(score_line).green(),
            Band::Moderate => style(score_line).yellow(),
            Band::Poor => style(score_line).red(),
        };

        let met = self.environments_met();
        let deploy = if f.deploy_ready {
            style("ready for production".to_string()).green()
        } else if met.is_empty() {
            style(format!(
                "not ready for any environment (dev needs {:.2})",
                self.thresholds.dev_threshold
            ))
            .red()
        } else {
            style(format!(
                "ready for {} (production needs {:.2})",
                met.join(", "),
                self.thresholds.production_threshold
            ))
            .yellow()
        };

        let mut lines = vec![
            format!("Satisfaction: {score_styled}"),
            format!(
                "Scenarios:    {} passed, {} failed, {} skipped",
                f.passed, f.failed, f.skipped
            ),
            format!(
                "Provenance:   {}",
                match f.provenance {
                    Provenance::Judge => "judge",
                    Provenance::Fallback => "fallback",
                }
            ),
            format!("Deployment:   {deploy}"),
            format!("Rationale:    {}", f.rationale),
        ];

        if f.statements.is_empty() {
            if f.all_passed {
                lines.push(style("All behaviors satisfied.").green().to_string());
            }
        } else {
            lines.push("Behavioral feedback:".to_string());
            for (i, statement) in f.statements.iter().enumerate() {
                lines.push(format!("  {}. {statement}", i + 1));
            }
        }

        lines.join("\n")
    }

    fn to_json(&self) -> serde_json::Value {
        serde_json::to_value(self).unwrap_or_default()
    }
}

pub async fn execute(args: EvalArgs, json_mode: bool) -> Result<()> {
    let config = match &args.config {
        Some(path) => ConfigLoader::load_from_file(path)
            .with_context(|| format!("failed to load config from {}", path.display()))?,
        None => ConfigLoader::load().context("failed to load configuration")?,
    };

    crate::infrastructure::logging::init(&config.logging)?;

    let raw = match &args.report {
        Some(path) => std::fs::read_to_string(path)
            .with_context(|| format!("failed to read report {}", path.display()))?,
        None => {
            let mut buf = String::new();
            std::io::stdin()
                .read_to_string(&mut buf)
                .context("failed to read report from stdin")?;
            buf
        }
    };

    let summary = parse_report(&raw).context("failed to parse runner report")?;

    let judge: Arc<dyn Judge> = if args.no_judge {
        Arc::new(OfflineJudge)
    } else {
        Arc::new(OllamaJudge::new(config.judge.clone()).context("failed to build judge client")?)
    };

    let evaluator = Evaluator::new(judge, &config);
    let feedback = evaluator
        .evaluate(&summary)
        .await
        .context("evaluation failed")?;

    output(
        &EvalOutput {
            feedback,
            thresholds: config.scoring,
        },
        json_mode,
    );
    Ok(())
}
