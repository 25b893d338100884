//! Command-line interface for specgrade.

pub mod commands;
pub mod output;

use clap::{Parser, Subcommand};
use console::style;

use commands::eval::EvalArgs;
use commands::init::InitArgs;

#[derive(Parser)]
#[command(name = "specgrade")]
#[command(
    about = "Score behavioral test runs and emit assertion-free feedback",
    long_about = None
)]
#[command(version)]
pub struct Cli {
    #[command(subcommand)]
    pub command: Commands,

    /// Output in JSON format
    #[arg(short, long, global = true)]
    pub json: bool,
}

#[derive(Subcommand)]
pub enum Commands {
    /// Evaluate a runner report and print the feedback payload
    Eval(EvalArgs),

    /// Write a default configuration file
    Init(InitArgs),
}

/// Print an error and exit non-zero. Honors `--json`.
pub fn handle_error(err: &anyhow::Error, json_mode: bool) -> ! {
    if json_mode {
        let payload = serde_json::json!({ "error": format!("{err:#}") });
        eprintln!(
            "{}",
            serde_json::to_string_pretty(&payload).unwrap_or_default()
        );
    } else {
        eprintln!("{} {err:#}", style("error:").red().bold());
    }
    std::process::exit(1);
}
