//! Specgrade CLI entry point.

use clap::Parser;

use specgrade::cli::{handle_error, Cli, Commands};

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    let result = match cli.command {
        Commands::Eval(args) => specgrade::cli::commands::eval::execute(args, cli.json).await,
        Commands::Init(args) => specgrade::cli::commands::init::execute(&args, cli.json),
    };

    if let Err(err) = result {
        handle_error(&err, cli.json);
    }
}
