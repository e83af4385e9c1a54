//! ctsync CLI
//!
//! Keeps the custom types of a commercetools project in line with a config file.

mod cli;
mod commands;
mod error;

use clap::Parser;
use colored::Colorize;
use tracing::Level;
use tracing_subscriber::FmtSubscriber;

use cli::{Cli, Commands};
use error::{CliError, Result};

fn main() {
    match run() {
        Ok(code) => std::process::exit(code),
        Err(e) => {
            eprintln!("{}: {}", "error".red().bold(), e);
            std::process::exit(1);
        }
    }
}

fn run() -> Result<i32> {
    let cli = Cli::parse();

    // Logs go to stderr so `--json` output stays parseable
    if cli.verbose {
        let subscriber = FmtSubscriber::builder()
            .with_max_level(Level::DEBUG)
            .with_target(true)
            .with_writer(std::io::stderr)
            .finish();
        tracing::subscriber::set_global_default(subscriber)
            .map_err(|e| CliError::user(format!("Failed to set tracing subscriber: {e}")))?;
        tracing::debug!("Verbose mode enabled");
    }

    execute_command(&cli)
}

fn execute_command(cli: &Cli) -> Result<i32> {
    match &cli.command {
        Commands::Process { filter, json } => {
            block_on(commands::run_process(&cli.config, &cli.client, filter, *json))
        }
        Commands::Plan { filter, json } => {
            block_on(commands::run_plan(&cli.config, &cli.client, filter, *json))
        }
        Commands::Validate { json } => commands::run_validate(&cli.config, *json),
        Commands::Resources { json } => commands::run_resources(&cli.config, *json),
    }
}

/// Requests are strictly sequential, so one thread is enough.
fn block_on<F>(future: F) -> Result<i32>
where
    F: std::future::Future<Output = Result<i32>>,
{
    let runtime = tokio::runtime::Builder::new_current_thread()
        .enable_all()
        .build()?;
    runtime.block_on(future)
}
