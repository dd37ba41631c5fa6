//! Rackham CLI binary.
//!
//! - `rackham run` processes the story under a root directory
//! - `rackham init` creates the folder skeleton under a fresh root
//! - `rackham check` reports which inputs are present

use clap::Parser;
use rackham::observability::{ObservabilityConfig, init_observability_with_config};
use std::process::ExitCode;

mod cli;

#[tokio::main]
async fn main() -> ExitCode {
    use cli::{Cli, Commands, check_layout, init_root, run_command};

    let cli = Cli::parse();

    // A missing .env is normal
    dotenvy::dotenv().ok();

    let log_level = if cli.verbose { "debug" } else { "info" };
    let observability = ObservabilityConfig::new("rackham")
        .with_log_level(log_level)
        .with_json_logs(cli.json_logs);
    if let Err(e) = init_observability_with_config(observability) {
        eprintln!("Failed to initialize logging: {e}");
        return ExitCode::FAILURE;
    }

    let outcome = match cli.command {
        Commands::Run {
            root,
            config,
            offline,
        } => run_command(root, config, offline).await,
        Commands::Init { root, config } => init_root(root, config).await,
        Commands::Check { root, config } => check_layout(root, config).await,
    };

    match outcome {
        Ok(()) => ExitCode::SUCCESS,
        Err(e) => {
            tracing::error!(error = %e, "Run failed");
            eprintln!("Error: {e}");
            ExitCode::FAILURE
        }
    }
}
