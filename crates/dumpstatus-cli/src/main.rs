//! Dumpstatus CLI - Main entry point

use clap::Parser;
use dumpstatus_cli::{Cli, Commands};
use dumpstatus_common::logging::{init_logging, LogConfig, LogLevel, LogOutput};
use std::process;
use tracing::error;

#[tokio::main]
async fn main() {
    let cli = Cli::parse();

    // Logs go to stderr so stdout stays clean for the report
    let log_config = LogConfig::builder()
        .level(if cli.verbose { LogLevel::Debug } else { LogLevel::Warn })
        .output(LogOutput::Console)
        .log_file_prefix("dumpstatus-cli")
        .build();

    // Environment variables take precedence
    let log_config = log_config.clone().merge_env().unwrap_or(log_config);

    // The CLI works without logging
    let _guard = init_logging(&log_config).ok().flatten();

    if let Err(e) = execute_command(&cli).await {
        error!(error = %e, "Command failed");
        eprintln!("Error: {}", e);
        process::exit(1);
    }
}

async fn execute_command(cli: &Cli) -> dumpstatus_cli::Result<()> {
    match &cli.command {
        Commands::Report {
            config,
            wikis,
            dates,
        } => dumpstatus_cli::commands::report::run(config, wikis, dates).await,

        Commands::Resolve {
            dumps,
            wiki,
            date,
            job,
        } => dumpstatus_cli::commands::resolve::run(dumps, wiki, date, job),
    }
}
