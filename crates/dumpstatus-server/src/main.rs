//! Dumpstatus Server - Main entry point

use anyhow::Result;
use dumpstatus_common::logging::{init_logging, LogConfig};
use dumpstatus_server::{api, config::Config};
use tracing::info;

#[tokio::main]
async fn main() -> Result<()> {
    let log_config = LogConfig::builder()
        .log_file_prefix("dumpstatus-server")
        .filter_directives("dumpstatus_server=info,dumpstatus_scraper=info,tower_http=info")
        .build();

    // Environment variables take precedence
    let log_config = log_config.merge_env()?;
    let _log_guard = init_logging(&log_config)?;

    info!("Starting dumpstatus server");

    let config = Config::load()?;
    info!(
        dumps = %config.directories.dumps.display(),
        wikilists = %config.directories.wikilists.display(),
        backend = %config.misc.backend,
        "Configuration loaded"
    );

    api::serve(config).await?;

    info!("Server shut down gracefully");
    Ok(())
}
