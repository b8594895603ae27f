//! Error types for the dumpstatus CLI

use thiserror::Error;

/// Result type alias for CLI operations
pub type Result<T> = std::result::Result<T, CliError>;

#[derive(Error, Debug)]
pub enum CliError {
    /// Config, wiki list or report failure from the library crates
    #[error(transparent)]
    Status(#[from] dumpstatus_common::DumpStatusError),

    /// No run directory for the requested wiki and date
    #[error("No dump run for '{wiki}' at '{date}'. Check the wiki name and that the date is YYYYMMDD or 'latest'.")]
    RunNotFound { wiki: String, date: String },

    #[error("Failed to write output: {0}")]
    Io(#[from] std::io::Error),
}
