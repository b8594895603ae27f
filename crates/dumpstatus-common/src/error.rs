//! Error types for dumpstatus

use thiserror::Error;

/// Result type alias for dumpstatus operations
pub type Result<T> = std::result::Result<T, DumpStatusError>;

/// Main error type for dumpstatus
#[derive(Error, Debug)]
pub enum DumpStatusError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),

    #[error("Malformed run settings: {0}")]
    MalformedSettings(String),

    #[error("Malformed checksum line {line_no}: '{line}'")]
    MalformedChecksumLine { line_no: usize, line: String },

    #[error("Malformed job line {line_no}: '{line}'")]
    MalformedJobLine { line_no: usize, line: String },

    #[error("Wiki list error: {0}")]
    WikiList(String),

    #[error("Configuration error: {0}")]
    Config(String),

    #[error("Unknown backend: {0}")]
    UnknownBackend(String),

    #[error("Worker task failed: {0}")]
    Worker(String),
}

impl DumpStatusError {
    /// Create a malformed settings error
    pub fn malformed_settings(msg: impl Into<String>) -> Self {
        Self::MalformedSettings(msg.into())
    }

    /// Create a configuration error
    pub fn config(msg: impl Into<String>) -> Self {
        Self::Config(msg.into())
    }

    /// Create a wiki list error
    pub fn wiki_list(msg: impl Into<String>) -> Self {
        Self::WikiList(msg.into())
    }
}
