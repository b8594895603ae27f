//! Dumpstatus Scraper
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! The "scraper" backend: works out dump job status by reading a dumps
//! tree directly.
//!
//! # Overview
//!
//! - **run_settings**: the single-line run settings record
//! - **checksum**: md5/sha1 manifests as filename -> digest indexes
//! - **catalog**: job names and the shape of their output
//! - **resolver**: expected filenames for a job under given run settings
//! - **aggregator**: per wiki/date job list with sizes and hashes
//! - **report**: bounded fan-out over wikis into JSON fragments
//!
//! # Example
//!
//! ```no_run
//! use dumpstatus_scraper::{ProbeLimits, StatusAggregator};
//!
//! let aggregator = StatusAggregator::with_fs_probe("/mnt/dumps", ProbeLimits::default());
//! if let Some(jobs) = aggregator.aggregate("elwikt", "latest") {
//!     for job in jobs {
//!         tracing::info!(job = %job.name, files = job.files.len(), "job");
//!     }
//! }
//! ```

pub mod aggregator;
pub mod catalog;
pub mod checksum;
pub mod dump_dir;
pub mod manifest;
pub mod probe;
pub mod report;
pub mod resolver;
pub mod run_settings;
pub mod wiki_list;

use dumpstatus_common::DumpStatusError;

// Re-export commonly used types
pub use aggregator::StatusAggregator;
pub use checksum::{ChecksumIndex, HashKind};
pub use probe::{DirectoryProbe, FsProbe, ProbeLimits};
pub use report::{build_fragments, render_body, Selection};
pub use resolver::{resolve, Resolution};
pub use wiki_list::WikiList;

/// Source of wiki status information
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Backend {
    /// Read manifests straight from the dumps tree
    #[default]
    Scraper,
}

impl std::str::FromStr for Backend {
    type Err = DumpStatusError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim() {
            "scraper" => Ok(Backend::Scraper),
            other => Err(DumpStatusError::UnknownBackend(other.to_string())),
        }
    }
}

impl std::fmt::Display for Backend {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Backend::Scraper => write!(f, "scraper"),
        }
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_backend_from_str() {
        assert_eq!("scraper".parse::<Backend>().unwrap(), Backend::Scraper);
        assert!(matches!(
            "database".parse::<Backend>(),
            Err(DumpStatusError::UnknownBackend(_))
        ));
    }
}
