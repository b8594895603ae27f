//! Dumpstatus Common Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! Shared types, logging, and error handling for the dumpstatus workspace.
//!
//! # Overview
//!
//! - **Error Handling**: [`DumpStatusError`] and the crate-wide [`Result`] alias
//! - **Logging**: `tracing` subscriber setup shared by the server and CLI
//! - **Types**: the serialisable report model (`RunSettings`, `Job`, `DumpFile`, `WikiReport`)
//!
//! # Example
//!
//! ```
//! use dumpstatus_common::types::{DumpFile, Job};
//!
//! let job = Job {
//!     name: "articlesdump".to_string(),
//!     status: "done".to_string(),
//!     updated: "2016-12-07 21:00:27".to_string(),
//!     files: vec![DumpFile::named("elwikt-20161207-pages-articles.xml.bz2")],
//! };
//! assert_eq!(job.files.len(), 1);
//! ```

pub mod error;
pub mod logging;
pub mod types;

// Re-export commonly used types
pub use error::{DumpStatusError, Result};
