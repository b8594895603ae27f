//! Dumpstatus Server Library
#![deny(clippy::unwrap_used, clippy::expect_used)]
//!
//! HTTP service reporting which files each dump job of a wiki run is
//! expected to produce, with sizes and checksums where known.
//!
//! # Endpoints
//!
//! - `GET /` - service name and version
//! - `GET /health` - liveness
//! - `GET /dumpstatus?wikis=<wiki>&dates=<YYYYMMDD|latest>` - one JSON
//!   object per wiki, newline separated
//!
//! # Example
//!
//! ```no_run
//! use dumpstatus_server::{api, config::Config};
//!
//! #[tokio::main]
//! async fn main() -> anyhow::Result<()> {
//!     let config = Config::load()?;
//!     api::serve(config).await
//! }
//! ```

pub mod api;
pub mod config;
pub mod middleware;

pub use api::{create_router, AppState};
