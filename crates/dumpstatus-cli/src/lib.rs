//! Dumpstatus CLI Library
//!
//! Command-line access to the same reports the HTTP service produces.
//!
//! - **Report**: newline-separated JSON fragments for selected wikis (`dumpstatus report`)
//! - **Resolve**: expected output files of one job (`dumpstatus resolve`)

pub mod commands;
pub mod error;

pub use error::{CliError, Result};

use clap::{Parser, Subcommand};
use dumpstatus_server::config::{CONFIG_PATH_ENV, DEFAULT_CONFIG_PATH};
use std::path::PathBuf;

/// Dumpstatus - wiki dump job status reporter
#[derive(Parser, Debug)]
#[command(name = "dumpstatus")]
#[command(author, version, about, long_about = None)]
#[command(arg_required_else_help = true)]
pub struct Cli {
    /// Subcommand to execute
    #[command(subcommand)]
    pub command: Commands,

    /// Verbose output
    #[arg(short, long, global = true)]
    pub verbose: bool,
}

/// Available CLI commands
#[derive(Subcommand, Debug)]
pub enum Commands {
    /// Print the status report for some or all wikis
    Report {
        /// Service config file
        #[arg(short, long, env = CONFIG_PATH_ENV, default_value = DEFAULT_CONFIG_PATH)]
        config: PathBuf,

        /// Wiki to report on (repeatable, defaults to every wiki)
        #[arg(short, long = "wiki")]
        wikis: Vec<String>,

        /// Run date as YYYYMMDD or "latest" (repeatable, defaults to latest)
        #[arg(short, long = "date")]
        dates: Vec<String>,
    },

    /// List the files a job is expected to produce
    Resolve {
        /// Root of the dumps tree
        #[arg(long)]
        dumps: PathBuf,

        /// Wiki name
        #[arg(short, long)]
        wiki: String,

        /// Run date as YYYYMMDD or "latest"
        #[arg(short, long, default_value = "latest")]
        date: String,

        /// Job name, e.g. "articlesdump"
        #[arg(short, long)]
        job: String,
    },
}
