//! Configuration management
//!
//! The service reads an INI file:
//!
//! ```ini
//! [directories]
//! wikilists = /srv/dumpstatus/lists
//! dumps = /mnt/dumps
//!
//! [misc]
//! backend = scraper
//! skip = private.dblist,closed.dblist
//! allwikis = all.dblist
//! ```
//!
//! Optional `[server]` and `[limits]` sections tune the listener and the
//! worker pool. Any key can be overridden from the environment as
//! `DUMPSTATUS__<SECTION>__<KEY>`.

use dumpstatus_common::{DumpStatusError, Result};
use dumpstatus_scraper::probe::{DEFAULT_PROBE_MAX_MATCHES, DEFAULT_PROBE_TIMEOUT};
use dumpstatus_scraper::report::DEFAULT_WORKERS;
use dumpstatus_scraper::wiki_list::DEFAULT_ALL_WIKIS;
use dumpstatus_scraper::{Backend, ProbeLimits};
use serde::Deserialize;
use std::path::{Path, PathBuf};
use std::time::Duration;

// ============================================================================
// Configuration Constants
// ============================================================================

/// Config file used when `DUMPSTATUS_CONFIG` is not set.
pub const DEFAULT_CONFIG_PATH: &str = "/srv/dumpstatus/dumpstatus.conf";

/// Environment variable naming the config file.
pub const CONFIG_PATH_ENV: &str = "DUMPSTATUS_CONFIG";

/// Default server host binding.
pub const DEFAULT_SERVER_HOST: &str = "127.0.0.1";

/// Default server port.
pub const DEFAULT_SERVER_PORT: u16 = 8000;

const ENV_PREFIX: &str = "DUMPSTATUS";
const ENV_SEPARATOR: &str = "__";

/// Service configuration
#[derive(Debug, Clone, Deserialize)]
pub struct Config {
    pub directories: DirectoriesConfig,
    pub misc: MiscConfig,
    #[serde(default)]
    pub server: ServerConfig,
    #[serde(default)]
    pub limits: LimitsConfig,
}

/// Where wiki lists and dumps live
#[derive(Debug, Clone, Deserialize)]
pub struct DirectoriesConfig {
    pub wikilists: PathBuf,
    pub dumps: PathBuf,
}

#[derive(Debug, Clone, Deserialize)]
pub struct MiscConfig {
    pub backend: String,
    /// Comma-separated list files whose wikis are never reported
    #[serde(default)]
    pub skip: Option<String>,
    #[serde(default = "default_allwikis")]
    pub allwikis: String,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ServerConfig {
    pub host: String,
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: DEFAULT_SERVER_HOST.to_string(),
            port: DEFAULT_SERVER_PORT,
        }
    }
}

/// Concurrency and probe bounds
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct LimitsConfig {
    pub workers: usize,
    pub probe_max_matches: usize,
    pub probe_timeout_ms: u64,
}

impl Default for LimitsConfig {
    fn default() -> Self {
        Self {
            workers: DEFAULT_WORKERS,
            probe_max_matches: DEFAULT_PROBE_MAX_MATCHES,
            probe_timeout_ms: DEFAULT_PROBE_TIMEOUT.as_millis() as u64,
        }
    }
}

impl LimitsConfig {
    pub fn probe_limits(&self) -> ProbeLimits {
        ProbeLimits {
            max_matches: self.probe_max_matches,
            timeout: Duration::from_millis(self.probe_timeout_ms),
        }
    }
}

fn default_allwikis() -> String {
    DEFAULT_ALL_WIKIS.to_string()
}

impl Config {
    /// Load from the file named by `DUMPSTATUS_CONFIG`, or the default path
    pub fn load() -> Result<Self> {
        dotenvy::dotenv().ok();
        let path = std::env::var(CONFIG_PATH_ENV).unwrap_or_else(|_| DEFAULT_CONFIG_PATH.into());
        Self::from_file(path)
    }

    /// Load an INI file, with environment overrides applied on top
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self> {
        let path = path.as_ref();
        let settings = config::Config::builder()
            .add_source(config::File::from(path).format(config::FileFormat::Ini))
            .add_source(
                config::Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR),
            )
            .build()
            .map_err(|e| DumpStatusError::config(format!("{}: {}", path.display(), e)))?;

        let config: Config = settings
            .try_deserialize()
            .map_err(|e| DumpStatusError::config(format!("{}: {}", path.display(), e)))?;

        config.validate()?;
        Ok(config)
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<()> {
        self.backend()?;

        if self.server.port == 0 {
            return Err(DumpStatusError::config("server port must be greater than 0"));
        }
        if self.limits.workers == 0 {
            return Err(DumpStatusError::config("limits.workers must be greater than 0"));
        }
        if self.limits.probe_max_matches == 0 {
            return Err(DumpStatusError::config(
                "limits.probe_max_matches must be greater than 0",
            ));
        }

        Ok(())
    }

    pub fn backend(&self) -> Result<Backend> {
        self.misc.backend.parse()
    }
}
