//! Read-only access to the dumps tree
//!
//! Layout: `<root>/<wiki>/<date>/<file>`, where run directories are named
//! `YYYYMMDD`. Absence at any level is reported as `None`, never an error.

use regex::Regex;
use std::path::{Path, PathBuf};
use std::sync::LazyLock;
use tracing::debug;

/// Date value meaning "most recent run directory"
pub const LATEST: &str = "latest";

#[allow(clippy::unwrap_used)]
static DATE_DIR: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"^\d{8}$").unwrap());

/// `<wiki>-<date>-<basename>`, the naming rule for every run output file
pub fn dumpfile_name(wiki: &str, date: &str, basename: &str) -> String {
    format!("{wiki}-{date}-{basename}")
}

/// True for a `YYYYMMDD` directory name
pub fn is_date_dir(name: &str) -> bool {
    DATE_DIR.is_match(name)
}

/// True when `name` is usable as a single path segment under the root
pub fn is_safe_component(name: &str) -> bool {
    !name.is_empty()
        && name != "."
        && name != ".."
        && !name.contains(['/', '\\', '\0'])
}

/// Pick the latest run from directory names: the maximum 8-digit name
pub fn latest_date<I, S>(names: I) -> Option<String>
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    names
        .into_iter()
        .filter(|name| is_date_dir(name.as_ref()))
        .map(|name| name.as_ref().to_string())
        .max()
}

/// Root of the dumps tree
#[derive(Debug, Clone)]
pub struct DumpDir {
    root: PathBuf,
}

impl DumpDir {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn run_dir(&self, wiki: &str, date: &str) -> PathBuf {
        self.root.join(wiki).join(date)
    }

    /// Most recent `YYYYMMDD` subdirectory of the wiki
    pub fn latest_date(&self, wiki: &str) -> Option<String> {
        let wiki_dir = self.root.join(wiki);
        let entries = match std::fs::read_dir(&wiki_dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(path = %wiki_dir.display(), error = %e, "Wiki directory not readable");
                return None;
            },
        };

        let names = entries
            .flatten()
            .filter(|entry| entry.path().is_dir())
            .filter_map(|entry| entry.file_name().into_string().ok());

        latest_date(names)
    }

    /// Turn a requested date into a concrete run directory name.
    ///
    /// `latest` is looked up; anything else must be an 8-digit name.
    pub fn resolve_date(&self, wiki: &str, date: &str) -> Option<String> {
        if !is_safe_component(wiki) {
            debug!(wiki, "Rejecting unsafe wiki name");
            return None;
        }
        if date == LATEST {
            return self.latest_date(wiki);
        }
        if is_date_dir(date) {
            Some(date.to_string())
        } else {
            debug!(wiki, date, "Rejecting malformed date");
            None
        }
    }

    fn file_path(&self, wiki: &str, date: &str, filename: &str) -> Option<PathBuf> {
        is_safe_component(filename).then(|| self.run_dir(wiki, date).join(filename))
    }

    /// Contents of a file in the run directory, if present and readable
    pub fn read_to_string(&self, wiki: &str, date: &str, filename: &str) -> Option<String> {
        let path = self.file_path(wiki, date, filename)?;
        match std::fs::read_to_string(&path) {
            Ok(text) => Some(text),
            Err(e) => {
                debug!(path = %path.display(), error = %e, "Run file not readable");
                None
            },
        }
    }

    /// Size in bytes of a file in the run directory
    pub fn file_size(&self, wiki: &str, date: &str, filename: &str) -> Option<u64> {
        let path = self.file_path(wiki, date, filename)?;
        std::fs::metadata(path)
            .ok()
            .filter(|meta| meta.is_file())
            .map(|meta| meta.len())
    }
}
