//! Wiki list files (`*.dblist`)
//!
//! One wiki name per line; blank lines and `#` comments are ignored.

use dumpstatus_common::{DumpStatusError, Result};
use std::path::{Path, PathBuf};
use tracing::debug;

/// Default list naming every wiki
pub const DEFAULT_ALL_WIKIS: &str = "all.dblist";

/// Reader for list files kept in one directory
#[derive(Debug, Clone)]
pub struct WikiList {
    basedir: PathBuf,
}

impl WikiList {
    pub fn new(basedir: impl Into<PathBuf>) -> Self {
        Self {
            basedir: basedir.into(),
        }
    }

    /// Sorted entries of a list file
    pub fn read_entries(path: &Path) -> Result<Vec<String>> {
        let text = std::fs::read_to_string(path)?;
        let mut entries: Vec<String> = text
            .lines()
            .map(str::trim)
            .filter(|line| !line.is_empty() && !line.starts_with('#'))
            .map(str::to_string)
            .collect();
        entries.sort();
        Ok(entries)
    }

    /// Entries of `<basedir>/<file>`; a missing file is an empty list
    pub fn get_wikis(&self, file: &str) -> Result<Vec<String>> {
        let path = self.basedir.join(file);
        if !path.exists() {
            debug!(path = %path.display(), "Wiki list file missing");
            return Ok(Vec::new());
        }
        Self::read_entries(&path)
    }

    /// Every wiki from `allwikis` minus those in the comma-separated `skip` lists.
    ///
    /// A skip list that is empty or unreadable is an error.
    pub fn all_wikis(&self, skip: Option<&str>, allwikis: &str) -> Result<Vec<String>> {
        let mut to_skip = Vec::new();

        for file in skip.into_iter().flat_map(|s| s.split(',')) {
            let file = file.trim();
            if file.is_empty() {
                continue;
            }
            let entries = self.get_wikis(file).unwrap_or_default();
            if entries.is_empty() {
                return Err(DumpStatusError::wiki_list(format!(
                    "skip list '{file}' is empty or unreadable"
                )));
            }
            to_skip.extend(entries);
        }

        let wikis = self
            .get_wikis(allwikis)?
            .into_iter()
            .filter(|wiki| !to_skip.contains(wiki))
            .collect();

        Ok(wikis)
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn lists(files: &[(&str, &str)]) -> TempDir {
        let dir = TempDir::new().unwrap();
        for (name, content) in files {
            std::fs::write(dir.path().join(name), content).unwrap();
        }
        dir
    }

    #[test]
    fn test_read_entries_sorts_and_filters() {
        let dir = lists(&[("all.dblist", "# all wikis\nenwiki\n\n  elwikt  \naawiki\n")]);
        let entries = WikiList::read_entries(&dir.path().join("all.dblist")).unwrap();
        assert_eq!(entries, vec!["aawiki", "elwikt", "enwiki"]);
    }

    #[test]
    fn test_missing_list_is_empty() {
        let dir = TempDir::new().unwrap();
        let list = WikiList::new(dir.path());
        assert!(list.get_wikis("nope.dblist").unwrap().is_empty());
    }

    #[test]
    fn test_all_wikis_without_skip() {
        let dir = lists(&[("all.dblist", "enwiki\nelwikt\n")]);
        let list = WikiList::new(dir.path());
        assert_eq!(list.all_wikis(None, "all.dblist").unwrap(), vec!["elwikt", "enwiki"]);
    }

    #[test]
    fn test_all_wikis_applies_skip_lists() {
        let dir = lists(&[
            ("all.dblist", "enwiki\nelwikt\nprivatewiki\nclosedwiki\n"),
            ("private.dblist", "privatewiki\n"),
            ("closed.dblist", "closedwiki\n"),
        ]);
        let list = WikiList::new(dir.path());

        let wikis = list
            .all_wikis(Some("private.dblist, closed.dblist"), "all.dblist")
            .unwrap();
        assert_eq!(wikis, vec!["elwikt", "enwiki"]);
    }

    #[test]
    fn test_empty_skip_list_is_an_error() {
        let dir = lists(&[("all.dblist", "enwiki\n"), ("private.dblist", "# none\n")]);
        let list = WikiList::new(dir.path());

        let result = list.all_wikis(Some("private.dblist"), "all.dblist");
        assert!(matches!(result, Err(DumpStatusError::WikiList(_))));
    }

    #[test]
    fn test_missing_skip_list_is_an_error() {
        let dir = lists(&[("all.dblist", "enwiki\n")]);
        let list = WikiList::new(dir.path());

        assert!(list.all_wikis(Some("gone.dblist"), "all.dblist").is_err());
    }
}
