//! Shared report types
//!
//! These are the values the scraper produces and the server and CLI
//! serialise. Optional fields are skipped rather than written as `null`.

use serde::ser::SerializeMap;
use serde::{Deserialize, Serialize, Serializer};
use std::collections::BTreeMap;

/// Per-run settings parsed from `<wiki>-<date>-runsettings.txt`.
///
/// Absent fields are zero/false. `RunSettings::default()` is also what a
/// resolver sees when the settings record is missing or malformed.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RunSettings {
    /// The run splits its output into numbered parts
    pub has_parts: bool,
    /// Number of history parts
    pub history_parts_count: u32,
    /// Number of abstract parts
    pub abstract_parts_count: u32,
    /// Partitioned output is recombined into single files
    pub recombine: bool,
    /// History jobs write checkpoint files
    pub checkpoints_enabled: bool,
}

/// One output file of a dump job.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DumpFile {
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub size: Option<u64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub md5sum: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub sha1sum: Option<String>,
}

impl DumpFile {
    /// A file record with only its name filled in
    pub fn named(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            size: None,
            md5sum: None,
            sha1sum: None,
        }
    }
}

/// One line of the job manifest, with its resolved files.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Job {
    pub name: String,
    pub status: String,
    /// Timestamp text exactly as the manifest records it
    pub updated: String,
    #[serde(default)]
    pub files: Vec<DumpFile>,
}

/// Report for a single wiki: requested date -> jobs in manifest order.
///
/// Serialises as `{"<wiki>": {"<date>": [...]}}` so each wiki is a
/// self-contained JSON fragment.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct WikiReport {
    pub wiki: String,
    pub dates: BTreeMap<String, Vec<Job>>,
}

impl WikiReport {
    pub fn new(wiki: impl Into<String>) -> Self {
        Self {
            wiki: wiki.into(),
            dates: BTreeMap::new(),
        }
    }

    /// True when every requested date was dropped
    pub fn is_empty(&self) -> bool {
        self.dates.is_empty()
    }

    /// Serialise to a single-line JSON fragment
    pub fn to_fragment(&self) -> crate::Result<String> {
        Ok(serde_json::to_string(self)?)
    }
}

impl Serialize for WikiReport {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(1))?;
        map.serialize_entry(&self.wiki, &self.dates)?;
        map.end()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_dump_file_omits_absent_fields() {
        let mut file = DumpFile::named("elwikt-20161207-abstract.xml");
        file.md5sum = Some("90223f748898280921b58ec36c100cbf".to_string());

        let json = serde_json::to_string(&file).unwrap();
        assert_eq!(
            json,
            r#"{"name":"elwikt-20161207-abstract.xml","md5sum":"90223f748898280921b58ec36c100cbf"}"#
        );
    }

    #[test]
    fn test_wiki_report_fragment_shape() {
        let mut report = WikiReport::new("elwikt");
        report.dates.insert(
            "20161207".to_string(),
            vec![Job {
                name: "sitestatstable".to_string(),
                status: "done".to_string(),
                updated: "2016-12-07 20:01:02".to_string(),
                files: vec![DumpFile {
                    size: Some(812),
                    ..DumpFile::named("elwikt-20161207-site_stats.sql.gz")
                }],
            }],
        );

        let fragment = report.to_fragment().unwrap();
        assert_eq!(
            fragment,
            r#"{"elwikt":{"20161207":[{"name":"sitestatstable","status":"done","updated":"2016-12-07 20:01:02","files":[{"name":"elwikt-20161207-site_stats.sql.gz","size":812}]}]}}"#
        );
    }

    #[test]
    fn test_dates_serialise_in_key_order() {
        let mut report = WikiReport::new("enwiki");
        report.dates.insert("latest".to_string(), vec![]);
        report.dates.insert("20160101".to_string(), vec![]);

        let fragment = report.to_fragment().unwrap();
        assert_eq!(fragment, r#"{"enwiki":{"20160101":[],"latest":[]}}"#);
    }
}
