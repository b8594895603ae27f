//! Checksum manifest index
//!
//! Each run directory carries `<wiki>-<date>-md5sums.txt` and
//! `<wiki>-<date>-sha1sums.txt` in the two-column `md5sum` output format.
//! The values are reported as-is; nothing here hashes file contents.

use dumpstatus_common::{DumpStatusError, Result};
use std::collections::HashMap;

/// Kind of hash manifest
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum HashKind {
    Md5,
    Sha1,
}

impl HashKind {
    /// Basename of the manifest, to be prefixed with `<wiki>-<date>-`
    pub fn manifest_basename(self) -> &'static str {
        match self {
            HashKind::Md5 => "md5sums.txt",
            HashKind::Sha1 => "sha1sums.txt",
        }
    }
}

impl std::fmt::Display for HashKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            HashKind::Md5 => write!(f, "md5"),
            HashKind::Sha1 => write!(f, "sha1"),
        }
    }
}

/// Filename -> hex digest for one hash kind
#[derive(Debug, Clone)]
pub struct ChecksumIndex {
    kind: HashKind,
    hashes: HashMap<String, String>,
}

impl ChecksumIndex {
    /// Parse manifest text.
    ///
    /// Any line that is not exactly `<hash> <filename>`, blank lines
    /// included, fails the whole manifest.
    pub fn parse(kind: HashKind, text: &str) -> Result<Self> {
        let mut hashes = HashMap::new();

        for (index, line) in text.lines().enumerate() {
            let mut tokens = line.split_whitespace();
            match (tokens.next(), tokens.next(), tokens.next()) {
                (Some(hash), Some(filename), None) => {
                    hashes.insert(filename.to_string(), hash.to_string());
                },
                _ => {
                    return Err(DumpStatusError::MalformedChecksumLine {
                        line_no: index + 1,
                        line: line.to_string(),
                    })
                },
            }
        }

        Ok(Self { kind, hashes })
    }

    pub fn kind(&self) -> HashKind {
        self.kind
    }

    /// Digest recorded for an exact filename
    pub fn get(&self, filename: &str) -> Option<&str> {
        self.hashes.get(filename).map(String::as_str)
    }

    pub fn len(&self) -> usize {
        self.hashes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.hashes.is_empty()
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_md5sum_output() {
        let text = "90223f748898280921b58ec36c100cbf  elwikt-20161207-abstract.xml\n\
                    0d1a4b5e1ca1b4b8a9b0ef8f2f0f6c34  elwikt-20161207-site_stats.sql.gz\n";
        let index = ChecksumIndex::parse(HashKind::Md5, text).unwrap();

        assert_eq!(index.len(), 2);
        assert_eq!(index.kind(), HashKind::Md5);
        assert_eq!(
            index.get("elwikt-20161207-abstract.xml"),
            Some("90223f748898280921b58ec36c100cbf")
        );
    }

    #[test]
    fn test_lookup_is_exact() {
        let text = "abc123 elwikt-20161207-abstract.xml";
        let index = ChecksumIndex::parse(HashKind::Sha1, text).unwrap();

        assert_eq!(index.get("abstract.xml"), None);
        assert_eq!(index.get("ELWIKT-20161207-abstract.xml"), None);
    }

    #[test]
    fn test_blank_line_fails_manifest() {
        let text = "abc123 elwikt-20161207-abstract.xml\n   \ndef456 elwikt-20161207-all-titles.gz\n";
        let result = ChecksumIndex::parse(HashKind::Md5, text);

        assert!(matches!(
            result,
            Err(DumpStatusError::MalformedChecksumLine { line_no: 2, .. })
        ));
    }

    #[test]
    fn test_trailing_newline_is_not_a_blank_line() {
        let text = "abc123 elwikt-20161207-abstract.xml\n";
        let index = ChecksumIndex::parse(HashKind::Md5, text).unwrap();
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn test_line_with_one_token_fails_manifest() {
        let text = "abc123 elwikt-20161207-abstract.xml\ntruncated\n";
        let result = ChecksumIndex::parse(HashKind::Md5, text);

        assert!(matches!(
            result,
            Err(DumpStatusError::MalformedChecksumLine { line_no: 2, .. })
        ));
    }

    #[test]
    fn test_line_with_three_tokens_fails_manifest() {
        let text = "abc123 elwikt-20161207-abstract.xml extra";
        let result = ChecksumIndex::parse(HashKind::Md5, text);
        assert!(result.is_err());
    }

    #[test]
    fn test_empty_manifest() {
        let index = ChecksumIndex::parse(HashKind::Sha1, "").unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_manifest_basenames() {
        assert_eq!(HashKind::Md5.manifest_basename(), "md5sums.txt");
        assert_eq!(HashKind::Sha1.manifest_basename(), "sha1sums.txt");
    }
}
