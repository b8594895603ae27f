//! Directory probing for checkpoint files
//!
//! Checkpoint file names carry page ranges that are only known once the
//! files exist, so they are discovered by matching glob patterns against a
//! run directory listing. The resolver depends on the [`DirectoryProbe`]
//! trait only; tests substitute their own listing.

use regex::Regex;
use std::path::PathBuf;
use std::time::{Duration, Instant};
use tracing::{debug, warn};

/// Default cap on names returned by one probe
pub const DEFAULT_PROBE_MAX_MATCHES: usize = 10_000;

/// Default time budget for one probe
pub const DEFAULT_PROBE_TIMEOUT: Duration = Duration::from_secs(5);

/// Expands glob patterns against the contents of a wiki/date directory.
pub trait DirectoryProbe {
    /// Bare filenames matching each pattern, concatenated in pattern order.
    ///
    /// A missing or unreadable directory yields no matches.
    fn find_matching(&self, wiki: &str, date: &str, patterns: &[String]) -> Vec<String>;
}

impl<P: DirectoryProbe + ?Sized> DirectoryProbe for &P {
    fn find_matching(&self, wiki: &str, date: &str, patterns: &[String]) -> Vec<String> {
        (**self).find_matching(wiki, date, patterns)
    }
}

/// Bounds applied to a single probe; hitting one truncates the result
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ProbeLimits {
    pub max_matches: usize,
    pub timeout: Duration,
}

impl Default for ProbeLimits {
    fn default() -> Self {
        Self {
            max_matches: DEFAULT_PROBE_MAX_MATCHES,
            timeout: DEFAULT_PROBE_TIMEOUT,
        }
    }
}

/// Probe backed by `<root>/<wiki>/<date>/` on the local filesystem
#[derive(Debug, Clone)]
pub struct FsProbe {
    root: PathBuf,
    limits: ProbeLimits,
}

impl FsProbe {
    pub fn new(root: impl Into<PathBuf>, limits: ProbeLimits) -> Self {
        Self {
            root: root.into(),
            limits,
        }
    }

    pub fn limits(&self) -> ProbeLimits {
        self.limits
    }
}

impl DirectoryProbe for FsProbe {
    fn find_matching(&self, wiki: &str, date: &str, patterns: &[String]) -> Vec<String> {
        let started = Instant::now();
        let dir = self.root.join(wiki).join(date);

        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) => {
                debug!(path = %dir.display(), error = %e, "Run directory not readable, no matches");
                return Vec::new();
            },
        };

        let mut names = Vec::new();
        for entry in entries.flatten() {
            if started.elapsed() > self.limits.timeout {
                warn!(wiki, date, "Directory listing exceeded time budget, truncating");
                break;
            }
            if let Ok(name) = entry.file_name().into_string() {
                names.push(name);
            }
        }
        names.sort();

        let over_budget = || started.elapsed() > self.limits.timeout;

        let mut matches = Vec::new();
        for pattern in patterns {
            if over_budget() {
                warn!(wiki, date, "Checkpoint probe exceeded time budget, truncating");
                return matches;
            }
            let Some(matcher) = glob_to_regex(pattern) else {
                warn!(pattern = %pattern, "Unusable glob pattern, skipping");
                continue;
            };

            for name in &names {
                // checked per name, so non-matching scans are bounded too
                if over_budget() {
                    warn!(wiki, date, "Checkpoint probe exceeded time budget, truncating");
                    return matches;
                }
                if !matcher.is_match(name) {
                    continue;
                }
                if matches.len() >= self.limits.max_matches {
                    warn!(
                        wiki,
                        date,
                        max_matches = self.limits.max_matches,
                        "Checkpoint probe hit match limit, truncating"
                    );
                    return matches;
                }
                matches.push(name.clone());
            }
        }

        matches
    }
}

/// Translate a shell glob (`*`, `?`) into an anchored regex over one path segment
pub fn glob_to_regex(pattern: &str) -> Option<Regex> {
    let mut expr = String::with_capacity(pattern.len() + 8);
    expr.push('^');
    for c in pattern.chars() {
        match c {
            '*' => expr.push_str("[^/]*"),
            '?' => expr.push_str("[^/]"),
            other => expr.push_str(&regex::escape(other.encode_utf8(&mut [0u8; 4]))),
        }
    }
    expr.push('$');
    Regex::new(&expr).ok()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn run_dir(names: &[&str]) -> TempDir {
        let root = TempDir::new().unwrap();
        let dir = root.path().join("enwiki").join("20161201");
        std::fs::create_dir_all(&dir).unwrap();
        for name in names {
            std::fs::write(dir.join(name), b"x").unwrap();
        }
        root
    }

    #[test]
    fn test_glob_to_regex() {
        let re = glob_to_regex("enwiki-20161201-pages-meta-history1.xml-p*p*.7z").unwrap();
        assert!(re.is_match("enwiki-20161201-pages-meta-history1.xml-p10p2000.7z"));
        assert!(!re.is_match("enwiki-20161201-pages-meta-history1.xml.7z"));
        assert!(!re.is_match("enwiki-20161201-pages-meta-history12.xml-p10p2000.7z"));
        assert!(!re.is_match("xenwiki-20161201-pages-meta-history1.xml-p10p2000.7z"));
    }

    #[test]
    fn test_glob_question_mark_and_literal_dots() {
        let re = glob_to_regex("a?c.gz").unwrap();
        assert!(re.is_match("abc.gz"));
        assert!(!re.is_match("abcxgz"));
    }

    #[test]
    fn test_matches_are_sorted_per_pattern_and_concatenated() {
        let root = run_dir(&[
            "enwiki-20161201-pages-meta-history2.xml-p5p9.7z",
            "enwiki-20161201-pages-meta-history1.xml-p3p4.7z",
            "enwiki-20161201-pages-meta-history1.xml-p1p2.7z",
            "enwiki-20161201-md5sums.txt",
        ]);
        let probe = FsProbe::new(root.path(), ProbeLimits::default());
        let patterns = vec![
            "enwiki-20161201-pages-meta-history1.xml-p*p*.7z".to_string(),
            "enwiki-20161201-pages-meta-history2.xml-p*p*.7z".to_string(),
        ];

        let found = probe.find_matching("enwiki", "20161201", &patterns);
        assert_eq!(
            found,
            vec![
                "enwiki-20161201-pages-meta-history1.xml-p1p2.7z",
                "enwiki-20161201-pages-meta-history1.xml-p3p4.7z",
                "enwiki-20161201-pages-meta-history2.xml-p5p9.7z",
            ]
        );
    }

    #[test]
    fn test_missing_directory_has_no_matches() {
        let root = TempDir::new().unwrap();
        let probe = FsProbe::new(root.path(), ProbeLimits::default());

        let found = probe.find_matching("nowiki", "20161201", &["*".to_string()]);
        assert!(found.is_empty());
    }

    #[test]
    fn test_match_limit_truncates() {
        let root = run_dir(&["a-1", "a-2", "a-3", "a-4"]);
        let limits = ProbeLimits {
            max_matches: 2,
            ..ProbeLimits::default()
        };
        let probe = FsProbe::new(root.path(), limits);

        let found = probe.find_matching("enwiki", "20161201", &["a-*".to_string()]);
        assert_eq!(found, vec!["a-1", "a-2"]);
    }

    #[test]
    fn test_zero_timeout_returns_no_matches() {
        let root = run_dir(&["a-1", "a-2"]);
        let limits = ProbeLimits {
            timeout: Duration::ZERO,
            ..ProbeLimits::default()
        };
        let probe = FsProbe::new(root.path(), limits);

        let found = probe.find_matching("enwiki", "20161201", &["a-*".to_string()]);
        assert!(found.is_empty());
    }

    #[test]
    fn test_time_budget_bounds_non_matching_scans() {
        let names: Vec<String> = (0..20_000)
            .map(|n| format!("enwiki-20161201-stub-articles{n}.xml.gz"))
            .collect();
        let refs: Vec<&str> = names.iter().map(String::as_str).collect();
        let root = run_dir(&refs);

        let budget = Duration::from_millis(100);
        let probe = FsProbe::new(
            root.path(),
            ProbeLimits {
                timeout: budget,
                ..ProbeLimits::default()
            },
        );
        let patterns: Vec<String> = (1..=3_000)
            .map(|part| format!("enwiki-20161201-pages-meta-history{part}.xml-p*p*.7z"))
            .collect();

        let started = Instant::now();
        let found = probe.find_matching("enwiki", "20161201", &patterns);
        let took = started.elapsed();

        assert!(found.is_empty());
        // a full scan of every pattern takes several seconds
        assert!(took < budget + Duration::from_secs(1), "probe took {took:?}");
    }
}
