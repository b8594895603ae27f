//! Per wiki/date status assembly
//!
//! Reads the job manifest, run settings and checksum manifests of a run
//! directory, resolves each job's files, and attaches sizes and hashes
//! where they are available.

use crate::checksum::{ChecksumIndex, HashKind};
use crate::dump_dir::{dumpfile_name, DumpDir};
use crate::manifest::{parse_jobs, JOB_MANIFEST};
use crate::probe::{DirectoryProbe, FsProbe, ProbeLimits};
use crate::resolver::resolve;
use crate::run_settings::parse_run_settings;
use dumpstatus_common::types::{DumpFile, Job, RunSettings, WikiReport};
use dumpstatus_common::Result;
use std::path::PathBuf;
use tracing::{debug, instrument, warn};

const RUN_SETTINGS: &str = "runsettings.txt";

/// Status reporter over one dumps tree
#[derive(Debug, Clone)]
pub struct StatusAggregator<P = FsProbe> {
    dump_dir: DumpDir,
    probe: P,
}

impl StatusAggregator<FsProbe> {
    /// Aggregator probing the same tree it reads manifests from
    pub fn with_fs_probe(root: impl Into<PathBuf>, limits: ProbeLimits) -> Self {
        let root = root.into();
        Self {
            probe: FsProbe::new(root.clone(), limits),
            dump_dir: DumpDir::new(root),
        }
    }
}

impl<P: DirectoryProbe> StatusAggregator<P> {
    pub fn new(dump_dir: DumpDir, probe: P) -> Self {
        Self { dump_dir, probe }
    }

    pub fn dump_dir(&self) -> &DumpDir {
        &self.dump_dir
    }

    pub fn probe(&self) -> &P {
        &self.probe
    }

    /// Jobs of one run in manifest order, or `None` when the run (or its
    /// job manifest) does not exist.
    #[instrument(skip(self), level = "debug")]
    pub fn aggregate(&self, wiki: &str, date: &str) -> Option<Vec<Job>> {
        let run_date = self.dump_dir.resolve_date(wiki, date)?;

        let Some(text) = self.dump_dir.read_to_string(wiki, &run_date, JOB_MANIFEST) else {
            debug!(run_date, "No job manifest for run");
            return None;
        };

        let mut jobs = parse_jobs(&text);
        let settings = self.run_settings(wiki, &run_date);
        let md5 = self.checksums(wiki, &run_date, HashKind::Md5);
        let sha1 = self.checksums(wiki, &run_date, HashKind::Sha1);

        for job in &mut jobs {
            job.files = resolve(wiki, &run_date, &job.name, &settings, &self.probe)
                .into_files()
                .into_iter()
                .map(|name| DumpFile {
                    size: self.dump_dir.file_size(wiki, &run_date, &name),
                    md5sum: lookup(md5.as_ref(), &name),
                    sha1sum: lookup(sha1.as_ref(), &name),
                    name,
                })
                .collect();
        }

        Some(jobs)
    }

    /// Run settings, or defaults (no parts, no checkpoints) when unusable
    pub fn run_settings(&self, wiki: &str, run_date: &str) -> RunSettings {
        let filename = dumpfile_name(wiki, run_date, RUN_SETTINGS);
        let Some(text) = self.dump_dir.read_to_string(wiki, run_date, &filename) else {
            debug!(wiki, run_date, "No run settings, assuming an unpartitioned run");
            return RunSettings::default();
        };

        parse_run_settings(&text).unwrap_or_else(|e| {
            warn!(wiki, run_date, error = %e, "Ignoring run settings");
            RunSettings::default()
        })
    }

    /// Checksum index for one hash kind; `None` if missing or malformed
    pub fn checksums(&self, wiki: &str, run_date: &str, kind: HashKind) -> Option<ChecksumIndex> {
        let filename = dumpfile_name(wiki, run_date, kind.manifest_basename());
        let text = self.dump_dir.read_to_string(wiki, run_date, &filename)?;

        match ChecksumIndex::parse(kind, &text) {
            Ok(index) => Some(index),
            Err(e) => {
                warn!(wiki, run_date, %kind, error = %e, "Dropping checksum manifest");
                None
            },
        }
    }

    /// Report for every requested date of one wiki; dropped dates are absent
    pub fn wiki_report(&self, wiki: &str, dates: &[String]) -> WikiReport {
        let mut report = WikiReport::new(wiki);
        for date in dates {
            match self.aggregate(wiki, date) {
                Some(jobs) => {
                    report.dates.insert(date.clone(), jobs);
                },
                None => debug!(wiki, date = %date, "Dropping date from report"),
            }
        }
        report
    }

    /// Serialised report fragment, or `None` if no date survived
    #[instrument(skip(self), level = "debug")]
    pub fn wiki_fragment(&self, wiki: &str, dates: &[String]) -> Result<Option<String>> {
        let report = self.wiki_report(wiki, dates);
        if report.is_empty() {
            return Ok(None);
        }
        report.to_fragment().map(Some)
    }
}

fn lookup(index: Option<&ChecksumIndex>, filename: &str) -> Option<String> {
    index.and_then(|index| index.get(filename)).map(str::to_string)
}
