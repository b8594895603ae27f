//! Expected output filenames for a dump job
//!
//! Resolution is a pure function of the job name and run settings, except
//! for checkpointed history jobs, whose files are found by probing the run
//! directory. It never fails: anything unmapped resolves to no files.

use crate::catalog::{self, JobEntry, JobKind, PART_PLACEHOLDER};
use crate::dump_dir::dumpfile_name;
use crate::probe::DirectoryProbe;
use dumpstatus_common::types::RunSettings;
use tracing::{debug, warn};

const HISTORY_PREFIX: &str = "metahistory";
const ABSTRACT_PREFIX: &str = "abstract";

/// Outcome of resolving a job name.
///
/// Both cases serialise as a (possibly empty) file list; keeping them apart
/// lets callers tell "known job, nothing expected" from "never heard of it".
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    Recognized(Vec<String>),
    Unrecognized,
}

impl Resolution {
    pub fn is_recognized(&self) -> bool {
        matches!(self, Resolution::Recognized(_))
    }

    /// The file list, empty for unrecognized jobs
    pub fn into_files(self) -> Vec<String> {
        match self {
            Resolution::Recognized(files) => files,
            Resolution::Unrecognized => Vec::new(),
        }
    }
}

/// How many parts a job is split into and whether it checkpoints
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PartPlan {
    pub parts: u32,
    pub checkpoints: bool,
}

impl PartPlan {
    pub fn for_job(job_name: &str, entry: &JobEntry, settings: &RunSettings) -> Self {
        let checkpoints =
            settings.checkpoints_enabled && job_name.starts_with(HISTORY_PREFIX) && !entry.recombine;

        let parts = if !settings.has_parts || entry.recombine {
            0
        } else if job_name.starts_with(ABSTRACT_PREFIX) {
            settings.abstract_parts_count
        } else if entry.takes_part_numbers() {
            settings.history_parts_count
        } else {
            0
        };

        Self { parts, checkpoints }
    }
}

/// Resolve the ordered list of files `job_name` is expected to produce for
/// the run `wiki`/`date`.
pub fn resolve<P>(
    wiki: &str,
    date: &str,
    job_name: &str,
    settings: &RunSettings,
    probe: &P,
) -> Resolution
where
    P: DirectoryProbe + ?Sized,
{
    let Some(entry) = catalog::lookup(job_name) else {
        debug!(job = job_name, "Job not in catalog, no files expected");
        return Resolution::Unrecognized;
    };

    // table dumps ignore run settings entirely
    if let JobKind::Table { stem } = &entry.kind {
        let basename = format!("{stem}.sql.gz");
        return Resolution::Recognized(vec![dumpfile_name(wiki, date, &basename)]);
    }

    let plan = PartPlan::for_job(job_name, &entry, settings);

    if plan.checkpoints {
        let JobKind::Checkpoint { globs, .. } = entry.kind else {
            warn!(job = job_name, "Checkpoints enabled but no checkpoint pattern known");
            return Resolution::Recognized(Vec::new());
        };
        let patterns = numbered(wiki, date, globs, plan.parts);
        return Resolution::Recognized(probe.find_matching(wiki, date, &patterns));
    }

    let templates = entry.templates();
    let files = if plan.parts == 0 {
        templates
            .iter()
            .map(|template| dumpfile_name(wiki, date, &template.replace(PART_PLACEHOLDER, "")))
            .collect()
    } else {
        numbered(wiki, date, templates, plan.parts)
    };

    Resolution::Recognized(files)
}

/// Templates for parts `1..=parts`: all templates of part 1, then part 2, ...
fn numbered(wiki: &str, date: &str, templates: &[&str], parts: u32) -> Vec<String> {
    (1..=parts)
        .flat_map(|part| {
            templates.iter().map(move |template| {
                dumpfile_name(wiki, date, &template.replace(PART_PLACEHOLDER, &part.to_string()))
            })
        })
        .collect()
}
