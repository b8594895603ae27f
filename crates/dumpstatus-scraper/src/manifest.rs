//! `dumpruninfo.txt` job manifest
//!
//! One job per line:
//!
//! ```text
//! name:metacurrentdumprecombine; status:done; updated:2016-12-07 21:00:27
//! ```
//!
//! The first three `;`-separated fields are name, status and updated;
//! anything after them is ignored.

use dumpstatus_common::types::Job;
use dumpstatus_common::{DumpStatusError, Result};
use tracing::warn;

/// Manifest filename inside a run directory (not wiki/date prefixed)
pub const JOB_MANIFEST: &str = "dumpruninfo.txt";

/// Parse one manifest line into a job with no files yet
pub fn parse_job_line(line_no: usize, line: &str) -> Result<Job> {
    let malformed = || DumpStatusError::MalformedJobLine {
        line_no,
        line: line.to_string(),
    };

    let mut values = line.split(';').map(|field| {
        field
            .trim()
            .split_once(':')
            .map(|(_, value)| value.trim().to_string())
    });

    let mut next = || values.next().flatten().ok_or_else(&malformed);
    let name = next()?;
    let status = next()?;
    let updated = next()?;

    if name.is_empty() {
        return Err(malformed());
    }

    Ok(Job {
        name,
        status,
        updated,
        files: Vec::new(),
    })
}

/// Parse a whole manifest, skipping (and logging) malformed lines.
///
/// A run in progress can leave a half-written last line; the jobs before it
/// are still reported.
pub fn parse_jobs(text: &str) -> Vec<Job> {
    text.lines()
        .enumerate()
        .filter(|(_, line)| !line.trim().is_empty())
        .filter_map(|(index, line)| match parse_job_line(index + 1, line) {
            Ok(job) => Some(job),
            Err(e) => {
                warn!(error = %e, "Skipping job manifest line");
                None
            },
        })
        .collect()
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_job_line() {
        let job = parse_job_line(
            1,
            "name:metacurrentdumprecombine; status:done; updated:2016-12-07 21:00:27",
        )
        .unwrap();

        assert_eq!(job.name, "metacurrentdumprecombine");
        assert_eq!(job.status, "done");
        assert_eq!(job.updated, "2016-12-07 21:00:27");
        assert!(job.files.is_empty());
    }

    #[test]
    fn test_extra_fields_are_ignored() {
        let job = parse_job_line(
            1,
            "name:articlesdump; status:in-progress; updated:2016-12-07 10:00:00; started:x",
        )
        .unwrap();
        assert_eq!(job.status, "in-progress");
    }

    #[test]
    fn test_short_line_is_malformed() {
        let result = parse_job_line(4, "name:articlesdump; status:done");
        assert!(matches!(
            result,
            Err(DumpStatusError::MalformedJobLine { line_no: 4, .. })
        ));
    }

    #[test]
    fn test_field_without_colon_is_malformed() {
        let result = parse_job_line(1, "name:articlesdump; done; updated:now");
        assert!(result.is_err());
    }

    #[test]
    fn test_parse_jobs_skips_bad_lines_and_keeps_order() {
        let text = "name:sitestatstable; status:done; updated:2016-12-07 20:01:02\n\
                    \n\
                    garbage\n\
                    name:articlesdump; status:waiting; updated:\n\
                    name:abstractsdump; status:running";

        let jobs = parse_jobs(text);
        let names: Vec<_> = jobs.iter().map(|job| job.name.as_str()).collect();
        assert_eq!(names, vec!["sitestatstable", "articlesdump"]);
        assert_eq!(jobs[1].updated, "");
    }

    #[test]
    fn test_parse_empty_manifest() {
        assert!(parse_jobs("").is_empty());
    }
}
