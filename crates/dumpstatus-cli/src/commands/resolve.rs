//! `dumpstatus resolve` command implementation
//!
//! Shows what the aggregator would list for one job, using the run's own
//! settings and the filesystem probe.

use crate::error::{CliError, Result};
use dumpstatus_scraper::{resolve, ProbeLimits, Resolution, StatusAggregator};
use std::io::Write;
use std::path::Path;

pub fn run(dumps: &Path, wiki: &str, date: &str, job: &str) -> Result<()> {
    let aggregator = StatusAggregator::with_fs_probe(dumps, ProbeLimits::default());

    let run_date = aggregator
        .dump_dir()
        .resolve_date(wiki, date)
        .ok_or_else(|| CliError::RunNotFound {
            wiki: wiki.to_string(),
            date: date.to_string(),
        })?;

    let settings = aggregator.run_settings(wiki, &run_date);
    let resolution = resolve(wiki, &run_date, job, &settings, aggregator.probe());

    let mut stdout = std::io::stdout().lock();
    match resolution {
        Resolution::Recognized(files) => {
            for file in files {
                writeln!(stdout, "{}", file)?;
            }
        },
        Resolution::Unrecognized => eprintln!("(unrecognized job)"),
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_missing_run_is_reported() {
        let dumps = TempDir::new().unwrap();
        let result = run(dumps.path(), "elwikt", "latest", "articlesdump");

        assert!(matches!(
            result,
            Err(CliError::RunNotFound { ref wiki, ref date }) if wiki == "elwikt" && date == "latest"
        ));
    }

    #[test]
    fn test_unsafe_wiki_is_reported() {
        let dumps = TempDir::new().unwrap();
        let result = run(dumps.path(), "../elwikt", "20161207", "articlesdump");
        assert!(matches!(result, Err(CliError::RunNotFound { .. })));
    }
}
