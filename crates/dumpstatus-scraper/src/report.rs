//! Multi-wiki report building
//!
//! Each wiki becomes an independent JSON fragment; the response body is the
//! fragments joined by newlines. Wikis are processed on the blocking pool
//! with bounded concurrency, and fragments come back in request order.

use crate::aggregator::StatusAggregator;
use crate::dump_dir::LATEST;
use crate::probe::DirectoryProbe;
use dumpstatus_common::{DumpStatusError, Result};
use futures::stream::{self, StreamExt, TryStreamExt};
use std::sync::Arc;
use tracing::{debug, info};

/// Default number of wikis reported concurrently
pub const DEFAULT_WORKERS: usize = 4;

/// Wikis and dates a request asks for
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Selection {
    pub wikis: Vec<String>,
    pub dates: Vec<String>,
}

impl Selection {
    /// Narrow a request down to known wikis.
    ///
    /// Requested wikis not in `all_wikis` are dropped; no wikis requested
    /// means every wiki. No dates requested means `latest`. Values are
    /// trimmed and may be comma-separated.
    pub fn from_request(
        all_wikis: &[String],
        wikis: Option<&[String]>,
        dates: Option<&[String]>,
    ) -> Self {
        let wikis = match wikis {
            Some(requested) => split_values(requested)
                .filter(|wiki| all_wikis.contains(wiki))
                .collect(),
            None => all_wikis.to_vec(),
        };

        let dates = match dates {
            Some(requested) => split_values(requested).collect(),
            None => vec![LATEST.to_string()],
        };

        Self { wikis, dates }
    }
}

fn split_values(values: &[String]) -> impl Iterator<Item = String> + '_ {
    values
        .iter()
        .flat_map(|value| value.split(','))
        .map(str::trim)
        .filter(|value| !value.is_empty())
        .map(str::to_string)
}

/// Build one fragment per wiki that has at least one reportable date
pub async fn build_fragments<P>(
    aggregator: Arc<StatusAggregator<P>>,
    selection: Selection,
    workers: usize,
) -> Result<Vec<String>>
where
    P: DirectoryProbe + Send + Sync + 'static,
{
    let workers = workers.max(1);
    let dates = Arc::new(selection.dates);
    let wiki_count = selection.wikis.len();

    info!(wikis = wiki_count, dates = dates.len(), workers, "Building dump status report");

    let fragments: Vec<Option<String>> = stream::iter(selection.wikis)
        .map(|wiki| {
            let aggregator = Arc::clone(&aggregator);
            let dates = Arc::clone(&dates);
            async move {
                match tokio::task::spawn_blocking(move || aggregator.wiki_fragment(&wiki, &dates))
                    .await
                {
                    Ok(fragment) => fragment,
                    Err(e) => Err(DumpStatusError::Worker(e.to_string())),
                }
            }
        })
        .buffered(workers)
        .try_collect()
        .await?;

    let fragments: Vec<String> = fragments.into_iter().flatten().collect();
    debug!(reported = fragments.len(), requested = wiki_count, "Report built");

    Ok(fragments)
}

/// Response body for a set of fragments
pub fn render_body(fragments: &[String]) -> String {
    fragments.join("\n")
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    fn strings(values: &[&str]) -> Vec<String> {
        values.iter().map(|v| v.to_string()).collect()
    }

    #[test]
    fn test_selection_defaults() {
        let all = strings(&["elwikt", "enwiki"]);
        let selection = Selection::from_request(&all, None, None);

        assert_eq!(selection.wikis, all);
        assert_eq!(selection.dates, vec!["latest"]);
    }

    #[test]
    fn test_selection_filters_unknown_wikis() {
        let all = strings(&["elwikt", "enwiki"]);
        let requested = strings(&[" enwiki ", "secretwiki", "elwikt,frwiki"]);
        let dates = strings(&["20161207", " 20161120,latest "]);

        let selection = Selection::from_request(&all, Some(&requested), Some(&dates));
        assert_eq!(selection.wikis, vec!["enwiki", "elwikt"]);
        assert_eq!(selection.dates, vec!["20161207", "20161120", "latest"]);
    }

    #[test]
    fn test_render_body_joins_with_newlines() {
        let body = render_body(&strings(&[r#"{"a":{}}"#, r#"{"b":{}}"#]));
        assert_eq!(body, "{\"a\":{}}\n{\"b\":{}}");
        assert_eq!(render_body(&[]), "");
    }
}
