//! `GET /dumpstatus`

use super::{ApiError, AppState};
use axum::{
    extract::{RawQuery, State},
    http::header,
    response::{IntoResponse, Response},
};
use dumpstatus_scraper::{build_fragments, render_body, Selection};
use std::sync::Arc;
use tracing::debug;

/// `wikis` and `dates` query parameters; both may repeat
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct StatusQuery {
    pub wikis: Option<Vec<String>>,
    pub dates: Option<Vec<String>>,
}

impl StatusQuery {
    /// Decode a raw query string. Blank values are dropped, so `wikis=`
    /// behaves as if the key were absent.
    pub fn parse(query: &str) -> Self {
        let mut parsed = Self::default();
        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            let target = match key.as_ref() {
                "wikis" => &mut parsed.wikis,
                "dates" => &mut parsed.dates,
                _ => continue,
            };
            target.get_or_insert_with(Vec::new).push(value.to_string());
        }
        parsed
    }
}

pub async fn dump_status(
    State(state): State<AppState>,
    RawQuery(query): RawQuery,
) -> Result<Response, ApiError> {
    let query = StatusQuery::parse(query.as_deref().unwrap_or_default());
    debug!(?query, "Dump status request");

    let wiki_list = state.wiki_list.clone();
    let skip = state.skip.clone();
    let allwikis = state.allwikis.clone();
    let all_wikis =
        tokio::task::spawn_blocking(move || wiki_list.all_wikis(skip.as_deref(), &allwikis))
            .await??;

    let selection =
        Selection::from_request(&all_wikis, query.wikis.as_deref(), query.dates.as_deref());
    let fragments = build_fragments(Arc::clone(&state.aggregator), selection, state.workers).await?;

    Ok((
        [(header::CONTENT_TYPE, "application/json")],
        render_body(&fragments),
    )
        .into_response())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repeated_keys() {
        let query = StatusQuery::parse("wikis=elwikt&wikis=enwiki&dates=20161207");
        assert_eq!(
            query.wikis,
            Some(vec!["elwikt".to_string(), "enwiki".to_string()])
        );
        assert_eq!(query.dates, Some(vec!["20161207".to_string()]));
    }

    #[test]
    fn test_parse_decodes_and_trims() {
        let query = StatusQuery::parse("wikis=%20elwikt+&other=1");
        assert_eq!(query.wikis, Some(vec!["elwikt".to_string()]));
        assert_eq!(query.dates, None);
    }

    #[test]
    fn test_blank_values_count_as_absent() {
        assert_eq!(StatusQuery::parse("wikis=&dates="), StatusQuery::default());
        assert_eq!(StatusQuery::parse(""), StatusQuery::default());
    }
}
