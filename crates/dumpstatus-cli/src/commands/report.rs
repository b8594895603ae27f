//! `dumpstatus report` command implementation

use crate::error::Result;
use dumpstatus_scraper::{build_fragments, render_body, Selection};
use dumpstatus_server::{config::Config, AppState};
use std::io::Write;
use std::path::Path;
use std::sync::Arc;
use tracing::debug;

/// Print the report for the selected wikis and dates to stdout
pub async fn run(config_path: &Path, wikis: &[String], dates: &[String]) -> Result<()> {
    let config = Config::from_file(config_path)?;
    let state = AppState::from_config(&config)?;

    let all_wikis = state
        .wiki_list
        .all_wikis(state.skip.as_deref(), &state.allwikis)?;
    debug!(known = all_wikis.len(), "Loaded wiki list");

    let selection = Selection::from_request(
        &all_wikis,
        (!wikis.is_empty()).then_some(wikis),
        (!dates.is_empty()).then_some(dates),
    );
    let fragments = build_fragments(Arc::clone(&state.aggregator), selection, state.workers).await?;

    let mut stdout = std::io::stdout().lock();
    if !fragments.is_empty() {
        writeln!(stdout, "{}", render_body(&fragments))?;
    }
    Ok(())
}
