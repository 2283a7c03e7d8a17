//! Source collector: fetches every configured source concurrently and merges
//! the results in source order.
//!
//! A failing source contributes nothing; the failure is logged and the other
//! sources are unaffected.

use super::{HttpFeedSource, ListingFileSource};
use crate::config::SourcesConfig;
use crate::pipeline::source::{
    AnnouncementSource, JsonFileSource, SourceBatch, SourceError, StdinSource,
};
use crate::registry::CompanyRegistry;
use chrono::NaiveDate;
use futures::future::join_all;
use std::sync::Arc;
use tracing::{info, warn};

/// Fetch all sources concurrently and concatenate their batches.
///
/// Output order is the order of `sources`, then each source's own order.
pub async fn collect_all(sources: &[Box<dyn AnnouncementSource>]) -> SourceBatch {
    let results = join_all(sources.iter().map(|s| s.fetch())).await;

    let mut merged = SourceBatch::default();
    let mut failed = 0usize;
    for (source, result) in sources.iter().zip(results) {
        match result {
            Ok(batch) => {
                info!(
                    source = source.source_name(),
                    records = batch.records.len(),
                    malformed = batch.malformed,
                    "Source fetched"
                );
                merged.extend(batch);
            }
            Err(e) => {
                warn!(source = source.source_name(), error = %e, "Source failed, skipping");
                failed += 1;
            }
        }
    }

    info!(
        sources = sources.len(),
        failed,
        records = merged.records.len(),
        "Collection complete"
    );
    merged
}

/// Build the source list for one run from config and CLI selections.
///
/// JSON files come first, then listing tables, then feeds, then stdin.
pub fn build_sources(
    config: &SourcesConfig,
    read_stdin: bool,
    run_date: NaiveDate,
    registry: Arc<CompanyRegistry>,
) -> Result<Vec<Box<dyn AnnouncementSource>>, SourceError> {
    let mut sources: Vec<Box<dyn AnnouncementSource>> = Vec::new();

    for path in &config.json_files {
        sources.push(Box::new(JsonFileSource::new(path.clone())));
    }
    for path in &config.listing_files {
        sources.push(Box::new(ListingFileSource::new(
            path.clone(),
            run_date,
            Arc::clone(&registry),
        )));
    }
    for url in &config.feed_urls {
        sources.push(Box::new(HttpFeedSource::new(url, config)?));
    }
    if read_stdin {
        sources.push(Box::new(StdinSource::new()));
    }

    if sources.is_empty() {
        warn!("No announcement sources configured; the report will be empty");
    }
    Ok(sources)
}
