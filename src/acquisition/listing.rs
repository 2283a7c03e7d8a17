//! Exchange announcement table ingestion
//!
//! Reads tab-separated rows shaped like the daily announcements table on
//! exchange market sites: `time<TAB>company<TAB>title`. Extra columns are
//! ignored. The company cell is free text such as `BHP Group Limited (BHP)`,
//! from which the ticker code is extracted.
//!
//! Rows for codes outside the registry are dropped here, so only tracked
//! companies reach the pipeline.

use crate::pipeline::source::{AnnouncementSource, SourceBatch, SourceError};
use crate::registry::CompanyRegistry;
use crate::types::RawRecord;
use async_trait::async_trait;
use chrono::NaiveDate;
use regex::Regex;
use std::path::PathBuf;
use std::sync::{Arc, LazyLock};
use tracing::{debug, info, warn};

// ============================================================================
// Regex Patterns
// ============================================================================

/// Parenthesized code, e.g. `(BHP)` or `(29M)`.
static RE_PAREN_CODE: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\(([A-Z0-9]{2,4})\)").unwrap());

/// Bare uppercase ticker anywhere in the cell.
static RE_BARE_CODE: LazyLock<Regex> = LazyLock::new(|| Regex::new(r"\b([A-Z]{2,4})\b").unwrap());

/// Extract the ticker code from a company cell.
///
/// A parenthesized code takes precedence over a bare uppercase token.
pub fn extract_company_code(cell: &str) -> Option<&str> {
    RE_PAREN_CODE
        .captures(cell)
        .or_else(|| RE_BARE_CODE.captures(cell))
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str())
}

/// Company cell with any parenthesized code removed.
pub fn strip_company_code(cell: &str) -> String {
    RE_PAREN_CODE.replace_all(cell, "").trim().to_string()
}

// ============================================================================
// Row Parsing
// ============================================================================

/// Normalize listing text into raw records for tracked companies.
///
/// `date` is stamped on every record (tables carry only a time of day) and
/// `url` records where the table came from. Rows with fewer than three cells
/// count as malformed.
pub fn parse_listing(
    text: &str,
    url: &str,
    date: NaiveDate,
    registry: &CompanyRegistry,
) -> SourceBatch {
    let date = date.format("%Y-%m-%d").to_string();
    let mut batch = SourceBatch::default();
    let mut untracked = 0usize;

    for (idx, line) in text.lines().enumerate() {
        let line_num = idx + 1;

        // Skip header line
        if line_num == 1 && line.trim_start().to_lowercase().starts_with("time") {
            continue;
        }
        if line.trim().is_empty() || line.starts_with('#') {
            continue;
        }

        let cells: Vec<&str> = line.split('\t').map(str::trim).collect();
        if cells.len() < 3 {
            warn!(line = line_num, cells = cells.len(), "Listing row has too few cells");
            batch.malformed += 1;
            continue;
        }
        let (time, company, title) = (cells[0], cells[1], cells[2]);

        let Some(code) = extract_company_code(company) else {
            debug!(line = line_num, company, "No company code in listing row");
            continue;
        };
        if !registry.is_tracked(code) {
            untracked += 1;
            continue;
        }

        batch.records.push(RawRecord {
            company_code: code.to_string(),
            company_name: strip_company_code(company),
            title: title.to_string(),
            content: title.to_string(),
            date: date.clone(),
            time: time.to_string(),
            url: url.to_string(),
        });
    }

    debug!(
        kept = batch.records.len(),
        untracked,
        malformed = batch.malformed,
        "Parsed listing rows"
    );
    batch
}

// ============================================================================
// Listing File Source
// ============================================================================

/// Reads a saved announcement table from disk.
pub struct ListingFileSource {
    path: PathBuf,
    name: String,
    date: NaiveDate,
    registry: Arc<CompanyRegistry>,
}

impl ListingFileSource {
    pub fn new(path: impl Into<PathBuf>, date: NaiveDate, registry: Arc<CompanyRegistry>) -> Self {
        let path = path.into();
        let name = format!("listing:{}", path.display());
        Self {
            path,
            name,
            date,
            registry,
        }
    }
}

#[async_trait]
impl AnnouncementSource for ListingFileSource {
    async fn fetch(&self) -> Result<SourceBatch, SourceError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        let url = self.path.display().to_string();
        let batch = parse_listing(&text, &url, self.date, &self.registry);
        info!(
            source = %self.name,
            count = batch.records.len(),
            "Loaded tracked announcements from listing"
        );
        Ok(batch)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    fn run_date() -> NaiveDate {
        NaiveDate::from_ymd_opt(2024, 5, 14).unwrap()
    }

    #[test]
    fn test_extract_code_prefers_parenthesized() {
        assert_eq!(extract_company_code("BHP Group Limited (BHP)"), Some("BHP"));
        assert_eq!(extract_company_code("IGO Limited (IGO)"), Some("IGO"));
        assert_eq!(extract_company_code("29Metals Limited (29M)"), Some("29M"));
        assert_eq!(extract_company_code("Copper Mountain (C6C)"), Some("C6C"));
    }

    #[test]
    fn test_extract_bare_code() {
        assert_eq!(extract_company_code("PLS"), Some("PLS"));
        assert_eq!(extract_company_code("Lynas LYC"), Some("LYC"));
        assert_eq!(extract_company_code("Northern Star Resources"), None);
        assert_eq!(extract_company_code("ABCDE"), None);
    }

    #[test]
    fn test_strip_company_code() {
        assert_eq!(strip_company_code("Rio Tinto Limited (RIO)"), "Rio Tinto Limited");
        assert_eq!(strip_company_code("PLS"), "PLS");
    }

    #[test]
    fn test_parse_listing_filters_and_normalizes() {
        let text = "Time\tCompany\tTitle\n\
                    9:45am\tEvolution Mining Limited (EVN)\tRecord gold production at Cowal\n\
                    9:50am\tCommonwealth Bank (CBA)\tDividend reinvestment plan\n\
                    10:02am\tonly two\tcells\n\
                    broken row\n\
                    \n\
                    10:30am\tPLS\tPilgangoora offtake agreement with Ganfeng\textra\n";
        let registry = CompanyRegistry::builtin();
        let batch = parse_listing(text, "https://example.com/announcements", run_date(), &registry);

        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.malformed, 1);

        let evn = &batch.records[0];
        assert_eq!(evn.company_code, "EVN");
        assert_eq!(evn.company_name, "Evolution Mining Limited");
        assert_eq!(evn.title, "Record gold production at Cowal");
        assert_eq!(evn.content, evn.title);
        assert_eq!(evn.date, "2024-05-14");
        assert_eq!(evn.time, "9:45am");
        assert_eq!(evn.url, "https://example.com/announcements");

        assert_eq!(batch.records[1].company_code, "PLS");
        assert_eq!(batch.records[1].title, "Pilgangoora offtake agreement with Ganfeng");
    }

    #[test]
    fn test_parse_listing_without_header() {
        let text = "11:00am\tNST\tJundee drilling results confirm extensions";
        let batch = parse_listing(text, "", run_date(), &CompanyRegistry::builtin());
        assert_eq!(batch.records.len(), 1);
    }

    #[tokio::test]
    async fn test_listing_file_source() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "time\tcompany\ttitle").unwrap();
        writeln!(file, "9:30am\tLynas Rare Earths Ltd (LYC)\tKalgoorlie facility update").unwrap();

        let registry = Arc::new(CompanyRegistry::builtin());
        let source = ListingFileSource::new(file.path(), run_date(), registry);
        let batch = source.fetch().await.unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.records[0].company_name, "Lynas Rare Earths Ltd");
    }

    #[tokio::test]
    async fn test_listing_file_source_missing() {
        let source = ListingFileSource::new(
            "/no/such/listing.tsv",
            run_date(),
            Arc::new(CompanyRegistry::builtin()),
        );
        assert!(source.fetch().await.is_err());
    }
}
