//! Announcement source abstraction.
//!
//! Provides a unified trait for obtaining raw announcement records from
//! different places: JSON files (replay), stdin (JSON lines), tab-separated
//! listing tables and HTTP feeds. The last two live in
//! [`crate::acquisition`].
//!
//! Records are decoded one element at a time, so a single malformed record
//! is skipped and counted rather than failing its whole source.

use crate::types::RawRecord;
use async_trait::async_trait;
use std::path::PathBuf;
use tracing::warn;

/// Records produced by one source in a single fetch.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SourceBatch {
    pub records: Vec<RawRecord>,
    /// Elements that could not be decoded into a [`RawRecord`]
    pub malformed: usize,
}

impl SourceBatch {
    pub fn new(records: Vec<RawRecord>) -> Self {
        Self {
            records,
            malformed: 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Append another batch, preserving order.
    pub fn extend(&mut self, other: SourceBatch) {
        self.records.extend(other.records);
        self.malformed += other.malformed;
    }
}

/// Errors that make a whole source unusable for this run.
#[derive(Debug, thiserror::Error)]
pub enum SourceError {
    #[error("failed to read {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to read stdin: {0}")]
    Stdin(#[source] std::io::Error),
    #[error("request to {url} failed: {source}")]
    Http {
        url: String,
        #[source]
        source: reqwest::Error,
    },
    #[error("{url} returned HTTP {status}")]
    Status { url: String, status: u16 },
    #[error("{origin} is not a JSON array of records: {reason}")]
    Format { origin: String, reason: String },
}

/// Trait abstracting where announcement records come from.
///
/// Implementations handle their own format parsing and transport. The
/// collector fetches every configured source concurrently and isolates
/// failures, so an `Err` here only drops this source's contribution.
#[async_trait]
pub trait AnnouncementSource: Send + Sync {
    /// Fetch every record currently available from the source.
    async fn fetch(&self) -> Result<SourceBatch, SourceError>;

    /// Human-readable name for logging (e.g. "json:feed.json", "stdin").
    fn source_name(&self) -> &str;
}

// ============================================================================
// Decoding
// ============================================================================

/// Decode each element independently; undecodable elements are counted.
pub fn decode_records(values: Vec<serde_json::Value>, origin: &str) -> SourceBatch {
    let mut batch = SourceBatch::default();
    for (index, value) in values.into_iter().enumerate() {
        match serde_json::from_value::<RawRecord>(value) {
            Ok(record) => batch.records.push(record),
            Err(e) => {
                warn!(source = origin, index, error = %e, "Skipping malformed record");
                batch.malformed += 1;
            }
        }
    }
    batch
}

/// Parse a JSON document holding an array of records.
///
/// An object with an `announcements` array is accepted as well, matching the
/// envelope some feeds wrap their payload in.
pub fn decode_document(text: &str, origin: &str) -> Result<SourceBatch, SourceError> {
    let value: serde_json::Value =
        serde_json::from_str(text).map_err(|e| SourceError::Format {
            origin: origin.to_string(),
            reason: e.to_string(),
        })?;

    let values = match value {
        serde_json::Value::Array(items) => items,
        serde_json::Value::Object(mut map) => match map.remove("announcements") {
            Some(serde_json::Value::Array(items)) => items,
            _ => {
                return Err(SourceError::Format {
                    origin: origin.to_string(),
                    reason: "object without an `announcements` array".to_string(),
                })
            }
        },
        other => {
            return Err(SourceError::Format {
                origin: origin.to_string(),
                reason: format!("unexpected top-level {}", json_kind(&other)),
            })
        }
    };

    Ok(decode_records(values, origin))
}

fn json_kind(value: &serde_json::Value) -> &'static str {
    match value {
        serde_json::Value::Null => "null",
        serde_json::Value::Bool(_) => "boolean",
        serde_json::Value::Number(_) => "number",
        serde_json::Value::String(_) => "string",
        serde_json::Value::Array(_) => "array",
        serde_json::Value::Object(_) => "object",
    }
}

// ============================================================================
// JSON File Source (replay)
// ============================================================================

/// Reads a file holding a JSON array of raw records.
pub struct JsonFileSource {
    path: PathBuf,
    name: String,
}

impl JsonFileSource {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let name = format!("json:{}", path.display());
        Self { path, name }
    }
}

#[async_trait]
impl AnnouncementSource for JsonFileSource {
    async fn fetch(&self) -> Result<SourceBatch, SourceError> {
        let text = tokio::fs::read_to_string(&self.path)
            .await
            .map_err(|source| SourceError::Io {
                path: self.path.clone(),
                source,
            })?;
        decode_document(&text, &self.name)
    }

    fn source_name(&self) -> &str {
        &self.name
    }
}

// ============================================================================
// Stdin Source (JSON records, one per line)
// ============================================================================

/// Reads JSON-formatted raw records from stdin until EOF.
///
/// Used to pipe a scraper straight into the scanner:
/// `scrape_announcements | asx-mining-scanner --stdin`
#[derive(Default)]
pub struct StdinSource;

impl StdinSource {
    pub fn new() -> Self {
        Self
    }
}

#[async_trait]
impl AnnouncementSource for StdinSource {
    async fn fetch(&self) -> Result<SourceBatch, SourceError> {
        use tokio::io::AsyncBufReadExt;

        let mut lines = tokio::io::BufReader::new(tokio::io::stdin()).lines();
        let mut values = Vec::new();
        let mut batch = SourceBatch::default();

        while let Some(line) = lines.next_line().await.map_err(SourceError::Stdin)? {
            let line = line.trim();
            if line.is_empty() {
                continue;
            }
            match serde_json::from_str::<serde_json::Value>(line) {
                Ok(value) => values.push(value),
                Err(e) => {
                    warn!("[StdinSource] Failed to parse record: {}", e);
                    batch.malformed += 1;
                }
            }
        }

        batch.extend(decode_records(values, "stdin"));
        Ok(batch)
    }

    fn source_name(&self) -> &str {
        "stdin"
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;
    use std::io::Write;

    #[test]
    fn test_decode_skips_malformed_elements() {
        let values = vec![
            json!({"company_code": "BHP", "title": "Operational review for the half year"}),
            json!({"company_code": "RIO", "title": null}),
            json!("not an object"),
            json!({"companyCode": "FMG", "title": "Iron Bridge project update"}),
        ];
        let batch = decode_records(values, "test");
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.malformed, 2);
        assert_eq!(batch.records[1].company_code, "FMG");
    }

    #[test]
    fn test_decode_document_array() {
        let batch = decode_document(r#"[{"title": "A"}, {"title": "B"}]"#, "test").unwrap();
        assert_eq!(batch.records.len(), 2);
        assert_eq!(batch.malformed, 0);
    }

    #[test]
    fn test_decode_document_envelope() {
        let batch =
            decode_document(r#"{"announcements": [{"title": "A"}], "count": 1}"#, "test").unwrap();
        assert_eq!(batch.records.len(), 1);
    }

    #[test]
    fn test_decode_document_rejects_scalar() {
        let err = decode_document("42", "test").unwrap_err();
        assert!(matches!(err, SourceError::Format { .. }));
        assert!(err.to_string().contains("number"));
    }

    #[test]
    fn test_decode_document_rejects_invalid_json() {
        assert!(decode_document("[{", "test").is_err());
    }

    #[test]
    fn test_batch_extend_keeps_order() {
        let mut a = SourceBatch::new(vec![RawRecord {
            title: "first".into(),
            ..Default::default()
        }]);
        let mut b = SourceBatch::new(vec![RawRecord {
            title: "second".into(),
            ..Default::default()
        }]);
        b.malformed = 3;
        a.extend(b);
        assert_eq!(a.records[0].title, "first");
        assert_eq!(a.records[1].title, "second");
        assert_eq!(a.malformed, 3);
    }

    #[tokio::test]
    async fn test_json_file_source_reads_records() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        write!(
            file,
            r#"[{{"company_code": "EVN", "title": "Cowal underground drilling results"}}, {{"title": 7}}]"#
        )
        .unwrap();

        let source = JsonFileSource::new(file.path());
        assert!(source.source_name().starts_with("json:"));
        let batch = source.fetch().await.unwrap();
        assert_eq!(batch.records.len(), 1);
        assert_eq!(batch.malformed, 1);
        assert_eq!(batch.records[0].company_code, "EVN");
    }

    #[tokio::test]
    async fn test_json_file_source_missing_file() {
        let source = JsonFileSource::new("/no/such/announcements.json");
        let err = source.fetch().await.unwrap_err();
        assert!(matches!(err, SourceError::Io { .. }));
    }
}
