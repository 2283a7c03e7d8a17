//! Report persistence: one markdown file per day.

use super::DispatchError;
use chrono::{DateTime, Utc};
use std::path::{Path, PathBuf};
use tracing::info;

/// Writes reports to `{dir}/{prefix}_{YYYYMMDD}.md`.
///
/// A second run on the same day overwrites that day's file.
#[derive(Debug, Clone)]
pub struct ReportStore {
    dir: PathBuf,
    prefix: String,
}

impl ReportStore {
    pub fn new(dir: impl Into<PathBuf>, prefix: impl Into<String>) -> Self {
        Self {
            dir: dir.into(),
            prefix: prefix.into(),
        }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Date-keyed path for a report generated at `at`.
    pub fn path_for(&self, at: DateTime<Utc>) -> PathBuf {
        self.dir
            .join(format!("{}_{}.md", self.prefix, at.format("%Y%m%d")))
    }

    /// Create the directory if needed and write the report text.
    pub async fn save(&self, text: &str, at: DateTime<Utc>) -> Result<PathBuf, DispatchError> {
        tokio::fs::create_dir_all(&self.dir)
            .await
            .map_err(|source| DispatchError::Persist {
                path: self.dir.clone(),
                source,
            })?;

        let path = self.path_for(at);
        tokio::fs::write(&path, text)
            .await
            .map_err(|source| DispatchError::Persist {
                path: path.clone(),
                source,
            })?;

        info!(path = %path.display(), bytes = text.len(), "Report saved");
        Ok(path)
    }
}
