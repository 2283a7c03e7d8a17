//! Scan Pipeline - record processing sequence for one daily scan
//!
//! ```text
//! STAGE 1: Collection   (all sources, concurrently; malformed records counted)
//! STAGE 2: Deduplication (exact company code + title, first wins)
//! STAGE 3: Classification (sentiment + key points, every unique record)
//! STAGE 4: Quality gate  (title length >= configured minimum)
//! STAGE 5: Report        (ReportBuilder)
//! STAGE 6: Dispatch      (persist, echo, notify)
//! ```
//!
//! This module covers stages 2-4. Collection lives in
//! [`crate::acquisition::collect_all`]; stages 5-6 are driven by the runner.

use super::classifier::Classifier;
use super::dedup::dedupe;
use super::source::SourceBatch;
use crate::config::ScanningConfig;
use crate::types::Announcement;
use tracing::{debug, info};

/// Deduplicate, classify and filter one batch of collected records.
pub struct ScanPipeline {
    classifier: Classifier,
}

impl ScanPipeline {
    pub fn new(config: &ScanningConfig) -> Self {
        Self {
            classifier: Classifier::new(config),
        }
    }

    pub fn with_classifier(classifier: Classifier) -> Self {
        Self { classifier }
    }

    pub fn classifier(&self) -> &Classifier {
        &self.classifier
    }

    /// Run stages 2-4. Output order follows first appearance in `batch`.
    pub fn process(&self, batch: SourceBatch) -> (Vec<Announcement>, PipelineStats) {
        let raw = batch.records.len();
        let unique = dedupe(batch.records);
        let duplicates = raw - unique.len();

        let mut kept = Vec::with_capacity(unique.len());
        let mut below_gate = 0;
        for record in &unique {
            let announcement = self.classifier.classify(record);
            if self.classifier.passes_quality_gate(&announcement) {
                kept.push(announcement);
            } else {
                debug!(
                    company = %announcement.company_code,
                    title_len = announcement.title_len(),
                    "Announcement below minimum title length"
                );
                below_gate += 1;
            }
        }

        let stats = PipelineStats {
            raw_records: raw,
            malformed: batch.malformed,
            duplicates,
            below_quality_gate: below_gate,
            kept: kept.len(),
        };
        info!("{}", stats);
        (kept, stats)
    }
}

/// Pipeline statistics for one scan.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PipelineStats {
    /// Decoded records across all sources
    pub raw_records: usize,
    /// Elements skipped during decoding
    pub malformed: usize,
    pub duplicates: usize,
    pub below_quality_gate: usize,
    pub kept: usize,
}

impl std::fmt::Display for PipelineStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Pipeline: {} records ({} malformed skipped), {} duplicates, {} below quality gate, {} kept",
            self.raw_records, self.malformed, self.duplicates, self.below_quality_gate, self.kept
        )
    }
}
