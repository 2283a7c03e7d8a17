//! Scan Pipeline Module
//!
//! ```text
//! STAGE 1: Collection    (sources fetched concurrently, see acquisition)
//! STAGE 2: Deduplication (exact company code + title)
//! STAGE 3: Classification (sentiment, key points)
//! STAGE 4: Quality gate  (minimum title length)
//! STAGE 5: Report        (see report)
//! STAGE 6: Dispatch      (see dispatch)
//! ```
//!
//! Stages 2-5 are synchronous and pure over the collected batch.

pub mod classifier;
mod coordinator;
pub mod dedup;
mod runner;
pub mod source;

pub use classifier::Classifier;
pub use coordinator::{PipelineStats, ScanPipeline};
pub use dedup::dedupe;
pub use runner::{DailyScan, ScanOutcome};
pub use source::{AnnouncementSource, SourceBatch, SourceError};
