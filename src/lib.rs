//! ASX Mining Scanner: daily digest of mining company announcements
//!
//! Collects raw announcement records from configured sources, removes
//! duplicates, classifies each record's sentiment and topical key points,
//! filters low-quality entries and renders a markdown report that is saved
//! to disk and delivered through a mail relay.
//!
//! ## Architecture
//!
//! - **Registry**: tracked company universe (built-in table + supplemental file)
//! - **Acquisition**: listing tables, HTTP feeds, concurrent collection
//! - **Pipeline**: deduplication, classification, quality gate, scan runner
//! - **Report**: sentiment sections, company and sector breakdowns
//! - **Dispatch**: dated persistence, console echo, webhook delivery

pub mod acquisition;
pub mod config;
pub mod dispatch;
pub mod pipeline;
pub mod registry;
pub mod report;
pub mod types;

// Re-export configuration
pub use config::ScannerConfig;

// Re-export commonly used types
pub use types::{Announcement, Company, RawRecord, Report, Sentiment};

// Re-export pipeline components
pub use pipeline::{Classifier, DailyScan, PipelineStats, ScanOutcome, ScanPipeline};

pub use registry::CompanyRegistry;
pub use report::ReportBuilder;
pub use dispatch::Dispatcher;
