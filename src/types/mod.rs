//! Shared data structures for the announcement scanner
//!
//! This module defines the types that flow through the daily scan:
//! - Reference data: Company (tracked ticker universe)
//! - Ingestion: RawRecord (best-effort scraped record)
//! - Classification: Sentiment, Announcement (canonical entity)
//! - Reporting: Report and its breakdown tallies

mod announcement;
mod company;
mod report;

pub use announcement::*;
pub use company::*;
pub use report::*;
