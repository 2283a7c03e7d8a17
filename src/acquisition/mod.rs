//! Announcement acquisition module
//!
//! Handles ingestion from exchange announcement tables and HTTP feeds, and
//! the concurrent collection of every configured source.

mod collector;
pub mod feed;
pub mod listing;

pub use collector::{build_sources, collect_all};
pub use feed::HttpFeedSource;
pub use listing::ListingFileSource;
