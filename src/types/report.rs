//! Daily report types

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use super::{Announcement, Sentiment};

/// Announcements partitioned by sentiment, each group in input order.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SentimentGroups {
    pub positive: Vec<Announcement>,
    pub neutral: Vec<Announcement>,
    pub negative: Vec<Announcement>,
}

impl SentimentGroups {
    pub fn get(&self, sentiment: Sentiment) -> &[Announcement] {
        match sentiment {
            Sentiment::Positive => &self.positive,
            Sentiment::Neutral => &self.neutral,
            Sentiment::Negative => &self.negative,
        }
    }

    pub fn total(&self) -> usize {
        self.positive.len() + self.neutral.len() + self.negative.len()
    }
}

/// One line of the company breakdown.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CompanyTally {
    pub code: String,
    pub name: String,
    pub sector: String,
    pub count: usize,
}

/// One line of the sector summary.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SectorTally {
    pub sector: String,
    pub count: usize,
}

/// Rendered daily digest plus the groupings it was built from.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Report {
    pub text: String,
    pub generated_at: DateTime<Utc>,
    /// Number of companies in the monitored universe
    pub company_count: usize,
    pub by_sentiment: SentimentGroups,
    /// Sorted by company code ascending
    pub companies: Vec<CompanyTally>,
    /// Sorted by count descending, ties in discovery order
    pub sectors: Vec<SectorTally>,
}

impl Report {
    pub fn is_empty(&self) -> bool {
        self.by_sentiment.total() == 0
    }

    pub fn announcement_count(&self) -> usize {
        self.by_sentiment.total()
    }
}
