//! Announcement types: RawRecord (ingestion) and Announcement (classified)

use serde::{Deserialize, Serialize};
use std::fmt;

// ============================================================================
// Ingestion
// ============================================================================

/// A scraped announcement record before classification.
///
/// Every field is best-effort and may be empty. Missing keys deserialize to
/// empty strings; a key holding a non-string value is a malformed record and
/// fails to decode.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct RawRecord {
    #[serde(default, alias = "companyCode")]
    pub company_code: String,
    #[serde(default, alias = "companyName")]
    pub company_name: String,
    #[serde(default)]
    pub title: String,
    /// Body text; the classifier substitutes the title when empty
    #[serde(default)]
    pub content: String,
    #[serde(default)]
    pub date: String,
    #[serde(default)]
    pub time: String,
    #[serde(default)]
    pub url: String,
}

impl RawRecord {
    /// Identity used for deduplication: exact `(company_code, title)`.
    pub fn identity(&self) -> (&str, &str) {
        (&self.company_code, &self.title)
    }
}

// ============================================================================
// Classification
// ============================================================================

/// Keyword-derived tone of an announcement title.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Sentiment {
    Positive,
    Neutral,
    Negative,
}

impl Sentiment {
    /// Report section order.
    pub const ORDERED: [Self; 3] = [Self::Positive, Self::Neutral, Self::Negative];

    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Positive => "positive",
            Self::Neutral => "neutral",
            Self::Negative => "negative",
        }
    }
}

impl fmt::Display for Sentiment {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Canonical classified disclosure record.
///
/// `sentiment` and `key_points` are derived from `title` and the configured
/// keyword lists only, so reclassifying the same record always reproduces them.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Announcement {
    pub company_code: String,
    pub company_name: String,
    pub title: String,
    pub content: String,
    pub date: String,
    pub time: String,
    pub url: String,
    pub sentiment: Sentiment,
    /// "Related to {keyword}" tags in configured keyword order
    pub key_points: Vec<String>,
}

impl Announcement {
    /// Title length in characters, as used by the quality gate.
    pub fn title_len(&self) -> usize {
        self.title.chars().count()
    }
}
