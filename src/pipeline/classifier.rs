//! Announcement Classifier
//!
//! Turns a [`RawRecord`] into a canonical [`Announcement`]:
//!
//! - **Sentiment** from substring counts against fixed positive and negative
//!   word lists. Each word counts at most once per title. The larger count
//!   wins; equal counts (including zero/zero) are neutral.
//! - **Key points** as `"Related to {keyword}"` for every configured topical
//!   keyword found in the title, in configured order.
//! - **Content** falls back to the title when empty.
//!
//! Classification is a pure function of the record and the keyword lists.
//! The title-length quality gate is exposed separately via
//! [`Classifier::passes_quality_gate`] and applied by the caller.

use crate::config::ScanningConfig;
use crate::types::{Announcement, RawRecord, Sentiment};

/// Words that push a title towards `positive`.
pub const POSITIVE_KEYWORDS: &[&str] = &[
    "increase",
    "growth",
    "strong",
    "successful",
    "positive",
    "upgrade",
    "expansion",
    "discovery",
    "high-grade",
    "significant",
    "excellent",
    "breakthrough",
    "achievement",
    "record",
    "boost",
    "progress",
];

/// Words that push a title towards `negative`.
pub const NEGATIVE_KEYWORDS: &[&str] = &[
    "decrease",
    "decline",
    "loss",
    "suspension",
    "delay",
    "downgrade",
    "closure",
    "reduction",
    "cut",
    "lower",
    "disappointing",
    "concern",
    "issue",
    "problem",
    "halt",
    "stop",
];

/// Keyword-based announcement classifier.
#[derive(Debug, Clone)]
pub struct Classifier {
    /// Configured spelling, used in the key-point text
    keywords: Vec<String>,
    /// Lower-cased form used for matching, index-aligned with `keywords`
    keywords_lower: Vec<String>,
    min_title_len: usize,
}

impl Classifier {
    pub fn new(config: &ScanningConfig) -> Self {
        Self::with_keywords(config.keywords.clone(), config.min_announcement_length)
    }

    pub fn with_keywords(keywords: Vec<String>, min_title_len: usize) -> Self {
        let keywords_lower = keywords.iter().map(|k| k.to_lowercase()).collect();
        Self {
            keywords,
            keywords_lower,
            min_title_len,
        }
    }

    /// Classify one record. Never fails; empty fields stay empty.
    pub fn classify(&self, record: &RawRecord) -> Announcement {
        let title_lower = record.title.to_lowercase();

        let content = if record.content.is_empty() {
            record.title.clone()
        } else {
            record.content.clone()
        };

        Announcement {
            company_code: record.company_code.clone(),
            company_name: record.company_name.clone(),
            title: record.title.clone(),
            content,
            date: record.date.clone(),
            time: record.time.clone(),
            url: record.url.clone(),
            sentiment: sentiment_of(&title_lower),
            key_points: self.key_points(&title_lower),
        }
    }

    /// Title length (in characters) meets the configured minimum. Inclusive.
    pub fn passes_quality_gate(&self, announcement: &Announcement) -> bool {
        announcement.title_len() >= self.min_title_len
    }

    pub fn min_title_len(&self) -> usize {
        self.min_title_len
    }

    fn key_points(&self, title_lower: &str) -> Vec<String> {
        self.keywords
            .iter()
            .zip(&self.keywords_lower)
            .filter(|(_, lower)| title_lower.contains(lower.as_str()))
            .map(|(keyword, _)| format!("Related to {keyword}"))
            .collect()
    }
}

/// Sentiment of an already lower-cased title.
pub fn sentiment_of(title_lower: &str) -> Sentiment {
    let positive = count_present(title_lower, POSITIVE_KEYWORDS);
    let negative = count_present(title_lower, NEGATIVE_KEYWORDS);

    match positive.cmp(&negative) {
        std::cmp::Ordering::Greater => Sentiment::Positive,
        std::cmp::Ordering::Less => Sentiment::Negative,
        std::cmp::Ordering::Equal => Sentiment::Neutral,
    }
}

fn count_present(haystack: &str, words: &[&str]) -> usize {
    words.iter().filter(|w| haystack.contains(*w)).count()
}
