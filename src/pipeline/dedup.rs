//! Record deduplication
//!
//! Identity is the exact `(company_code, title)` pair: case-sensitive, no
//! whitespace trimming, no fuzzy matching. Empty fields still form part of the
//! key, so two records missing both collapse to one.

use crate::types::RawRecord;
use std::collections::HashSet;

/// Drop repeated records, keeping the first occurrence of each identity.
///
/// Relative order of the surviving records is preserved.
pub fn dedupe(records: Vec<RawRecord>) -> Vec<RawRecord> {
    let mut seen: HashSet<(String, String)> = HashSet::with_capacity(records.len());
    records
        .into_iter()
        .filter(|r| {
            let (code, title) = r.identity();
            seen.insert((code.to_owned(), title.to_owned()))
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn record(code: &str, title: &str, time: &str, url: &str) -> RawRecord {
        RawRecord {
            company_code: code.to_string(),
            title: title.to_string(),
            time: time.to_string(),
            url: url.to_string(),
            ..Default::default()
        }
    }

    #[test]
    fn test_first_occurrence_survives() {
        let records = vec![
            record("BHP", "Quarterly Activities Report", "9:30am", "https://a.example/1"),
            record("BHP", "Quarterly Activities Report", "10:15am", "https://b.example/2"),
        ];
        let unique = dedupe(records);
        assert_eq!(unique.len(), 1);
        assert_eq!(unique[0].time, "9:30am");
        assert_eq!(unique[0].url, "https://a.example/1");
    }

    #[test]
    fn test_order_preserved() {
        let records = vec![
            record("RIO", "B", "", ""),
            record("BHP", "A", "", ""),
            record("RIO", "B", "", ""),
            record("FMG", "C", "", ""),
        ];
        let codes: Vec<String> = dedupe(records).into_iter().map(|r| r.company_code).collect();
        assert_eq!(codes, vec!["RIO", "BHP", "FMG"]);
    }

    #[test]
    fn test_key_is_case_sensitive() {
        let records = vec![
            record("BHP", "Drilling Update", "", ""),
            record("BHP", "drilling update", "", ""),
            record("bhp", "Drilling Update", "", ""),
        ];
        assert_eq!(dedupe(records).len(), 3);
    }

    #[test]
    fn test_whitespace_not_normalized() {
        let records = vec![
            record("BHP", "Drilling Update", "", ""),
            record("BHP", "Drilling Update ", "", ""),
        ];
        assert_eq!(dedupe(records).len(), 2);
    }

    #[test]
    fn test_same_title_different_company_kept() {
        let records = vec![
            record("BHP", "Change of Director's Interest Notice", "", ""),
            record("RIO", "Change of Director's Interest Notice", "", ""),
        ];
        assert_eq!(dedupe(records).len(), 2);
    }

    #[test]
    fn test_empty_identity_collapses() {
        let records = vec![
            record("", "", "9:00am", "https://a.example"),
            record("", "", "9:05am", "https://b.example"),
            record("", "Untitled", "", ""),
        ];
        let unique = dedupe(records);
        assert_eq!(unique.len(), 2);
        assert_eq!(unique[0].time, "9:00am");
    }

    #[test]
    fn test_idempotent() {
        let records = vec![
            record("BHP", "A", "1", ""),
            record("BHP", "A", "2", ""),
            record("RIO", "A", "3", ""),
            record("", "", "4", ""),
            record("", "", "5", ""),
            record("RIO", "A", "6", ""),
        ];
        let once = dedupe(records);
        let twice = dedupe(once.clone());
        assert_eq!(once, twice);
    }

    #[test]
    fn test_empty_input() {
        assert!(dedupe(Vec::new()).is_empty());
    }
}
