//! Daily report generation
//!
//! Renders classified announcements into the markdown digest that is
//! persisted and delivered:
//!
//! 1. Header and summary count
//! 2. Key announcements, one section per non-empty sentiment group in the
//!    order positive, neutral, negative
//! 3. Company breakdown (by code, ascending)
//! 4. Sector summary (by count, descending; ties keep discovery order)
//! 5. Footer with the generation time and monitored universe size
//!
//! With no announcements, sections 2-4 are replaced by a short
//! "nothing found" note.

pub mod summary;

use crate::config::{defaults, ReportConfig};
use crate::registry::CompanyRegistry;
use crate::types::{
    Announcement, CompanyTally, Report, SectorTally, Sentiment, SentimentGroups,
};
use chrono::{DateTime, Utc};
use std::collections::BTreeMap;

pub use summary::summarize;

/// Section heading for each sentiment group.
fn group_heading(sentiment: Sentiment) -> &'static str {
    match sentiment {
        Sentiment::Positive => "### 📈 Positive Developments",
        Sentiment::Neutral => "### 📊 General Updates",
        Sentiment::Negative => "### 📉 Challenges/Concerns",
    }
}

/// Builds [`Report`]s using the configured title, exchange label and footer.
#[derive(Debug, Clone)]
pub struct ReportBuilder {
    title: String,
    exchange_label: String,
    next_report_note: Option<String>,
}

impl ReportBuilder {
    pub fn new(config: &ReportConfig) -> Self {
        Self {
            title: config.title.clone(),
            exchange_label: config.exchange_label.clone(),
            next_report_note: config.next_report_note.clone(),
        }
    }

    /// Render the daily digest.
    ///
    /// Total over any input: an empty slice yields the "nothing found" report
    /// and untracked codes fall back to the record's own name and generic
    /// sector labels.
    pub fn build(
        &self,
        announcements: &[Announcement],
        registry: &CompanyRegistry,
        company_count: usize,
        generated_at: DateTime<Utc>,
    ) -> Report {
        let by_sentiment = partition(announcements);
        let companies = company_breakdown(announcements, registry);
        let sectors = sector_breakdown(announcements, registry);

        let mut sections = vec![format!(
            "# {} - {}",
            self.title,
            generated_at.format("%B %d, %Y")
        )];

        if announcements.is_empty() {
            sections.push(
                "## Summary\n\
                 No significant mining announcements found for today."
                    .to_string(),
            );
            sections.push(format!(
                "The scanner checked {company_count} mining companies but found no new \
                 announcements meeting the criteria."
            ));
        } else {
            sections.push(format!(
                "## Summary\n\
                 Found {} significant announcements from mining companies today.",
                announcements.len()
            ));
            sections.push("## Key Announcements".to_string());

            for sentiment in Sentiment::ORDERED {
                let group = by_sentiment.get(sentiment);
                if group.is_empty() {
                    continue;
                }
                let mut lines = vec![group_heading(sentiment).to_string()];
                lines.extend(group.iter().map(|a| summarize(a, registry)));
                sections.push(lines.join("\n"));
            }

            let mut lines = vec!["## Company Breakdown".to_string()];
            lines.extend(companies.iter().map(|c| {
                format!(
                    "**{} ({})** - {}: {} announcement(s)",
                    c.name, c.code, c.sector, c.count
                )
            }));
            sections.push(lines.join("\n"));

            let mut lines = vec!["## Sector Summary".to_string()];
            lines.extend(
                sectors
                    .iter()
                    .map(|s| format!("- {}: {} announcement(s)", s.sector, s.count)),
            );
            sections.push(lines.join("\n"));
        }

        sections.push(self.footer(company_count, generated_at));

        Report {
            text: sections.join("\n\n") + "\n",
            generated_at,
            company_count,
            by_sentiment,
            companies,
            sectors,
        }
    }

    fn footer(&self, company_count: usize, generated_at: DateTime<Utc>) -> String {
        let mut lines = vec![
            "---".to_string(),
            format!(
                "*Report generated at {} UTC*",
                generated_at.format("%Y-%m-%d %H:%M:%S")
            ),
            format!(
                "*Monitoring {} {} mining companies*",
                company_count, self.exchange_label
            ),
        ];
        if let Some(ref note) = self.next_report_note {
            lines.push(format!("*Next report: {note}*"));
        }
        lines.join("\n")
    }
}

/// Notice sent in place of the digest when a scan fails.
pub fn render_error_report(error: &str, at: DateTime<Utc>) -> String {
    format!(
        "# {}\n\n\
         An error occurred during today's scan: {}\n\n\
         Please check the scanner logs for more details.\n\n\
         Time: {} UTC\n",
        defaults::ERROR_REPORT_TITLE,
        error,
        at.format("%Y-%m-%d %H:%M:%S")
    )
}

// ============================================================================
// Grouping
// ============================================================================

/// Split by sentiment, keeping input order inside each group.
pub fn partition(announcements: &[Announcement]) -> SentimentGroups {
    let mut groups = SentimentGroups::default();
    for a in announcements {
        let bucket = match a.sentiment {
            Sentiment::Positive => &mut groups.positive,
            Sentiment::Neutral => &mut groups.neutral,
            Sentiment::Negative => &mut groups.negative,
        };
        bucket.push(a.clone());
    }
    groups
}

/// Per-company counts, ascending by code.
pub fn company_breakdown(
    announcements: &[Announcement],
    registry: &CompanyRegistry,
) -> Vec<CompanyTally> {
    // code -> (first announcement for the code, count)
    let mut by_code: BTreeMap<&str, (&Announcement, usize)> = BTreeMap::new();
    for a in announcements {
        by_code
            .entry(a.company_code.as_str())
            .and_modify(|(_, n)| *n += 1)
            .or_insert((a, 1));
    }

    by_code
        .into_iter()
        .map(|(code, (first, count))| {
            let (name, sector) = match registry.lookup(code) {
                Some(c) => (c.name.clone(), c.sector.clone()),
                None => {
                    let name = if first.company_name.is_empty() {
                        code.to_string()
                    } else {
                        first.company_name.clone()
                    };
                    (name, defaults::UNTRACKED_COMPANY_SECTOR.to_string())
                }
            };
            CompanyTally {
                code: code.to_string(),
                name,
                sector,
                count,
            }
        })
        .collect()
}

/// Per-sector counts, descending by count; equal counts keep first-seen order.
pub fn sector_breakdown(
    announcements: &[Announcement],
    registry: &CompanyRegistry,
) -> Vec<SectorTally> {
    let mut tallies: Vec<SectorTally> = Vec::new();
    for a in announcements {
        let sector = registry
            .lookup(&a.company_code)
            .map_or(defaults::UNTRACKED_SECTOR_LABEL, |c| c.sector.as_str());
        match tallies.iter_mut().find(|t| t.sector == sector) {
            Some(t) => t.count += 1,
            None => tallies.push(SectorTally {
                sector: sector.to_string(),
                count: 1,
            }),
        }
    }
    // stable
    tallies.sort_by(|a, b| b.count.cmp(&a.count));
    tallies
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Company;
    use chrono::TimeZone;

    fn at() -> DateTime<Utc> {
        Utc.with_ymd_and_hms(2024, 5, 14, 22, 5, 9).unwrap()
    }

    fn ann(code: &str, title: &str, sentiment: Sentiment) -> Announcement {
        Announcement {
            company_code: code.to_string(),
            company_name: String::new(),
            title: title.to_string(),
            content: title.to_string(),
            date: "2024-05-14".to_string(),
            time: String::new(),
            url: String::new(),
            sentiment,
            key_points: Vec::new(),
        }
    }

    fn builder() -> ReportBuilder {
        ReportBuilder::new(&ReportConfig::default())
    }

    #[test]
    fn test_empty_report() {
        let registry = CompanyRegistry::builtin();
        let report = builder().build(&[], &registry, registry.len(), at());

        assert!(report.is_empty());
        assert!(report.text.starts_with("# ASX Mining Daily Report - May 14, 2024"));
        assert!(report
            .text
            .contains("No significant mining announcements found for today."));
        assert!(report.text.contains("The scanner checked 53 mining companies"));
        assert!(report.text.contains("*Report generated at 2024-05-14 22:05:09 UTC*"));
        assert!(!report.text.contains("Positive Developments"));
        assert!(!report.text.contains("General Updates"));
        assert!(!report.text.contains("Challenges/Concerns"));
        assert!(!report.text.contains("## Company Breakdown"));
    }

    #[test]
    fn test_sections_in_fixed_order_and_only_when_non_empty() {
        let registry = CompanyRegistry::builtin();
        let announcements = vec![
            ann("FMG", "Iron Bridge commissioning delay and cost concern", Sentiment::Negative),
            ann("NST", "Record gold production at Jundee operation", Sentiment::Positive),
        ];
        let report = builder().build(&announcements, &registry, registry.len(), at());
        let text = &report.text;

        let pos = text.find("### 📈 Positive Developments").unwrap();
        let neg = text.find("### 📉 Challenges/Concerns").unwrap();
        assert!(pos < neg);
        assert!(!text.contains("General Updates"));
        assert!(text.contains("Found 2 significant announcements from mining companies today."));
        assert!(text.contains("*Monitoring 53 ASX mining companies*"));
        assert!(text.contains("*Next report: Tomorrow at 8:00 AM AEST*"));
    }

    #[test]
    fn test_partition_preserves_relative_order() {
        let announcements = vec![
            ann("A1", "first neutral", Sentiment::Neutral),
            ann("A2", "first positive", Sentiment::Positive),
            ann("A3", "second neutral", Sentiment::Neutral),
            ann("A4", "second positive", Sentiment::Positive),
        ];
        let groups = partition(&announcements);
        fn codes(group: &[Announcement]) -> Vec<String> {
            group.iter().map(|a| a.company_code.clone()).collect()
        }
        assert_eq!(codes(&groups.positive), vec!["A2", "A4"]);
        assert_eq!(codes(&groups.neutral), vec!["A1", "A3"]);
        assert!(groups.negative.is_empty());
    }

    #[test]
    fn test_company_breakdown_sorted_by_code() {
        let registry = CompanyRegistry::builtin();
        let announcements = vec![
            ann("RIO", "Pilbara iron ore shipments update", Sentiment::Neutral),
            ann("BHP", "Olympic Dam copper production report", Sentiment::Neutral),
            ann("RIO", "Oyu Tolgoi underground progress", Sentiment::Positive),
        ];
        let report = builder().build(&announcements, &registry, registry.len(), at());

        assert_eq!(report.companies[0].code, "BHP");
        assert_eq!(report.companies[1].code, "RIO");
        assert_eq!(report.companies[1].count, 2);

        let bhp = report
            .text
            .find("**BHP Group Limited (BHP)** - Diversified Metals: 1 announcement(s)")
            .unwrap();
        let rio = report
            .text
            .find("**Rio Tinto Limited (RIO)** - Diversified Metals: 2 announcement(s)")
            .unwrap();
        assert!(bhp < rio);
    }

    #[test]
    fn test_sector_summary_by_descending_count() {
        let registry = CompanyRegistry::from_companies(vec![
            Company::new("LTR", "Liontown Resources Limited", "Lithium"),
            Company::new("NST", "Northern Star Resources Ltd", "Gold"),
            Company::new("EVN", "Evolution Mining Limited", "Gold"),
        ]);
        let announcements = vec![
            ann("LTR", "Kathleen Valley first spodumene concentrate", Sentiment::Positive),
            ann("NST", "Jundee quarterly production summary", Sentiment::Neutral),
            ann("EVN", "Cowal open pit continuation approved", Sentiment::Neutral),
        ];
        let sectors = sector_breakdown(&announcements, &registry);
        assert_eq!(
            sectors,
            vec![
                SectorTally { sector: "Gold".to_string(), count: 2 },
                SectorTally { sector: "Lithium".to_string(), count: 1 },
            ]
        );

        let report = builder().build(&announcements, &registry, registry.len(), at());
        let gold = report.text.find("- Gold: 2 announcement(s)").unwrap();
        let lithium = report.text.find("- Lithium: 1 announcement(s)").unwrap();
        assert!(gold < lithium);
    }

    #[test]
    fn test_sector_ties_keep_discovery_order() {
        let registry = CompanyRegistry::builtin();
        let announcements = vec![
            ann("BOE", "Honeymoon restart update", Sentiment::Neutral),
            ann("WHC", "Coal sales quarterly update", Sentiment::Neutral),
            ann("PLS", "Pilgangoora expansion update", Sentiment::Neutral),
        ];
        let sectors: Vec<String> = sector_breakdown(&announcements, &registry)
            .into_iter()
            .map(|s| s.sector)
            .collect();
        assert_eq!(sectors, vec!["Uranium", "Coal", "Lithium"]);
    }

    #[test]
    fn test_untracked_company_fallbacks() {
        let registry = CompanyRegistry::builtin();
        let mut unknown = ann("ZZZ", "Zeta Minerals exploration program launched", Sentiment::Neutral);
        unknown.company_name = "Zeta Minerals Ltd".to_string();

        let companies = company_breakdown(std::slice::from_ref(&unknown), &registry);
        assert_eq!(companies[0].name, "Zeta Minerals Ltd");
        assert_eq!(companies[0].sector, "Mining");

        let sectors = sector_breakdown(std::slice::from_ref(&unknown), &registry);
        assert_eq!(sectors[0].sector, "Other");
    }

    #[test]
    fn test_next_report_note_optional() {
        let config = ReportConfig {
            next_report_note: None,
            ..ReportConfig::default()
        };
        let registry = CompanyRegistry::builtin();
        let report = ReportBuilder::new(&config).build(&[], &registry, 53, at());
        assert!(!report.text.contains("Next report"));
    }

    #[test]
    fn test_error_report() {
        let text = render_error_report("disk full", at());
        assert!(text.starts_with("# ASX Mining Scanner - Error Report"));
        assert!(text.contains("An error occurred during today's scan: disk full"));
        assert!(text.contains("Time: 2024-05-14 22:05:09 UTC"));
    }
}
