//! One-line human-readable announcement summaries
//!
//! ```text
//! • **Liontown Resources Limited** announced for **Kathleen Valley** with 3Mt - Kathleen Valley Project 3Mt upgrade (LTR)
//! ```
//!
//! Every clause after the action phrase is optional; a title without a match
//! for a clause simply omits it.

use crate::registry::CompanyRegistry;
use crate::types::Announcement;
use regex::Regex;
use std::sync::LazyLock;

// ============================================================================
// Regex Patterns
// ============================================================================

/// Capitalized phrase following `at`, `from` or `in`.
static RE_PROJECT: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b(?:at|from|in)\s+([A-Z][a-zA-Z]*(?:\s+[A-Z][a-zA-Z]*)*)").unwrap()
});

/// Capitalized phrase preceding an asset noun.
static RE_LOCATION: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Z][a-zA-Z]+(?:\s+[A-Z][a-zA-Z]+)*)\s+(?:Project|Mine|Deposit|Operation)")
        .unwrap()
});

/// Quantity written flush against its unit, e.g. `2.5Mt`, `40%`, `120million`.
/// A spaced "Mt" is usually Mount, not megatonnes.
static RE_METRIC: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\d+(?:\.\d+)?(?:Mlb|klb|Mt|kt|oz|%|million|billion)").unwrap()
});

/// Action phrases by title substring, first match wins.
const ACTIONS: &[(&str, &str)] = &[
    ("production", "reported production"),
    ("drilling", "announced drilling"),
    ("resource", "updated resource"),
    ("approval", "received approval"),
    ("acquisition", "announced acquisition"),
];

const DEFAULT_ACTION: &str = "announced";

/// Render the report line for one announcement.
pub fn summarize(announcement: &Announcement, registry: &CompanyRegistry) -> String {
    let title = announcement.title.as_str();
    let mut parts = vec![
        "•".to_string(),
        format!("**{}**", display_name(announcement, registry)),
        action_phrase(title).to_string(),
    ];

    if let Some(project) = project_name(title) {
        parts.push(format!("at **{project}**"));
    } else if let Some(location) = location_name(title) {
        parts.push(format!("for **{location}**"));
    }

    if let Some(metric) = first_metric(title) {
        parts.push(format!("with {metric}"));
    }

    parts.push(format!("- {title}"));
    parts.push(format!("({})", announcement.company_code));
    parts.join(" ")
}

/// Registry name, then the record's own name, then the bare code.
fn display_name<'a>(announcement: &'a Announcement, registry: &'a CompanyRegistry) -> &'a str {
    registry
        .lookup(&announcement.company_code)
        .map(|c| c.name.as_str())
        .filter(|n| !n.is_empty())
        .or_else(|| Some(announcement.company_name.as_str()).filter(|n| !n.is_empty()))
        .unwrap_or(&announcement.company_code)
}

pub fn action_phrase(title: &str) -> &'static str {
    let lower = title.to_lowercase();
    ACTIONS
        .iter()
        .find(|(needle, _)| lower.contains(needle))
        .map_or(DEFAULT_ACTION, |(_, phrase)| *phrase)
}

pub fn project_name(title: &str) -> Option<&str> {
    RE_PROJECT
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

pub fn location_name(title: &str) -> Option<&str> {
    RE_LOCATION
        .captures(title)
        .and_then(|caps| caps.get(1))
        .map(|m| m.as_str().trim())
}

pub fn first_metric(title: &str) -> Option<&str> {
    RE_METRIC.find(title).map(|m| m.as_str())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::Sentiment;

    fn ann(code: &str, name: &str, title: &str) -> Announcement {
        Announcement {
            company_code: code.to_string(),
            company_name: name.to_string(),
            title: title.to_string(),
            content: title.to_string(),
            date: String::new(),
            time: String::new(),
            url: String::new(),
            sentiment: Sentiment::Neutral,
            key_points: Vec::new(),
        }
    }

    #[test]
    fn test_action_priority() {
        assert_eq!(action_phrase("Drilling lifts production guidance"), "reported production");
        assert_eq!(action_phrase("Resource drilling results"), "announced drilling");
        assert_eq!(action_phrase("Mineral Resource Estimate"), "updated resource");
        assert_eq!(action_phrase("Environmental approval granted"), "received approval");
        assert_eq!(action_phrase("Completion of acquisition"), "announced acquisition");
        assert_eq!(action_phrase("Appendix 3Y"), "announced");
    }

    #[test]
    fn test_project_phrase() {
        assert_eq!(project_name("High-grade hits at Jundee"), Some("Jundee"));
        assert_eq!(project_name("Update from Mount Holland, WA"), Some("Mount Holland"));
        assert_eq!(project_name("Results at the mine"), None);
    }

    #[test]
    fn test_location_phrase() {
        assert_eq!(location_name("Kathleen Valley Project update"), Some("Kathleen Valley"));
        assert_eq!(location_name("Tropicana Operation quarterly"), Some("Tropicana"));
        assert_eq!(location_name("quarterly update"), None);
    }

    #[test]
    fn test_first_metric() {
        assert_eq!(first_metric("Resource grows to 2.5Mt at 1.2% Li2O"), Some("2.5Mt"));
        assert_eq!(first_metric("Raises 120million in placement"), Some("120million"));
        assert_eq!(first_metric("Raises 120 million in placement"), None);
        assert_eq!(first_metric("Board changes"), None);
    }

    #[test]
    fn test_summary_line_full() {
        let registry = CompanyRegistry::builtin();
        let line = summarize(
            &ann("NST", "", "Record gold production of 450koz at Jundee"),
            &registry,
        );
        assert_eq!(
            line,
            "• **Northern Star Resources Ltd** reported production at **Jundee** \
             - Record gold production of 450koz at Jundee (NST)"
        );
    }

    #[test]
    fn test_summary_uses_location_when_no_project() {
        let registry = CompanyRegistry::builtin();
        let line = summarize(&ann("LTR", "", "Kathleen Valley Project 3Mt upgrade"), &registry);
        assert_eq!(
            line,
            "• **Liontown Resources Limited** announced for **Kathleen Valley** with 3Mt \
             - Kathleen Valley Project 3Mt upgrade (LTR)"
        );
    }

    #[test]
    fn test_mount_named_asset_is_not_a_metric() {
        let title = "Lynas FY2024 Mt Weld expansion progress update";
        assert_eq!(first_metric(title), None);

        let line = summarize(&ann("LYC", "", title), &CompanyRegistry::builtin());
        assert_eq!(
            line,
            "• **Lynas Rare Earths Ltd** announced - Lynas FY2024 Mt Weld expansion progress update (LYC)"
        );
    }

    #[test]
    fn test_untracked_name_fallbacks() {
        let registry = CompanyRegistry::builtin();
        let line = summarize(&ann("XYZ", "Xyz Minerals", "Board changes"), &registry);
        assert_eq!(line, "• **Xyz Minerals** announced - Board changes (XYZ)");

        let line = summarize(&ann("XYZ", "", "Board changes"), &registry);
        assert!(line.starts_with("• **XYZ** announced"));
    }
}
