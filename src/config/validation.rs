//! Config validation: unknown-key detection with Levenshtein suggestions
//! and range checks.
//!
//! Two-pass parse approach: first deserialize raw TOML into `toml::Value`,
//! walk the key tree, compare against known field names, and emit warnings
//! with "did you mean?" suggestions. Then proceed with normal serde
//! deserialization. Warnings never break existing configs.

use std::collections::HashSet;

use super::defaults;

/// A non-fatal config warning (typo, suspicious value).
#[derive(Debug, Clone)]
pub struct ValidationWarning {
    pub field: String,
    pub message: String,
    pub suggestion: Option<String>,
}

impl std::fmt::Display for ValidationWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.message)?;
        if let Some(ref s) = self.suggestion {
            write!(f, " (did you mean '{s}'?)")?;
        }
        Ok(())
    }
}

// ============================================================================
// Known Config Keys
// ============================================================================

/// Returns the complete set of valid dotted key paths for ScannerConfig.
///
/// Maintained by hand to match the struct hierarchy in scanner_config.rs.
/// Any new field added to ScannerConfig must be added here too.
pub fn known_config_keys() -> HashSet<&'static str> {
    let keys: &[&str] = &[
        // [scanning]
        "scanning",
        "scanning.keywords",
        "scanning.min_announcement_length",
        // [companies]
        "companies",
        "companies.supplemental_path",
        // [sources]
        "sources",
        "sources.json_files",
        "sources.listing_files",
        "sources.feed_urls",
        "sources.timeout_secs",
        "sources.user_agent",
        // [report]
        "report",
        "report.title",
        "report.exchange_label",
        "report.output_dir",
        "report.file_prefix",
        "report.next_report_note",
        "report.echo_to_console",
        // [delivery]
        "delivery",
        "delivery.enabled",
        "delivery.sender",
        "delivery.recipient",
        "delivery.webhook_url",
        "delivery.max_attempts",
        "delivery.initial_retry_delay_ms",
        "delivery.timeout_secs",
    ];
    keys.iter().copied().collect()
}

// ============================================================================
// TOML Key Walking
// ============================================================================

/// Recursively walks a `toml::Value` tree and collects all dotted key paths.
///
/// For example, a table `{ a = { b = 1, c = 2 } }` yields:
/// `["a", "a.b", "a.c"]`
pub fn walk_toml_keys(value: &toml::Value, prefix: &str) -> Vec<String> {
    let mut keys = Vec::new();
    if let Some(table) = value.as_table() {
        for (k, v) in table {
            let path = if prefix.is_empty() {
                k.clone()
            } else {
                format!("{prefix}.{k}")
            };
            keys.push(path.clone());
            if v.is_table() {
                keys.extend(walk_toml_keys(v, &path));
            }
        }
    }
    keys
}

// ============================================================================
// Levenshtein Distance
// ============================================================================

/// Compute the Levenshtein edit distance between two strings.
fn levenshtein(a: &str, b: &str) -> usize {
    let a: Vec<char> = a.chars().collect();
    let b: Vec<char> = b.chars().collect();
    if a.is_empty() {
        return b.len();
    }
    if b.is_empty() {
        return a.len();
    }

    let mut prev: Vec<usize> = (0..=b.len()).collect();
    let mut curr = vec![0; b.len() + 1];

    for (i, ca) in a.iter().enumerate() {
        curr[0] = i + 1;
        for (j, cb) in b.iter().enumerate() {
            let cost = usize::from(ca != cb);
            curr[j + 1] = (prev[j + 1] + 1).min(curr[j] + 1).min(prev[j] + cost);
        }
        std::mem::swap(&mut prev, &mut curr);
    }

    prev[b.len()]
}

/// Suggest the closest known key for an unknown key, if within edit distance 3.
///
/// Ties resolve to the lexicographically smallest key so suggestions are stable.
pub fn suggest_correction(unknown: &str, known: &HashSet<&str>) -> Option<String> {
    let mut best: Option<(&str, usize)> = None;
    for &k in known {
        let dist = levenshtein(unknown, k);
        if dist > 3 {
            continue;
        }
        best = match best {
            Some((bk, bd)) if bd < dist || (bd == dist && bk < k) => Some((bk, bd)),
            _ => Some((k, dist)),
        };
    }
    best.map(|(k, _)| k.to_string())
}

// ============================================================================
// Unknown Key Validation (entry point)
// ============================================================================

/// Parse a raw TOML string and return warnings for any unknown config keys.
///
/// This does NOT fail on unknown keys; it only warns. Existing configs
/// always continue to work.
pub fn validate_unknown_keys(raw_toml: &str) -> Vec<ValidationWarning> {
    let value: toml::Value = match raw_toml.parse() {
        Ok(v) => v,
        Err(_) => return Vec::new(), // parse errors are handled by serde later
    };

    let known = known_config_keys();
    let found = walk_toml_keys(&value, "");
    let mut warnings = Vec::new();

    for key in &found {
        if !known.contains(key.as_str()) {
            let suggestion = suggest_correction(key, &known);
            let message = format!("Unknown config key '{key}'");
            warnings.push(ValidationWarning {
                field: key.clone(),
                message,
                suggestion,
            });
        }
    }

    warnings
}

// ============================================================================
// Range Validation
// ============================================================================

/// Validate value ranges on a parsed ScannerConfig.
///
/// Returns (errors, warnings). Errors are values that must prevent startup;
/// warnings are suspicious but not fatal.
pub fn validate_ranges(config: &super::ScannerConfig) -> (Vec<String>, Vec<ValidationWarning>) {
    let mut errors = Vec::new();
    let mut warnings = Vec::new();

    let s = &config.scanning;

    // Keyword lists drive key points; an empty list silently disables them
    if s.keywords.is_empty() {
        warnings.push(ValidationWarning {
            field: "scanning.keywords".to_string(),
            message: "scanning.keywords is empty; announcements will carry no key points"
                .to_string(),
            suggestion: None,
        });
    }

    // 0 disables the quality gate entirely; very large values drop everything
    if s.min_announcement_length == 0 || s.min_announcement_length > 200 {
        warnings.push(ValidationWarning {
            field: "scanning.min_announcement_length".to_string(),
            message: format!(
                "min_announcement_length = {} is outside typical range (1-200 characters)",
                s.min_announcement_length
            ),
            suggestion: None,
        });
    }

    let d = &config.delivery;
    if d.max_attempts > 10 {
        errors.push(format!(
            "delivery.max_attempts = {} exceeds the limit of 10",
            d.max_attempts
        ));
    }
    if d.initial_retry_delay_ms > defaults::DELIVERY_MAX_RETRY_DELAY_MS {
        warnings.push(ValidationWarning {
            field: "delivery.initial_retry_delay_ms".to_string(),
            message: format!(
                "initial_retry_delay_ms = {} is above the {} ms cap and will be clamped",
                d.initial_retry_delay_ms,
                defaults::DELIVERY_MAX_RETRY_DELAY_MS
            ),
            suggestion: None,
        });
    }

    if config.sources.timeout_secs > 300 {
        warnings.push(ValidationWarning {
            field: "sources.timeout_secs".to_string(),
            message: format!(
                "sources.timeout_secs = {} is outside typical range (1-300 s)",
                config.sources.timeout_secs
            ),
            suggestion: None,
        });
    }

    (errors, warnings)
}

// ============================================================================
// Tests
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::ScannerConfig;

    #[test]
    fn test_levenshtein_identical() {
        assert_eq!(levenshtein("hello", "hello"), 0);
    }

    #[test]
    fn test_levenshtein_one_edit() {
        assert_eq!(levenshtein("keywrods", "keywords"), 2);
        assert_eq!(levenshtein("recipent", "recipient"), 1);
    }

    #[test]
    fn test_levenshtein_empty() {
        assert_eq!(levenshtein("", "abc"), 3);
        assert_eq!(levenshtein("abc", ""), 3);
    }

    #[test]
    fn test_walk_toml_keys_nested() {
        let toml: toml::Value = r#"
            [delivery]
            recipient = "desk@example.com"
        "#
        .parse()
        .unwrap();
        let keys = walk_toml_keys(&toml, "");
        assert!(keys.contains(&"delivery".to_string()));
        assert!(keys.contains(&"delivery.recipient".to_string()));
    }

    #[test]
    fn test_typo_key_produces_warning_with_suggestion() {
        let toml_str = r#"
[scanning]
min_anouncement_length = 25
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert_eq!(warnings.len(), 1);
        assert!(warnings[0].field.contains("min_anouncement_length"));
        assert_eq!(
            warnings[0].suggestion.as_deref(),
            Some("scanning.min_announcement_length")
        );
    }

    #[test]
    fn test_unknown_section_produces_warning() {
        let toml_str = r#"
[smtp]
server = "smtp.gmail.com"
"#;
        let warnings = validate_unknown_keys(toml_str);
        assert_eq!(warnings.len(), 2);
        assert!(warnings.iter().any(|w| w.field == "smtp.server"));
    }

    #[test]
    fn test_suggest_correction_no_match_for_garbage() {
        let known = known_config_keys();
        assert!(suggest_correction("completely_unrelated_garbage_key_xyz", &known).is_none());
    }

    #[test]
    fn test_ranges_defaults_clean() {
        let (errors, warnings) = validate_ranges(&ScannerConfig::default());
        assert!(errors.is_empty(), "Defaults should produce no errors: {errors:?}");
        assert!(warnings.is_empty(), "Defaults should produce no warnings: {warnings:?}");
    }

    #[test]
    fn test_zero_min_length_warns() {
        let mut config = ScannerConfig::default();
        config.scanning.min_announcement_length = 0;
        let (errors, warnings) = validate_ranges(&config);
        assert!(errors.is_empty());
        assert!(warnings
            .iter()
            .any(|w| w.field == "scanning.min_announcement_length"));
    }

    #[test]
    fn test_excessive_attempts_is_error() {
        let mut config = ScannerConfig::default();
        config.delivery.max_attempts = 50;
        let (errors, _) = validate_ranges(&config);
        assert!(errors.iter().any(|e| e.contains("max_attempts")));
    }
}
