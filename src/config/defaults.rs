//! System-wide default constants.
//!
//! Every `Default` impl in `scanner_config.rs` draws from here, so a run with
//! no config file behaves exactly as these values describe.

// ============================================================================
// Scanning
// ============================================================================

/// Announcements with shorter titles (in characters) are dropped as noise.
pub const MIN_ANNOUNCEMENT_LENGTH: usize = 30;

/// Topical keywords that produce "Related to {keyword}" key points.
pub const TOPICAL_KEYWORDS: &[&str] = &[
    "drilling",
    "resource",
    "reserve",
    "production",
    "exploration",
    "acquisition",
    "merger",
    "feasibility",
    "offtake",
    "partnership",
    "upgrade",
    "expansion",
    "mine",
    "operation",
    "project",
    "development",
];

// ============================================================================
// Company Registry
// ============================================================================

/// Supplemental company list merged over the built-in table when present.
pub const SUPPLEMENTAL_COMPANIES_PATH: &str = "mining_companies.json";

/// Sector shown in the company breakdown for codes missing from the registry.
pub const UNTRACKED_COMPANY_SECTOR: &str = "Mining";

/// Sector bucket used in the sector summary for codes missing from the registry.
pub const UNTRACKED_SECTOR_LABEL: &str = "Other";

// ============================================================================
// Sources
// ============================================================================

/// HTTP timeout for announcement feed requests (seconds).
pub const SOURCE_HTTP_TIMEOUT_SECS: u64 = 30;

/// Browser-like user agent; several announcement sites reject bare clients.
pub const SOURCE_USER_AGENT: &str = "Mozilla/5.0 (Windows NT 10.0; Win64; x64) \
     AppleWebKit/537.36 (KHTML, like Gecko) Chrome/91.0.4472.124 Safari/537.36";

// ============================================================================
// Report
// ============================================================================

pub const REPORT_TITLE: &str = "ASX Mining Daily Report";

/// Exchange name used in the "Monitoring N ... companies" footer.
pub const EXCHANGE_LABEL: &str = "ASX";

pub const REPORT_OUTPUT_DIR: &str = "reports";

/// Reports are written to `{dir}/{prefix}_{YYYYMMDD}.md`.
pub const REPORT_FILE_PREFIX: &str = "mining_report";

pub const NEXT_REPORT_NOTE: &str = "Tomorrow at 8:00 AM AEST";

/// Heading of the notice sent when a scan fails outright.
pub const ERROR_REPORT_TITLE: &str = "ASX Mining Scanner - Error Report";

/// Width of the `=` rule printed around the console copy of the report.
pub const CONSOLE_RULE_WIDTH: usize = 80;

// ============================================================================
// Delivery
// ============================================================================

/// Attempts per message before the webhook notifier gives up.
pub const DELIVERY_MAX_ATTEMPTS: u32 = 3;

/// Initial retry delay (doubles each attempt).
pub const DELIVERY_INITIAL_RETRY_DELAY_MS: u64 = 2_000;

/// Retry delay cap.
pub const DELIVERY_MAX_RETRY_DELAY_MS: u64 = 30_000;

/// HTTP timeout for delivery requests (seconds).
pub const DELIVERY_HTTP_TIMEOUT_SECS: u64 = 30;
