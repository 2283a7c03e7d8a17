//! Scanner Configuration - every tunable of the daily scan as TOML values
//!
//! Each section implements `Default` with the values in `defaults.rs`, so a
//! missing file, a missing section, or a missing key all fall back to the
//! built-in behaviour.

use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::{Path, PathBuf};
use tracing::{info, warn};

use super::defaults;

/// Environment variable holding an explicit config file path.
pub const CONFIG_PATH_ENV: &str = "ASX_SCANNER_CONFIG";

/// Config file looked up in the working directory.
pub const LOCAL_CONFIG_FILE: &str = "scanner_config.toml";

// ============================================================================
// Top-Level Config
// ============================================================================

/// Root configuration for a scanner deployment.
///
/// Built once in `main` and handed by reference to each component.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ScannerConfig {
    /// Classification keywords and the quality gate
    #[serde(default)]
    pub scanning: ScanningConfig,

    /// Company universe
    #[serde(default)]
    pub companies: CompaniesConfig,

    /// Announcement sources
    #[serde(default)]
    pub sources: SourcesConfig,

    /// Report rendering and persistence
    #[serde(default)]
    pub report: ReportConfig,

    /// Report delivery
    #[serde(default)]
    pub delivery: DeliveryConfig,
}

impl ScannerConfig {
    /// Load configuration using the standard search order:
    /// 1. `explicit` path (from `--config`); failure here is fatal
    /// 2. `$ASX_SCANNER_CONFIG`
    /// 3. `./scanner_config.toml`
    /// 4. Built-in defaults
    pub fn load(explicit: Option<&Path>) -> Result<Self, ConfigError> {
        if let Some(path) = explicit {
            let config = Self::load_from_file(path)?;
            info!(path = %path.display(), "Loaded scanner config from --config");
            return Ok(config);
        }

        // 2. Check env var
        if let Ok(path) = std::env::var(CONFIG_PATH_ENV) {
            let p = PathBuf::from(&path);
            if p.exists() {
                match Self::load_from_file(&p) {
                    Ok(config) => {
                        info!(path = %p.display(), "Loaded scanner config from {}", CONFIG_PATH_ENV);
                        return Ok(config);
                    }
                    Err(e) => {
                        warn!(path = %p.display(), error = %e, "Failed to load config from {}, falling back", CONFIG_PATH_ENV);
                    }
                }
            } else {
                warn!(path = %path, "{} points to non-existent file, falling back", CONFIG_PATH_ENV);
            }
        }

        // 3. Check ./scanner_config.toml
        let local = PathBuf::from(LOCAL_CONFIG_FILE);
        if local.exists() {
            match Self::load_from_file(&local) {
                Ok(config) => {
                    info!("Loaded scanner config from ./{}", LOCAL_CONFIG_FILE);
                    return Ok(config);
                }
                Err(e) => {
                    warn!(error = %e, "Failed to load ./{}, using defaults", LOCAL_CONFIG_FILE);
                }
            }
        }

        // 4. Defaults
        info!("No {} found, using built-in defaults", LOCAL_CONFIG_FILE);
        Ok(Self::default())
    }

    /// Load from a specific TOML file path.
    pub fn load_from_file(path: &Path) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::Io(path.to_path_buf(), e))?;
        Self::from_toml_str(&contents).map_err(|e| match e {
            ConfigError::Parse(_, inner) => ConfigError::Parse(path.to_path_buf(), inner),
            other => other,
        })
    }

    /// Parse, normalize and validate a TOML document.
    ///
    /// Unknown keys are reported as warnings and never fail the load.
    pub fn from_toml_str(contents: &str) -> Result<Self, ConfigError> {
        for w in &super::validation::validate_unknown_keys(contents) {
            warn!("{}", w);
        }

        let mut config: Self = toml::from_str(contents)
            .map_err(|e| ConfigError::Parse(PathBuf::from("<inline>"), e))?;

        let dropped = config.scanning.dedupe_keywords();
        if !dropped.is_empty() {
            warn!(duplicates = ?dropped, "Duplicate scanning keywords removed");
        }

        config.validate()?;
        Ok(config)
    }

    /// Override delivery credentials from the process environment.
    ///
    /// Mirrors the deployment convention of keeping addresses and endpoints
    /// in secrets rather than in the checked-in config file.
    pub fn apply_env_overrides(&mut self) {
        self.apply_overrides_from(|key| std::env::var(key).ok());
    }

    /// Override delivery credentials using `lookup` for each variable.
    ///
    /// Empty values are ignored.
    pub fn apply_overrides_from<F>(&mut self, lookup: F)
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| lookup(key).filter(|v| !v.trim().is_empty());

        if let Some(sender) = get("SENDER_EMAIL") {
            self.delivery.sender = Some(sender);
        }
        if let Some(recipient) = get("RECIPIENT_EMAIL") {
            self.delivery.recipient = Some(recipient);
        }
        if let Some(url) = get("NOTIFY_WEBHOOK_URL") {
            self.delivery.webhook_url = Some(url);
        }
    }

    /// Serialize the current config to a TOML string.
    pub fn to_toml(&self) -> Result<String, ConfigError> {
        toml::to_string_pretty(self).map_err(ConfigError::Serialize)
    }

    /// Validate all settings for internal consistency.
    ///
    /// Collects every problem before failing so one run reports them all.
    pub fn validate(&self) -> Result<(), ConfigError> {
        let mut errors: Vec<String> = Vec::new();

        if self
            .scanning
            .keywords
            .iter()
            .any(|k| k.trim().is_empty())
        {
            errors.push("scanning.keywords must not contain empty entries".to_string());
        }

        let r = &self.report;
        if r.title.trim().is_empty() {
            errors.push("report.title must not be empty".to_string());
        }
        if r.file_prefix.trim().is_empty() {
            errors.push("report.file_prefix must not be empty".to_string());
        }
        if r.file_prefix.contains(['/', '\\']) {
            errors.push(format!(
                "report.file_prefix ({}) must not contain path separators",
                r.file_prefix
            ));
        }

        if self.sources.timeout_secs == 0 {
            errors.push("sources.timeout_secs must be > 0".to_string());
        }
        for url in &self.sources.feed_urls {
            if !is_http_url(url) {
                errors.push(format!("sources.feed_urls entry '{url}' must be an http(s) URL"));
            }
        }

        let d = &self.delivery;
        if d.max_attempts == 0 {
            errors.push("delivery.max_attempts must be > 0".to_string());
        }
        if d.timeout_secs == 0 {
            errors.push("delivery.timeout_secs must be > 0".to_string());
        }
        if let Some(ref url) = d.webhook_url {
            if !url.is_empty() && !is_http_url(url) {
                errors.push(format!("delivery.webhook_url '{url}' must be an http(s) URL"));
            }
        }

        let (range_errors, range_warnings) = super::validation::validate_ranges(self);
        errors.extend(range_errors);
        for w in &range_warnings {
            warn!("{}", w);
        }

        if errors.is_empty() {
            Ok(())
        } else {
            Err(ConfigError::Validation(errors))
        }
    }
}

fn is_http_url(url: &str) -> bool {
    url.starts_with("http://") || url.starts_with("https://")
}

// ============================================================================
// Error Type
// ============================================================================

#[derive(Debug)]
pub enum ConfigError {
    Io(PathBuf, std::io::Error),
    Parse(PathBuf, toml::de::Error),
    Serialize(toml::ser::Error),
    Validation(Vec<String>),
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ConfigError::Io(path, e) => write!(f, "Config I/O error ({}): {}", path.display(), e),
            ConfigError::Parse(path, e) => {
                write!(f, "Config parse error ({}): {}", path.display(), e)
            }
            ConfigError::Serialize(e) => write!(f, "Config serialization error: {}", e),
            ConfigError::Validation(errors) => {
                writeln!(f, "Config validation failed:")?;
                for e in errors {
                    writeln!(f, "  - {}", e)?;
                }
                Ok(())
            }
        }
    }
}

impl std::error::Error for ConfigError {}

// ============================================================================
// Scanning
// ============================================================================

/// Keyword matching and the title-length quality gate.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ScanningConfig {
    /// Topical keywords, matched case-insensitively against titles
    #[serde(default = "default_keywords")]
    pub keywords: Vec<String>,

    /// Minimum title length in characters (inclusive)
    #[serde(default = "default_min_announcement_length")]
    pub min_announcement_length: usize,
}

fn default_keywords() -> Vec<String> {
    defaults::TOPICAL_KEYWORDS
        .iter()
        .map(|k| (*k).to_string())
        .collect()
}
fn default_min_announcement_length() -> usize {
    defaults::MIN_ANNOUNCEMENT_LENGTH
}

impl Default for ScanningConfig {
    fn default() -> Self {
        Self {
            keywords: default_keywords(),
            min_announcement_length: default_min_announcement_length(),
        }
    }
}

impl ScanningConfig {
    /// Remove case-insensitive duplicate keywords, keeping the first spelling.
    ///
    /// Returns the removed entries.
    pub fn dedupe_keywords(&mut self) -> Vec<String> {
        let mut seen = HashSet::new();
        let mut dropped = Vec::new();
        self.keywords.retain(|k| {
            if seen.insert(k.to_lowercase()) {
                true
            } else {
                dropped.push(k.clone());
                false
            }
        });
        dropped
    }
}

// ============================================================================
// Companies
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CompaniesConfig {
    /// JSON array of `{code, name, sector}` merged over the built-in table
    #[serde(default = "default_supplemental_path")]
    pub supplemental_path: Option<PathBuf>,
}

#[allow(clippy::unnecessary_wraps)]
fn default_supplemental_path() -> Option<PathBuf> {
    Some(PathBuf::from(defaults::SUPPLEMENTAL_COMPANIES_PATH))
}

impl Default for CompaniesConfig {
    fn default() -> Self {
        Self {
            supplemental_path: default_supplemental_path(),
        }
    }
}

// ============================================================================
// Sources
// ============================================================================

/// Where announcements come from. All lists may be empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SourcesConfig {
    /// Files holding a JSON array of raw records
    #[serde(default)]
    pub json_files: Vec<PathBuf>,

    /// Tab-separated announcement tables (`time<TAB>company<TAB>title`)
    #[serde(default)]
    pub listing_files: Vec<PathBuf>,

    /// HTTP endpoints returning a JSON array of raw records
    #[serde(default)]
    pub feed_urls: Vec<String>,

    /// Per-request timeout for feed sources (seconds)
    #[serde(default = "default_source_timeout")]
    pub timeout_secs: u64,

    #[serde(default = "default_user_agent")]
    pub user_agent: String,
}

fn default_source_timeout() -> u64 {
    defaults::SOURCE_HTTP_TIMEOUT_SECS
}
fn default_user_agent() -> String {
    defaults::SOURCE_USER_AGENT.to_string()
}

impl Default for SourcesConfig {
    fn default() -> Self {
        Self {
            json_files: Vec::new(),
            listing_files: Vec::new(),
            feed_urls: Vec::new(),
            timeout_secs: default_source_timeout(),
            user_agent: default_user_agent(),
        }
    }
}

// ============================================================================
// Report
// ============================================================================

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReportConfig {
    /// Heading and email subject prefix
    #[serde(default = "default_report_title")]
    pub title: String,

    #[serde(default = "default_exchange_label")]
    pub exchange_label: String,

    #[serde(default = "default_output_dir")]
    pub output_dir: PathBuf,

    #[serde(default = "default_file_prefix")]
    pub file_prefix: String,

    /// Footer line announcing the next run; omitted when `None`
    #[serde(default = "default_next_report_note")]
    pub next_report_note: Option<String>,

    /// Print the report to stdout after persisting it
    #[serde(default = "default_true")]
    pub echo_to_console: bool,
}

fn default_report_title() -> String {
    defaults::REPORT_TITLE.to_string()
}
fn default_exchange_label() -> String {
    defaults::EXCHANGE_LABEL.to_string()
}
fn default_output_dir() -> PathBuf {
    PathBuf::from(defaults::REPORT_OUTPUT_DIR)
}
fn default_file_prefix() -> String {
    defaults::REPORT_FILE_PREFIX.to_string()
}
#[allow(clippy::unnecessary_wraps)]
fn default_next_report_note() -> Option<String> {
    Some(defaults::NEXT_REPORT_NOTE.to_string())
}
const fn default_true() -> bool {
    true
}

impl Default for ReportConfig {
    fn default() -> Self {
        Self {
            title: default_report_title(),
            exchange_label: default_exchange_label(),
            output_dir: default_output_dir(),
            file_prefix: default_file_prefix(),
            next_report_note: default_next_report_note(),
            echo_to_console: default_true(),
        }
    }
}

// ============================================================================
// Delivery
// ============================================================================

/// Delivery endpoint and retry policy.
///
/// Addresses and the webhook URL are usually supplied through the
/// environment (see [`ScannerConfig::apply_env_overrides`]).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeliveryConfig {
    #[serde(default = "default_true")]
    pub enabled: bool,

    #[serde(default)]
    pub sender: Option<String>,

    #[serde(default)]
    pub recipient: Option<String>,

    /// Mail relay endpoint accepting `{from, to, subject, body}` JSON
    #[serde(default)]
    pub webhook_url: Option<String>,

    #[serde(default = "default_max_attempts")]
    pub max_attempts: u32,

    /// First retry delay; doubles per attempt up to the built-in cap
    #[serde(default = "default_initial_retry_delay")]
    pub initial_retry_delay_ms: u64,

    #[serde(default = "default_delivery_timeout")]
    pub timeout_secs: u64,
}

const fn default_max_attempts() -> u32 {
    defaults::DELIVERY_MAX_ATTEMPTS
}
const fn default_initial_retry_delay() -> u64 {
    defaults::DELIVERY_INITIAL_RETRY_DELAY_MS
}
const fn default_delivery_timeout() -> u64 {
    defaults::DELIVERY_HTTP_TIMEOUT_SECS
}

impl Default for DeliveryConfig {
    fn default() -> Self {
        Self {
            enabled: default_true(),
            sender: None,
            recipient: None,
            webhook_url: None,
            max_attempts: default_max_attempts(),
            initial_retry_delay_ms: default_initial_retry_delay(),
            timeout_secs: default_delivery_timeout(),
        }
    }
}

impl DeliveryConfig {
    /// True when sender, recipient and endpoint are all present and non-empty.
    pub fn is_complete(&self) -> bool {
        [&self.sender, &self.recipient, &self.webhook_url]
            .iter()
            .all(|v| v.as_deref().is_some_and(|s| !s.trim().is_empty()))
    }
}

// ============================================================================
// Tests
// ============================================================================
