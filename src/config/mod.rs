//! Scanner Configuration Module
//!
//! Provides the scan configuration loaded from TOML, replacing hardcoded
//! keywords, thresholds and delivery settings with operator-tunable values.
//!
//! ## Loading Order
//!
//! 1. `--config <path>` on the command line
//! 2. `ASX_SCANNER_CONFIG` environment variable (path to TOML file)
//! 3. `scanner_config.toml` in the current working directory
//! 4. Built-in defaults (see [`defaults`])
//!
//! ## Usage
//!
//! There is no global instance. Load once at startup and pass the sections
//! to the components that need them:
//!
//! ```ignore
//! let mut config = ScannerConfig::load(args.config.as_deref())?;
//! config.apply_env_overrides();
//! let classifier = Classifier::new(&config.scanning);
//! ```

mod scanner_config;
pub mod defaults;
pub mod validation;

pub use scanner_config::*;
