//! Company Registry
//!
//! The tracked company universe: an embedded table of exchange-listed mining
//! companies, optionally extended at startup from a supplemental JSON file.
//!
//! ## Duplicate codes
//!
//! Entries are merged in load order and the last entry for a code wins: it
//! replaces the earlier entry in place, so [`CompanyRegistry::lookup`] always
//! returns the most recently loaded data while [`CompanyRegistry::all`] keeps
//! the position where the code was first seen. [`CompanyRegistry::len`]
//! counts unique codes.
//!
//! The registry is immutable once the scan starts and is shared through `Arc`.

mod companies;

use crate::config::defaults;
use crate::types::Company;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use tracing::{debug, info, warn};

/// Errors reading a supplemental company file.
#[derive(Debug, thiserror::Error)]
pub enum RegistryError {
    #[error("failed to read company file {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("failed to parse company file {path}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
}

/// Code-indexed set of tracked companies.
#[derive(Debug, Clone, Default)]
pub struct CompanyRegistry {
    companies: Vec<Company>,
    index: HashMap<String, usize>,
}

impl CompanyRegistry {
    /// Registry holding only the embedded company table.
    pub fn builtin() -> Self {
        let mut registry = Self::default();
        registry.merge(
            companies::BUILTIN_COMPANIES
                .iter()
                .map(|(code, name, sector)| Company::new(code, name, sector)),
        );
        registry
    }

    /// Build a registry from an explicit list (last duplicate wins).
    pub fn from_companies<I: IntoIterator<Item = Company>>(companies: I) -> Self {
        let mut registry = Self::default();
        registry.merge(companies);
        registry
    }

    /// Embedded table plus the supplemental file, if any.
    ///
    /// A missing or unreadable supplemental file is logged and ignored; the
    /// scan proceeds with the embedded table.
    pub fn load(supplemental: Option<&Path>) -> Self {
        let mut registry = Self::builtin();

        if let Some(path) = supplemental {
            if !path.exists() {
                if is_default_location(path) {
                    debug!(path = %path.display(), "No supplemental company file");
                } else {
                    warn!(path = %path.display(), "Supplemental company file not found, using built-in table");
                }
            } else {
                match read_supplemental(path) {
                    Ok(extra) => {
                        let count = extra.len();
                        let added = registry.merge(extra);
                        info!(
                            path = %path.display(),
                            entries = count,
                            new_codes = added,
                            "Merged supplemental companies"
                        );
                    }
                    Err(e) => {
                        warn!(error = %e, "Could not load additional companies");
                    }
                }
            }
        }

        info!(companies = registry.len(), "Company registry ready");
        registry
    }

    /// Insert a company, replacing any entry with the same code in place.
    ///
    /// Returns the replaced entry.
    pub fn insert(&mut self, company: Company) -> Option<Company> {
        match self.index.get(&company.code) {
            Some(&slot) => Some(std::mem::replace(&mut self.companies[slot], company)),
            None => {
                self.index.insert(company.code.clone(), self.companies.len());
                self.companies.push(company);
                None
            }
        }
    }

    /// Insert every company in order. Returns how many codes were new.
    pub fn merge<I: IntoIterator<Item = Company>>(&mut self, companies: I) -> usize {
        let mut added = 0;
        for company in companies {
            if self.insert(company).is_none() {
                added += 1;
            }
        }
        added
    }

    pub fn lookup(&self, code: &str) -> Option<&Company> {
        self.index.get(code).map(|&slot| &self.companies[slot])
    }

    pub fn is_tracked(&self, code: &str) -> bool {
        self.index.contains_key(code)
    }

    /// All companies in first-seen order.
    pub fn all(&self) -> &[Company] {
        &self.companies
    }

    pub fn len(&self) -> usize {
        self.companies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.companies.is_empty()
    }
}

/// Read a JSON array of `{code, name, sector}` objects.
pub fn read_supplemental(path: &Path) -> Result<Vec<Company>, RegistryError> {
    let contents = std::fs::read_to_string(path).map_err(|source| RegistryError::Io {
        path: path.to_path_buf(),
        source,
    })?;
    serde_json::from_str(&contents).map_err(|source| RegistryError::Parse {
        path: path.to_path_buf(),
        source,
    })
}

/// The default supplemental path is optional; only an explicitly configured
/// file that is missing deserves a warning.
fn is_default_location(path: &Path) -> bool {
    path == Path::new(defaults::SUPPLEMENTAL_COMPANIES_PATH)
}
