//! Company reference data

use serde::{Deserialize, Serialize};

/// A tracked exchange-listed company.
///
/// `code` is the uppercase ticker and the unique key within the registry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Company {
    pub code: String,
    pub name: String,
    /// Free-text category, e.g. "Gold" or "Iron Ore"
    pub sector: String,
}

impl Company {
    pub fn new(code: &str, name: &str, sector: &str) -> Self {
        Self {
            code: code.to_string(),
            name: name.to_string(),
            sector: sector.to_string(),
        }
    }
}
