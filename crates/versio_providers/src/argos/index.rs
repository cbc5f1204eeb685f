//! Package index entries.

use serde::{Deserialize, Serialize};

/// A package as listed in the index and stored in `metadata.json`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PackageEntry {
    /// Source language code.
    pub from_code: String,
    /// Target language code.
    pub to_code: String,
    /// Package version.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub package_version: Option<String>,
    /// Download URLs of the phrase file, tried in order.
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub links: Vec<String>,
}

impl PackageEntry {
    /// Returns the `{from}-{to}` pair name.
    #[must_use]
    pub fn pair(&self) -> String {
        format!("{}-{}", self.from_code, self.to_code)
    }

    /// Checks whether this package translates `from` to `to`.
    #[must_use]
    pub fn serves(&self, from: &str, to: &str) -> bool {
        self.from_code == from && self.to_code == to
    }
}
