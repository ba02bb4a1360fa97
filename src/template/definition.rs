//! On-disk template definitions.
//!
//! A definition is the declarative form of a [`Template`](super::Template):
//!
//! ```toml
//! name = "Registration"
//! encounter = true
//!
//! [[columns]]
//! name = "Given name"
//! table = "person_name"
//! column = "given_name"
//!
//! [[columns]]
//! name = "Weight"
//! table = "obs"
//! column = "value_numeric"
//! group = 1
//!
//! [prespecified]
//! "location.location_id" = "7"
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// Declarative template, as read from a TOML file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TemplateDefinition {
    pub name: String,

    /// Whether every row creates a fresh encounter.
    #[serde(default)]
    pub encounter: bool,

    #[serde(default)]
    pub columns: Vec<ColumnDefinition>,

    /// Values for placeholders, keyed by `table.column`.
    #[serde(default)]
    pub prespecified: BTreeMap<String, String>,
}

/// One `[[columns]]` entry.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ColumnDefinition {
    /// Spreadsheet header
    pub name: String,
    pub table: String,
    pub column: String,
    /// Discriminates several rows of the same table
    #[serde(default)]
    pub group: i32,
}

impl TemplateDefinition {
    /// Parse a definition from TOML text.
    pub fn from_toml_str(content: &str) -> Result<Self> {
        crate::config::parse_config_str(content, "<template>")
    }
}
