//! Schema introspection.
//!
//! The resolver learns a table's foreign keys through [`SchemaIntrospector`].
//! Implementations must be pure functions of the relational schema; the
//! resolver neither caches nor invalidates what they return.
//!
//! [`StaticSchema`] is an in-memory implementation, usually loaded from TOML:
//!
//! ```toml
//! [tables.encounter]
//! patient = "patient_id"
//! location = "location_id"
//!
//! # tables without foreign keys still need to be declared
//! [tables.person]
//! ```

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::core::SimportError;

/// Parent table name → foreign-key column referencing it.
///
/// Sorted by parent table so requirements are always visited in the same order.
pub type ForeignKeyMap = BTreeMap<String, String>;

/// Source of foreign-key metadata for tables.
pub trait SchemaIntrospector {
    /// Tables `table` references, with the column carrying each reference.
    ///
    /// Fails with [`SimportError::UnknownTable`] when the table does not exist.
    fn foreign_key_map(&self, table: &str) -> Result<ForeignKeyMap>;
}

/// Schema description held in memory.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct StaticSchema {
    #[serde(default)]
    tables: BTreeMap<String, ForeignKeyMap>,
}

impl StaticSchema {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare a table with no foreign keys (or make sure it is declared).
    pub fn add_table(&mut self, table: impl Into<String>) -> &mut Self {
        self.tables.entry(table.into()).or_default();
        self
    }

    /// Declare that `table.column` references `parent`.
    pub fn add_foreign_key(
        &mut self,
        table: impl Into<String>,
        parent: impl Into<String>,
        column: impl Into<String>,
    ) -> &mut Self {
        self.tables.entry(table.into()).or_default().insert(parent.into(), column.into());
        self
    }

    #[must_use]
    pub fn contains_table(&self, table: &str) -> bool {
        self.tables.contains_key(table)
    }

    pub fn table_names(&self) -> impl Iterator<Item = &str> {
        self.tables.keys().map(String::as_str)
    }
}

impl SchemaIntrospector for StaticSchema {
    fn foreign_key_map(&self, table: &str) -> Result<ForeignKeyMap> {
        self.tables.get(table).cloned().ok_or_else(|| {
            SimportError::UnknownTable {
                table: table.to_string(),
            }
            .into()
        })
    }
}
