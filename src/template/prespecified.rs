//! Placeholder values for foreign keys the spreadsheet does not supply.

use serde::Serialize;
use std::collections::BTreeSet;

use super::ColumnId;
use crate::constants::PRIMARY_KEY_SUFFIX;

/// Link between a column and the prespecified value it consumes.
///
/// Several columns of the same unique import share one value, each recording
/// the foreign-key column the value is written into.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ColumnPrespecifiedValue {
    pub column: ColumnId,
    pub column_name: String,
}

/// Substitute for a foreign key whose parent table is not part of the import.
///
/// Identified by a dotted `table.column` target such as `location.location_id`.
/// A template keeps at most one value per target.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct PrespecifiedValue {
    table_dot_column: String,
    value: Option<String>,
    column_prespecified_values: BTreeSet<ColumnPrespecifiedValue>,
}

impl PrespecifiedValue {
    pub fn new(table_dot_column: impl Into<String>) -> Self {
        Self {
            table_dot_column: table_dot_column.into(),
            value: None,
            column_prespecified_values: BTreeSet::new(),
        }
    }

    /// Placeholder for the primary key of `table`, i.e. `table.table_id`.
    #[must_use]
    pub fn for_table(table: &str) -> Self {
        Self::new(format!("{table}.{table}{PRIMARY_KEY_SUFFIX}"))
    }

    #[must_use]
    pub fn with_value(mut self, value: impl Into<String>) -> Self {
        self.value = Some(value.into());
        self
    }

    #[must_use]
    pub fn table_dot_column(&self) -> &str {
        &self.table_dot_column
    }

    /// Table part of the target identifier.
    #[must_use]
    pub fn table_name(&self) -> &str {
        self.table_dot_column
            .split_once('.')
            .map_or(self.table_dot_column.as_str(), |(table, _)| table)
    }

    /// Literal or lookup value, if one was supplied with the template.
    #[must_use]
    pub fn value(&self) -> Option<&str> {
        self.value.as_deref()
    }

    #[must_use]
    pub const fn column_prespecified_values(&self) -> &BTreeSet<ColumnPrespecifiedValue> {
        &self.column_prespecified_values
    }

    pub(crate) fn link(&mut self, column: ColumnId, column_name: impl Into<String>) {
        self.column_prespecified_values.insert(ColumnPrespecifiedValue {
            column,
            column_name: column_name.into(),
        });
    }

    /// Fold another value for the same target into this one.
    ///
    /// Links are unioned; an existing value wins over the incoming one.
    pub(crate) fn merge(&mut self, other: Self) {
        debug_assert_eq!(self.table_dot_column, other.table_dot_column);
        if self.value.is_none() {
            self.value = other.value;
        }
        self.column_prespecified_values.extend(other.column_prespecified_values);
    }
}
