//! Import templates: the mapping from spreadsheet columns to relational targets.
//!
//! A [`Template`] owns its [`Column`]s and [`PrespecifiedValue`]s. Columns are
//! addressed by [`ColumnId`], so ordering edges and placeholder links refer to
//! columns without borrowing them. Two views are derived from the column list:
//!
//! - table name → ordered set of [`UniqueImport`]s targeting that table
//! - [`UniqueImport`] → ordered set of columns writing into that row
//!
//! Both use sorted containers so every walk over them is deterministic.
//!
//! Templates are built upstream (programmatically or from a
//! [`TemplateDefinition`]) and then handed to
//! [`resolve_template_dependencies`](crate::resolver::resolve_template_dependencies)
//! exactly once.

mod column;
mod definition;
mod prespecified;

pub use column::{Column, ColumnColumn, ColumnId, UniqueImport};
pub use definition::{ColumnDefinition, TemplateDefinition};
pub use prespecified::{ColumnPrespecifiedValue, PrespecifiedValue};

use anyhow::Result;
use std::collections::{BTreeMap, BTreeSet, HashSet};

use crate::core::SimportError;

/// Declarative mapping from spreadsheet columns to table/column targets.
#[derive(Debug, Clone)]
pub struct Template {
    name: String,
    encounter: bool,
    columns: Vec<Column>,
    /// Row slots registered before (or without) any column
    declared_imports: BTreeSet<UniqueImport>,
    prespecified_values: BTreeMap<String, PrespecifiedValue>,
    resolved: bool,
}

impl Template {
    /// Create an empty template.
    ///
    /// `encounter` marks an encounter-centric import, where every row creates
    /// a fresh encounter that the row's observations attach to.
    pub fn new(name: impl Into<String>, encounter: bool) -> Self {
        Self {
            name: name.into(),
            encounter,
            columns: Vec::new(),
            declared_imports: BTreeSet::new(),
            prespecified_values: BTreeMap::new(),
            resolved: false,
        }
    }

    /// Build a template from its declarative form.
    ///
    /// Rejects definitions without columns, with blank names, or with two
    /// columns reading the same spreadsheet header.
    pub fn from_definition(definition: TemplateDefinition) -> Result<Self> {
        if definition.columns.is_empty() {
            return Err(SimportError::InvalidTemplate {
                reason: format!("template '{}' has no columns", definition.name),
            }
            .into());
        }

        let mut template = Self::new(definition.name, definition.encounter);
        let mut seen = HashSet::new();

        for column in definition.columns {
            if column.name.trim().is_empty()
                || column.table.trim().is_empty()
                || column.column.trim().is_empty()
            {
                return Err(SimportError::InvalidTemplate {
                    reason: format!(
                        "column '{}' needs a non-empty name, table and column",
                        column.name
                    ),
                }
                .into());
            }
            if !seen.insert(column.name.clone()) {
                return Err(SimportError::InvalidTemplate {
                    reason: format!("column name '{}' is used more than once", column.name),
                }
                .into());
            }
            template.add_column(column.name, column.table, column.column, column.group);
        }

        for (table_dot_column, value) in definition.prespecified {
            if !table_dot_column.contains('.') {
                return Err(SimportError::InvalidTemplate {
                    reason: format!(
                        "prespecified value '{table_dot_column}' must be written as table.column"
                    ),
                }
                .into());
            }
            template.add_prespecified_value(PrespecifiedValue::new(table_dot_column).with_value(value));
        }

        Ok(template)
    }

    /// Append a column; its id is its declaration position.
    pub fn add_column(
        &mut self,
        name: impl Into<String>,
        table_name: impl Into<String>,
        column_name: impl Into<String>,
        group: i32,
    ) -> ColumnId {
        let id = ColumnId::new(self.columns.len());
        self.columns.push(Column::new(id, name, table_name, column_name, group));
        id
    }

    /// Register a row slot that columns are expected to fill.
    ///
    /// A slot still empty at resolution time is a configuration fault.
    pub fn declare_unique_import(&mut self, unique_import: UniqueImport) {
        self.declared_imports.insert(unique_import);
    }

    /// Supply a placeholder value ahead of resolution.
    ///
    /// Resolution links columns to it when it produces the same target.
    pub fn add_prespecified_value(&mut self, value: PrespecifiedValue) {
        match self.prespecified_values.get_mut(value.table_dot_column()) {
            Some(existing) => existing.merge(value),
            None => {
                self.prespecified_values.insert(value.table_dot_column().to_string(), value);
            }
        }
    }

    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Whether this is an encounter-centric import.
    #[must_use]
    pub const fn is_encounter(&self) -> bool {
        self.encounter
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn column(&self, id: ColumnId) -> Option<&Column> {
        self.columns.get(id.index())
    }

    /// Spreadsheet headers in declaration order.
    #[must_use]
    pub fn column_names(&self) -> Vec<&str> {
        self.columns.iter().map(Column::name).collect()
    }

    /// Unique import → columns writing into it, including declared empty slots.
    #[must_use]
    pub fn unique_import_columns(&self) -> BTreeMap<UniqueImport, BTreeSet<ColumnId>> {
        let mut map: BTreeMap<UniqueImport, BTreeSet<ColumnId>> = self
            .declared_imports
            .iter()
            .map(|ui| (ui.clone(), BTreeSet::new()))
            .collect();

        for column in &self.columns {
            map.entry(column.unique_import()).or_default().insert(column.id());
        }
        map
    }

    /// Table name → unique imports targeting it.
    #[must_use]
    pub fn table_unique_imports(&self) -> BTreeMap<String, BTreeSet<UniqueImport>> {
        let mut map: BTreeMap<String, BTreeSet<UniqueImport>> = BTreeMap::new();
        for ui in self.declared_imports.iter().cloned().chain(self.columns.iter().map(Column::unique_import)) {
            map.entry(ui.table_name().to_string()).or_default().insert(ui);
        }
        map
    }

    /// Placeholder values ordered by their `table.column` target.
    pub fn prespecified_values(&self) -> impl Iterator<Item = &PrespecifiedValue> {
        self.prespecified_values.values()
    }

    #[must_use]
    pub fn prespecified_value(&self, table_dot_column: &str) -> Option<&PrespecifiedValue> {
        self.prespecified_values.get(table_dot_column)
    }

    /// Placeholder values a column consumes, with the foreign-key column each fills.
    #[must_use]
    pub fn prespecified_values_for(&self, column: ColumnId) -> Vec<(&PrespecifiedValue, &str)> {
        self.prespecified_values
            .values()
            .flat_map(|value| {
                value
                    .column_prespecified_values()
                    .iter()
                    .filter(move |link| link.column == column)
                    .map(move |link| (value, link.column_name.as_str()))
            })
            .collect()
    }

    /// Every ordering edge, grouped by the dependent column.
    pub fn edges(&self) -> impl Iterator<Item = &ColumnColumn> {
        self.columns.iter().flat_map(|c| c.import_before().iter())
    }

    #[must_use]
    pub const fn is_resolved(&self) -> bool {
        self.resolved
    }

    /// Store the outcome of a resolution pass.
    ///
    /// Callers validate everything first, so this cannot fail halfway.
    pub(crate) fn commit_resolution(
        &mut self,
        edges: BTreeSet<ColumnColumn>,
        prespecified_values: BTreeMap<String, PrespecifiedValue>,
        import_order: &[ColumnId],
    ) {
        for edge in edges {
            self.columns[edge.column_import_next.index()].add_import_before(edge);
        }
        for value in prespecified_values.into_values() {
            self.add_prespecified_value(value);
        }
        for (import_idx, id) in import_order.iter().enumerate() {
            self.columns[id.index()].set_import_idx(import_idx);
        }
        self.resolved = true;
    }
}
