//! Template dependency resolution.
//!
//! Resolution turns a [`Template`] into an import plan without touching any
//! spreadsheet cell or database row. For every unique import the resolver asks
//! the schema which tables the target table references, adjusts that answer
//! with [`OverrideRules`], and then either
//!
//! - orders the referenced table ahead of the current one when the template
//!   imports it too, adding a [`ColumnColumn`] edge from the first column of
//!   each of its unique imports to every column of the current unique import; or
//! - creates (or reuses) a [`PrespecifiedValue`] keyed `"parent.parent_id"` and
//!   links every column of the current unique import to it.
//!
//! Tables are ordered by [`TableGraph`], and import indices are handed out by
//! walking tables, then their unique imports, then their columns.
//!
//! # Example
//!
//! ```rust
//! use simport_cli::resolver::resolve;
//! use simport_cli::schema::StaticSchema;
//! use simport_cli::template::Template;
//!
//! # fn example() -> anyhow::Result<()> {
//! let mut schema = StaticSchema::new();
//! schema.add_table("person").add_foreign_key("person_name", "person", "person_id");
//!
//! let mut template = Template::new("people", false);
//! template.add_column("Given name", "person_name", "given_name", 0);
//! template.add_column("Gender", "person", "gender", 0);
//!
//! let plan = resolve(&mut template, &schema)?;
//! assert_eq!(plan.table_order(), ["person", "person_name"]);
//! # Ok(())
//! # }
//! ```
//!
//! # Failure
//!
//! Every check runs before the template is modified: if resolution fails the
//! template is exactly as it was and can be fixed and resolved again.

mod dependency_graph;
mod overrides;


pub use dependency_graph::TableGraph;
pub use overrides::{OverrideAction, OverrideRule, OverrideRules};

use anyhow::{Context, Result};
use serde::Serialize;
use std::collections::{BTreeMap, BTreeSet};

use crate::core::SimportError;
use crate::schema::SchemaIntrospector;
use crate::template::{ColumnColumn, ColumnId, PrespecifiedValue, Template, UniqueImport};

/// Outcome of a successful resolution.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ImportPlan {
    table_order: Vec<String>,
    column_order: Vec<ColumnId>,
}

impl ImportPlan {
    /// Tables in the order their rows must be created.
    #[must_use]
    pub fn table_order(&self) -> &[String] {
        &self.table_order
    }

    /// Columns by ascending import index.
    #[must_use]
    pub fn column_order(&self) -> &[ColumnId] {
        &self.column_order
    }
}

/// Resolve `template` with the standard override rules.
pub fn resolve(template: &mut Template, schema: &dyn SchemaIntrospector) -> Result<ImportPlan> {
    resolve_template_dependencies(template, schema, &OverrideRules::standard())
}

/// Compute ordering edges, placeholder values and import indices for `template`.
///
/// On success the template holds the edges on each dependent column, the
/// prespecified values merged with any it already had, and an import index on
/// every column.
pub fn resolve_template_dependencies(
    template: &mut Template,
    schema: &dyn SchemaIntrospector,
    rules: &OverrideRules,
) -> Result<ImportPlan> {
    if template.is_resolved() {
        return Err(SimportError::TemplateAlreadyResolved {
            name: template.name().to_string(),
        }
        .into());
    }

    let unique_import_columns = template.unique_import_columns();
    let table_unique_imports = template.table_unique_imports();

    if let Some(empty) = unique_import_columns.iter().find(|(_, columns)| columns.is_empty()) {
        return Err(SimportError::EmptyUniqueImport {
            table: empty.0.table_name().to_string(),
            group: empty.0.group(),
        }
        .into());
    }

    let encounter = template.is_encounter();
    let is_imported = |table: &str| table_unique_imports.contains_key(table);

    tracing::debug!(
        "Resolving template '{}' ({} columns, {} unique imports, encounter: {encounter})",
        template.name(),
        template.columns().len(),
        unique_import_columns.len()
    );

    let mut graph = TableGraph::new();
    let mut edges = BTreeSet::new();
    let mut placeholders: BTreeMap<String, PrespecifiedValue> = BTreeMap::new();

    for (unique_import, columns) in &unique_import_columns {
        let table = unique_import.table_name();

        let mut requirements = schema
            .foreign_key_map(table)
            .with_context(|| format!("Failed to read foreign keys of table '{table}'"))?;
        rules.apply(table, encounter, &mut requirements);

        for (parent, fk_column) in &requirements {
            let parent = rules.alias_for(table, encounter, parent, is_imported);

            if let Some(parent_imports) = table_unique_imports.get(&parent) {
                graph.add_requirement(table, &parent, fk_column)?;

                for anchor in anchors(parent_imports, &unique_import_columns) {
                    for &next in columns {
                        edges.insert(ColumnColumn {
                            column_import_first: anchor,
                            column_import_next: next,
                            column_name: fk_column.clone(),
                        });
                    }
                }
                tracing::debug!("{unique_import}: {parent} imported first via {fk_column}");
            } else {
                let placeholder = PrespecifiedValue::for_table(&parent);
                let value = placeholders
                    .entry(placeholder.table_dot_column().to_string())
                    .or_insert(placeholder);
                for &column in columns {
                    value.link(column, fk_column.clone());
                }
                tracing::debug!(
                    "{unique_import}: {parent} not imported, {} needs a prespecified value",
                    value.table_dot_column()
                );
            }
        }

        graph.record(table);
    }

    let table_order = graph.import_order()?;
    let column_order = column_order(&table_order, &table_unique_imports, &unique_import_columns);

    tracing::debug!("Import order for '{}': {}", template.name(), table_order.join(", "));

    template.commit_resolution(edges, placeholders, &column_order);

    Ok(ImportPlan {
        table_order,
        column_order,
    })
}

/// First column of every unique import of a table.
///
/// Rows of a dependent table are attached to these representative columns
/// only, not to every column of the parent.
fn anchors<'a>(
    parent_imports: &'a BTreeSet<UniqueImport>,
    unique_import_columns: &'a BTreeMap<UniqueImport, BTreeSet<ColumnId>>,
) -> impl Iterator<Item = ColumnId> + 'a {
    parent_imports
        .iter()
        .filter_map(|ui| unique_import_columns.get(ui).and_then(|columns| columns.first()).copied())
}

fn column_order(
    table_order: &[String],
    table_unique_imports: &BTreeMap<String, BTreeSet<UniqueImport>>,
    unique_import_columns: &BTreeMap<UniqueImport, BTreeSet<ColumnId>>,
) -> Vec<ColumnId> {
    table_order
        .iter()
        .filter_map(|table| table_unique_imports.get(table))
        .flatten()
        .filter_map(|ui| unique_import_columns.get(ui))
        .flatten()
        .copied()
        .collect()
}
