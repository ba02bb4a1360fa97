//! Columns, unique imports and the ordering edges between columns.

use serde::Serialize;
use std::collections::BTreeSet;
use std::fmt;

/// Stable handle of a [`Column`] inside its [`Template`](super::Template).
///
/// The id is the column's declaration position, which is also its natural
/// ordering key: within a unique import, columns are imported in id order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
#[serde(transparent)]
pub struct ColumnId(usize);

impl ColumnId {
    pub(crate) const fn new(index: usize) -> Self {
        Self(index)
    }

    /// Position of the column in its template.
    #[must_use]
    pub const fn index(self) -> usize {
        self.0
    }
}

impl fmt::Display for ColumnId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "#{}", self.0)
    }
}

/// One logical destination row within a table for a single import pass.
///
/// Several occurrences of the same table in one template (two observation
/// slots, say) are told apart by `group`. Ordering is by table name, then
/// group, and drives the order in which rows of the same table are created.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct UniqueImport {
    table_name: String,
    group: i32,
}

impl UniqueImport {
    pub fn new(table_name: impl Into<String>, group: i32) -> Self {
        Self {
            table_name: table_name.into(),
            group,
        }
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    #[must_use]
    pub const fn group(&self) -> i32 {
        self.group
    }
}

impl fmt::Display for UniqueImport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}#{}", self.table_name, self.group)
    }
}

/// Ordering edge between two columns.
///
/// The row of `column_import_first`'s unique import must exist, and its
/// generated key be written into `column_name`, before the row of
/// `column_import_next` can be created. Edges are static template-level
/// constraints; matching actual rows is the import engine's job.
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize)]
pub struct ColumnColumn {
    pub column_import_first: ColumnId,
    pub column_import_next: ColumnId,
    /// Foreign-key column on the dependent row
    pub column_name: String,
}

/// A single spreadsheet-to-database mapping.
#[derive(Debug, Clone, Serialize)]
pub struct Column {
    id: ColumnId,
    /// Spreadsheet header text
    name: String,
    table_name: String,
    column_name: String,
    group: i32,
    import_idx: Option<usize>,
    import_before: BTreeSet<ColumnColumn>,
}

impl Column {
    pub(crate) fn new(
        id: ColumnId,
        name: impl Into<String>,
        table_name: impl Into<String>,
        column_name: impl Into<String>,
        group: i32,
    ) -> Self {
        Self {
            id,
            name: name.into(),
            table_name: table_name.into(),
            column_name: column_name.into(),
            group,
            import_idx: None,
            import_before: BTreeSet::new(),
        }
    }

    #[must_use]
    pub const fn id(&self) -> ColumnId {
        self.id
    }

    /// Spreadsheet header this column reads from.
    #[must_use]
    pub fn name(&self) -> &str {
        &self.name
    }

    #[must_use]
    pub fn table_name(&self) -> &str {
        &self.table_name
    }

    #[must_use]
    pub fn column_name(&self) -> &str {
        &self.column_name
    }

    #[must_use]
    pub const fn group(&self) -> i32 {
        self.group
    }

    /// The logical row this column writes into.
    #[must_use]
    pub fn unique_import(&self) -> UniqueImport {
        UniqueImport::new(self.table_name.clone(), self.group)
    }

    /// Position in the global creation order, once the template is resolved.
    #[must_use]
    pub const fn import_idx(&self) -> Option<usize> {
        self.import_idx
    }

    /// Edges naming the columns that must be imported before this one.
    #[must_use]
    pub const fn import_before(&self) -> &BTreeSet<ColumnColumn> {
        &self.import_before
    }

    pub(crate) fn set_import_idx(&mut self, import_idx: usize) {
        self.import_idx = Some(import_idx);
    }

    pub(crate) fn add_import_before(&mut self, edge: ColumnColumn) {
        self.import_before.insert(edge);
    }
}
