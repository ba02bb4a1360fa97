//! Spreadsheet header reconciliation.
//!
//! Compares the header row of a spreadsheet (already extracted as strings)
//! with the column names a [`Template`] expects. Headers are matched exactly.
//!
//! Missing template columns are tolerated: rows simply leave those targets
//! empty. Extra spreadsheet columns are reported to the user because their
//! cells will be ignored. Only an empty header row stops an import.

use serde::Serialize;
use std::collections::HashSet;

use crate::template::Template;
use crate::utils::join_human;

/// Differences between a spreadsheet header row and a template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
pub struct HeaderReport {
    /// Template column names absent from the header, in template order
    pub missing: Vec<String>,
    /// Header names the template does not know, in header order
    pub extra: Vec<String>,
    /// The header row had no cells at all
    pub empty_header: bool,
}

impl HeaderReport {
    /// Whether header and template agree exactly.
    #[must_use]
    pub fn is_clean(&self) -> bool {
        self.missing.is_empty() && self.extra.is_empty() && !self.empty_header
    }

    /// Whether the spreadsheet cannot be imported with this template.
    #[must_use]
    pub const fn is_blocking(&self) -> bool {
        self.empty_header
    }

    /// User-facing messages, most severe first.
    #[must_use]
    pub fn messages(&self) -> Vec<String> {
        if self.empty_header {
            return vec!["Spreadsheet header row must not be empty".to_string()];
        }

        let mut messages = Vec::new();
        if !self.extra.is_empty() {
            messages.push(format!(
                "Extra column names present, these will not be processed: {}",
                join_human(&self.extra)
            ));
        }
        messages
    }
}

/// Compare `header` with the column names of `template`.
pub fn reconcile_header(template: &Template, header: &[String]) -> HeaderReport {
    if header.is_empty() {
        tracing::warn!("Spreadsheet header row is empty");
        return HeaderReport {
            missing: template.column_names().into_iter().map(str::to_string).collect(),
            extra: Vec::new(),
            empty_header: true,
        };
    }

    tracing::debug!("Column names: {header:?}");

    let template_names: HashSet<&str> = template.column_names().into_iter().collect();
    let header_names: HashSet<&str> = header.iter().map(String::as_str).collect();

    let missing: Vec<String> = template
        .column_names()
        .into_iter()
        .filter(|name| !header_names.contains(name))
        .map(str::to_string)
        .collect();
    let extra: Vec<String> =
        header.iter().filter(|name| !template_names.contains(name.as_str())).cloned().collect();

    if !missing.is_empty() {
        tracing::warn!(
            "Template '{}' columns not in spreadsheet: {}",
            template.name(),
            join_human(&missing)
        );
    }

    HeaderReport {
        missing,
        extra,
        empty_header: false,
    }
}
