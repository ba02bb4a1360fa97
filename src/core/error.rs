//! Error handling for simport
//!
//! This module provides the error types and user-friendly error reporting for the
//! spreadsheet import resolver. Two layers are used:
//! 1. [`SimportError`] - strongly-typed failures that code can match on
//! 2. [`ErrorContext`] - a wrapper that adds a suggestion and details for CLI users
//!
//! # Error Categories
//!
//! - **Template configuration**: [`SimportError::InvalidTemplate`],
//!   [`SimportError::EmptyUniqueImport`], [`SimportError::TemplateAlreadyResolved`]
//! - **Schema**: [`SimportError::UnknownTable`], [`SimportError::SelfReferencingTable`]
//! - **Ordering**: [`SimportError::CircularDependency`]
//! - **Files**: [`SimportError::TemplateParseError`]
//!
//! Resolution is a deterministic function of its inputs, so none of these are
//! transient: retrying with the same template and schema fails the same way.
//!
//! # Examples
//!
//! ```rust,no_run
//! use simport_cli::core::{SimportError, user_friendly_error};
//!
//! fn resolve_something() -> anyhow::Result<()> {
//!     Err(SimportError::UnknownTable {
//!         table: "obs".to_string(),
//!     }
//!     .into())
//! }
//!
//! if let Err(e) = resolve_something() {
//!     user_friendly_error(e).display();
//! }
//! ```

use colored::Colorize;
use std::fmt;
use thiserror::Error;

/// The main error type for simport operations.
///
/// Every variant describes a configuration problem: the template, the schema
/// description, or one of the files they were loaded from.
#[derive(Error, Debug, Clone)]
pub enum SimportError {
    /// Schema introspection has no entry for a table the template imports.
    #[error("Table '{table}' has no introspectable schema")]
    UnknownTable {
        /// Name of the table missing from the schema
        table: String,
    },

    /// A declared row slot ended up with no columns writing into it.
    #[error("Unique import {table}#{group} has no columns")]
    EmptyUniqueImport {
        /// Table of the empty unique import
        table: String,
        /// Group discriminator of the empty unique import
        group: i32,
    },

    /// A table requires a row of itself to exist before it can be imported.
    #[error("Table '{table}' references itself through '{column}'")]
    SelfReferencingTable {
        /// The self-referencing table
        table: String,
        /// Foreign-key column carrying the self reference
        column: String,
    },

    #[error("Circular dependency detected: {chain}")]
    CircularDependency {
        /// String representation of the circular chain, e.g. `a → b → a`
        chain: String,
    },

    #[error("Template '{name}' has already been resolved")]
    TemplateAlreadyResolved {
        /// Name of the template
        name: String,
    },

    #[error("Invalid template: {reason}")]
    InvalidTemplate {
        /// Why the template definition was rejected
        reason: String,
    },

    #[error("Invalid template file syntax in {file}")]
    TemplateParseError {
        /// Path to the file that failed to parse
        file: String,
        /// Specific reason for the parsing failure
        reason: String,
    },

    #[error("{message}")]
    Other {
        /// Generic error message
        message: String,
    },
}

/// Error wrapper carrying a suggestion and details for terminal display.
#[derive(Debug)]
pub struct ErrorContext {
    /// The underlying error
    pub error: SimportError,
    /// What the user can do about it
    pub suggestion: Option<String>,
    /// Additional explanation of the failure
    pub details: Option<String>,
}

impl ErrorContext {
    #[must_use]
    pub const fn new(error: SimportError) -> Self {
        Self {
            error,
            suggestion: None,
            details: None,
        }
    }

    pub fn with_suggestion(mut self, suggestion: impl Into<String>) -> Self {
        self.suggestion = Some(suggestion.into());
        self
    }

    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.details = Some(details.into());
        self
    }

    /// Print the error to stderr with colors.
    pub fn display(&self) {
        eprintln!("{}: {}", "error".red().bold(), self.error);

        if let Some(details) = &self.details {
            eprintln!("{}: {}", "details".yellow(), details);
        }

        if let Some(suggestion) = &self.suggestion {
            eprintln!("{}: {}", "suggestion".green(), suggestion);
        }
    }
}

impl fmt::Display for ErrorContext {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.error)?;

        if let Some(details) = &self.details {
            write!(f, "\nDetails: {details}")?;
        }

        if let Some(suggestion) = &self.suggestion {
            write!(f, "\nSuggestion: {suggestion}")?;
        }

        Ok(())
    }
}

impl std::error::Error for ErrorContext {}

/// Convert any error into an [`ErrorContext`] with a suggestion where one is known.
///
/// [`SimportError`]s anywhere in the chain get tailored advice; anything else is
/// reported with its full cause chain.
#[must_use]
pub fn user_friendly_error(error: anyhow::Error) -> ErrorContext {
    if let Some(simport_error) = error.chain().find_map(|e| e.downcast_ref::<SimportError>()) {
        return create_error_context(simport_error.clone());
    }

    // Generic error - include the full error chain for better diagnostics
    let mut message = error.to_string();
    let chain: Vec<String> =
        error.chain().skip(1).map(std::string::ToString::to_string).collect();

    if !chain.is_empty() {
        message.push_str("\n\nCaused by:");
        for (i, cause) in chain.iter().enumerate() {
            message.push_str(&format!("\n  {}: {}", i + 1, cause));
        }
    }

    ErrorContext::new(SimportError::Other {
        message,
    })
}

fn create_error_context(error: SimportError) -> ErrorContext {
    match &error {
        SimportError::UnknownTable {
            table,
        } => {
            let suggestion = format!(
                "Declare '{table}' in the schema description, even if it has no foreign keys (an empty [tables.{table}] section)"
            );
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("Every table a template imports must be known to schema introspection")
        }

        SimportError::EmptyUniqueImport {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Add at least one column for this table and group, or remove the declared import")
            .with_details("The first column of each unique import anchors the rows that depend on it"),

        SimportError::SelfReferencingTable {
            table,
            column,
        } => {
            let suggestion = format!(
                "Remove '{column}' from the foreign keys reported for '{table}', or add an override rule suppressing it"
            );
            ErrorContext::new(error)
                .with_suggestion(suggestion)
                .with_details("A row cannot be created after itself; self references are not resolved automatically")
        }

        SimportError::CircularDependency {
            chain,
        } => {
            let details = format!(
                "Circular table chain detected: {chain}. Each table in the chain needs another one to be imported first"
            );
            ErrorContext::new(error)
                .with_suggestion("Drop one of the tables from the template or suppress one of the foreign keys with an override rule")
                .with_details(details)
        }

        SimportError::TemplateAlreadyResolved {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Build a fresh template for each resolution")
            .with_details("Resolution assigns import indices in place and is run once per template"),

        SimportError::InvalidTemplate {
            ..
        } => ErrorContext::new(error)
            .with_suggestion("Check the [[columns]] entries of the template definition"),

        SimportError::TemplateParseError {
            file,
            reason,
        } => {
            let suggestion = format!(
                "Check the TOML syntax in {file}. Common issues: missing quotes, unmatched brackets, invalid characters"
            );
            let details = reason.clone();
            ErrorContext::new(error).with_suggestion(suggestion).with_details(details)
        }

        _ => ErrorContext::new(error),
    }
}
