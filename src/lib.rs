//! simport - spreadsheet import template resolution
//!
//! Importing a spreadsheet into a normalised relational schema means one row
//! can create records in several tables linked by foreign keys: a person, the
//! patient built on it, an encounter for that patient and the observations
//! recorded during it. Before any cell is written the importer has to know
//!
//! - in which order target tables must be populated so every foreign key
//!   points at a row that already exists, and
//! - which foreign keys no imported table can satisfy, and therefore need a
//!   substitute ("prespecified") value.
//!
//! This crate answers both questions from metadata alone. It never reads a
//! spreadsheet cell or a database row.
//!
//! # Core Modules
//!
//! - [`template`] - Templates, columns, unique imports and prespecified values
//! - [`schema`] - Foreign-key introspection and an in-memory schema
//! - [`resolver`] - Override rules, the table dependency graph and resolution
//! - [`header`] - Spreadsheet header reconciliation
//!
//! ## Supporting Modules
//!
//! - [`core`] - Error types and user-facing error context
//! - [`config`] - TOML parsing for template, schema and rule files
//! - [`constants`] - Table and column names used by the standard rules
//! - [`utils`] - Formatting helpers
//! - [`cli`] - The `simport` command-line interface
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
//! schema
//!     .add_table("person")
//!     .add_foreign_key("encounter", "patient", "patient_id");
//!
//! let mut template = Template::new("Visits", true);
//! let visit = template.add_column("Visit date", "encounter", "encounter_datetime", 0);
//! template.add_column("Gender", "person", "gender", 0);
//!
//! let plan = resolve(&mut template, &schema)?;
//!
//! // Only people are imported, so the patient reference is satisfied by person
//! assert_eq!(plan.table_order(), ["person", "encounter"]);
//!
//! // Encounters always need a location and a form; neither is imported
//! let placeholders: Vec<_> = template
//!     .prespecified_values_for(visit)
//!     .into_iter()
//!     .map(|(value, _)| value.table_dot_column())
//!     .collect();
//! assert_eq!(placeholders, ["form.form_id", "location.location_id"]);
//! # Ok(())
//! # }
//! ```

pub mod cli;
pub mod config;
pub mod constants;
pub mod core;
pub mod header;
pub mod resolver;
pub mod schema;
pub mod template;
pub mod utils;

#[cfg(any(test, feature = "test-utils"))]
pub mod test_utils;
