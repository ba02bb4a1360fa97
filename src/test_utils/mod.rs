//! Test utilities for simport
//!
//! Helpers shared by unit and integration tests: logging initialisation, an
//! in-memory schema shaped like the OpenMRS data model, and on-disk fixtures
//! for template, schema and rule files.
//!
//! # Example
//!
//! ```rust,no_run
//! use simport_cli::resolver::resolve;
//! use simport_cli::template::Template;
//! use simport_cli::test_utils::{init_test_logging, openmrs_schema};
//!
//! init_test_logging(None);
//!
//! let mut template = Template::new("people", false);
//! template.add_column("Gender", "person", "gender", 0);
//! resolve(&mut template, &openmrs_schema()).unwrap();
//! ```

pub mod fixtures;

pub use fixtures::{RulesFixture, SchemaFixture, TemplateFixture};

use std::sync::Once;
use tracing::Level;
use tracing_subscriber::EnvFilter;

use crate::schema::StaticSchema;
use crate::template::{ColumnId, Template};

static INIT_LOGGING: Once = Once::new();

/// Initialize test logging based on `RUST_LOG` or an explicit level.
///
/// Only the first call has any effect. Without a level and without
/// `RUST_LOG`, tests run silently.
///
/// ```bash
/// RUST_LOG=simport_cli=debug cargo test
/// ```
pub fn init_test_logging(level: Option<Level>) {
    INIT_LOGGING.call_once(|| {
        let filter = if let Some(level) = level {
            EnvFilter::new(level.to_string())
        } else if std::env::var("RUST_LOG").is_ok() {
            EnvFilter::from_default_env()
        } else {
            return;
        };

        let _ = tracing_subscriber::fmt()
            .with_env_filter(filter)
            .with_test_writer()
            .with_target(true)
            .with_thread_ids(false)
            .with_ansi(true)
            .try_init();
    });
}

/// Foreign keys of the core OpenMRS tables, as introspection reports them.
///
/// `obs.encounter_id` is nullable and therefore absent; `encounter.provider_id`
/// references `person`; most tables reference `users` for audit columns.
#[must_use]
pub fn openmrs_schema() -> StaticSchema {
    let mut schema = StaticSchema::new();
    schema
        .add_foreign_key("users", "person", "person_id")
        .add_foreign_key("person", "users", "creator")
        .add_foreign_key("person_name", "person", "person_id")
        .add_foreign_key("person_name", "users", "creator")
        .add_foreign_key("person_address", "person", "person_id")
        .add_foreign_key("person_attribute", "person", "person_id")
        .add_foreign_key("person_attribute", "person_attribute_type", "person_attribute_type_id")
        .add_foreign_key("person_attribute_type", "users", "creator")
        .add_foreign_key("patient", "person", "patient_id")
        .add_foreign_key("patient", "users", "creator")
        .add_foreign_key("patient_identifier", "patient_identifier_type", "identifier_type")
        .add_foreign_key("patient_identifier", "location", "location_id")
        .add_foreign_key("patient_identifier", "users", "creator")
        .add_foreign_key("patient_identifier_type", "users", "creator")
        .add_foreign_key("encounter", "patient", "patient_id")
        .add_foreign_key("encounter", "encounter_type", "encounter_type")
        .add_foreign_key("encounter", "person", "provider_id")
        .add_foreign_key("encounter", "users", "creator")
        .add_foreign_key("encounter_type", "users", "creator")
        .add_foreign_key("obs", "person", "person_id")
        .add_foreign_key("obs", "concept", "concept_id")
        .add_foreign_key("obs", "location", "location_id")
        .add_foreign_key("obs", "users", "creator")
        .add_foreign_key("location", "users", "creator")
        .add_foreign_key("form", "users", "creator")
        .add_foreign_key("concept", "users", "creator")
        .add_foreign_key("patient_program", "patient", "patient_id")
        .add_foreign_key("patient_program", "program", "program_id")
        .add_foreign_key("program", "concept", "concept_id");
    schema
}

/// Build a template from `(header, table, column, group)` tuples.
#[must_use]
pub fn template_with_columns(
    name: &str,
    encounter: bool,
    columns: &[(&str, &str, &str, i32)],
) -> Template {
    let mut template = Template::new(name, encounter);
    for (header, table, column, group) in columns {
        template.add_column(*header, *table, *column, *group);
    }
    template
}

/// Id of the column whose spreadsheet header is `header`.
///
/// Panics when no such column exists.
#[must_use]
pub fn column_id(template: &Template, header: &str) -> ColumnId {
    template
        .columns()
        .iter()
        .find(|c| c.name() == header)
        .map(|c| c.id())
        .unwrap_or_else(|| panic!("template has no column '{header}'"))
}
