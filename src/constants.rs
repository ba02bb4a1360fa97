//! Table and column names used throughout the simport codebase.
//!
//! The standard override rules in [`crate::resolver::OverrideRules::standard`]
//! are written against these names. Defining them centrally keeps the rule
//! set and the tests that exercise it in agreement.

/// Person table; also stands in for `patient` when a template only imports people.
pub const PERSON_TABLE: &str = "person";

/// Patient table, a specialisation of `person` sharing its identity.
pub const PATIENT_TABLE: &str = "patient";

/// Patient identifier cross-reference table.
pub const PATIENT_IDENTIFIER_TABLE: &str = "patient_identifier";

/// Observation table.
pub const OBS_TABLE: &str = "obs";

/// Encounter table.
pub const ENCOUNTER_TABLE: &str = "encounter";

pub const LOCATION_TABLE: &str = "location";

pub const FORM_TABLE: &str = "form";

/// User accounts. References to it never take part in import ordering.
pub const USERS_TABLE: &str = "users";

/// Primary key column of the patient table.
pub const PATIENT_ID_COLUMN: &str = "patient_id";

pub const ENCOUNTER_ID_COLUMN: &str = "encounter_id";

pub const LOCATION_ID_COLUMN: &str = "location_id";

pub const FORM_ID_COLUMN: &str = "form_id";

/// Encounter column referencing a person in the practitioner role.
pub const PROVIDER_ID_COLUMN: &str = "provider_id";

/// Suffix of the primary key column that placeholder values point at (`table.table_id`).
pub const PRIMARY_KEY_SUFFIX: &str = "_id";
