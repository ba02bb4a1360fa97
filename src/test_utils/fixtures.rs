//! Test fixtures for template, schema and override rule files

use anyhow::Result;
use std::fs;
use std::path::{Path, PathBuf};

/// Sample template definition file
#[derive(Clone, Debug)]
pub struct TemplateFixture {
    pub content: String,
    pub name: String,
}

impl TemplateFixture {
    /// Person and encounter columns in one encounter-centric template
    pub fn registration() -> Self {
        Self {
            name: "registration".to_string(),
            content: r#"
name = "Registration"
encounter = true

[[columns]]
name = "Gender"
table = "person"
column = "gender"

[[columns]]
name = "Birthdate"
table = "person"
column = "birthdate"

[[columns]]
name = "Visit date"
table = "encounter"
column = "encounter_datetime"
"#
            .trim()
            .to_string(),
        }
    }

    /// Patient with an identifier, names and two observation slots
    pub fn patient_with_obs() -> Self {
        Self {
            name: "patient_with_obs".to_string(),
            content: r#"
name = "Patient intake"
encounter = true

[[columns]]
name = "Identifier"
table = "patient_identifier"
column = "identifier"

[[columns]]
name = "Given name"
table = "person_name"
column = "given_name"

[[columns]]
name = "Family name"
table = "person_name"
column = "family_name"

[[columns]]
name = "Gender"
table = "person"
column = "gender"

[[columns]]
name = "Patient"
table = "patient"
column = "patient_id"

[[columns]]
name = "Visit date"
table = "encounter"
column = "encounter_datetime"

[[columns]]
name = "Weight"
table = "obs"
column = "value_numeric"
group = 1

[[columns]]
name = "Height"
table = "obs"
column = "value_numeric"
group = 2

[prespecified]
"location.location_id" = "1"
"#
            .trim()
            .to_string(),
        }
    }

    /// Template file that is not valid TOML
    pub fn invalid_syntax() -> Self {
        Self {
            name: "invalid_syntax".to_string(),
            content: r#"
name = "Broken"

[[columns]
name = "Gender"
"#
            .trim()
            .to_string(),
        }
    }

    /// Write the fixture as `<name>.toml` in `dir`
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(format!("{}.toml", self.name));
        fs::write(&path, &self.content)?;
        Ok(path)
    }
}

/// Sample schema description file
#[derive(Clone, Debug)]
pub struct SchemaFixture {
    pub content: String,
    pub name: String,
}

impl SchemaFixture {
    /// The OpenMRS tables used by the template fixtures
    pub fn openmrs() -> Self {
        Self {
            name: "schema".to_string(),
            content: r#"
[tables.users]
person = "person_id"

[tables.person]
users = "creator"

[tables.person_name]
person = "person_id"
users = "creator"

[tables.patient]
person = "patient_id"
users = "creator"

[tables.patient_identifier]
patient_identifier_type = "identifier_type"
location = "location_id"
users = "creator"

[tables.encounter]
patient = "patient_id"
encounter_type = "encounter_type"
person = "provider_id"
users = "creator"

[tables.obs]
person = "person_id"
concept = "concept_id"
location = "location_id"
users = "creator"
"#
            .trim()
            .to_string(),
        }
    }

    /// Two tables referencing each other
    pub fn cyclic() -> Self {
        Self {
            name: "cyclic".to_string(),
            content: r#"
[tables.person]
person_name = "preferred_name_id"

[tables.person_name]
person = "person_id"
"#
            .trim()
            .to_string(),
        }
    }

    /// Write the fixture as `<name>.toml` in `dir`
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(format!("{}.toml", self.name));
        fs::write(&path, &self.content)?;
        Ok(path)
    }
}

/// Sample override rules file
#[derive(Clone, Debug)]
pub struct RulesFixture {
    pub content: String,
    pub name: String,
}

impl RulesFixture {
    /// Ignore the concept and identifier type references
    pub fn drop_lookups() -> Self {
        Self {
            name: "rules".to_string(),
            content: r#"
[[rules]]
table = "obs"
action = "drop"
parent = "concept"

[[rules]]
table = "patient_identifier"
action = "drop"
parent = "patient_identifier_type"
"#
            .trim()
            .to_string(),
        }
    }

    /// Write the fixture as `<name>.toml` in `dir`
    pub fn write_to(&self, dir: &Path) -> Result<PathBuf> {
        let path = dir.join(format!("{}.toml", self.name));
        fs::write(&path, &self.content)?;
        Ok(path)
    }
}
