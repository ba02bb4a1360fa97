//! Tests for the `simport resolve` command.

use assert_cmd::Command;
use predicates::prelude::*;
use simport_cli::test_utils::{RulesFixture, SchemaFixture, TemplateFixture};
use std::fs;
use tempfile::TempDir;

fn simport() -> Command {
    let mut cmd = Command::cargo_bin("simport").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_resolve_text_output() {
    let temp = TempDir::new().unwrap();
    let template = TemplateFixture::patient_with_obs().write_to(temp.path()).unwrap();
    let schema = SchemaFixture::openmrs().write_to(temp.path()).unwrap();

    simport()
        .arg("resolve")
        .arg("--template")
        .arg(&template)
        .arg("--schema")
        .arg(&schema)
        .assert()
        .success()
        .stdout(predicate::str::contains("Patient intake"))
        .stdout(predicate::str::contains("Table order:"))
        .stdout(predicate::str::contains("1. person"))
        .stdout(predicate::str::contains("6. person_name"))
        .stdout(predicate::str::contains("after Visit date via encounter_id"))
        .stdout(predicate::str::contains("location.location_id = 1"))
        .stdout(predicate::str::contains("form.form_id = unset"));
}

#[test]
fn test_resolve_json_output() {
    let temp = TempDir::new().unwrap();
    let template = TemplateFixture::registration().write_to(temp.path()).unwrap();
    let schema = SchemaFixture::openmrs().write_to(temp.path()).unwrap();

    let output = simport()
        .args(["resolve", "--format", "json", "-t"])
        .arg(&template)
        .arg("-s")
        .arg(&schema)
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(json["template"], "Registration");
    assert_eq!(json["encounter"], true);
    assert_eq!(json["table_order"], serde_json::json!(["person", "encounter"]));

    let columns = json["columns"].as_array().unwrap();
    assert_eq!(columns.len(), 3);
    assert_eq!(columns[2]["name"], "Visit date");
    assert_eq!(columns[2]["import_idx"], 2);
    assert_eq!(columns[2]["import_before"][0]["column_name"], "patient_id");

    let keys: Vec<_> = json["prespecified_values"]
        .as_array()
        .unwrap()
        .iter()
        .map(|v| v["table_dot_column"].as_str().unwrap().to_string())
        .collect();
    assert_eq!(keys, ["encounter_type.encounter_type_id", "form.form_id", "location.location_id"]);
}

#[test]
fn test_resolve_with_rules_file() {
    let temp = TempDir::new().unwrap();
    let template = TemplateFixture::patient_with_obs().write_to(temp.path()).unwrap();
    let schema = SchemaFixture::openmrs().write_to(temp.path()).unwrap();
    let rules = RulesFixture::drop_lookups().write_to(temp.path()).unwrap();

    simport()
        .arg("resolve")
        .arg("-t")
        .arg(&template)
        .arg("-s")
        .arg(&schema)
        .arg("--rules")
        .arg(&rules)
        .assert()
        .success()
        .stdout(predicate::str::contains("concept.concept_id").not())
        .stdout(predicate::str::contains("patient_identifier_type").not());
}

#[test]
fn test_resolve_without_standard_rules() {
    let temp = TempDir::new().unwrap();
    let template = TemplateFixture::registration().write_to(temp.path()).unwrap();
    let schema = SchemaFixture::openmrs().write_to(temp.path()).unwrap();

    // Without the alias the patient reference is a placeholder, and users is kept
    simport()
        .arg("resolve")
        .arg("-t")
        .arg(&template)
        .arg("-s")
        .arg(&schema)
        .arg("--no-standard-rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("patient.patient_id = unset"))
        .stdout(predicate::str::contains("users.users_id = unset"))
        .stdout(predicate::str::contains("form.form_id").not());
}

#[test]
fn test_resolve_reports_cycles() {
    let temp = TempDir::new().unwrap();
    let schema = SchemaFixture::cyclic().write_to(temp.path()).unwrap();
    let template = temp.path().join("names.toml");
    fs::write(
        &template,
        r#"
name = "Names"

[[columns]]
name = "Gender"
table = "person"
column = "gender"

[[columns]]
name = "Given name"
table = "person_name"
column = "given_name"
"#,
    )
    .unwrap();

    simport()
        .arg("resolve")
        .arg("-t")
        .arg(&template)
        .arg("-s")
        .arg(&schema)
        .assert()
        .failure()
        .stderr(predicate::str::contains(
            "Circular dependency detected: person_name → person → person_name",
        ))
        .stderr(predicate::str::contains("suggestion"));
}

#[test]
fn test_resolve_unknown_table() {
    let temp = TempDir::new().unwrap();
    let template = TemplateFixture::registration().write_to(temp.path()).unwrap();
    let schema = SchemaFixture::cyclic().write_to(temp.path()).unwrap();

    simport()
        .arg("resolve")
        .arg("-t")
        .arg(&template)
        .arg("-s")
        .arg(&schema)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Table 'encounter' has no introspectable schema"))
        .stderr(predicate::str::contains("[tables.encounter]"));
}

#[test]
fn test_resolve_invalid_template_file() {
    let temp = TempDir::new().unwrap();
    let template = TemplateFixture::invalid_syntax().write_to(temp.path()).unwrap();
    let schema = SchemaFixture::openmrs().write_to(temp.path()).unwrap();

    simport()
        .arg("resolve")
        .arg("-t")
        .arg(&template)
        .arg("-s")
        .arg(&schema)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Invalid template file syntax"));
}

#[test]
fn test_resolve_missing_file() {
    let temp = TempDir::new().unwrap();
    let schema = SchemaFixture::openmrs().write_to(temp.path()).unwrap();

    simport()
        .arg("resolve")
        .arg("-t")
        .arg(temp.path().join("missing.toml"))
        .arg("-s")
        .arg(&schema)
        .assert()
        .failure()
        .stderr(predicate::str::contains("Failed to read template file"));
}
