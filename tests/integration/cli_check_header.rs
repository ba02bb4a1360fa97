//! Tests for the `simport check-header` command.

use assert_cmd::Command;
use predicates::prelude::*;
use simport_cli::test_utils::TemplateFixture;
use tempfile::TempDir;

fn simport() -> Command {
    let mut cmd = Command::cargo_bin("simport").unwrap();
    cmd.env("NO_COLOR", "1").env_remove("RUST_LOG");
    cmd
}

#[test]
fn test_matching_header() {
    let temp = TempDir::new().unwrap();
    let template = TemplateFixture::registration().write_to(temp.path()).unwrap();

    simport()
        .arg("check-header")
        .arg("-t")
        .arg(&template)
        .arg("--header")
        .arg("Visit date,Gender,Birthdate")
        .assert()
        .success()
        .stdout(predicate::str::contains("Header matches template"));
}

#[test]
fn test_extra_and_missing_columns() {
    let temp = TempDir::new().unwrap();
    let template = TemplateFixture::registration().write_to(temp.path()).unwrap();

    simport()
        .arg("check-header")
        .arg("-t")
        .arg(&template)
        .arg("--header")
        .arg("Gender,Notes,Village,Phone")
        .assert()
        .success()
        .stdout(predicate::str::contains(
            "Template columns not in spreadsheet: Birthdate and Visit date",
        ))
        .stdout(predicate::str::contains(
            "Extra column names present, these will not be processed: Notes, Village, and Phone",
        ));
}

#[test]
fn test_cells_are_not_trimmed() {
    let temp = TempDir::new().unwrap();
    let template = TemplateFixture::registration().write_to(temp.path()).unwrap();

    let output = simport()
        .args(["check-header", "--format", "json", "-t"])
        .arg(&template)
        .arg("--header")
        .arg("Visit date, Gender,Birthdate")
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(json["missing"], serde_json::json!(["Gender"]));
    assert_eq!(json["extra"], serde_json::json!([" Gender"]));
}

#[test]
fn test_json_report() {
    let temp = TempDir::new().unwrap();
    let template = TemplateFixture::registration().write_to(temp.path()).unwrap();

    let output = simport()
        .args(["check-header", "--format", "json", "--header", "Gender,Notes", "-t"])
        .arg(&template)
        .assert()
        .success();

    let json: serde_json::Value = serde_json::from_slice(&output.get_output().stdout).unwrap();
    assert_eq!(json["missing"], serde_json::json!(["Birthdate", "Visit date"]));
    assert_eq!(json["extra"], serde_json::json!(["Notes"]));
    assert_eq!(json["empty_header"], false);
}

#[test]
fn test_empty_header_fails() {
    let temp = TempDir::new().unwrap();
    let template = TemplateFixture::registration().write_to(temp.path()).unwrap();

    simport()
        .arg("check-header")
        .arg("-t")
        .arg(&template)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Spreadsheet header row must not be empty"))
        .stderr(predicate::str::contains("Spreadsheet header row must not be empty"));
}
