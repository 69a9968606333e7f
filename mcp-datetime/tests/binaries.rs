//! Exit status and output of the shipped executables.

use std::fs;

use assert_cmd::Command;
use predicates::prelude::*;
use serde_json::Value;

#[test]
fn generate_manifest_reports_success() {
    let dir = tempfile::tempdir().unwrap();

    Command::cargo_bin("generate-manifest")
        .unwrap()
        .current_dir(dir.path())
        .assert()
        .success()
        .stdout(predicate::eq("-> manifest.json generated successfully!\n"));

    let written: Value =
        serde_json::from_str(&fs::read_to_string(dir.path().join("manifest.json")).unwrap())
            .unwrap();
    assert_eq!(written["tool_name"], "MCP-DateTime");
    assert_eq!(written["actions"].as_array().unwrap().len(), 93);
}

#[test]
fn generate_manifest_fails_when_output_is_unwritable() {
    let dir = tempfile::tempdir().unwrap();
    fs::create_dir(dir.path().join("manifest.json")).unwrap();

    Command::cargo_bin("generate-manifest")
        .unwrap()
        .current_dir(dir.path())
        .assert()
        .failure()
        .stdout(predicate::str::contains("generated successfully").not());
}

#[test]
fn list_prints_every_schema() {
    let output = Command::cargo_bin("mcp-datetime")
        .unwrap()
        .arg("list")
        .assert()
        .success()
        .get_output()
        .stdout
        .clone();

    let specs: Value = serde_json::from_slice(&output).unwrap();
    assert_eq!(specs.as_array().unwrap().len(), 93);
}

#[test]
fn invoke_prints_json_result() {
    Command::cargo_bin("mcp-datetime")
        .unwrap()
        .args(["invoke", "addDays", r#"{"dateIso":"2025-04-17","days":3}"#])
        .assert()
        .success()
        .stdout("\"2025-04-20\"\n");
}

#[test]
fn invoke_failures_exit_non_zero() {
    Command::cargo_bin("mcp-datetime")
        .unwrap()
        .args(["invoke", "addDays", r#"{"dateIso":"2025-4-7","days":1}"#])
        .assert()
        .failure()
        .stdout(predicate::str::is_empty());

    Command::cargo_bin("mcp-datetime")
        .unwrap()
        .args(["invoke", "noSuchAction"])
        .assert()
        .failure();

    Command::cargo_bin("mcp-datetime")
        .unwrap()
        .args(["invoke", "addDays", "not json"])
        .assert()
        .failure();
}
