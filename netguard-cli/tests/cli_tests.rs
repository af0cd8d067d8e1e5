//! End-to-end CLI tests.

use assert_cmd::Command;
use predicates::prelude::*;
use std::path::Path;

fn write_sample(dir: &Path, name: &str, json: &str) -> std::path::PathBuf {
    let path = dir.join(name);
    std::fs::write(&path, json).unwrap();
    path
}

/// One resistor with a floating second pin and a dangling wire end:
/// warnings only, no errors.
const WARNING_DOC: &str = r#"{
    "id": "doc-1",
    "name": "warnings",
    "sheets": [{
        "id": "sheet-1",
        "name": "top",
        "components": [{
            "id": "c-1",
            "reference": "R1",
            "value": "10k",
            "position": {"x": 0.0, "y": 0.0},
            "symbol": {"pins": [
                {"id": "p-1", "name": "A", "number": "1",
                 "electrical_type": "passive", "position": {"x": 0.0, "y": 0.0}},
                {"id": "p-2", "name": "B", "number": "2",
                 "electrical_type": "passive", "position": {"x": 10.0, "y": 0.0}}
            ]}
        }],
        "wires": [{
            "id": "w-1",
            "points": [{"x": 0.0, "y": 0.0}, {"x": 0.0, "y": 40.0}]
        }]
    }]
}"#;

/// Two components sharing the reference R1: one hard error.
const ERROR_DOC: &str = r#"{
    "id": "doc-2",
    "name": "errors",
    "sheets": [{
        "id": "sheet-1",
        "name": "top",
        "components": [
            {"id": "c-1", "reference": "R1", "value": "10k",
             "position": {"x": 0.0, "y": 0.0}},
            {"id": "c-2", "reference": "R1", "value": "22k",
             "position": {"x": 100.0, "y": 0.0}}
        ]
    }]
}"#;

#[test]
fn check_reports_violations_human() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path(), "warnings.sch.json", WARNING_DOC);

    Command::cargo_bin("netguard")
        .unwrap()
        .args(["check"])
        .arg(&path)
        .assert()
        .success()
        .stdout(predicate::str::contains("WARNINGS:"))
        .stdout(predicate::str::contains("is not connected"));
}

#[test]
fn check_fail_on_error_passes_on_warnings_only() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path(), "warnings.sch.json", WARNING_DOC);

    Command::cargo_bin("netguard")
        .unwrap()
        .args(["check"])
        .arg(&path)
        .args(["--fail-on", "error"])
        .assert()
        .success();
}

#[test]
fn check_fail_on_warning_fails() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path(), "warnings.sch.json", WARNING_DOC);

    Command::cargo_bin("netguard")
        .unwrap()
        .args(["check"])
        .arg(&path)
        .args(["--fail-on", "warning"])
        .assert()
        .code(1);
}

#[test]
fn check_fail_on_error_fails_on_duplicate_reference() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path(), "errors.sch.json", ERROR_DOC);

    Command::cargo_bin("netguard")
        .unwrap()
        .args(["check"])
        .arg(&path)
        .args(["--fail-on", "error"])
        .assert()
        .code(1);
}

#[test]
fn check_json_output_is_machine_readable() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path(), "errors.sch.json", ERROR_DOC);

    let output = Command::cargo_bin("netguard")
        .unwrap()
        .args(["check"])
        .arg(&path)
        .args(["--format", "json"])
        .output()
        .unwrap();

    let parsed: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(parsed["summary"]["errors"], 1);
}

#[test]
fn check_github_format_emits_annotations() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path(), "errors.sch.json", ERROR_DOC);

    Command::cargo_bin("netguard")
        .unwrap()
        .args(["check"])
        .arg(&path)
        .args(["--format", "github"])
        .assert()
        .success()
        .stdout(predicate::str::contains("::error file="));
}

#[test]
fn check_rule_filter_limits_output() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path(), "warnings.sch.json", WARNING_DOC);

    Command::cargo_bin("netguard")
        .unwrap()
        .args(["check"])
        .arg(&path)
        .args(["--rule", "duplicate_reference"])
        .assert()
        .success()
        .stdout(predicate::str::contains("No violations found"));
}

#[test]
fn extract_emits_netlist_json() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path(), "warnings.sch.json", WARNING_DOC);

    let output = Command::cargo_bin("netguard")
        .unwrap()
        .args(["extract"])
        .arg(&path)
        .output()
        .unwrap();

    let netlist: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(netlist["components"][0]["reference"], "R1");
}

#[test]
fn invalid_document_errors_out() {
    let dir = tempfile::tempdir().unwrap();
    let path = write_sample(dir.path(), "broken.sch.json", "{ not json");

    Command::cargo_bin("netguard")
        .unwrap()
        .args(["check"])
        .arg(&path)
        .assert()
        .code(1)
        .stderr(predicate::str::contains("Invalid document"));
}

#[test]
fn project_walks_directory() {
    let dir = tempfile::tempdir().unwrap();
    write_sample(dir.path(), "a.sch.json", WARNING_DOC);
    write_sample(dir.path(), "b.sch.json", ERROR_DOC);

    Command::cargo_bin("netguard")
        .unwrap()
        .args(["project"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("a.sch.json"))
        .stdout(predicate::str::contains("b.sch.json"));
}

#[test]
fn rules_lists_all_six() {
    Command::cargo_bin("netguard")
        .unwrap()
        .args(["rules"])
        .assert()
        .success()
        .stdout(predicate::str::contains("unconnected_pin"))
        .stdout(predicate::str::contains("missing_net_label"));
}
