//! CLI argument parsing and exit code tests.

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use std::path::Path;
use tempfile::TempDir;

const GOA: &str = r#"{
  "id": "C1",
  "name": "Goa",
  "state": "Goa",
  "country": "India",
  "coordinates": {"latitude": 15.29, "longitude": 74.12},
  "description": {"en": "Beaches and churches."},
  "timezone": "IST",
  "group_size": {"min": 1, "max": 12},
  "weather_alert": {"sources": ["IMD"], "thresholds": {"rain_mm": 50}},
  "points_of_interest": [{
    "id": "GO1",
    "name": {"en": "Baga Beach", "hi": "बागा बीच"},
    "description": {"en": "Lively beach.", "hi": "जीवंत समुद्र तट"},
    "category": "beach",
    "coordinates": {"latitude": 15.55, "longitude": 73.75},
    "rating": 4.4,
    "cost": [{"type": "entry", "amount": 0, "currency": "XXX"}]
  }],
  "transport": {"taxi": {"currency": "INR", "per_day": 2500}},
  "featured": true
}"#;

fn destcheck() -> Command {
    Command::cargo_bin("destcheck").expect("destcheck binary")
}

fn create_temp_dataset() -> TempDir {
    let td = tempfile::tempdir().expect("tempdir");
    fs::write(td.path().join("goa.json"), GOA).unwrap();
    td
}

fn read_json(path: &Path) -> serde_json::Value {
    serde_json::from_str(&fs::read_to_string(path).unwrap()).unwrap()
}

#[test]
fn test_validate_no_args_uses_current_dir() {
    let temp = create_temp_dataset();

    destcheck()
        .current_dir(temp.path())
        .arg("validate")
        .assert()
        .code(2)
        .stdout(predicate::str::starts_with("destcheck: FAIL"));

    assert!(temp.path().join("validation_report.json").exists());
    assert!(temp.path().join("validation_report.md").exists());
}

#[test]
fn test_validate_report_only_leaves_dataset_untouched() {
    let temp = create_temp_dataset();

    destcheck()
        .arg("validate")
        .arg(temp.path())
        .assert()
        .code(2)
        .stdout(predicate::str::contains("[report only]"));

    assert_eq!(fs::read_to_string(temp.path().join("goa.json")).unwrap(), GOA);
    assert!(!temp.path().join("goa.json.destcheck.bak").exists());
}

#[test]
fn test_validate_fix_repairs_and_passes() {
    let temp = create_temp_dataset();

    destcheck()
        .arg("validate")
        .arg(temp.path())
        .arg("--fix")
        .assert()
        .success()
        .stdout(predicate::str::starts_with("destcheck: PASS"))
        .stdout(predicate::str::contains("updated: "))
        .stdout(predicate::str::contains("backup: "));

    let repaired = read_json(&temp.path().join("goa.json"));
    assert_eq!(repaired["timezone"], "Asia/Kolkata");
    assert_eq!(repaired["points_of_interest"][0]["cost"][0]["currency"], "INR");
    assert!(temp.path().join("goa.json.destcheck.bak").exists());

    // Repaired data now passes without fix mode.
    destcheck()
        .arg("validate")
        .arg(temp.path())
        .assert()
        .success();
}

#[test]
fn test_validate_fix_no_write_keeps_files() {
    let temp = create_temp_dataset();

    destcheck()
        .arg("validate")
        .arg(temp.path())
        .arg("--fix")
        .arg("--no-write")
        .assert()
        .success()
        .stdout(predicate::str::contains("updated: ").not());

    assert_eq!(fs::read_to_string(temp.path().join("goa.json")).unwrap(), GOA);
    let report = read_json(&temp.path().join("validation_report.json"));
    assert_eq!(report["fix_mode"], true);
    assert!(!report["fixes"].as_array().unwrap().is_empty());
}

#[test]
fn test_no_write_requires_fix() {
    let temp = create_temp_dataset();

    destcheck()
        .arg("validate")
        .arg(temp.path())
        .arg("--no-write")
        .assert()
        .failure()
        .stderr(predicate::str::contains("--fix"));
}

#[test]
fn test_validate_no_backup() {
    let temp = create_temp_dataset();

    destcheck()
        .arg("validate")
        .arg(temp.path())
        .arg("--fix")
        .arg("--no-backup")
        .assert()
        .success();

    assert!(!temp.path().join("goa.json.destcheck.bak").exists());
}

#[test]
fn test_validate_out_dir_and_report_name() {
    let temp = create_temp_dataset();
    let out = temp.path().join("reports");

    destcheck()
        .arg("validate")
        .arg(temp.path())
        .arg("--out-dir")
        .arg(&out)
        .arg("--report-name")
        .arg("nightly")
        .assert()
        .code(2);

    assert!(out.join("nightly.json").exists());
    assert!(out.join("nightly.md").exists());
    assert!(!temp.path().join("validation_report.json").exists());
}

#[test]
fn test_validate_json_format() {
    let temp = create_temp_dataset();

    let output = destcheck()
        .arg("validate")
        .arg(temp.path())
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2));

    let report: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    assert_eq!(report["schema"], "destcheck.report.v1");
    assert_eq!(report["summary"]["status"], "FAIL");
}

#[test]
fn test_duplicate_deny_flags_disable_rules() {
    let temp = create_temp_dataset();

    // Every error in the fixture comes from these rules.
    destcheck()
        .arg("validate")
        .arg(temp.path())
        .arg("--deny")
        .arg("city.*")
        .arg("--deny")
        .arg("poi.*")
        .arg("--deny")
        .arg("completeness")
        .arg("--deny")
        .arg("categories")
        .assert()
        .success();
}

#[test]
fn test_allow_flag_limits_rules() {
    let temp = create_temp_dataset();

    destcheck()
        .arg("validate")
        .arg(temp.path())
        .arg("--allow")
        .arg("transport")
        .assert()
        .success();
}

#[test]
fn test_parallel_flag_same_verdict() {
    let temp = create_temp_dataset();

    destcheck()
        .arg("validate")
        .arg(temp.path())
        .arg("--parallel")
        .assert()
        .code(2);
}

#[test]
fn test_config_file_is_discovered() {
    let temp = create_temp_dataset();
    fs::write(
        temp.path().join("destcheck.toml"),
        "[policy]\nallow = [\"transport\"]\n\n[output]\nreport_name = \"from_config\"\n",
    )
    .unwrap();

    destcheck()
        .arg("validate")
        .arg(temp.path())
        .assert()
        .success();

    assert!(temp.path().join("from_config.json").exists());
}

#[test]
fn test_explicit_config_path() {
    let temp = create_temp_dataset();
    let cfg_dir = tempfile::tempdir().unwrap();
    let cfg = cfg_dir.path().join("custom.toml");
    fs::write(&cfg, "[policy]\ndeny = [\"*\"]\n").unwrap();

    destcheck()
        .arg("validate")
        .arg(temp.path())
        .arg("--config")
        .arg(&cfg)
        .assert()
        .success();
}

#[test]
fn test_invalid_config_is_runtime_error() {
    let temp = create_temp_dataset();
    fs::write(temp.path().join("destcheck.toml"), "[policy\n").unwrap();

    destcheck()
        .arg("validate")
        .arg(temp.path())
        .assert()
        .code(1);
}

#[test]
fn test_malformed_dataset_exits_one_without_report() {
    let temp = create_temp_dataset();
    fs::write(temp.path().join("broken.json"), "{\"id\": ").unwrap();

    destcheck()
        .arg("validate")
        .arg(temp.path())
        .assert()
        .code(1);

    assert!(!temp.path().join("validation_report.json").exists());
}

#[test]
fn test_nonexistent_path() {
    destcheck()
        .arg("validate")
        .arg("/nonexistent/path/that/does/not/exist")
        .assert()
        .code(1);
}

#[test]
fn test_empty_directory() {
    let temp = tempfile::tempdir().unwrap();

    destcheck()
        .arg("validate")
        .arg(temp.path())
        .assert()
        .code(1);
}

#[test]
fn test_single_file_input() {
    let temp = create_temp_dataset();

    destcheck()
        .arg("validate")
        .arg(temp.path().join("goa.json"))
        .assert()
        .code(2);

    assert!(temp.path().join("validation_report.json").exists());
}

#[test]
fn test_list_rules_text_format() {
    destcheck()
        .arg("list-rules")
        .assert()
        .success()
        .stdout(predicate::str::contains("Available rules"))
        .stdout(predicate::str::contains("poi.fields"))
        .stdout(predicate::str::contains("id.conventions"));
}

#[test]
fn test_list_rules_json_format() {
    let output = destcheck()
        .arg("list-rules")
        .arg("--format")
        .arg("json")
        .output()
        .unwrap();
    assert!(output.status.success());

    let rules: serde_json::Value = serde_json::from_slice(&output.stdout).unwrap();
    let rules = rules.as_array().unwrap();
    assert_eq!(rules.len(), 13);
    assert_eq!(rules[0]["id"], "city.fields");
}

#[test]
fn test_list_rules_invalid_format() {
    destcheck()
        .arg("list-rules")
        .arg("--format")
        .arg("yaml")
        .assert()
        .failure();
}

#[test]
fn test_explain_valid_rule() {
    destcheck()
        .arg("explain")
        .arg("poi.best_time")
        .assert()
        .success()
        .stdout(predicate::str::contains("Rule ID:  poi.best_time"))
        .stdout(predicate::str::contains("REMEDIATION GUIDANCE"));
}

#[test]
fn test_explain_invalid_rule() {
    destcheck()
        .arg("explain")
        .arg("no.such.rule")
        .assert()
        .code(1)
        .stderr(predicate::str::contains("unknown rule"));
}

#[test]
fn test_explain_case_insensitive() {
    destcheck()
        .arg("explain")
        .arg("CITY.GROUP-SIZE")
        .assert()
        .success()
        .stdout(predicate::str::contains("city.group_size"));
}

#[test]
fn test_unknown_subcommand() {
    destcheck().arg("unknown-command").assert().failure();
}

#[test]
fn test_help_flag() {
    destcheck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("validate"))
        .stdout(predicate::str::contains("list-rules"));
}

#[test]
fn test_version_flag() {
    destcheck()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("destcheck"));
}
