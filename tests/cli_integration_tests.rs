//! CLI integration tests
//!
//! Tests the `insight` binary directly using assert_cmd.

use assert_cmd::Command;
use predicates::prelude::*;
use rust_xlsxwriter::Workbook;
use std::path::{Path, PathBuf};
use tempfile::TempDir;

fn write_workbook(dir: &Path, name: &str, rows: &[(&str, f64)]) -> PathBuf {
    let path = dir.join(name);
    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();

    worksheet.write_string(0, 0, "Category").unwrap();
    worksheet.write_string(0, 1, "Amount").unwrap();
    for (i, (category, amount)) in rows.iter().enumerate() {
        let row = (i + 1) as u32;
        worksheet.write_string(row, 0, *category).unwrap();
        worksheet.write_number(row, 1, *amount).unwrap();
    }

    workbook.save(&path).unwrap();
    path
}

// ═══════════════════════════════════════════════════════════════════════════
// HELP AND VERSION TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_cli_help() {
    let mut cmd = Command::cargo_bin("insight").unwrap();
    cmd.arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("insight"))
        .stdout(predicate::str::contains("analyze"));
}

#[test]
fn test_cli_version() {
    let mut cmd = Command::cargo_bin("insight").unwrap();
    cmd.arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("insight"));
}

#[test]
fn test_analyze_help() {
    let mut cmd = Command::cargo_bin("insight").unwrap();
    cmd.args(["analyze", "--help"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Compare estimate vs actual"));
}

// ═══════════════════════════════════════════════════════════════════════════
// ANALYZE COMMAND TESTS
// ═══════════════════════════════════════════════════════════════════════════

#[test]
fn test_analyze_prints_variance_and_summary() {
    let dir = TempDir::new().unwrap();
    let estimate = write_workbook(
        dir.path(),
        "estimate.xlsx",
        &[("Labor", 50000.0), ("Materials", 25000.0)],
    );
    let actual = write_workbook(
        dir.path(),
        "actual.xlsx",
        &[
            ("Labor", 55000.0),
            ("Materials", 22000.0),
            ("Permits", 3500.0),
        ],
    );

    let mut cmd = Command::cargo_bin("insight").unwrap();
    cmd.arg("analyze")
        .arg(&estimate)
        .arg(&actual)
        .args(["--project-name", "Sample Project"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Sample Project"))
        .stdout(predicate::str::contains("Labor"))
        .stdout(predicate::str::contains("Permits"))
        .stdout(predicate::str::contains("Match rate: 100%"))
        .stdout(predicate::str::contains("OVER BUDGET"));
}

#[test]
fn test_analyze_exports_xlsx_report() {
    let dir = TempDir::new().unwrap();
    let estimate = write_workbook(dir.path(), "estimate.xlsx", &[("Labor", 100.0)]);
    let actual = write_workbook(dir.path(), "actual.xlsx", &[("Labor", 90.0)]);
    let output = dir.path().join("report.xlsx");

    let mut cmd = Command::cargo_bin("insight").unwrap();
    cmd.arg("analyze")
        .arg(&estimate)
        .arg(&actual)
        .arg("-o")
        .arg(&output)
        .assert()
        .success()
        .stdout(predicate::str::contains("Report exported"));

    assert!(output.exists());
}

#[test]
fn test_analyze_exports_json_report() {
    let dir = TempDir::new().unwrap();
    let estimate = write_workbook(dir.path(), "estimate.xlsx", &[("Labor", 100.0)]);
    let actual = write_workbook(dir.path(), "actual.xlsx", &[("Labor", 110.0)]);
    let output = dir.path().join("report.json");

    let mut cmd = Command::cargo_bin("insight").unwrap();
    cmd.arg("analyze")
        .arg(&estimate)
        .arg(&actual)
        .arg("-o")
        .arg(&output)
        .assert()
        .success();

    let json: serde_json::Value =
        serde_json::from_str(&std::fs::read_to_string(&output).unwrap()).unwrap();
    assert_eq!(json["summary"]["total_variance"], 10.0);
}

#[test]
fn test_analyze_show_prompt_prints_narrative_prompt() {
    let dir = TempDir::new().unwrap();
    let estimate = write_workbook(dir.path(), "estimate.xlsx", &[("Labor", 100.0)]);
    let actual = write_workbook(dir.path(), "actual.xlsx", &[("Labor", 120.0)]);

    let mut cmd = Command::cargo_bin("insight").unwrap();
    cmd.arg("analyze")
        .arg(&estimate)
        .arg(&actual)
        .arg("--show-prompt")
        .assert()
        .success()
        .stdout(predicate::str::contains("senior financial analyst"));
}

#[test]
fn test_analyze_missing_file_fails() {
    let mut cmd = Command::cargo_bin("insight").unwrap();
    cmd.args(["analyze", "no_estimate.xlsx", "no_actual.xlsx"])
        .assert()
        .failure();
}

#[test]
fn test_analyze_requires_both_files() {
    let mut cmd = Command::cargo_bin("insight").unwrap();
    cmd.args(["analyze", "only_one.xlsx"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("ACTUAL"));
}
