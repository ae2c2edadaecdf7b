use std::fs;
use std::process::Command;

use assert_cmd::prelude::*;
use predicates::prelude::*;

// ============================================================================
// seed-msisdns
// ============================================================================

#[test]
fn seed_populates_reference_table() {
    let dir = tempfile::tempdir().unwrap();
    let database = dir.path().join("cdr.db");

    Command::new(assert_cmd::cargo::cargo_bin!("seed-msisdns"))
        .arg("--database")
        .arg(&database)
        .assert()
        .success()
        .stdout(predicate::str::contains("20 subscribers added"));

    Command::new(assert_cmd::cargo::cargo_bin!("seed-msisdns"))
        .arg("--database")
        .arg(&database)
        .assert()
        .success()
        .stdout(predicate::str::contains("0 subscribers added"));
}

// ============================================================================
// cdr-generator
// ============================================================================

#[test]
fn generates_requested_periods() {
    let dir = tempfile::tempdir().unwrap();
    let output = dir.path().join("resources");

    Command::new(assert_cmd::cargo::cargo_bin!("cdr-generator"))
        .arg("--database")
        .arg(dir.path().join("cdr.db"))
        .arg("--output-dir")
        .arg(&output)
        .args(&["--periods", "3", "--seed", "5", "--seed-msisdns"])
        .assert()
        .success()
        .stdout(predicate::str::contains("03_CDR.txt").and(predicate::str::contains("Committed")));

    let files = fs::read_dir(output.join("CDRs")).unwrap().count();
    assert_eq!(files, 3);
}

#[test]
fn missing_reference_table_fails() {
    let dir = tempfile::tempdir().unwrap();

    Command::new(assert_cmd::cargo::cargo_bin!("cdr-generator"))
        .arg("--database")
        .arg(dir.path().join("empty.db"))
        .arg("--output-dir")
        .arg(dir.path())
        .args(&["--periods", "1"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error: database error"));
}

#[test]
fn invalid_periods_fails() {
    Command::new(assert_cmd::cargo::cargo_bin!("cdr-generator"))
        .args(&["--periods", "0"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("periods must be at least 1"));
}
