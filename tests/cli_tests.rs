//! Binary smoke tests using assert_cmd

use assert_cmd::Command;
use predicates::prelude::*;

/// Helper to get an emptrack command
fn emptrack() -> Command {
    Command::cargo_bin("emptrack").unwrap()
}

#[test]
fn test_help_displays() {
    emptrack()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("departments, roles and employees"))
        .stdout(predicate::str::contains("EMPTRACK_DATABASE"));
}

#[test]
fn test_version_displays() {
    emptrack()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("emptrack"));
}

#[test]
fn test_unknown_flag_fails() {
    emptrack()
        .arg("--batch")
        .assert()
        .failure()
        .stderr(predicate::str::contains("error"));
}
