//! End-to-end CLI tests for the `myloader-rs` binary, covering the
//! configuration-error paths that exit before attempting a database
//! connection.

use assert_cmd::Command;
use predicates::prelude::*;
use tempfile::TempDir;

fn myloader() -> Command {
    Command::cargo_bin("myloader-rs").unwrap()
}

fn backup_dir() -> TempDir {
    let tmp = TempDir::new().unwrap();
    std::fs::write(tmp.path().join("metadata"), "").unwrap();
    tmp
}

#[test]
fn help_lists_directory_flag() {
    myloader()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--directory"));
}

#[test]
fn missing_directory_flag_is_a_usage_error() {
    myloader().assert().failure().stderr(predicate::str::contains("--directory"));
}

#[test]
fn nonexistent_directory_fails_before_connecting() {
    myloader()
        .args(["-d", "/no/such/path/for/myloader-rs-tests"])
        .assert()
        .failure();
}

#[test]
fn directory_missing_metadata_sentinel_is_rejected() {
    let tmp = TempDir::new().unwrap();
    myloader()
        .args(["-d"])
        .arg(tmp.path())
        .assert()
        .failure()
        .stderr(predicate::str::contains("not a mydumper-style backup"));
}

#[test]
fn unknown_purge_mode_is_rejected_before_connecting() {
    let tmp = backup_dir();
    myloader()
        .args(["-d"])
        .arg(tmp.path())
        .args(["--purge-mode", "WAT"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("unknown purge mode"));
}
