//! Integration tests for the `forticsv` binary.
//!
//! Validate argument parsing, help output, and the invalid-item exit
//! contract — all without a live firewall.
#![allow(clippy::unwrap_used)]

use assert_cmd::cargo::cargo_bin_cmd;
use predicates::prelude::*;

// ── Helpers ─────────────────────────────────────────────────────────

/// Build a [`Command`] for the `forticsv` binary with env isolation so
/// tests never pick up a developer's `FORTICSV_*` variables.
fn forticsv_cmd() -> assert_cmd::Command {
    let mut cmd = cargo_bin_cmd!("forticsv");
    cmd.env_remove("FORTICSV_FIREWALL")
        .env_remove("FORTICSV_PORT")
        .env_remove("FORTICSV_USER")
        .env_remove("FORTICSV_VDOM")
        .env_remove("FORTICSV_INSECURE")
        .env_remove("FORTICSV_CA_CERT")
        .env_remove("FORTICSV_TIMEOUT");
    cmd
}

fn combined_output(output: &std::process::Output) -> String {
    let stdout = String::from_utf8_lossy(&output.stdout);
    let stderr = String::from_utf8_lossy(&output.stderr);
    format!("{stdout}{stderr}")
}

// ── Basic invocation ────────────────────────────────────────────────

#[test]
fn test_help_flag() {
    forticsv_cmd().arg("--help").assert().success().stdout(
        predicate::str::contains("FortiGate")
            .and(predicate::str::contains("--item"))
            .and(predicate::str::contains("--translate"))
            .and(predicate::str::contains("--insecure")),
    );
}

#[test]
fn test_version_flag() {
    forticsv_cmd()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains("forticsv"));
}

#[test]
fn test_help_documents_password_prompt() {
    forticsv_cmd()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("prompted"));
}

// ── Usage errors (clap, exit 2) ─────────────────────────────────────

#[test]
fn test_missing_required_flags() {
    let output = forticsv_cmd().output().unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code 2");
    let text = combined_output(&output);
    assert!(
        text.contains("--firewall") && text.contains("--user"),
        "Expected both required flags in usage error:\n{text}"
    );
}

#[test]
fn test_insecure_conflicts_with_ca_cert() {
    let output = forticsv_cmd()
        .args([
            "-f", "fw1", "-u", "admin", "--insecure", "--ca-cert", "/tmp/ca.pem",
        ])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(2), "Expected usage exit code 2");
}

// ── Invalid item (exit 1 contract) ──────────────────────────────────

#[test]
fn test_invalid_item_exits_one_with_valid_set() {
    let output = forticsv_cmd()
        .args(["-f", "fw1", "-u", "admin", "-i", "bogus"])
        .output()
        .unwrap();
    assert_eq!(output.status.code(), Some(1), "Expected exit code 1");
    let text = combined_output(&output);
    assert!(
        text.contains("bogus"),
        "Expected offending value in output:\n{text}"
    );
    assert!(
        text.contains("addrgrp") && text.contains("all"),
        "Expected the valid item list in output:\n{text}"
    );
}

#[test]
fn test_item_validation_precedes_password_prompt() {
    // With a bad item the process must fail before reading anything,
    // even with stdin closed.
    forticsv_cmd()
        .args(["-f", "fw1", "-u", "admin", "-i", "nonsense"])
        .write_stdin("")
        .assert()
        .failure()
        .code(1);
}
