//! Smoke tests for the nestcheck CLI

#![allow(deprecated)] // Command::cargo_bin
#![allow(clippy::expect_used, clippy::unwrap_used)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

const FEATURE: &str = concat!(
    env!("CARGO_MANIFEST_DIR"),
    "/../nestcheck/features/pre_retirement_calculator.feature"
);

/// Get a command for the nestcheck binary
fn nestcheck() -> Command {
    let mut cmd = Command::cargo_bin("nestcheck").expect("nestcheck binary should exist");
    cmd.env_remove("RUST_LOG")
        .env_remove("NESTCHECK_BASE_URL")
        .env_remove("NESTCHECK_FIXTURES")
        .env_remove("NESTCHECK_CONFIG");
    cmd
}

// ============================================================================
// Basic CLI Tests
// ============================================================================

#[test]
fn test_version_flag() {
    nestcheck()
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_help_lists_subcommands() {
    nestcheck()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("run"))
        .stdout(predicate::str::contains("lint"))
        .stdout(predicate::str::contains("fixtures"));
}

#[test]
fn test_no_args_fails() {
    nestcheck().assert().failure();
}

// ============================================================================
// steps / fixtures
// ============================================================================

#[test]
fn test_steps_lists_vocabulary() {
    nestcheck()
        .args(["--color", "never", "steps"])
        .assert()
        .success()
        .stdout(predicate::str::contains("10 step bindings"))
        .stdout(predicate::str::contains(
            "User submits the retirement calculator form",
        ));
}

#[test]
fn test_steps_with_patterns() {
    nestcheck()
        .args(["steps", "--patterns"])
        .assert()
        .success()
        .stdout(predicate::str::contains("^social security benefits"));
}

#[test]
fn test_fixtures_bundled() {
    nestcheck()
        .args(["--color", "never", "fixtures"])
        .assert()
        .success()
        .stdout(predicate::str::contains("positive"))
        .stdout(predicate::str::contains("validAge30"))
        .stdout(predicate::str::contains("negative"));
}

#[test]
fn test_fixtures_negative_only() {
    nestcheck()
        .args(["fixtures", "--store", "negative"])
        .assert()
        .success()
        .stdout(predicate::str::contains("errorMsg"))
        .stdout(predicate::str::contains("customReturns").not());
}

#[test]
fn test_fixtures_from_directory() {
    let dir = TempDir::new().unwrap();
    fs::write(dir.path().join("positive.json"), r#"{"mine": {"currentAge": 40}}"#).unwrap();
    fs::write(dir.path().join("negative.json"), "{}").unwrap();
    nestcheck()
        .args(["fixtures", "--store", "positive", "--fixtures"])
        .arg(dir.path())
        .assert()
        .success()
        .stdout(predicate::str::contains("mine: currentAge"));
}

#[test]
fn test_fixtures_missing_directory() {
    nestcheck()
        .args(["fixtures", "--fixtures", "/nonexistent/fixtures"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("Error"));
}

// ============================================================================
// lint
// ============================================================================

#[test]
fn test_lint_bundled_feature() {
    nestcheck()
        .args(["--color", "never", "lint", FEATURE])
        .assert()
        .success()
        .stdout(predicate::str::contains("ok"));
}

#[test]
fn test_lint_reports_problems() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("broken.feature");
    fs::write(
        &path,
        "Feature: broken\n  Scenario: typo\n    Given User is on the pre-retirement calculator page\n    When User fills \"validAge31\" fields on the pre-retirement calculator page\n    And User jumps\n",
    )
    .unwrap();
    nestcheck()
        .args(["--color", "never", "lint"])
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("validAge31"))
        .stdout(predicate::str::contains("User jumps"))
        .stderr(predicate::str::contains("2 error(s)"));
}

#[test]
fn test_lint_parse_error() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("bad.feature");
    fs::write(&path, "Scenario: no feature line\n").unwrap();
    nestcheck()
        .args(["--color", "never", "lint"])
        .arg(&path)
        .assert()
        .failure()
        .stdout(predicate::str::contains("Gherkin syntax error"))
        .stderr(predicate::str::contains("1 error(s)"));
}

// ============================================================================
// run (argument handling only; no browser is started)
// ============================================================================

#[test]
fn test_run_requires_feature() {
    nestcheck().arg("run").assert().failure();
}

#[test]
fn test_run_rejects_bad_base_url() {
    nestcheck()
        .args(["run", FEATURE, "--base-url", "not-a-url"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("base_url"));
}

#[test]
fn test_run_rejects_bad_config_file() {
    let dir = TempDir::new().unwrap();
    let path = dir.path().join("nestcheck.yaml");
    fs::write(&path, "poll_interval_ms: 0\n").unwrap();
    nestcheck()
        .args(["run", FEATURE, "--config"])
        .arg(&path)
        .assert()
        .failure()
        .stderr(predicate::str::contains("poll_interval_ms"));
}

#[test]
fn test_run_with_no_matching_scenario() {
    nestcheck()
        .args(["run", FEATURE, "--tag", "nonexistent"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("no scenario matches"));
}
