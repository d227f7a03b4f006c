//! End-to-end tests for the depbot CLI
//!
//! These tests verify:
//! - Help and version output
//! - Configuration errors are reported before any remote call
//! - Exit codes are correct for failing runs

#![allow(deprecated)]

use assert_cmd::Command;
use predicates::prelude::*;
use std::fs;
use tempfile::TempDir;

/// Binary command with the CI environment cleared
fn depbot(dir: &TempDir) -> Command {
    let mut cmd = Command::cargo_bin("depbot").unwrap();
    cmd.current_dir(dir.path())
        .env_remove("GITHUB_TOKEN")
        .env_remove("GITHUB_REPOSITORY")
        .env_remove("GITHUB_SHA")
        .env_remove("GITHUB_WORKSPACE")
        .env_remove("GITHUB_API_URL")
        .env_remove("RUST_LOG");
    cmd
}

/// Create a test directory with a composer project
fn create_test_project() -> TempDir {
    let temp_dir = tempfile::tempdir().expect("Failed to create temp directory");
    fs::write(
        temp_dir.path().join("composer.json"),
        r#"{"require": {"vendor/pkg": "^1.0"}}"#,
    )
    .unwrap();
    temp_dir
}

#[test]
fn test_help_lists_options() {
    let dir = create_test_project();
    depbot(&dir)
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("--manifest"))
        .stdout(predicate::str::contains("--package-manager"))
        .stdout(predicate::str::contains("--branch-prefix"))
        .stdout(predicate::str::contains("--dry-run"));
}

#[test]
fn test_version() {
    let dir = create_test_project();
    depbot(&dir)
        .arg("--version")
        .assert()
        .success()
        .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
}

#[test]
fn test_missing_manifest_input() {
    let dir = create_test_project();
    depbot(&dir)
        .args(["--package-manager", "composer"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required input: manifest"));
}

#[test]
fn test_unsupported_package_manager() {
    let dir = create_test_project();
    depbot(&dir)
        .args(["--manifest", "composer.json", "--package-manager", "npm"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("package manager type 'npm' isn't supported"));
}

#[test]
fn test_manifest_not_found() {
    let dir = create_test_project();
    depbot(&dir)
        .args(["--manifest", "missing/composer.json", "-t", "composer"])
        .assert()
        .failure()
        .stderr(predicate::str::contains("manifest not found"));
}

#[test]
fn test_missing_token() {
    let dir = create_test_project();
    depbot(&dir)
        .args(["--manifest", "composer.json", "-t", "composer"])
        .env("GITHUB_REPOSITORY", "acme/site")
        .env("GITHUB_SHA", "abc123")
        .assert()
        .failure()
        .stderr(predicate::str::contains("missing required input: token"));
}

#[test]
fn test_invalid_repository_from_env() {
    let dir = create_test_project();
    depbot(&dir)
        .args(["--manifest", "composer.json", "-t", "composer"])
        .env("GITHUB_TOKEN", "token")
        .env("GITHUB_SHA", "abc123")
        .env("GITHUB_REPOSITORY", "not-a-slug")
        .assert()
        .failure()
        .stderr(predicate::str::contains("expected 'owner/name'"));
}

#[test]
fn test_manifest_outside_workspace() {
    let workspace = tempfile::tempdir().unwrap();
    let dir = create_test_project();
    depbot(&dir)
        .args(["--manifest", "composer.json", "-t", "composer"])
        .arg("--workspace")
        .arg(workspace.path())
        .env("GITHUB_TOKEN", "token")
        .env("GITHUB_SHA", "abc123")
        .env("GITHUB_REPOSITORY", "acme/site")
        .assert()
        .failure()
        .stderr(predicate::str::contains("outside of the workspace"));
}

#[test]
fn test_quiet_and_verbose_conflict() {
    let dir = create_test_project();
    depbot(&dir).args(["-q", "-v"]).assert().failure();
}
