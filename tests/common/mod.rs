//! Shared test fixtures for integration tests

#![allow(dead_code)]

pub mod mock_host;
pub mod mock_runner;

use depbot::config::RunConfig;
use depbot::package_manager::PackageManagerKind;
use depbot::update::UpdateFilter;
use std::path::Path;
use tempfile::TempDir;

pub const BASE_SHA: &str = "base0000";

/// Temporary workspace holding a composer project
pub fn composer_workspace(composer_json: &str) -> TempDir {
    let dir = tempfile::tempdir().unwrap();
    std::fs::write(dir.path().join("composer.json"), composer_json).unwrap();
    std::fs::write(dir.path().join("composer.lock"), "{\"packages\": []}").unwrap();
    dir
}

/// Run configuration pointing at `<workspace>/composer.json`
pub fn run_config(workspace: &Path) -> RunConfig {
    let workspace = workspace.canonicalize().unwrap();
    RunConfig {
        token: "token".to_string(),
        owner: "acme".to_string(),
        repo: "site".to_string(),
        api_url: None,
        base_sha: BASE_SHA.to_string(),
        manifest: workspace.join("composer.json"),
        manifest_relative: "composer.json".to_string(),
        workspace,
        package_manager: PackageManagerKind::Composer,
        branch_prefix: "update-deps".to_string(),
        filter: UpdateFilter::new(),
        dry_run: false,
    }
}

/// `composer outdated --format=json` output for `(name, version, latest)` entries
pub fn outdated_json(entries: &[(&str, &str, &str)]) -> String {
    let installed: Vec<_> = entries
        .iter()
        .map(|(name, version, latest)| {
            serde_json::json!({
                "name": name,
                "version": version,
                "latest": latest,
            })
        })
        .collect();
    serde_json::json!({ "installed": installed }).to_string()
}
