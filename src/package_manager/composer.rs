//! Composer backend for PHP projects
//!
//! Handles:
//! - Installing the locked dependency set before inspection
//! - Reading `composer outdated --direct` reports
//! - Probing upgrade blockers with `composer why-not`
//! - `require` / `require-dev` constraints from composer.json

use super::{manifest_dir, PackageManager};
use crate::domain::{ConstraintExpression, OutdatedDependency, PlannedUpdate};
use crate::error::{ManifestError, Result};
use crate::exec::{run_checked, run_unchecked, CommandRunner};
use crate::update::{
    parse_blocking_probe, BlockingProbe, BlockingRequirement, CommandSyntax, ConflictGrouper,
    PlanBuilder, UpdateFilter,
};
use async_trait::async_trait;
use serde::Deserialize;
use std::collections::HashMap;
use std::path::{Path, PathBuf};
use std::sync::Arc;
use tracing::{debug, info};

const PROGRAM: &str = "composer";
const LOCK_FILE: &str = "composer.lock";

/// The parts of composer.json that declare constraints
#[derive(Debug, Default, Deserialize)]
struct ComposerJson {
    #[serde(default)]
    require: HashMap<String, String>,
    #[serde(default, rename = "require-dev")]
    require_dev: HashMap<String, String>,
}

/// `composer outdated --format=json` output
#[derive(Debug, Deserialize)]
struct OutdatedReport {
    #[serde(default)]
    installed: Vec<OutdatedEntry>,
}

#[derive(Debug, Deserialize)]
struct OutdatedEntry {
    name: String,
    version: String,
    latest: String,
}

/// Composer package manager backend
pub struct Composer {
    runner: Arc<dyn CommandRunner>,
}

impl Composer {
    /// Create a backend that runs composer through `runner`
    pub fn new(runner: Arc<dyn CommandRunner>) -> Self {
        Self { runner }
    }

    async fn read_manifest(path: &Path) -> Result<ComposerJson> {
        let content = tokio::fs::read_to_string(path)
            .await
            .map_err(|e| ManifestError::read_error(path, e))?;
        serde_json::from_str(&content).map_err(|e| {
            ManifestError::json_parse_error(path.display().to_string(), e.to_string()).into()
        })
    }

    async fn outdated_report(&self, working_dir: &Path) -> Result<OutdatedReport> {
        let output = run_checked(
            self.runner.as_ref(),
            &args(&["outdated", "--direct", "--format=json"]),
            working_dir,
        )
        .await?;
        serde_json::from_str(&output).map_err(|e| {
            ManifestError::json_parse_error("composer outdated", e.to_string()).into()
        })
    }
}

/// Annotate report entries with their declared constraint and dev classification
fn outdated_dependencies(
    manifest: &ComposerJson,
    report: OutdatedReport,
) -> Result<Vec<OutdatedDependency>> {
    report
        .installed
        .into_iter()
        .map(|entry| -> Result<OutdatedDependency> {
            let is_dev = manifest.require_dev.contains_key(&entry.name);
            let declared = manifest
                .require
                .get(&entry.name)
                .or_else(|| manifest.require_dev.get(&entry.name));

            let mut dependency =
                OutdatedDependency::new(entry.name, entry.version, entry.latest, is_dev);
            if let Some(raw) = declared {
                dependency = dependency.with_constraint(ConstraintExpression::new(raw)?);
            }
            Ok(dependency)
        })
        .collect()
}

fn args(parts: &[&str]) -> Vec<String> {
    std::iter::once(PROGRAM)
        .chain(parts.iter().copied())
        .map(str::to_string)
        .collect()
}

/// `composer why-not <name> <latest>`; its exit status only says "blocked or not"
struct WhyNotProbe<'a> {
    runner: &'a dyn CommandRunner,
    working_dir: &'a Path,
}

#[async_trait]
impl<'a> BlockingProbe for WhyNotProbe<'a> {
    async fn probe(&self, dependency: &OutdatedDependency) -> Result<Vec<BlockingRequirement>> {
        let output = run_unchecked(
            self.runner,
            &args(&["why-not", &dependency.name, &dependency.latest_version]),
            self.working_dir,
        )
        .await?;
        Ok(parse_blocking_probe(&output))
    }
}

impl CommandSyntax for Composer {
    fn update_in_place(&self, name: &str) -> Vec<String> {
        args(&["update", name, "--with-dependencies"])
    }

    fn require(&self, requirements: &[(String, ConstraintExpression)], dev: bool) -> Vec<String> {
        let mut command = args(&["require"]);
        command.extend(
            requirements
                .iter()
                .map(|(name, constraint)| format!("{name}:{constraint}")),
        );
        command.push("--update-with-dependencies".to_string());
        if dev {
            command.push("--dev".to_string());
        }
        command
    }
}

#[async_trait]
impl PackageManager for Composer {
    async fn list_updates(
        &self,
        filter: &UpdateFilter,
        manifest: &Path,
    ) -> Result<Vec<PlannedUpdate>> {
        let working_dir = manifest_dir(manifest);
        let composer_json = Self::read_manifest(manifest).await?;

        run_checked(self.runner.as_ref(), &args(&["install"]), &working_dir).await?;

        let report = self.outdated_report(&working_dir).await?;
        let outdated = outdated_dependencies(&composer_json, report)?;
        info!(count = outdated.len(), "found outdated direct dependencies");
        for dependency in &outdated {
            debug!(%dependency, "outdated");
        }

        let probe = WhyNotProbe {
            runner: self.runner.as_ref(),
            working_dir: &working_dir,
        };
        let verdicts = ConflictGrouper::new(&outdated, filter)
            .group(&probe)
            .await?;

        PlanBuilder::new(self, manifest, &working_dir).build(verdicts)
    }

    fn touched_files(&self, manifest: &Path) -> Vec<PathBuf> {
        vec![manifest.to_path_buf(), manifest_dir(manifest).join(LOCK_FILE)]
    }
}
