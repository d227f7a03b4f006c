//! Commit chain sequencing
//!
//! Update commands run one at a time. After each command the touched files are
//! committed to the update branch, and the returned commit id becomes the
//! expected parent of the next commit. Commits already pushed stay in place when
//! a later step fails.

use crate::config::relative_path;
use crate::domain::{CommitRecord, CommitRequest, FileAddition, PlannedUpdate, UpdateCommand};
use crate::error::{IoError, Result};
use crate::exec::{run_checked, CommandRunner};
use crate::package_manager::PackageManager;
use crate::progress::Progress;
use crate::remote::RemoteHost;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use std::path::Path;
use tracing::{debug, info, warn};

/// Applies an update plan to the working copy and the update branch
pub struct CommitSequencer<'a> {
    runner: &'a dyn CommandRunner,
    host: &'a dyn RemoteHost,
    package_manager: &'a dyn PackageManager,
    workspace: &'a Path,
    manifest: &'a Path,
    branch: &'a str,
}

impl<'a> CommitSequencer<'a> {
    pub fn new(
        runner: &'a dyn CommandRunner,
        host: &'a dyn RemoteHost,
        package_manager: &'a dyn PackageManager,
        workspace: &'a Path,
        manifest: &'a Path,
        branch: &'a str,
    ) -> Self {
        Self {
            runner,
            host,
            package_manager,
            workspace,
            manifest,
            branch,
        }
    }

    /// Run every ready entry of `plan` in order, chaining commits from `base_oid`
    pub async fn run(
        &self,
        plan: &[PlannedUpdate],
        base_oid: &str,
        progress: &mut Progress,
    ) -> Result<Vec<CommitRecord>> {
        let mut expected_parent = base_oid.to_string();
        let mut commits = Vec::new();

        for entry in plan {
            let command = match entry {
                PlannedUpdate::Ready(command) => command,
                PlannedUpdate::Skipped { packages, reason } => {
                    warn!(packages = %packages.join(", "), %reason, "skipping update group");
                    continue;
                }
            };

            progress.group(&format!("Preparing update: {}", command.description));
            info!(command = %command.command_line(), "Preparing update: {}", command.description);
            run_checked(self.runner, &command.args, &command.working_dir).await?;

            progress.group(&format!("Committing update: {}", command.description));
            info!(parent = %expected_parent, "Committing update: {}", command.description);
            let request = self.commit_request(command, &expected_parent).await?;
            let oid = self.host.create_commit(&request).await?;
            debug!(%oid, "commit created");

            commits.push(CommitRecord {
                oid: oid.clone(),
                headline: command.description.clone(),
            });
            expected_parent = oid;
        }

        progress.finish_and_clear();
        Ok(commits)
    }

    async fn commit_request(
        &self,
        command: &UpdateCommand,
        expected_parent: &str,
    ) -> Result<CommitRequest> {
        let mut additions = Vec::new();
        for file in self.package_manager.touched_files(self.manifest) {
            let bytes = tokio::fs::read(&file)
                .await
                .map_err(|source| IoError::ReadFailed {
                    path: file.clone(),
                    source,
                })?;
            additions.push(FileAddition {
                path: relative_path(&file, self.workspace)?,
                contents: STANDARD.encode(bytes),
            });
        }

        Ok(CommitRequest {
            branch: self.branch.to_string(),
            expected_parent: expected_parent.to_string(),
            headline: command.description.clone(),
            body: command.detailed_description.clone(),
            additions,
        })
    }
}
