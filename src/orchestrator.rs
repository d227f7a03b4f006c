//! Run orchestration
//!
//! This module provides:
//! - Workflow coordination: reconcile → plan → apply → commit → publish
//! - Clean early termination when an update pull request is already pending
//! - Dry-run mode support

use crate::config::RunConfig;
use crate::domain::{BranchAction, RunOutcome};
use crate::error::Result;
use crate::exec::CommandRunner;
use crate::package_manager::{create_package_manager, PackageManager};
use crate::progress::Progress;
use crate::publish::{decide, publish, BranchReconciler, CommitSequencer};
use crate::remote::RemoteHost;
use std::sync::Arc;
use tracing::{debug, info, warn};

/// Orchestrator for coordinating one update run
pub struct Orchestrator {
    /// Validated run configuration
    config: RunConfig,
    /// Version-control host
    host: Arc<dyn RemoteHost>,
    /// Process runner shared with the package manager backend
    runner: Arc<dyn CommandRunner>,
    /// Package manager backend selected by the configuration
    package_manager: Box<dyn PackageManager>,
    /// Whether to show progress spinners
    show_progress: bool,
}

impl Orchestrator {
    /// Create a new orchestrator
    pub fn new(
        config: RunConfig,
        host: Arc<dyn RemoteHost>,
        runner: Arc<dyn CommandRunner>,
    ) -> Self {
        let package_manager = create_package_manager(config.package_manager, runner.clone());
        Self {
            config,
            host,
            runner,
            package_manager,
            show_progress: false,
        }
    }

    /// Enable or disable progress spinners (builder pattern)
    pub fn with_progress(mut self, enabled: bool) -> Self {
        self.show_progress = enabled;
        self
    }

    /// Run the whole workflow
    pub async fn run(&self) -> Result<RunOutcome> {
        let config = &self.config;
        let head = config.head_branch();
        let mut progress = Progress::new(self.show_progress);

        let repository = self.host.repository_data().await?;
        debug!(
            repository = %format!("{}/{}", config.owner, config.repo),
            default_branch = %repository.default_branch,
            head = %head,
            "loaded repository"
        );

        let reconciler = BranchReconciler::new(self.host.as_ref(), &repository, &head);
        let action = decide(&reconciler.inspect().await?);

        if let BranchAction::AlreadyPending { pull_request } = action {
            warn!(
                pull_request,
                "Pull request for {} is already open", config.manifest_relative
            );
            return Ok(RunOutcome::AlreadyPending {
                branch: head,
                pull_request,
            });
        }

        progress.group(&format!("Listing updates for {}", config.manifest_relative));
        let plan = self
            .package_manager
            .list_updates(&config.filter, &config.manifest)
            .await?;
        progress.finish_and_clear();

        if config.dry_run {
            info!(entries = plan.len(), "dry run, nothing applied");
            return Ok(RunOutcome::DryRun {
                branch: head,
                action,
                plan,
            });
        }

        if !plan.iter().any(|entry| entry.is_ready()) {
            info!("No updates needed");
            return Ok(RunOutcome::NoUpdates);
        }

        reconciler.apply(&action, &config.base_sha).await?;

        let commits = CommitSequencer::new(
            self.runner.as_ref(),
            self.host.as_ref(),
            self.package_manager.as_ref(),
            &config.workspace,
            &config.manifest,
            &head,
        )
        .run(&plan, &config.base_sha, &mut progress)
        .await?;

        let pull_request = publish(
            self.host.as_ref(),
            &repository,
            &action,
            &head,
            &config.pull_request_title(),
        )
        .await?;

        Ok(RunOutcome::Completed {
            branch: head,
            pull_request: pull_request.number,
            reused_pull_request: pull_request.reused,
            commits,
        })
    }
}
