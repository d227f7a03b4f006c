//! Outcome of a run

use super::{BranchAction, PlannedUpdate};
use serde::Serialize;

/// A commit pushed to the update branch
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CommitRecord {
    /// Identifier returned by the host
    pub oid: String,
    /// Commit headline
    pub headline: String,
}

/// How a run ended; failures travel as `Err(AppError)` instead
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum RunOutcome {
    /// Updates were committed and a pull request is open
    Completed {
        /// Update branch
        branch: String,
        /// Pull request number
        pull_request: u64,
        /// Whether an already open pull request was reused
        reused_pull_request: bool,
        /// Commits in the order they were pushed
        commits: Vec<CommitRecord>,
    },
    /// Nothing to update
    NoUpdates,
    /// A non-conflicting pull request for this manifest is already open
    AlreadyPending {
        /// Update branch
        branch: String,
        /// The open pull request
        pull_request: u64,
    },
    /// Plan computed without touching the remote or the working copy
    DryRun {
        /// Update branch
        branch: String,
        /// What reconciliation would do
        action: BranchAction,
        /// The update plan
        plan: Vec<PlannedUpdate>,
    },
}
