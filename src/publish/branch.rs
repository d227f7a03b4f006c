//! Update branch reconciliation
//!
//! The branch name is derived from the manifest path, so at most one update
//! branch exists per manifest. Before a run applies anything, the branch state
//! on the remote decides what happens to it:
//!
//! | Remote state                        | Action                        |
//! |-------------------------------------|-------------------------------|
//! | no branch                           | create at the base commit     |
//! | branch, a conflicting PR is open    | force-move to the base commit |
//! | branch, other PRs are open          | stop, an update is pending    |
//! | branch, no open PR                  | delete, then create again     |

use crate::domain::{BranchAction, BranchState, RepositoryData};
use crate::error::RemoteError;
use crate::remote::RemoteHost;
use tracing::{debug, info};

/// Decide what to do with the update branch
pub fn decide(state: &BranchState) -> BranchAction {
    let Some(branch) = &state.branch else {
        return BranchAction::Create;
    };

    if let Some(conflicting) = state.pull_requests.iter().find(|pr| pr.is_conflicting()) {
        return BranchAction::ResetToBase {
            ref_id: branch.ref_id.clone(),
            pull_request: conflicting.number,
        };
    }

    match state.pull_requests.first() {
        Some(open) => BranchAction::AlreadyPending {
            pull_request: open.number,
        },
        None => BranchAction::Recreate {
            ref_id: branch.ref_id.clone(),
        },
    }
}

/// Reads and reconciles the update branch on a remote host
pub struct BranchReconciler<'a> {
    host: &'a dyn RemoteHost,
    repository: &'a RepositoryData,
    branch: &'a str,
}

impl<'a> BranchReconciler<'a> {
    pub fn new(host: &'a dyn RemoteHost, repository: &'a RepositoryData, branch: &'a str) -> Self {
        Self {
            host,
            repository,
            branch,
        }
    }

    /// Current state of the branch and its open pull requests
    pub async fn inspect(&self) -> Result<BranchState, RemoteError> {
        let Some(existing) = self.host.existing_branch(self.branch).await? else {
            debug!(branch = self.branch, "update branch does not exist");
            return Ok(BranchState::absent());
        };

        let pull_requests = self
            .host
            .open_pull_requests(&self.repository.default_branch, self.branch)
            .await?;
        debug!(
            branch = self.branch,
            head = %existing.head_commit_id,
            open = pull_requests.len(),
            "update branch exists"
        );
        Ok(BranchState::existing(existing, pull_requests))
    }

    /// Perform the mutation `action` calls for, leaving the branch at `base_oid`
    pub async fn apply(&self, action: &BranchAction, base_oid: &str) -> Result<(), RemoteError> {
        match action {
            BranchAction::Create => {
                info!(branch = self.branch, "creating update branch");
                self.create(base_oid).await
            }
            BranchAction::ResetToBase {
                ref_id,
                pull_request,
            } => {
                info!(
                    branch = self.branch,
                    pull_request, "pull request is conflicting, resetting update branch"
                );
                self.host.update_ref(ref_id, base_oid, true).await
            }
            BranchAction::Recreate { ref_id } => {
                info!(branch = self.branch, "recreating stale update branch");
                self.host.delete_ref(ref_id).await?;
                self.create(base_oid).await
            }
            BranchAction::AlreadyPending { .. } => Ok(()),
        }
    }

    async fn create(&self, base_oid: &str) -> Result<(), RemoteError> {
        self.host
            .create_branch(&self.repository.id, self.branch, base_oid)
            .await
    }
}
