//! Remote repository, branch and pull request state

use serde::{Deserialize, Serialize};

/// Repository facts needed before touching any branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RepositoryData {
    /// Opaque repository identifier (GraphQL node id)
    pub id: String,
    /// Name of the default branch, used as pull request base
    pub default_branch: String,
}

/// An existing branch on the remote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RemoteBranch {
    /// Opaque ref identifier used by ref mutations
    pub ref_id: String,
    /// Commit the branch currently points at
    pub head_commit_id: String,
}

/// Mergeability as reported by the host
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum Mergeable {
    /// Pull request has conflicts with its base
    Conflicting,
    /// Pull request can be merged
    Mergeable,
    /// Host has not computed mergeability yet
    Unknown,
}

/// An open pull request from the update branch
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PullRequestState {
    /// Opaque pull request identifier
    pub id: String,
    /// Pull request number
    pub number: u64,
    /// Current mergeability
    pub mergeable: Mergeable,
}

impl PullRequestState {
    /// Returns true if the host reports conflicts
    pub fn is_conflicting(&self) -> bool {
        self.mergeable == Mergeable::Conflicting
    }
}

/// The update branch as seen on the remote before a run mutates anything
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BranchState {
    /// The branch, if it exists
    pub branch: Option<RemoteBranch>,
    /// Open pull requests from the branch to the default branch
    pub pull_requests: Vec<PullRequestState>,
}

impl BranchState {
    /// State with no branch and no pull requests
    pub fn absent() -> Self {
        Self::default()
    }

    /// State with an existing branch
    pub fn existing(branch: RemoteBranch, pull_requests: Vec<PullRequestState>) -> Self {
        Self {
            branch: Some(branch),
            pull_requests,
        }
    }

    /// Returns true if the branch exists
    pub fn exists(&self) -> bool {
        self.branch.is_some()
    }
}

/// Remote mutation chosen by branch reconciliation
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "action", rename_all = "snake_case")]
pub enum BranchAction {
    /// No branch yet: create it at the base commit
    Create,
    /// Open pull request is conflicting: force the branch back to the base commit
    ResetToBase {
        /// Ref to move
        ref_id: String,
        /// Pull request that stays open and is reused
        pull_request: u64,
    },
    /// Branch exists without an open pull request: delete and create it again
    Recreate {
        /// Ref to delete
        ref_id: String,
    },
    /// A non-conflicting pull request is already open: stop here
    AlreadyPending {
        /// The open pull request
        pull_request: u64,
    },
}

impl BranchAction {
    /// Returns true if this action mutates the remote
    pub fn is_mutation(&self) -> bool {
        !matches!(self, BranchAction::AlreadyPending { .. })
    }
}

/// A file written by a commit, with base64-encoded contents
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FileAddition {
    /// Repository-relative path with forward slashes
    pub path: String,
    /// Base64-encoded bytes
    pub contents: String,
}

/// Input of a single commit creation call
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommitRequest {
    /// Target branch name (without `refs/heads/`)
    pub branch: String,
    /// Commit the branch must currently point at
    pub expected_parent: String,
    /// Commit headline
    pub headline: String,
    /// Optional commit body
    pub body: Option<String>,
    /// Files written by the commit
    pub additions: Vec<FileAddition>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_branch_state_absent() {
        let state = BranchState::absent();
        assert!(!state.exists());
        assert!(state.pull_requests.is_empty());
    }

    #[test]
    fn test_branch_state_existing() {
        let state = BranchState::existing(
            RemoteBranch {
                ref_id: "REF_1".to_string(),
                head_commit_id: "abc".to_string(),
            },
            vec![],
        );
        assert!(state.exists());
    }

    #[test]
    fn test_pull_request_is_conflicting() {
        let pr = PullRequestState {
            id: "PR_1".to_string(),
            number: 7,
            mergeable: Mergeable::Conflicting,
        };
        assert!(pr.is_conflicting());

        let pr = PullRequestState {
            mergeable: Mergeable::Unknown,
            ..pr
        };
        assert!(!pr.is_conflicting());
    }

    #[test]
    fn test_branch_action_is_mutation() {
        assert!(BranchAction::Create.is_mutation());
        assert!(BranchAction::Recreate {
            ref_id: "REF".to_string()
        }
        .is_mutation());
        assert!(!BranchAction::AlreadyPending { pull_request: 3 }.is_mutation());
    }

    #[test]
    fn test_branch_action_serde_tag() {
        let json = serde_json::to_string(&BranchAction::ResetToBase {
            ref_id: "REF".to_string(),
            pull_request: 4,
        })
        .unwrap();
        assert!(json.contains("\"action\":\"reset_to_base\""));
    }

    #[test]
    fn test_mergeable_serde() {
        let parsed: Mergeable = serde_json::from_str("\"CONFLICTING\"").unwrap();
        assert_eq!(parsed, Mergeable::Conflicting);
        let parsed: Mergeable = serde_json::from_str("\"MERGEABLE\"").unwrap();
        assert_eq!(parsed, Mergeable::Mergeable);
        let parsed: Mergeable = serde_json::from_str("\"UNKNOWN\"").unwrap();
        assert_eq!(parsed, Mergeable::Unknown);
    }
}
