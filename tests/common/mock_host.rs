//! In-memory remote host for testing

#![allow(dead_code)]

use async_trait::async_trait;
use depbot::domain::{
    CommitRequest, Mergeable, PullRequestState, RemoteBranch, RepositoryData,
};
use depbot::error::RemoteError;
use depbot::remote::RemoteHost;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Mutex;

/// A recorded host call
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum HostCall {
    RepositoryData,
    ExistingBranch(String),
    OpenPullRequests { base: String, head: String },
    CreateBranch { repository_id: String, name: String, oid: String },
    DeleteRef(String),
    UpdateRef { ref_id: String, oid: String, force: bool },
    CreateCommit(CommitRequest),
    OpenPullRequest { base: String, head: String, title: String },
}

impl HostCall {
    /// Returns true if the call changes remote state
    pub fn is_mutation(&self) -> bool {
        matches!(
            self,
            HostCall::CreateBranch { .. }
                | HostCall::DeleteRef(_)
                | HostCall::UpdateRef { .. }
                | HostCall::CreateCommit(_)
                | HostCall::OpenPullRequest { .. }
        )
    }
}

/// Mock remote host
///
/// Features:
/// - Configurable branch and open pull requests
/// - Commit ids `commit-1`, `commit-2`, ... in creation order
/// - Call tracking for verification
/// - Error injection on the nth commit and on pull request creation
pub struct MockHost {
    repository: RepositoryData,
    branch: Mutex<Option<RemoteBranch>>,
    pull_requests: Mutex<Vec<PullRequestState>>,
    next_commit: AtomicU64,
    next_pr_number: AtomicU64,
    calls: Mutex<Vec<HostCall>>,
    fail_commit_number: Mutex<Option<u64>>,
    fail_open_pull_request: Mutex<Option<String>>,
}

impl MockHost {
    pub fn new() -> Self {
        Self {
            repository: RepositoryData {
                id: "R_repo".to_string(),
                default_branch: "main".to_string(),
            },
            branch: Mutex::new(None),
            pull_requests: Mutex::new(Vec::new()),
            next_commit: AtomicU64::new(1),
            next_pr_number: AtomicU64::new(100),
            calls: Mutex::new(Vec::new()),
            fail_commit_number: Mutex::new(None),
            fail_open_pull_request: Mutex::new(None),
        }
    }

    /// Existing update branch at `head`
    pub fn with_branch(self, ref_id: &str, head: &str) -> Self {
        *self.branch.lock().unwrap() = Some(RemoteBranch {
            ref_id: ref_id.to_string(),
            head_commit_id: head.to_string(),
        });
        self
    }

    /// Open pull request from the update branch
    pub fn with_pull_request(self, number: u64, mergeable: Mergeable) -> Self {
        self.pull_requests.lock().unwrap().push(PullRequestState {
            id: format!("PR_{}", number),
            number,
            mergeable,
        });
        self
    }

    /// Fail the nth commit (1-based)
    pub fn fail_commit(self, number: u64) -> Self {
        *self.fail_commit_number.lock().unwrap() = Some(number);
        self
    }

    pub fn fail_open_pull_request(self, message: &str) -> Self {
        *self.fail_open_pull_request.lock().unwrap() = Some(message.to_string());
        self
    }

    pub fn calls(&self) -> Vec<HostCall> {
        self.calls.lock().unwrap().clone()
    }

    pub fn mutations(&self) -> Vec<HostCall> {
        self.calls().into_iter().filter(HostCall::is_mutation).collect()
    }

    pub fn commits(&self) -> Vec<CommitRequest> {
        self.calls()
            .into_iter()
            .filter_map(|call| match call {
                HostCall::CreateCommit(request) => Some(request),
                _ => None,
            })
            .collect()
    }

    fn record(&self, call: HostCall) {
        self.calls.lock().unwrap().push(call);
    }
}

impl Default for MockHost {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl RemoteHost for MockHost {
    async fn repository_data(&self) -> Result<RepositoryData, RemoteError> {
        self.record(HostCall::RepositoryData);
        Ok(self.repository.clone())
    }

    async fn existing_branch(&self, name: &str) -> Result<Option<RemoteBranch>, RemoteError> {
        self.record(HostCall::ExistingBranch(name.to_string()));
        Ok(self.branch.lock().unwrap().clone())
    }

    async fn open_pull_requests(
        &self,
        base: &str,
        head: &str,
    ) -> Result<Vec<PullRequestState>, RemoteError> {
        self.record(HostCall::OpenPullRequests {
            base: base.to_string(),
            head: head.to_string(),
        });
        Ok(self.pull_requests.lock().unwrap().clone())
    }

    async fn create_branch(
        &self,
        repository_id: &str,
        name: &str,
        oid: &str,
    ) -> Result<(), RemoteError> {
        self.record(HostCall::CreateBranch {
            repository_id: repository_id.to_string(),
            name: name.to_string(),
            oid: oid.to_string(),
        });
        Ok(())
    }

    async fn delete_ref(&self, ref_id: &str) -> Result<(), RemoteError> {
        self.record(HostCall::DeleteRef(ref_id.to_string()));
        Ok(())
    }

    async fn update_ref(&self, ref_id: &str, oid: &str, force: bool) -> Result<(), RemoteError> {
        self.record(HostCall::UpdateRef {
            ref_id: ref_id.to_string(),
            oid: oid.to_string(),
            force,
        });
        Ok(())
    }

    async fn create_commit(&self, request: &CommitRequest) -> Result<String, RemoteError> {
        self.record(HostCall::CreateCommit(request.clone()));
        let number = self.next_commit.fetch_add(1, Ordering::SeqCst);
        if *self.fail_commit_number.lock().unwrap() == Some(number) {
            return Err(RemoteError::GraphQl {
                operation: "createCommitOnBranch".to_string(),
                message: "Expected branch to point to a different commit".to_string(),
            });
        }
        Ok(format!("commit-{}", number))
    }

    async fn open_pull_request(
        &self,
        base: &str,
        head: &str,
        title: &str,
    ) -> Result<u64, RemoteError> {
        self.record(HostCall::OpenPullRequest {
            base: base.to_string(),
            head: head.to_string(),
            title: title.to_string(),
        });
        if let Some(message) = self.fail_open_pull_request.lock().unwrap().clone() {
            return Err(RemoteError::Request {
                operation: "create pull request".to_string(),
                message,
            });
        }
        Ok(self.next_pr_number.fetch_add(1, Ordering::SeqCst))
    }
}
