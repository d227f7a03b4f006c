//! Version-control host abstraction
//!
//! Every remote read and mutation a run performs goes through [`RemoteHost`],
//! so the publishing flow can be exercised against an in-memory host.

mod github;

pub use github::GitHubHost;

use crate::domain::{CommitRequest, PullRequestState, RemoteBranch, RepositoryData};
use crate::error::RemoteError;
use async_trait::async_trait;

/// Operations the update flow needs from the hosting service
#[async_trait]
pub trait RemoteHost: Send + Sync {
    /// Repository node id and default branch
    async fn repository_data(&self) -> Result<RepositoryData, RemoteError>;

    /// The branch named `name`, if it exists
    async fn existing_branch(&self, name: &str) -> Result<Option<RemoteBranch>, RemoteError>;

    /// Open pull requests from `head` into `base`
    async fn open_pull_requests(
        &self,
        base: &str,
        head: &str,
    ) -> Result<Vec<PullRequestState>, RemoteError>;

    /// Create branch `name` pointing at commit `oid`
    async fn create_branch(
        &self,
        repository_id: &str,
        name: &str,
        oid: &str,
    ) -> Result<(), RemoteError>;

    /// Delete a ref by id
    async fn delete_ref(&self, ref_id: &str) -> Result<(), RemoteError>;

    /// Move a ref to `oid`
    async fn update_ref(&self, ref_id: &str, oid: &str, force: bool) -> Result<(), RemoteError>;

    /// Create a commit on a branch and return its id
    async fn create_commit(&self, request: &CommitRequest) -> Result<String, RemoteError>;

    /// Open a pull request and return its number
    async fn open_pull_request(
        &self,
        base: &str,
        head: &str,
        title: &str,
    ) -> Result<u64, RemoteError>;
}
