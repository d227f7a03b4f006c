//! Pull request publishing

use crate::domain::{BranchAction, RepositoryData};
use crate::error::RemoteError;
use crate::remote::RemoteHost;
use tracing::info;

/// A pull request carrying the update branch
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PublishedPullRequest {
    /// Pull request number
    pub number: u64,
    /// Whether the pull request was already open before this run
    pub reused: bool,
}

/// Open the update pull request, or keep the one whose branch was just reset
pub async fn publish(
    host: &dyn RemoteHost,
    repository: &RepositoryData,
    action: &BranchAction,
    head: &str,
    title: &str,
) -> Result<PublishedPullRequest, RemoteError> {
    if let BranchAction::ResetToBase { pull_request, .. } = action {
        info!(pull_request, "Pull request #{} updated", pull_request);
        return Ok(PublishedPullRequest {
            number: *pull_request,
            reused: true,
        });
    }

    info!("Opening pull request");
    let number = host
        .open_pull_request(&repository.default_branch, head, title)
        .await?;
    info!(pull_request = number, "Pull request #{} opened", number);

    Ok(PublishedPullRequest {
        number,
        reused: false,
    })
}
