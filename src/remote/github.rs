//! GitHub host implementation using octocrab
//!
//! Branch, ref and commit operations go through the GraphQL API; pull requests
//! are opened through the REST API.

use super::RemoteHost;
use crate::domain::{CommitRequest, Mergeable, PullRequestState, RemoteBranch, RepositoryData};
use crate::error::RemoteError;
use async_trait::async_trait;
use octocrab::Octocrab;
use serde::de::DeserializeOwned;
use serde::Deserialize;
use serde_json::{json, Value};
use tracing::debug;

const REPOSITORY_QUERY: &str = r"
    query RepositoryData($owner: String!, $name: String!) {
        repository(owner: $owner, name: $name) {
            id
            defaultBranchRef { name }
        }
    }
";

const BRANCH_QUERY: &str = r"
    query ExistingBranch($owner: String!, $name: String!, $qualifiedName: String!) {
        repository(owner: $owner, name: $name) {
            ref(qualifiedName: $qualifiedName) {
                id
                target { oid }
            }
        }
    }
";

const PULL_REQUESTS_QUERY: &str = r"
    query OpenPullRequests($owner: String!, $name: String!, $base: String!, $head: String!) {
        repository(owner: $owner, name: $name) {
            pullRequests(first: 100, states: OPEN, baseRefName: $base, headRefName: $head) {
                nodes { id number mergeable }
            }
        }
    }
";

const CREATE_REF_MUTATION: &str = r"
    mutation CreateRef($repositoryId: ID!, $name: String!, $oid: GitObjectID!) {
        createRef(input: { repositoryId: $repositoryId, name: $name, oid: $oid }) {
            ref { id }
        }
    }
";

const DELETE_REF_MUTATION: &str = r"
    mutation DeleteRef($refId: ID!) {
        deleteRef(input: { refId: $refId }) { clientMutationId }
    }
";

const UPDATE_REF_MUTATION: &str = r"
    mutation UpdateRef($refId: ID!, $oid: GitObjectID!, $force: Boolean!) {
        updateRef(input: { refId: $refId, oid: $oid, force: $force }) {
            ref { id }
        }
    }
";

const CREATE_COMMIT_MUTATION: &str = r"
    mutation CreateCommitOnBranch(
        $branch: CommittableBranch!
        $expectedHeadOid: GitObjectID!
        $message: CommitMessage!
        $fileChanges: FileChanges!
    ) {
        createCommitOnBranch(input: {
            branch: $branch
            expectedHeadOid: $expectedHeadOid
            message: $message
            fileChanges: $fileChanges
        }) {
            commit { oid }
        }
    }
";

#[derive(Deserialize)]
struct GraphQlResponse<T> {
    data: Option<T>,
    errors: Option<Vec<GraphQlError>>,
}

#[derive(Deserialize)]
struct GraphQlError {
    message: String,
}

#[derive(Deserialize)]
struct RepositoryResponse<T> {
    repository: Option<T>,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct RepositoryNode {
    id: String,
    default_branch_ref: Option<NamedRef>,
}

#[derive(Deserialize)]
struct NamedRef {
    name: String,
}

#[derive(Deserialize)]
struct BranchRepository {
    #[serde(rename = "ref")]
    git_ref: Option<RefNode>,
}

#[derive(Deserialize)]
struct RefNode {
    id: String,
    target: Option<OidNode>,
}

#[derive(Deserialize)]
struct OidNode {
    oid: String,
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct PullRequestRepository {
    pull_requests: Connection<PullRequestNode>,
}

#[derive(Deserialize)]
struct Connection<T> {
    nodes: Vec<T>,
}

#[derive(Deserialize)]
struct PullRequestNode {
    id: String,
    number: u64,
    mergeable: Mergeable,
}

impl From<PullRequestNode> for PullRequestState {
    fn from(node: PullRequestNode) -> Self {
        Self {
            id: node.id,
            number: node.number,
            mergeable: node.mergeable,
        }
    }
}

#[derive(Deserialize)]
#[serde(rename_all = "camelCase")]
struct CreateCommitData {
    create_commit_on_branch: Option<CreateCommitPayload>,
}

#[derive(Deserialize)]
struct CreateCommitPayload {
    commit: Option<OidNode>,
}

/// GitHub host bound to one repository
pub struct GitHubHost {
    client: Octocrab,
    owner: String,
    repo: String,
}

impl GitHubHost {
    /// Create a host for `owner/repo`, optionally against a custom API base URL
    pub fn new(
        token: &str,
        owner: impl Into<String>,
        repo: impl Into<String>,
        api_url: Option<&str>,
    ) -> Result<Self, RemoteError> {
        let mut builder = Octocrab::builder().personal_token(token.to_string());

        if let Some(url) = api_url {
            builder = builder.base_uri(url).map_err(|e| RemoteError::Client {
                message: e.to_string(),
            })?;
        }

        let client = builder.build().map_err(|e| RemoteError::Client {
            message: e.to_string(),
        })?;

        Ok(Self {
            client,
            owner: owner.into(),
            repo: repo.into(),
        })
    }

    fn name_with_owner(&self) -> String {
        format!("{}/{}", self.owner, self.repo)
    }

    /// Run a GraphQL document and return its `data` payload
    async fn graphql<T: DeserializeOwned>(
        &self,
        operation: &str,
        query: &str,
        variables: Value,
    ) -> Result<T, RemoteError> {
        debug!(operation, "graphql request");
        let response: GraphQlResponse<T> = self
            .client
            .graphql(&json!({ "query": query, "variables": variables }))
            .await
            .map_err(|e| RemoteError::request(operation, e))?;

        unwrap_response(operation, response)
    }
}

fn unwrap_response<T>(operation: &str, response: GraphQlResponse<T>) -> Result<T, RemoteError> {
    if let Some(errors) = response.errors {
        if !errors.is_empty() {
            let messages: Vec<_> = errors.into_iter().map(|e| e.message).collect();
            return Err(RemoteError::GraphQl {
                operation: operation.to_string(),
                message: messages.join(", "),
            });
        }
    }

    response
        .data
        .ok_or_else(|| RemoteError::missing_data(operation, "data"))
}

fn repository_data(node: RepositoryNode) -> Result<RepositoryData, RemoteError> {
    let default_branch = node
        .default_branch_ref
        .ok_or_else(|| RemoteError::missing_data("repository lookup", "default branch"))?
        .name;
    Ok(RepositoryData {
        id: node.id,
        default_branch,
    })
}

fn remote_branch(node: RefNode) -> Result<RemoteBranch, RemoteError> {
    let head_commit_id = node
        .target
        .ok_or_else(|| RemoteError::missing_data("branch lookup", "ref target"))?
        .oid;
    Ok(RemoteBranch {
        ref_id: node.id,
        head_commit_id,
    })
}

#[async_trait]
impl RemoteHost for GitHubHost {
    async fn repository_data(&self) -> Result<RepositoryData, RemoteError> {
        let operation = "repository lookup";
        let data: RepositoryResponse<RepositoryNode> = self
            .graphql(
                operation,
                REPOSITORY_QUERY,
                json!({ "owner": self.owner, "name": self.repo }),
            )
            .await?;

        let node = data
            .repository
            .ok_or_else(|| RemoteError::missing_data(operation, "repository"))?;
        repository_data(node)
    }

    async fn existing_branch(&self, name: &str) -> Result<Option<RemoteBranch>, RemoteError> {
        let operation = "branch lookup";
        let data: RepositoryResponse<BranchRepository> = self
            .graphql(
                operation,
                BRANCH_QUERY,
                json!({
                    "owner": self.owner,
                    "name": self.repo,
                    "qualifiedName": format!("refs/heads/{name}"),
                }),
            )
            .await?;

        let repository = data
            .repository
            .ok_or_else(|| RemoteError::missing_data(operation, "repository"))?;
        repository.git_ref.map(remote_branch).transpose()
    }

    async fn open_pull_requests(
        &self,
        base: &str,
        head: &str,
    ) -> Result<Vec<PullRequestState>, RemoteError> {
        let operation = "pull request lookup";
        let data: RepositoryResponse<PullRequestRepository> = self
            .graphql(
                operation,
                PULL_REQUESTS_QUERY,
                json!({
                    "owner": self.owner,
                    "name": self.repo,
                    "base": base,
                    "head": head,
                }),
            )
            .await?;

        let repository = data
            .repository
            .ok_or_else(|| RemoteError::missing_data(operation, "repository"))?;
        Ok(repository
            .pull_requests
            .nodes
            .into_iter()
            .map(PullRequestState::from)
            .collect())
    }

    async fn create_branch(
        &self,
        repository_id: &str,
        name: &str,
        oid: &str,
    ) -> Result<(), RemoteError> {
        let _: Value = self
            .graphql(
                "branch creation",
                CREATE_REF_MUTATION,
                json!({
                    "repositoryId": repository_id,
                    "name": format!("refs/heads/{name}"),
                    "oid": oid,
                }),
            )
            .await?;
        Ok(())
    }

    async fn delete_ref(&self, ref_id: &str) -> Result<(), RemoteError> {
        let _: Value = self
            .graphql(
                "ref deletion",
                DELETE_REF_MUTATION,
                json!({ "refId": ref_id }),
            )
            .await?;
        Ok(())
    }

    async fn update_ref(&self, ref_id: &str, oid: &str, force: bool) -> Result<(), RemoteError> {
        let _: Value = self
            .graphql(
                "ref update",
                UPDATE_REF_MUTATION,
                json!({ "refId": ref_id, "oid": oid, "force": force }),
            )
            .await?;
        Ok(())
    }

    async fn create_commit(&self, request: &CommitRequest) -> Result<String, RemoteError> {
        let operation = "commit creation";
        let data: CreateCommitData = self
            .graphql(
                operation,
                CREATE_COMMIT_MUTATION,
                json!({
                    "branch": {
                        "repositoryNameWithOwner": self.name_with_owner(),
                        "branchName": request.branch,
                    },
                    "expectedHeadOid": request.expected_parent,
                    "message": {
                        "headline": request.headline,
                        "body": request.body,
                    },
                    "fileChanges": {
                        "additions": request.additions,
                    },
                }),
            )
            .await?;

        data.create_commit_on_branch
            .and_then(|payload| payload.commit)
            .map(|commit| commit.oid)
            .ok_or_else(|| RemoteError::missing_data(operation, "commit oid"))
    }

    async fn open_pull_request(
        &self,
        base: &str,
        head: &str,
        title: &str,
    ) -> Result<u64, RemoteError> {
        debug!(base, head, "creating pull request");
        let pr = self
            .client
            .pulls(&self.owner, &self.repo)
            .create(title, head, base)
            .send()
            .await
            .map_err(|e| RemoteError::request("pull request creation", e))?;
        Ok(pr.number)
    }
}
