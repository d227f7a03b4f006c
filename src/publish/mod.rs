//! Publishing an update plan to the remote
//!
//! This module provides:
//! - Reconciliation of the update branch with the remote state
//! - Sequential execution and committing of update commands
//! - Opening (or reusing) the update pull request

mod branch;
mod pull_request;
mod sequencer;

pub use branch::{decide, BranchReconciler};
pub use pull_request::{publish, PublishedPullRequest};
pub use sequencer::CommitSequencer;
