//! Core domain models for depbot
//!
//! This module contains the fundamental types used throughout the application:
//! - Outdated dependency information read from the manifest and the package manager
//! - Version constraint expressions and their styles
//! - Conflict edges and atomic update groups
//! - Executable update commands and the planned-update result type
//! - Remote branch / pull request state
//! - The outcome of a run

mod command;
mod constraint;
mod dependency;
mod outcome;
mod remote;
mod update_group;

pub use command::{PlannedUpdate, SkipReason, UpdateCommand};
pub use constraint::{ConstraintExpression, ConstraintStyle};
pub use dependency::OutdatedDependency;
pub use outcome::{CommitRecord, RunOutcome};
pub use remote::{
    BranchAction, BranchState, CommitRequest, FileAddition, Mergeable, PullRequestState,
    RemoteBranch, RepositoryData,
};
pub use update_group::{ConflictEdge, UpdateGroup};
