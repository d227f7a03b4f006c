//! depbot - Dependency update pull request bot library
//!
//! This library provides the core functionality for keeping a project's
//! dependencies current through pull requests:
//! - Listing outdated dependencies with the package manager (Composer)
//! - Grouping packages whose updates block each other into atomic groups
//! - Reconciling the update branch with the remote
//! - Committing one update per group and publishing the pull request

pub mod cli;
pub mod config;
pub mod domain;
pub mod error;
pub mod exec;
pub mod orchestrator;
pub mod output;
pub mod package_manager;
pub mod progress;
pub mod publish;
pub mod remote;
pub mod update;
