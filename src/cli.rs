//! CLI argument parsing module for depbot

use clap::{ArgAction, Parser};
use std::path::PathBuf;

/// Default prefix of update branch names
pub const DEFAULT_BRANCH_PREFIX: &str = "update-deps";

/// Dependency update pull request bot
#[derive(Parser, Debug, Clone)]
#[command(
    name = "depbot",
    version,
    about = "Opens pull requests that update outdated dependencies"
)]
pub struct CliArgs {
    /// Path to the package manager manifest (e.g. composer.json)
    #[arg(short, long)]
    pub manifest: Option<PathBuf>,

    /// Package manager type (supported: composer)
    #[arg(short = 't', long = "package-manager")]
    pub package_manager: Option<String>,

    /// Prefix of the update branch name
    #[arg(long, default_value = DEFAULT_BRANCH_PREFIX)]
    pub branch_prefix: String,

    // Package filters
    /// Update only these packages (repeatable; comma or newline separated)
    #[arg(long, action = ArgAction::Append)]
    pub include: Vec<String>,

    /// Never update these packages (repeatable; comma or newline separated)
    #[arg(long, action = ArgAction::Append)]
    pub exclude: Vec<String>,

    // Remote host
    /// API token
    #[arg(long, env = "GITHUB_TOKEN", hide_env_values = true)]
    pub token: Option<String>,

    /// Repository as owner/name
    #[arg(long, env = "GITHUB_REPOSITORY")]
    pub repository: Option<String>,

    /// Commit the update branch is based on
    #[arg(long, env = "GITHUB_SHA")]
    pub sha: Option<String>,

    /// Workspace root the repository is checked out in
    #[arg(long, env = "GITHUB_WORKSPACE", default_value = ".")]
    pub workspace: PathBuf,

    /// API base URL (GitHub Enterprise)
    #[arg(long, env = "GITHUB_API_URL")]
    pub api_url: Option<String>,

    // General options
    /// Dry run mode - show the plan without running updates or touching the remote
    #[arg(short = 'n', long)]
    pub dry_run: bool,

    /// Output results in JSON format
    #[arg(long)]
    pub json: bool,

    /// Enable verbose output
    #[arg(short, long)]
    pub verbose: bool,

    /// Enable quiet mode - minimal output
    #[arg(short, long, conflicts_with = "verbose")]
    pub quiet: bool,
}
