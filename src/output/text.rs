//! Text output formatter for human-readable display
//!
//! This module provides:
//! - Run outcome display with colors
//! - Planned update listing with command lines in dry-run mode
//! - Skipped group display with reasons

use crate::domain::{BranchAction, CommitRecord, PlannedUpdate, RunOutcome};
use crate::output::{OutputFormatter, Verbosity};
use colored::Colorize;
use std::io::Write;

/// Text formatter for human-readable output
pub struct TextFormatter {
    /// Verbosity level
    verbosity: Verbosity,
    /// Whether to use colors
    color: bool,
}

impl TextFormatter {
    /// Create a new text formatter
    pub fn new(verbosity: Verbosity) -> Self {
        Self {
            verbosity,
            color: true,
        }
    }

    /// Create a new text formatter with color option
    pub fn with_color(verbosity: Verbosity, color: bool) -> Self {
        Self { verbosity, color }
    }

    /// Get the dry-run prefix
    fn dry_run_prefix(&self) -> String {
        if self.color {
            format!("{} ", "(dry-run)".cyan())
        } else {
            "(dry-run) ".to_string()
        }
    }

    /// Describe a branch action in one line
    fn describe_action(action: &BranchAction, branch: &str) -> String {
        match action {
            BranchAction::Create => format!("create branch {}", branch),
            BranchAction::ResetToBase { pull_request, .. } => format!(
                "reset branch {} to base and reuse pull request #{}",
                branch, pull_request
            ),
            BranchAction::Recreate { .. } => format!("recreate branch {}", branch),
            BranchAction::AlreadyPending { pull_request } => {
                format!("pull request #{} is already open", pull_request)
            }
        }
    }

    fn format_commits(
        &self,
        commits: &[CommitRecord],
        writer: &mut dyn Write,
    ) -> std::io::Result<()> {
        for commit in commits {
            let short = commit.oid.get(..7).unwrap_or(&commit.oid);
            if self.color {
                writeln!(writer, "  {} {}", short.dimmed(), commit.headline)?;
            } else {
                writeln!(writer, "  {} {}", short, commit.headline)?;
            }
        }
        Ok(())
    }

    fn format_plan(&self, plan: &[PlannedUpdate], writer: &mut dyn Write) -> std::io::Result<()> {
        for entry in plan {
            match entry {
                PlannedUpdate::Ready(command) => {
                    if self.color {
                        writeln!(writer, "  {}", command.description.bright_white().bold())?;
                        writeln!(writer, "    {}", command.command_line().dimmed())?;
                    } else {
                        writeln!(writer, "  {}", command.description)?;
                        writeln!(writer, "    {}", command.command_line())?;
                    }
                    if self.verbosity == Verbosity::Verbose {
                        if let Some(details) = &command.detailed_description {
                            for line in details.lines() {
                                writeln!(writer, "      {}", line)?;
                            }
                        }
                    }
                }
                PlannedUpdate::Skipped { packages, reason } => {
                    let line = format!("  {} ({})", packages.join(", "), reason);
                    if self.color {
                        writeln!(writer, "{}", line.dimmed())?;
                    } else {
                        writeln!(writer, "{}", line)?;
                    }
                }
            }
        }
        Ok(())
    }
}

impl OutputFormatter for TextFormatter {
    fn format(&self, outcome: &RunOutcome, writer: &mut dyn Write) -> std::io::Result<()> {
        match outcome {
            RunOutcome::Completed {
                branch,
                pull_request,
                reused_pull_request,
                commits,
            } => {
                let verb = if *reused_pull_request {
                    "updated"
                } else {
                    "opened"
                };
                if self.color {
                    writeln!(
                        writer,
                        "{} Pull request #{} {} from {}",
                        "✓".green(),
                        pull_request.to_string().bold(),
                        verb,
                        branch.bold()
                    )?;
                } else {
                    writeln!(
                        writer,
                        "Pull request #{} {} from {}",
                        pull_request, verb, branch
                    )?;
                }
                if self.verbosity != Verbosity::Quiet {
                    self.format_commits(commits, writer)?;
                }
            }
            RunOutcome::NoUpdates => {
                if self.verbosity != Verbosity::Quiet {
                    if self.color {
                        writeln!(writer, "{}", "No updates needed".green())?;
                    } else {
                        writeln!(writer, "No updates needed")?;
                    }
                }
            }
            RunOutcome::AlreadyPending {
                branch,
                pull_request,
            } => {
                if self.color {
                    writeln!(
                        writer,
                        "{} Pull request #{} from {} is already open",
                        "!".yellow(),
                        pull_request,
                        branch.bold()
                    )?;
                } else {
                    writeln!(
                        writer,
                        "Pull request #{} from {} is already open",
                        pull_request, branch
                    )?;
                }
            }
            RunOutcome::DryRun {
                branch,
                action,
                plan,
            } => {
                writeln!(
                    writer,
                    "{}Would {}",
                    self.dry_run_prefix(),
                    Self::describe_action(action, branch)
                )?;
                if plan.is_empty() {
                    writeln!(writer, "  No updates needed")?;
                } else {
                    self.format_plan(plan, writer)?;
                }
            }
        }
        Ok(())
    }
}
