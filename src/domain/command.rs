//! Executable update commands and planned-update results

use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

/// An update group materialized as a command line plus commit message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateCommand {
    /// Program followed by its arguments
    pub args: Vec<String>,
    /// Directory the command runs in
    pub working_dir: PathBuf,
    /// One-line description, used as the commit headline
    pub description: String,
    /// Optional multi-line detail, used as the commit body
    #[serde(skip_serializing_if = "Option::is_none")]
    pub detailed_description: Option<String>,
}

impl UpdateCommand {
    /// Creates a new update command
    pub fn new(
        args: Vec<String>,
        working_dir: impl Into<PathBuf>,
        description: impl Into<String>,
    ) -> Self {
        Self {
            args,
            working_dir: working_dir.into(),
            description: description.into(),
            detailed_description: None,
        }
    }

    /// Sets the detailed description (builder pattern)
    pub fn with_details(mut self, details: impl Into<String>) -> Self {
        self.detailed_description = Some(details.into());
        self
    }

    /// The command line joined with spaces, for display
    pub fn command_line(&self) -> String {
        self.args.join(" ")
    }
}

/// Reason why an update group was not turned into a command
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SkipReason {
    /// The group mixes dev and non-dev dependencies
    MixedDevClassification,
}

impl fmt::Display for SkipReason {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            SkipReason::MixedDevClassification => {
                write!(f, "grouped dev and non-dev dependencies can't be updated together")
            }
        }
    }
}

/// One entry of the update plan
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum PlannedUpdate {
    /// A command ready to be executed and committed
    Ready(UpdateCommand),
    /// A group that was dropped
    Skipped {
        /// Names of the group members
        packages: Vec<String>,
        /// Why the group was dropped
        reason: SkipReason,
    },
}

impl PlannedUpdate {
    /// Returns the command if this entry is ready
    pub fn command(&self) -> Option<&UpdateCommand> {
        match self {
            PlannedUpdate::Ready(command) => Some(command),
            PlannedUpdate::Skipped { .. } => None,
        }
    }

    /// Returns true if this entry is ready
    pub fn is_ready(&self) -> bool {
        matches!(self, PlannedUpdate::Ready(_))
    }
}
