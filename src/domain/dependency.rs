//! Outdated dependency information structures

use super::ConstraintExpression;
use serde::{Deserialize, Serialize};
use std::fmt;

/// A direct dependency whose installed version is behind its latest release
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct OutdatedDependency {
    /// Package name, unique within a manifest
    pub name: String,
    /// Currently installed version
    pub installed_version: String,
    /// Latest available version
    pub latest_version: String,
    /// Whether this is a development-only dependency
    pub is_dev: bool,
    /// Constraint declared in the manifest, if any
    #[serde(skip_serializing_if = "Option::is_none")]
    pub constraint: Option<ConstraintExpression>,
}

impl OutdatedDependency {
    /// Creates a new outdated dependency
    pub fn new(
        name: impl Into<String>,
        installed_version: impl Into<String>,
        latest_version: impl Into<String>,
        is_dev: bool,
    ) -> Self {
        Self {
            name: name.into(),
            installed_version: installed_version.into(),
            latest_version: latest_version.into(),
            is_dev,
            constraint: None,
        }
    }

    /// Sets the declared constraint (builder pattern)
    pub fn with_constraint(mut self, constraint: ConstraintExpression) -> Self {
        self.constraint = Some(constraint);
        self
    }
}

impl fmt::Display for OutdatedDependency {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let dev_marker = if self.is_dev { " (dev)" } else { "" };
        write!(
            f,
            "{} {} -> {}{}",
            self.name, self.installed_version, self.latest_version, dev_marker
        )
    }
}
