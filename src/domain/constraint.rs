//! Version constraint expressions as declared in a manifest
//!
//! Handles the styles that matter when a constraint has to be widened:
//! - Caret ranges: `^1.2.3`
//! - Patch-pinned tilde ranges: `~1.2.3`
//! - Minor-pinned tilde ranges: `~1.2`
//! - Everything else (bare versions, comparisons, wildcards, alternatives)

use crate::error::ConstraintError;
use serde::{Deserialize, Serialize};
use std::fmt;

/// The widening style of a constraint expression
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ConstraintStyle {
    /// Caret range (e.g., `^1.2.3`)
    Caret,
    /// Tilde range with three components (e.g., `~1.2.3`)
    TildePatch,
    /// Tilde range with fewer than three components (e.g., `~1.2`)
    TildeMinor,
    /// Any other form (e.g., `1.2.3`, `>=1.0 <2.0`, `1.2.*`)
    Other,
}

/// A declared version requirement; immutable, replaced rather than edited
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ConstraintExpression(String);

impl ConstraintExpression {
    /// Creates a constraint from its raw manifest text
    pub fn new(raw: impl AsRef<str>) -> Result<Self, ConstraintError> {
        let trimmed = raw.as_ref().trim();
        if trimmed.is_empty() {
            return Err(ConstraintError::invalid_constraint(
                raw.as_ref(),
                "constraint is empty",
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    /// Returns the constraint text
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Classifies the constraint by the prefix it was written with
    pub fn style(&self) -> ConstraintStyle {
        if let Some(rest) = self.0.strip_prefix('~') {
            if rest.split('.').count() == 3 {
                ConstraintStyle::TildePatch
            } else {
                ConstraintStyle::TildeMinor
            }
        } else if self.0.starts_with('^') {
            ConstraintStyle::Caret
        } else {
            ConstraintStyle::Other
        }
    }
}

impl fmt::Display for ConstraintExpression {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}
