//! Update filter configuration
//!
//! This module provides the UpdateFilter struct that decides which outdated
//! dependencies take part in grouping.

/// Include/exclude filter applied to outdated dependency names
#[derive(Debug, Clone, Default)]
pub struct UpdateFilter {
    /// If non-empty, only these packages are considered
    pub include: Vec<String>,
    /// Packages that are never considered
    pub exclude: Vec<String>,
}

impl UpdateFilter {
    /// Create a new UpdateFilter that lets everything through
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the allow-list
    pub fn with_include(mut self, include: Vec<String>) -> Self {
        self.include = include;
        self
    }

    /// Set packages to exclude
    pub fn with_exclude(mut self, exclude: Vec<String>) -> Self {
        self.exclude = exclude;
        self
    }

    /// Check if a package should be processed
    pub fn should_process_package(&self, name: &str) -> bool {
        if !self.include.is_empty() && !self.include.iter().any(|p| p == name) {
            return false;
        }
        // Exclusion wins even over an explicit include
        !self.exclude.iter().any(|p| p == name)
    }
}
