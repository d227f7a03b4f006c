//! Conflict edges and atomic update groups

use super::OutdatedDependency;
use serde::{Deserialize, Serialize};

/// Upgrading `dependent` to its latest version is blocked by a requirement on `blocking`
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct ConflictEdge {
    /// Package being upgraded
    pub dependent: String,
    /// Outdated package whose requirement blocks the upgrade
    pub blocking: String,
}

impl ConflictEdge {
    /// Creates a new conflict edge
    pub fn new(dependent: impl Into<String>, blocking: impl Into<String>) -> Self {
        Self {
            dependent: dependent.into(),
            blocking: blocking.into(),
        }
    }
}

/// Dependencies that must be updated together; the first member is the group key
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateGroup {
    members: Vec<OutdatedDependency>,
}

impl UpdateGroup {
    /// Creates a group keyed by `key`
    pub fn new(key: OutdatedDependency) -> Self {
        Self { members: vec![key] }
    }

    /// Adds a member unless a dependency with the same name is already present
    pub fn push(&mut self, member: OutdatedDependency) {
        if !self.contains(&member.name) {
            self.members.push(member);
        }
    }

    /// The dependency that opened this group
    pub fn key(&self) -> &OutdatedDependency {
        &self.members[0]
    }

    /// All members in insertion order
    pub fn members(&self) -> &[OutdatedDependency] {
        &self.members
    }

    /// Number of members
    pub fn len(&self) -> usize {
        self.members.len()
    }

    /// Groups always hold their key, so they are never empty
    pub fn is_empty(&self) -> bool {
        false
    }

    /// Returns true if a member has the given name
    pub fn contains(&self, name: &str) -> bool {
        self.members.iter().any(|m| m.name == name)
    }

    /// Returns the shared dev classification, or None when members disagree
    pub fn uniform_dev(&self) -> Option<bool> {
        let first = self.key().is_dev;
        self.members
            .iter()
            .all(|m| m.is_dev == first)
            .then_some(first)
    }

    /// Member names in order
    pub fn names(&self) -> Vec<String> {
        self.members.iter().map(|m| m.name.clone()).collect()
    }
}
