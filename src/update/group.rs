//! Dependency conflict grouping
//!
//! Partitions outdated dependencies into atomic update groups: a dependency whose
//! upgrade is blocked by a requirement on another outdated dependency is grouped
//! with it, and the blocked dependency is not updated on its own.

use super::conflict::BlockingRequirement;
use super::UpdateFilter;
use crate::domain::{ConflictEdge, OutdatedDependency, UpdateGroup};
use crate::error::Result;
use async_trait::async_trait;
use std::collections::HashSet;
use tracing::{debug, warn};

/// Answers "why can't this dependency be upgraded to its latest version"
#[async_trait]
pub trait BlockingProbe: Send + Sync {
    /// Requirements reported as blocking the upgrade of `dependency`
    async fn probe(&self, dependency: &OutdatedDependency) -> Result<Vec<BlockingRequirement>>;
}

/// A tentative group after the dev/non-dev purity check
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum GroupVerdict {
    /// All members share the same dev classification
    Valid(UpdateGroup),
    /// Members mix dev and non-dev dependencies; the group is dropped
    Mixed(UpdateGroup),
}

impl GroupVerdict {
    /// The underlying group
    pub fn group(&self) -> &UpdateGroup {
        match self {
            GroupVerdict::Valid(group) | GroupVerdict::Mixed(group) => group,
        }
    }
}

/// Groups outdated dependencies by the conflicts their blocking probes report
pub struct ConflictGrouper<'a> {
    outdated: &'a [OutdatedDependency],
    filter: &'a UpdateFilter,
}

impl<'a> ConflictGrouper<'a> {
    /// Create a grouper over the full outdated report
    pub fn new(outdated: &'a [OutdatedDependency], filter: &'a UpdateFilter) -> Self {
        Self { outdated, filter }
    }

    /// Dependencies that pass the include/exclude filter, in report order
    pub fn candidates(&self) -> impl Iterator<Item = &'a OutdatedDependency> + '_ {
        self.outdated
            .iter()
            .filter(|dep| self.filter.should_process_package(&dep.name))
    }

    /// Run the blocking probe for every candidate and build the groups
    pub async fn group(&self, probe: &dyn BlockingProbe) -> Result<Vec<GroupVerdict>> {
        let mut groups = Vec::new();
        let mut edges = Vec::new();

        for dependency in self.candidates() {
            let requirements = probe.probe(dependency).await?;
            let mut group = UpdateGroup::new(dependency.clone());

            for requirement in requirements
                .iter()
                .filter(|r| r.requirer == dependency.name && r.required != dependency.name)
            {
                let Some(blocked) = self.find_outdated(&requirement.required) else {
                    continue;
                };
                debug!(
                    dependent = %dependency.name,
                    blocking = %blocked.name,
                    constraint = %requirement.constraint,
                    "upgrade blocked by outdated dependency"
                );
                edges.push(ConflictEdge::new(&dependency.name, &blocked.name));
                group.push(blocked.clone());
            }

            groups.push(group);
        }

        Ok(Self::finalize(groups, &edges))
    }

    fn find_outdated(&self, name: &str) -> Option<&'a OutdatedDependency> {
        self.outdated.iter().find(|dep| dep.name == name)
    }

    /// Drop groups keyed by an edge target and check dev/non-dev purity
    fn finalize(groups: Vec<UpdateGroup>, edges: &[ConflictEdge]) -> Vec<GroupVerdict> {
        let blocking: HashSet<&str> = edges.iter().map(|e| e.blocking.as_str()).collect();

        groups
            .into_iter()
            .filter(|group| !blocking.contains(group.key().name.as_str()))
            .map(|group| {
                if group.uniform_dev().is_some() {
                    GroupVerdict::Valid(group)
                } else {
                    warn!(
                        packages = %group.names().join(", "),
                        "grouped dev and non-dev dependencies can't be updated automatically"
                    );
                    GroupVerdict::Mixed(group)
                }
            })
            .collect()
    }
}
