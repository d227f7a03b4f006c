//! Update plan construction
//!
//! Turns grouping verdicts into executable update commands. The command shapes
//! themselves are owned by the package manager through [`CommandSyntax`].

use super::constraint::resolve_constraint;
use super::GroupVerdict;
use crate::domain::{
    ConstraintExpression, OutdatedDependency, PlannedUpdate, SkipReason, UpdateCommand,
    UpdateGroup,
};
use crate::error::{ManifestError, Result};
use std::path::PathBuf;

/// Command line shapes of a package manager
pub trait CommandSyntax: Send + Sync {
    /// Upgrade a package in place, following its dependency graph
    fn update_in_place(&self, name: &str) -> Vec<String>;

    /// Declare new constraints and update with dependencies
    fn require(&self, requirements: &[(String, ConstraintExpression)], dev: bool) -> Vec<String>;
}

/// Builds the ordered update plan for one manifest
pub struct PlanBuilder<'a> {
    syntax: &'a dyn CommandSyntax,
    manifest: PathBuf,
    working_dir: PathBuf,
}

impl<'a> PlanBuilder<'a> {
    /// Create a builder for commands run in `working_dir` against `manifest`
    pub fn new(
        syntax: &'a dyn CommandSyntax,
        manifest: impl Into<PathBuf>,
        working_dir: impl Into<PathBuf>,
    ) -> Self {
        Self {
            syntax,
            manifest: manifest.into(),
            working_dir: working_dir.into(),
        }
    }

    /// Build one plan entry per verdict, keeping their order
    pub fn build(&self, verdicts: Vec<GroupVerdict>) -> Result<Vec<PlannedUpdate>> {
        verdicts
            .into_iter()
            .map(|verdict| match verdict {
                GroupVerdict::Valid(group) => self.command_for(&group).map(PlannedUpdate::Ready),
                GroupVerdict::Mixed(group) => Ok(PlannedUpdate::Skipped {
                    packages: group.names(),
                    reason: SkipReason::MixedDevClassification,
                }),
            })
            .collect()
    }

    fn command_for(&self, group: &UpdateGroup) -> Result<UpdateCommand> {
        if let [member] = group.members() {
            return self.single_command(member);
        }

        let requirements = group
            .members()
            .iter()
            .map(|member| -> Result<(String, ConstraintExpression)> {
                Ok((member.name.clone(), self.resolve(member)?))
            })
            .collect::<Result<Vec<_>>>()?;
        let dev = group.uniform_dev().unwrap_or(false);

        let details = group
            .members()
            .iter()
            .map(|m| format!("{} to {}", m.name, m.latest_version))
            .collect::<Vec<_>>()
            .join("\n");

        Ok(UpdateCommand::new(
            self.syntax.require(&requirements, dev),
            &self.working_dir,
            format!("Update {} dependencies", group.len()),
        )
        .with_details(details))
    }

    fn single_command(&self, member: &OutdatedDependency) -> Result<UpdateCommand> {
        let current = self.current_constraint(member)?;
        let resolved = resolve_constraint(current, &member.latest_version)?;

        let args = if &resolved == current {
            self.syntax.update_in_place(&member.name)
        } else {
            self.syntax
                .require(&[(member.name.clone(), resolved)], member.is_dev)
        };

        Ok(UpdateCommand::new(
            args,
            &self.working_dir,
            format!("Update {} to {}", member.name, member.latest_version),
        ))
    }

    fn resolve(&self, member: &OutdatedDependency) -> Result<ConstraintExpression> {
        let current = self.current_constraint(member)?;
        Ok(resolve_constraint(current, &member.latest_version)?)
    }

    fn current_constraint<'m>(
        &self,
        member: &'m OutdatedDependency,
    ) -> Result<&'m ConstraintExpression> {
        member
            .constraint
            .as_ref()
            .ok_or_else(|| ManifestError::missing_constraint(&member.name, &self.manifest).into())
    }
}
