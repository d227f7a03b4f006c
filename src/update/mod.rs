//! Update planning for outdated dependencies
//!
//! This module provides:
//! - Version constraint satisfaction and widening
//! - Include/exclude filtering of outdated dependencies
//! - Blocking probe parsing and conflict-aware grouping
//! - Construction of the ordered update plan

pub mod constraint;
mod conflict;
mod filter;
mod group;
mod plan;

pub use conflict::{parse_blocking_probe, BlockingRequirement};
pub use constraint::{parse_version, resolve_constraint, satisfies};
pub use filter::UpdateFilter;
pub use group::{BlockingProbe, ConflictGrouper, GroupVerdict};
pub use plan::{CommandSyntax, PlanBuilder};
