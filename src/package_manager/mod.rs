//! Package manager backends
//!
//! A backend knows how to compute the update plan for one manifest and which
//! files an update command rewrites. Backends are selected by name at startup.

mod composer;

pub use composer::Composer;

use crate::domain::PlannedUpdate;
use crate::error::{ConfigError, Result};
use crate::exec::CommandRunner;
use crate::update::UpdateFilter;
use async_trait::async_trait;
use std::fmt;
use std::path::{Path, PathBuf};
use std::str::FromStr;
use std::sync::Arc;

/// Capabilities every package manager backend provides
#[async_trait]
pub trait PackageManager: Send + Sync {
    /// Compute the ordered update plan for `manifest`
    async fn list_updates(
        &self,
        filter: &UpdateFilter,
        manifest: &Path,
    ) -> Result<Vec<PlannedUpdate>>;

    /// Files an update command may rewrite, the manifest first
    fn touched_files(&self, manifest: &Path) -> Vec<PathBuf>;
}

/// Supported package manager types
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PackageManagerKind {
    Composer,
}

impl PackageManagerKind {
    /// Returns the configuration name of this package manager
    pub fn name(&self) -> &'static str {
        match self {
            PackageManagerKind::Composer => "composer",
        }
    }
}

impl fmt::Display for PackageManagerKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

impl FromStr for PackageManagerKind {
    type Err = ConfigError;

    fn from_str(s: &str) -> std::result::Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "composer" => Ok(PackageManagerKind::Composer),
            _ => Err(ConfigError::UnsupportedPackageManager {
                value: s.to_string(),
            }),
        }
    }
}

/// Get the backend for a package manager type
pub fn create_package_manager(
    kind: PackageManagerKind,
    runner: Arc<dyn CommandRunner>,
) -> Box<dyn PackageManager> {
    match kind {
        PackageManagerKind::Composer => Box::new(Composer::new(runner)),
    }
}

/// Directory an update command for `manifest` runs in
pub(crate) fn manifest_dir(manifest: &Path) -> PathBuf {
    match manifest.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
        _ => PathBuf::from("."),
    }
}
