//! Run configuration
//!
//! Everything a run needs from its environment is resolved and validated here,
//! once, before any process is started or any remote call is made.

use crate::cli::CliArgs;
use crate::error::ConfigError;
use crate::package_manager::PackageManagerKind;
use crate::update::UpdateFilter;
use std::path::{Component, Path, PathBuf};

/// Validated configuration of a single run
#[derive(Debug, Clone)]
pub struct RunConfig {
    /// API token
    pub token: String,
    /// Repository owner
    pub owner: String,
    /// Repository name
    pub repo: String,
    /// Custom API base URL
    pub api_url: Option<String>,
    /// Commit the update branch starts from
    pub base_sha: String,
    /// Absolute workspace root
    pub workspace: PathBuf,
    /// Absolute manifest path
    pub manifest: PathBuf,
    /// Manifest path relative to the workspace, with forward slashes
    pub manifest_relative: String,
    /// Package manager backend
    pub package_manager: PackageManagerKind,
    /// Prefix of the update branch name
    pub branch_prefix: String,
    /// Package include/exclude filter
    pub filter: UpdateFilter,
    /// Compute the plan only
    pub dry_run: bool,
}

impl RunConfig {
    /// Validate CLI arguments into a run configuration
    pub fn from_args(args: &CliArgs) -> Result<Self, ConfigError> {
        let manifest_arg = args
            .manifest
            .as_ref()
            .ok_or_else(|| ConfigError::missing_input("manifest"))?;
        let package_manager = required(args.package_manager.as_deref(), "package-manager")?
            .parse::<PackageManagerKind>()?;

        let workspace = args
            .workspace
            .canonicalize()
            .map_err(|_| ConfigError::missing_input("workspace"))?;
        let manifest = resolve_manifest(manifest_arg, &workspace)?;
        let manifest_relative = relative_path(&manifest, &workspace)?;

        let token = required(args.token.as_deref(), "token")?.to_string();
        let base_sha = required(args.sha.as_deref(), "sha")?.to_string();
        let (owner, repo) = split_repository(required(args.repository.as_deref(), "repository")?)?;

        let branch_prefix = match args.branch_prefix.trim() {
            "" => crate::cli::DEFAULT_BRANCH_PREFIX.to_string(),
            prefix => prefix.to_string(),
        };

        let filter = UpdateFilter::new()
            .with_include(split_names(&args.include))
            .with_exclude(split_names(&args.exclude));

        Ok(Self {
            token,
            owner,
            repo,
            api_url: args
                .api_url
                .as_deref()
                .map(str::trim)
                .filter(|url| !url.is_empty())
                .map(str::to_string),
            base_sha,
            workspace,
            manifest,
            manifest_relative,
            package_manager,
            branch_prefix,
            filter,
            dry_run: args.dry_run,
        })
    }

    /// Name of the update branch for this manifest
    pub fn head_branch(&self) -> String {
        let prefix = self.branch_prefix.trim_end_matches('/');
        format!("{}/{}", prefix, self.manifest_relative)
    }

    /// Title of the update pull request
    pub fn pull_request_title(&self) -> String {
        format!("Update deps in {}", self.manifest_relative)
    }
}

fn required<'a>(value: Option<&'a str>, name: &str) -> Result<&'a str, ConfigError> {
    value
        .map(str::trim)
        .filter(|v| !v.is_empty())
        .ok_or_else(|| ConfigError::missing_input(name))
}

fn resolve_manifest(manifest: &Path, workspace: &Path) -> Result<PathBuf, ConfigError> {
    // Relative manifests are taken from the current directory, as a shell would
    let candidate = if manifest.is_absolute() {
        manifest.to_path_buf()
    } else {
        std::env::current_dir()
            .map(|cwd| cwd.join(manifest))
            .unwrap_or_else(|_| workspace.join(manifest))
    };

    if !candidate.is_file() {
        return Err(ConfigError::manifest_not_found(manifest));
    }
    candidate
        .canonicalize()
        .map_err(|_| ConfigError::manifest_not_found(manifest))
}

/// `path` relative to `workspace`, with forward slashes and no leading `/`
pub fn relative_path(path: &Path, workspace: &Path) -> Result<String, ConfigError> {
    let relative = path
        .strip_prefix(workspace)
        .map_err(|_| ConfigError::ManifestOutsideWorkspace {
            path: path.to_path_buf(),
            workspace: workspace.to_path_buf(),
        })?;

    Ok(relative
        .components()
        .filter_map(|component| match component {
            Component::Normal(part) => Some(part.to_string_lossy().into_owned()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .join("/"))
}

fn split_repository(value: &str) -> Result<(String, String), ConfigError> {
    match value.split_once('/') {
        Some((owner, repo))
            if !owner.is_empty() && !repo.is_empty() && !repo.contains('/') =>
        {
            Ok((owner.to_string(), repo.to_string()))
        }
        _ => Err(ConfigError::InvalidRepository {
            value: value.to_string(),
        }),
    }
}

/// Flatten repeatable, comma or newline separated name lists
fn split_names(values: &[String]) -> Vec<String> {
    values
        .iter()
        .flat_map(|value| value.split([',', '\n']))
        .map(str::trim)
        .filter(|name| !name.is_empty())
        .map(str::to_string)
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;
    use tempfile::TempDir;

    fn workspace_with_manifest(relative: &str) -> (TempDir, PathBuf) {
        let dir = tempfile::tempdir().unwrap();
        let manifest = dir.path().join(relative);
        std::fs::create_dir_all(manifest.parent().unwrap()).unwrap();
        std::fs::write(&manifest, "{}").unwrap();
        (dir, manifest)
    }

    fn args(workspace: &Path, manifest: &Path, extra: &[&str]) -> CliArgs {
        let mut argv = vec![
            "depbot".to_string(),
            "--manifest".to_string(),
            manifest.display().to_string(),
            "--package-manager".to_string(),
            "composer".to_string(),
            "--workspace".to_string(),
            workspace.display().to_string(),
            "--token".to_string(),
            "t0ken".to_string(),
            "--sha".to_string(),
            "abc123".to_string(),
            "--repository".to_string(),
            "acme/site".to_string(),
        ];
        argv.extend(extra.iter().map(|s| s.to_string()));
        CliArgs::try_parse_from(argv).unwrap()
    }

    #[test]
    fn test_from_args_derives_names() {
        let (dir, manifest) = workspace_with_manifest("app/composer.json");
        let config = RunConfig::from_args(&args(dir.path(), &manifest, &[])).unwrap();

        assert_eq!(config.owner, "acme");
        assert_eq!(config.repo, "site");
        assert_eq!(config.base_sha, "abc123");
        assert_eq!(config.manifest_relative, "app/composer.json");
        assert_eq!(config.head_branch(), "update-deps/app/composer.json");
        assert_eq!(config.pull_request_title(), "Update deps in app/composer.json");
        assert_eq!(config.package_manager, PackageManagerKind::Composer);
        assert!(config.manifest.is_absolute());
    }

    #[test]
    fn test_head_branch_prefix_with_trailing_slash() {
        let (dir, manifest) = workspace_with_manifest("composer.json");
        let config =
            RunConfig::from_args(&args(dir.path(), &manifest, &["--branch-prefix", "deps/"]))
                .unwrap();
        assert_eq!(config.head_branch(), "deps/composer.json");
    }

    #[test]
    fn test_blank_branch_prefix_falls_back_to_default() {
        let (dir, manifest) = workspace_with_manifest("composer.json");
        let config =
            RunConfig::from_args(&args(dir.path(), &manifest, &["--branch-prefix", " "])).unwrap();
        assert_eq!(config.head_branch(), "update-deps/composer.json");
    }

    #[test]
    fn test_include_exclude_are_split() {
        let (dir, manifest) = workspace_with_manifest("composer.json");
        let config = RunConfig::from_args(&args(
            dir.path(),
            &manifest,
            &["--include", "a/a, b/b\nc/c", "--include", "d/d", "--exclude", "e/e,,"],
        ))
        .unwrap();

        assert_eq!(config.filter.include, vec!["a/a", "b/b", "c/c", "d/d"]);
        assert_eq!(config.filter.exclude, vec!["e/e"]);
    }

    #[test]
    fn test_missing_manifest_file() {
        let dir = tempfile::tempdir().unwrap();
        let missing = dir.path().join("composer.json");
        let err = RunConfig::from_args(&args(dir.path(), &missing, &[])).unwrap_err();
        assert!(matches!(err, ConfigError::ManifestNotFound { .. }));
    }

    #[test]
    fn test_manifest_outside_workspace() {
        let (_outer, manifest) = workspace_with_manifest("composer.json");
        let workspace = tempfile::tempdir().unwrap();
        let err = RunConfig::from_args(&args(workspace.path(), &manifest, &[])).unwrap_err();
        assert!(matches!(err, ConfigError::ManifestOutsideWorkspace { .. }));
    }

    #[test]
    fn test_unsupported_package_manager() {
        let (dir, manifest) = workspace_with_manifest("composer.json");
        let mut cli = args(dir.path(), &manifest, &[]);
        cli.package_manager = Some("npm".to_string());
        let err = RunConfig::from_args(&cli).unwrap_err();
        assert_eq!(err.to_string(), "package manager type 'npm' isn't supported");
    }

    #[test]
    fn test_missing_inputs() {
        let (dir, manifest) = workspace_with_manifest("composer.json");

        let mut cli = args(dir.path(), &manifest, &[]);
        cli.token = None;
        let err = RunConfig::from_args(&cli).unwrap_err();
        assert_eq!(err.to_string(), "missing required input: token");

        let mut cli = args(dir.path(), &manifest, &[]);
        cli.sha = Some("  ".to_string());
        let err = RunConfig::from_args(&cli).unwrap_err();
        assert_eq!(err.to_string(), "missing required input: sha");

        let mut cli = args(dir.path(), &manifest, &[]);
        cli.manifest = None;
        let err = RunConfig::from_args(&cli).unwrap_err();
        assert_eq!(err.to_string(), "missing required input: manifest");
    }

    #[test]
    fn test_invalid_repository() {
        let (dir, manifest) = workspace_with_manifest("composer.json");
        for value in ["acme", "/site", "acme/", "a/b/c"] {
            let mut cli = args(dir.path(), &manifest, &[]);
            cli.repository = Some(value.to_string());
            let err = RunConfig::from_args(&cli).unwrap_err();
            assert!(matches!(err, ConfigError::InvalidRepository { .. }), "{value}");
        }
    }

    #[test]
    fn test_relative_path_uses_forward_slashes() {
        let relative = relative_path(
            Path::new("/work/services/api/composer.lock"),
            Path::new("/work"),
        )
        .unwrap();
        assert_eq!(relative, "services/api/composer.lock");
    }

    #[test]
    fn test_split_names() {
        let names = split_names(&["a/a,b/b".to_string(), "\n c/c \n".to_string()]);
        assert_eq!(names, vec!["a/a", "b/b", "c/c"]);
    }
}
