//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ConfigError: Missing or invalid run configuration
//! - ManifestError: Issues with the manifest or package manager reports
//! - ConstraintError: Malformed version constraints or target versions
//! - ProcessError: External command invocation failures
//! - RemoteError: Version-control host API failures
//! - IoError: File system operation failures

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Version constraint errors
    #[error(transparent)]
    Constraint(#[from] ConstraintError),

    /// External command errors
    #[error(transparent)]
    Process(#[from] ProcessError),

    /// Remote host API errors
    #[error(transparent)]
    Remote(#[from] RemoteError),

    /// IO related errors
    #[error(transparent)]
    Io(#[from] IoError),
}

/// Result alias used across the crate
pub type Result<T, E = AppError> = std::result::Result<T, E>;

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// A required input was not provided
    #[error("missing required input: {name}")]
    MissingInput { name: String },

    /// Manifest path does not exist
    #[error("package manager manifest not found at {path}")]
    ManifestNotFound { path: PathBuf },

    /// Manifest path is not inside the workspace root
    #[error("manifest {path} is outside of the workspace {workspace}")]
    ManifestOutsideWorkspace { path: PathBuf, workspace: PathBuf },

    /// Repository slug is not `owner/name`
    #[error("invalid repository '{value}': expected 'owner/name'")]
    InvalidRepository { value: String },

    /// Package manager selector is unknown
    #[error("package manager type '{value}' isn't supported")]
    UnsupportedPackageManager { value: String },
}

/// Errors related to manifest files and package manager reports
#[derive(Error, Debug)]
pub enum ManifestError {
    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error (composer.json or a command's JSON output)
    #[error("failed to parse JSON in {origin}: {message}")]
    JsonParseError { origin: String, message: String },

    /// Dependency has no declared constraint in the manifest
    #[error("no version constraint declared for '{package}' in {path}")]
    MissingConstraint { package: String, path: PathBuf },
}

/// Errors related to version constraint arithmetic
#[derive(Error, Debug)]
pub enum ConstraintError {
    /// Constraint expression could not be understood
    #[error("invalid version constraint '{constraint}': {message}")]
    InvalidConstraint { constraint: String, message: String },

    /// Target version could not be parsed
    #[error("invalid target version '{version}': {message}")]
    InvalidVersion { version: String, message: String },
}

/// Errors related to external command execution
#[derive(Error, Debug)]
pub enum ProcessError {
    /// Nothing to execute
    #[error("empty command")]
    EmptyCommand,

    /// Process could not be started
    #[error("failed to execute '{command}': {source}")]
    SpawnFailed {
        command: String,
        #[source]
        source: std::io::Error,
    },

    /// Process exited unsuccessfully
    #[error("'{command}' failed with exit code {code}: {output}")]
    Failed {
        command: String,
        code: i32,
        output: String,
    },
}

/// Errors related to the version-control host API
#[derive(Error, Debug)]
pub enum RemoteError {
    /// Client could not be constructed
    #[error("failed to create API client: {message}")]
    Client { message: String },

    /// Transport or HTTP level failure
    #[error("{operation} failed: {message}")]
    Request { operation: String, message: String },

    /// GraphQL returned an error payload
    #[error("{operation} failed: GraphQL error: {message}")]
    GraphQl { operation: String, message: String },

    /// Response is missing data the call requires
    #[error("{operation} failed: response is missing {what}")]
    MissingData { operation: String, what: String },
}

/// Errors related to IO operations
#[derive(Error, Debug)]
pub enum IoError {
    /// Failed to read a touched file for a commit
    #[error("failed to read {path}: {source}")]
    ReadFailed {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl ConfigError {
    /// Creates a new MissingInput error
    pub fn missing_input(name: impl Into<String>) -> Self {
        ConfigError::MissingInput { name: name.into() }
    }

    /// Creates a new ManifestNotFound error
    pub fn manifest_not_found(path: impl Into<PathBuf>) -> Self {
        ConfigError::ManifestNotFound { path: path.into() }
    }
}

impl ManifestError {
    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(origin: impl Into<String>, message: impl Into<String>) -> Self {
        ManifestError::JsonParseError {
            origin: origin.into(),
            message: message.into(),
        }
    }

    /// Creates a new MissingConstraint error
    pub fn missing_constraint(package: impl Into<String>, path: impl Into<PathBuf>) -> Self {
        ManifestError::MissingConstraint {
            package: package.into(),
            path: path.into(),
        }
    }
}

impl ConstraintError {
    /// Creates a new InvalidConstraint error
    pub fn invalid_constraint(constraint: impl Into<String>, message: impl Into<String>) -> Self {
        ConstraintError::InvalidConstraint {
            constraint: constraint.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidVersion error
    pub fn invalid_version(version: impl Into<String>, message: impl Into<String>) -> Self {
        ConstraintError::InvalidVersion {
            version: version.into(),
            message: message.into(),
        }
    }
}

impl RemoteError {
    /// Creates a new Request error
    pub fn request(operation: impl Into<String>, message: impl ToString) -> Self {
        RemoteError::Request {
            operation: operation.into(),
            message: message.to_string(),
        }
    }

    /// Creates a new MissingData error
    pub fn missing_data(operation: impl Into<String>, what: impl Into<String>) -> Self {
        RemoteError::MissingData {
            operation: operation.into(),
            what: what.into(),
        }
    }
}
