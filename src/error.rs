//! Application error types using thiserror
//!
//! Error hierarchy:
//! - ManifestError: Issues with locating, parsing or writing package.json
//! - RegistryError: Issues fetching the upstream version list
//! - ConfigError: Issues with the configuration file
//! - SnapshotError: Issues capturing or restoring the workspace snapshot

use std::path::PathBuf;
use thiserror::Error;

/// Application-level error type
#[derive(Error, Debug)]
pub enum AppError {
    /// Manifest file related errors
    #[error(transparent)]
    Manifest(#[from] ManifestError),

    /// Version feed related errors
    #[error(transparent)]
    Registry(#[from] RegistryError),

    /// Configuration related errors
    #[error(transparent)]
    Config(#[from] ConfigError),

    /// Snapshot related errors
    #[error(transparent)]
    Snapshot(#[from] SnapshotError),
}

/// Errors related to manifest file operations
#[derive(Error, Debug)]
pub enum ManifestError {
    /// No package.json at or above the start directory
    #[error("could not find package.json in {start} or any parent directory")]
    NotFound { start: PathBuf },

    /// Failed to read manifest file
    #[error("failed to read manifest file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Failed to write manifest file
    #[error("failed to write manifest file {path}: {source}")]
    WriteError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parsing error, including dependency groups of the wrong shape
    #[error("failed to parse JSON in {path}: {message}")]
    JsonParseError { path: PathBuf, message: String },

    /// JSON serialization error
    #[error("failed to serialize manifest {path}: {message}")]
    SerializeError { path: PathBuf, message: String },
}

/// Errors related to fetching the version list
#[derive(Error, Debug)]
pub enum RegistryError {
    /// Failed to build the HTTP client
    #[error("failed to create HTTP client: {message}")]
    ClientError { message: String },

    /// Network request failed
    #[error("failed to fetch {url}: {message}")]
    NetworkError { url: String, message: String },

    /// Server answered with a non-success status
    #[error("failed to fetch {url}: HTTP {status}")]
    HttpStatus { url: String, status: u16 },

    /// Response body was not the expected JSON
    #[error("invalid response from {url}: {message}")]
    InvalidResponse { url: String, message: String },

    /// Timeout
    #[error("timeout while fetching {url}")]
    Timeout { url: String },
}

/// Errors related to configuration
#[derive(Error, Debug)]
pub enum ConfigError {
    /// Failed to read the config file
    #[error("failed to read config file {path}: {source}")]
    ReadError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// TOML parsing error
    #[error("failed to parse TOML in {path}: {message}")]
    TomlParseError { path: PathBuf, message: String },

    /// Explicit config file does not exist
    #[error("config file not found: {path}")]
    NotFound { path: PathBuf },

    /// Neither a version nor list mode was requested
    #[error("either a VERSION or --setup-versions is required")]
    MissingMode,
}

/// Errors related to the workspace snapshot
#[derive(Error, Debug)]
pub enum SnapshotError {
    /// Copying an entry into or out of the snapshot failed
    #[error("failed to copy {from} to {to}: {source}")]
    CopyError {
        from: PathBuf,
        to: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// Removing a workspace entry failed
    #[error("failed to remove {path}: {source}")]
    RemoveError {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// snapshot.json could not be read or written
    #[error("invalid snapshot metadata {path}: {message}")]
    MetadataError { path: PathBuf, message: String },
}

impl ManifestError {
    /// Creates a new NotFound error
    pub fn not_found(start: impl Into<PathBuf>) -> Self {
        ManifestError::NotFound {
            start: start.into(),
        }
    }

    /// Creates a new ReadError
    pub fn read_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::ReadError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new WriteError
    pub fn write_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        ManifestError::WriteError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new JsonParseError
    pub fn json_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ManifestError::JsonParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl RegistryError {
    /// Creates a new NetworkError
    pub fn network_error(url: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::NetworkError {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new InvalidResponse error
    pub fn invalid_response(url: impl Into<String>, message: impl Into<String>) -> Self {
        RegistryError::InvalidResponse {
            url: url.into(),
            message: message.into(),
        }
    }

    /// Creates a new Timeout error
    pub fn timeout(url: impl Into<String>) -> Self {
        RegistryError::Timeout { url: url.into() }
    }
}

impl ConfigError {
    /// Creates a new TomlParseError
    pub fn toml_parse_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        ConfigError::TomlParseError {
            path: path.into(),
            message: message.into(),
        }
    }
}

impl SnapshotError {
    /// Creates a new CopyError
    pub fn copy_error(
        from: impl Into<PathBuf>,
        to: impl Into<PathBuf>,
        source: std::io::Error,
    ) -> Self {
        SnapshotError::CopyError {
            from: from.into(),
            to: to.into(),
            source,
        }
    }

    /// Creates a new RemoveError
    pub fn remove_error(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        SnapshotError::RemoveError {
            path: path.into(),
            source,
        }
    }

    /// Creates a new MetadataError
    pub fn metadata_error(path: impl Into<PathBuf>, message: impl Into<String>) -> Self {
        SnapshotError::MetadataError {
            path: path.into(),
            message: message.into(),
        }
    }
}
