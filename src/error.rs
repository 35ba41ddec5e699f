//! Error types for stackctl
//!
//! Uses `thiserror` for library errors. Per-resource failures during a
//! deploy are `DriverError`s (see `domain::ports::resource_driver`) and never
//! abort a run; the variants here are fatal for the whole command.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::services::ValidationErrors;

/// Result type alias for stackctl operations
pub type StackResult<T> = Result<T, StackError>;

/// Main error type for stackctl operations
#[derive(Error, Debug)]
pub enum StackError {
    /// Stack configuration failed validation
    #[error("invalid stack config: {0}")]
    Config(ValidationErrors),

    /// Deploy status document failed validation
    #[error("invalid stack status: {0}")]
    Status(ValidationErrors),

    /// Configuration file (or `config.json` inside a directory) not found
    #[error("stack config not found: {path}")]
    ConfigNotFound { path: PathBuf },

    /// IO error on a specific file
    #[error("failed to access {path}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    /// JSON parse or serialization error on a specific file
    #[error("invalid JSON in {path}: {source}")]
    Json {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },

    /// Home directory could not be resolved
    #[error("could not determine home directory (set STACKCTL_TEST_HOME or HOME)")]
    HomeDirUnavailable,

    /// Client profile configuration is missing or malformed
    #[error("client configuration error: {0}")]
    ClientConfig(String),
}

impl StackError {
    pub(crate) fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        StackError::Io {
            path: path.into(),
            source,
        }
    }

    pub(crate) fn json(path: impl Into<PathBuf>, source: serde_json::Error) -> Self {
        StackError::Json {
            path: path.into(),
            source,
        }
    }
}
