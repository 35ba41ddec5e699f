//! ResourceDriver port - per-service deploy/download capability
//!
//! The reconciler treats drivers polymorphically over this capability
//! pair. Which driver handles a resource is a pure function of its
//! `Service`, resolved through `DriverRegistry`.

use std::path::{Path, PathBuf};

use serde_json::{Map, Value};
use thiserror::Error;

use super::remote::RemoteError;
use crate::domain::value_objects::{PhysicalId, Service};

pub type DriverResult<T> = Result<T, DriverError>;

/// Failure confined to a single resource
#[derive(Error, Debug)]
pub enum DriverError {
    #[error("missing required property '{property}'")]
    MissingProperty { property: String },

    #[error("property '{property}' {message}")]
    InvalidProperty { property: String, message: String },

    #[error("{count} remote jobs are named '{name}', cannot choose one to update")]
    AmbiguousName { name: String, count: usize },

    #[error("unsupported service '{service}'")]
    UnsupportedService { service: String },

    #[error("{} already exists locally (use --overwrite to replace it)", .path.display())]
    LocalExists { path: PathBuf },

    #[error(transparent)]
    Remote(#[from] RemoteError),

    #[error("failed to access {}: {source}", .path.display())]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
}

impl DriverError {
    pub fn missing(property: impl Into<String>) -> Self {
        DriverError::MissingProperty {
            property: property.into(),
        }
    }

    pub fn io(path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        DriverError::Io {
            path: path.into(),
            source,
        }
    }
}

/// How the remote object was brought in line with the configuration
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum DeployAction {
    /// A new remote object was created
    Created,
    /// The object recorded in the prior status was updated in place
    Updated,
    /// An object created out of band was matched by name and taken over
    Adopted,
}

impl DeployAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            DeployAction::Created => "created",
            DeployAction::Updated => "updated",
            DeployAction::Adopted => "adopted",
        }
    }
}

/// Successful driver deploy
#[derive(Debug, Clone, PartialEq)]
pub struct Deployed {
    pub physical_id: PhysicalId,
    pub output: Value,
    pub action: DeployAction,
    /// Non-fatal notes (skipped files, adopted objects...)
    pub warnings: Vec<String>,
}

impl Deployed {
    pub fn new(physical_id: PhysicalId, output: Value, action: DeployAction) -> Self {
        Self {
            physical_id,
            output,
            action,
            warnings: Vec::new(),
        }
    }

    pub fn with_warnings(mut self, warnings: Vec<String>) -> Self {
        self.warnings = warnings;
        self
    }
}

/// Successful driver download
#[derive(Debug, Clone, Default, PartialEq)]
pub struct DownloadReport {
    /// Local files written
    pub written: Vec<PathBuf>,
    pub warnings: Vec<String>,
}

/// Everything a driver gets to know about one resource
#[derive(Debug, Clone, Copy)]
pub struct ResourceRequest<'a> {
    pub id: &'a str,
    pub properties: &'a Map<String, Value>,
    /// Physical id recorded by the previous deploy, if any
    pub prior: Option<&'a PhysicalId>,
    /// Directory relative local paths are resolved against
    pub base_dir: &'a Path,
    pub overwrite: bool,
}

impl<'a> ResourceRequest<'a> {
    /// Required string property
    pub fn required_str(&self, property: &str) -> Result<&'a str, DriverError> {
        self.optional_str(property)?
            .ok_or_else(|| DriverError::missing(property))
    }

    /// Required string property that may also be spelled `alias`
    pub fn required_str_or(&self, property: &str, alias: &str) -> Result<&'a str, DriverError> {
        match self.optional_str(property)? {
            Some(value) => Ok(value),
            None => self
                .optional_str(alias)?
                .ok_or_else(|| DriverError::missing(property)),
        }
    }

    /// Optional string property; present-but-not-a-string is an error
    pub fn optional_str(&self, property: &str) -> Result<Option<&'a str>, DriverError> {
        match self.properties.get(property) {
            None | Some(Value::Null) => Ok(None),
            Some(Value::String(s)) => Ok(Some(s.as_str())),
            Some(_) => Err(DriverError::InvalidProperty {
                property: property.to_string(),
                message: "must be a string".to_string(),
            }),
        }
    }

    /// Resolve a configured local path against the base directory
    pub fn local_path(&self, configured: &str) -> PathBuf {
        let path = Path::new(configured);
        if path.is_absolute() {
            path.to_path_buf()
        } else {
            self.base_dir.join(path)
        }
    }
}

/// Deploy/download capability pair implemented once per service
pub trait ResourceDriver {
    fn deploy(&self, request: &ResourceRequest<'_>) -> DriverResult<Deployed>;

    /// Sync the remote object back to local disk. Services without a local
    /// representation keep the default, which does nothing.
    fn download(&self, _request: &ResourceRequest<'_>) -> DriverResult<DownloadReport> {
        Ok(DownloadReport::default())
    }
}

/// Dispatch table from service kind to driver
pub trait DriverRegistry {
    fn driver(&self, service: Service) -> &dyn ResourceDriver;
}
