//! WorkspaceApi port - notebook and directory endpoints

use serde_json::Value;

use super::remote::RemoteResult;
use crate::domain::value_objects::{ExportFormat, Language, ObjectType};

/// Entry returned by a workspace listing
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct WorkspaceObject {
    pub path: String,
    pub object_type: Option<ObjectType>,
    pub language: Option<Language>,
}

impl WorkspaceObject {
    /// Parse the `{path, object_type, language}` shape used by the REST API
    pub fn from_json(value: &Value) -> Option<Self> {
        Some(Self {
            path: value.get("path")?.as_str()?.to_string(),
            object_type: value
                .get("object_type")
                .and_then(Value::as_str)
                .and_then(ObjectType::parse),
            language: value
                .get("language")
                .and_then(Value::as_str)
                .and_then(Language::parse),
        })
    }

    /// Last path segment
    pub fn basename(&self) -> &str {
        self.path.rsplit('/').next().unwrap_or(&self.path)
    }
}

pub trait WorkspaceApi {
    /// Raw status of a single object
    fn get_status(&self, path: &str) -> RemoteResult<Value>;

    /// Direct children of a directory
    fn list(&self, path: &str) -> RemoteResult<Vec<WorkspaceObject>>;

    /// Create a directory and its parents
    fn mkdirs(&self, path: &str) -> RemoteResult<()>;

    /// Import a notebook from raw file content
    fn import(
        &self,
        path: &str,
        content: &[u8],
        language: Option<Language>,
        format: ExportFormat,
        overwrite: bool,
    ) -> RemoteResult<()>;

    /// Export a notebook as raw file content
    fn export(&self, path: &str, format: ExportFormat) -> RemoteResult<Vec<u8>>;
}
