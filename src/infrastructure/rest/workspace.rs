use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};

use super::ApiClient;
use crate::domain::ports::{RemoteError, RemoteResult, WorkspaceApi, WorkspaceObject};
use crate::domain::value_objects::{ExportFormat, Language};

pub struct RestWorkspaceApi {
    client: ApiClient,
}

impl RestWorkspaceApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

impl WorkspaceApi for RestWorkspaceApi {
    fn get_status(&self, path: &str) -> RemoteResult<Value> {
        self.client
            .get("workspace/get-status", &[("path", path.to_string())])
    }

    fn list(&self, path: &str) -> RemoteResult<Vec<WorkspaceObject>> {
        let resp = self.client.get("workspace/list", &[("path", path.to_string())])?;
        Ok(resp
            .get("objects")
            .and_then(Value::as_array)
            .map(|objects| objects.iter().filter_map(WorkspaceObject::from_json).collect())
            .unwrap_or_default())
    }

    fn mkdirs(&self, path: &str) -> RemoteResult<()> {
        self.client.post("workspace/mkdirs", &json!({ "path": path }))?;
        Ok(())
    }

    fn import(
        &self,
        path: &str,
        content: &[u8],
        language: Option<Language>,
        format: ExportFormat,
        overwrite: bool,
    ) -> RemoteResult<()> {
        let mut body = json!({
            "path": path,
            "format": format.as_str(),
            "content": STANDARD.encode(content),
            "overwrite": overwrite,
        });
        if let Some(language) = language {
            body["language"] = Value::from(language.as_str());
        }
        self.client.post("workspace/import", &body)?;
        Ok(())
    }

    fn export(&self, path: &str, format: ExportFormat) -> RemoteResult<Vec<u8>> {
        let resp = self.client.get(
            "workspace/export",
            &[("path", path.to_string()), ("format", format.as_str().to_string())],
        )?;
        let content = resp.get("content").and_then(Value::as_str).unwrap_or("");
        STANDARD
            .decode(content)
            .map_err(|e| RemoteError::Transport(format!("invalid export content for {}: {}", path, e)))
    }
}
