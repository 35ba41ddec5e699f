//! Remote filesystem over the DBFS streaming endpoints
//!
//! Writes go through create / add-block / close with blocks of at most
//! 1 MiB. Reads page through `dbfs/read` until no bytes come back.

use base64::engine::general_purpose::STANDARD;
use base64::Engine;
use serde_json::{json, Value};

use super::ApiClient;
use crate::domain::ports::{FileInfo, FilesystemApi, RemoteError, RemoteResult};

const BLOCK_SIZE: usize = 1 << 20;

pub struct RestDbfsApi {
    client: ApiClient,
}

impl RestDbfsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

/// Strip the `dbfs:` scheme users may write in configs
fn dbfs_path(path: &str) -> String {
    path.strip_prefix("dbfs:").unwrap_or(path).to_string()
}

fn file_info(value: &Value) -> Option<FileInfo> {
    Some(FileInfo {
        path: value.get("path")?.as_str()?.to_string(),
        is_dir: value.get("is_dir").and_then(Value::as_bool).unwrap_or(false),
        file_size: value.get("file_size").and_then(Value::as_u64).unwrap_or(0),
    })
}

/// Stream `contents` into an open handle. The handle is closed even when a
/// block fails; the block error wins over a close error.
fn write_blocks<P>(handle: i64, contents: &[u8], mut post: P) -> RemoteResult<()>
where
    P: FnMut(&str, &Value) -> RemoteResult<Value>,
{
    let written = contents.chunks(BLOCK_SIZE).try_for_each(|block| {
        post(
            "dbfs/add-block",
            &json!({ "handle": handle, "data": STANDARD.encode(block) }),
        )
        .map(drop)
    });
    let closed = post("dbfs/close", &json!({ "handle": handle }));
    written?;
    closed.map(drop)
}

impl FilesystemApi for RestDbfsApi {
    fn stat(&self, path: &str) -> RemoteResult<FileInfo> {
        let resp = self.client.get("dbfs/get-status", &[("path", dbfs_path(path))])?;
        file_info(&resp)
            .ok_or_else(|| RemoteError::Transport(format!("malformed status for {}", path)))
    }

    fn list(&self, path: &str) -> RemoteResult<Vec<FileInfo>> {
        let resp = self.client.get("dbfs/list", &[("path", dbfs_path(path))])?;
        Ok(resp
            .get("files")
            .and_then(Value::as_array)
            .map(|files| files.iter().filter_map(file_info).collect())
            .unwrap_or_default())
    }

    fn mkdirs(&self, path: &str) -> RemoteResult<()> {
        self.client
            .post("dbfs/mkdirs", &json!({ "path": dbfs_path(path) }))?;
        Ok(())
    }

    fn put(&self, path: &str, contents: &[u8], overwrite: bool) -> RemoteResult<()> {
        let resp = self.client.post(
            "dbfs/create",
            &json!({ "path": dbfs_path(path), "overwrite": overwrite }),
        )?;
        let handle = resp
            .get("handle")
            .and_then(Value::as_i64)
            .ok_or_else(|| RemoteError::Transport("dbfs/create returned no handle".to_string()))?;
        write_blocks(handle, contents, |endpoint, body| self.client.post(endpoint, body))
    }

    fn read(&self, path: &str) -> RemoteResult<Vec<u8>> {
        let mut contents = Vec::new();
        loop {
            let resp = self.client.get(
                "dbfs/read",
                &[
                    ("path", dbfs_path(path)),
                    ("offset", contents.len().to_string()),
                    ("length", BLOCK_SIZE.to_string()),
                ],
            )?;
            let bytes_read = resp.get("bytes_read").and_then(Value::as_u64).unwrap_or(0);
            if bytes_read == 0 {
                return Ok(contents);
            }
            let data = resp.get("data").and_then(Value::as_str).unwrap_or("");
            let block = STANDARD
                .decode(data)
                .map_err(|e| RemoteError::Transport(format!("invalid data for {}: {}", path, e)))?;
            if block.is_empty() {
                return Ok(contents);
            }
            contents.extend_from_slice(&block);
        }
    }
}
