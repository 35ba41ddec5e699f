//! FilesystemApi port - remote filesystem endpoints

use serde_json::{json, Value};

use super::remote::RemoteResult;

/// Metadata of a remote file or directory
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct FileInfo {
    pub path: String,
    pub is_dir: bool,
    pub file_size: u64,
}

impl FileInfo {
    pub fn basename(&self) -> &str {
        self.path.trim_end_matches('/').rsplit('/').next().unwrap_or(&self.path)
    }

    /// Deploy output recorded in the stack status
    pub fn to_json(&self) -> Value {
        json!({
            "path": self.path,
            "is_dir": self.is_dir,
            "file_size": self.file_size,
        })
    }
}

pub trait FilesystemApi {
    fn stat(&self, path: &str) -> RemoteResult<FileInfo>;

    fn list(&self, path: &str) -> RemoteResult<Vec<FileInfo>>;

    fn mkdirs(&self, path: &str) -> RemoteResult<()>;

    /// Write a whole file; fails if it exists and `overwrite` is false
    fn put(&self, path: &str, contents: &[u8], overwrite: bool) -> RemoteResult<()>;

    fn read(&self, path: &str) -> RemoteResult<Vec<u8>>;
}
