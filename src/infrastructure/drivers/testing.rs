//! In-memory implementations of the remote API ports for tests.
//!
//! Each fake is `Clone` over shared state so a test can hand one copy to a
//! driver and keep another to inspect what happened.

use std::cell::RefCell;
use std::collections::BTreeMap;
use std::rc::Rc;

use serde_json::{json, Value};

use crate::domain::ports::{
    FileInfo, FilesystemApi, JobsApi, RemoteError, RemoteResult, WorkspaceApi, WorkspaceObject,
};
use crate::domain::value_objects::{ExportFormat, Language, ObjectType};

fn already_exists(path: &str) -> RemoteError {
    RemoteError::Http {
        status: 400,
        body: format!(r#"{{"error_code":"RESOURCE_ALREADY_EXISTS","message":"{}"}}"#, path),
    }
}

fn parent_of(path: &str) -> Option<&str> {
    let trimmed = path.trim_end_matches('/');
    match trimmed.rfind('/') {
        Some(0) => Some("/"),
        Some(i) => Some(&trimmed[..i]),
        None => None,
    }
}

fn is_child(parent: &str, candidate: &str) -> bool {
    let prefix = if parent == "/" {
        "/".to_string()
    } else {
        format!("{}/", parent.trim_end_matches('/'))
    };
    candidate
        .strip_prefix(&prefix)
        .is_some_and(|rest| !rest.is_empty() && !rest.contains('/'))
}

// === Jobs ===

#[derive(Default)]
struct JobsState {
    jobs: BTreeMap<i64, Value>,
    next_id: i64,
    calls: Vec<String>,
    fail_next: Option<RemoteError>,
}

#[derive(Clone, Default)]
pub(crate) struct FakeJobs {
    state: Rc<RefCell<JobsState>>,
}

impl FakeJobs {
    /// Create a job out of band, returning its id
    pub fn insert(&self, name: &str) -> i64 {
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.jobs.insert(id, json!({ "name": name }));
        id
    }

    /// Delete a job out of band
    pub fn delete(&self, job_id: i64) {
        self.state.borrow_mut().jobs.remove(&job_id);
    }

    pub fn settings(&self, job_id: i64) -> Option<Value> {
        self.state.borrow().jobs.get(&job_id).cloned()
    }

    pub fn job_count(&self) -> usize {
        self.state.borrow().jobs.len()
    }

    /// Number of calls whose name starts with `op`
    pub fn count(&self, op: &str) -> usize {
        self.state
            .borrow()
            .calls
            .iter()
            .filter(|c| c.starts_with(op))
            .count()
    }

    /// Make the next call fail with `err`
    pub fn fail_next(&self, err: RemoteError) {
        self.state.borrow_mut().fail_next = Some(err);
    }

    fn record(&self, call: String) -> RemoteResult<()> {
        let mut state = self.state.borrow_mut();
        state.calls.push(call);
        match state.fail_next.take() {
            Some(err) => Err(err),
            None => Ok(()),
        }
    }
}

impl JobsApi for FakeJobs {
    fn create_job(&self, settings: &Value) -> RemoteResult<i64> {
        self.record("create".to_string())?;
        let mut state = self.state.borrow_mut();
        state.next_id += 1;
        let id = state.next_id;
        state.jobs.insert(id, settings.clone());
        Ok(id)
    }

    fn reset_job(&self, job_id: i64, settings: &Value) -> RemoteResult<()> {
        self.record(format!("reset:{}", job_id))?;
        let mut state = self.state.borrow_mut();
        match state.jobs.get_mut(&job_id) {
            Some(existing) => {
                *existing = settings.clone();
                Ok(())
            }
            None => Err(RemoteError::NotFound(format!("job {}", job_id))),
        }
    }

    fn get_job(&self, job_id: i64) -> RemoteResult<Value> {
        self.record(format!("get:{}", job_id))?;
        self.state
            .borrow()
            .jobs
            .get(&job_id)
            .map(|settings| json!({ "job_id": job_id, "settings": settings }))
            .ok_or_else(|| RemoteError::NotFound(format!("job {}", job_id)))
    }

    fn find_jobs_by_name(&self, name: &str) -> RemoteResult<Vec<i64>> {
        self.record(format!("find:{}", name))?;
        Ok(self
            .state
            .borrow()
            .jobs
            .iter()
            .filter(|(_, settings)| settings.get("name").and_then(Value::as_str) == Some(name))
            .map(|(id, _)| *id)
            .collect())
    }
}

// === Workspace ===

#[derive(Debug, Clone)]
struct WorkspaceEntry {
    object_type: ObjectType,
    language: Option<Language>,
    content: Vec<u8>,
}

#[derive(Clone)]
pub(crate) struct FakeWorkspace {
    entries: Rc<RefCell<BTreeMap<String, WorkspaceEntry>>>,
}

impl Default for FakeWorkspace {
    fn default() -> Self {
        let mut entries = BTreeMap::new();
        entries.insert(
            "/".to_string(),
            WorkspaceEntry {
                object_type: ObjectType::Directory,
                language: None,
                content: Vec::new(),
            },
        );
        Self {
            entries: Rc::new(RefCell::new(entries)),
        }
    }
}

impl FakeWorkspace {
    pub fn insert_notebook(&self, path: &str, language: Language, content: &str) {
        if let Some(parent) = parent_of(path) {
            let _ = self.mkdirs(parent);
        }
        self.entries.borrow_mut().insert(
            path.to_string(),
            WorkspaceEntry {
                object_type: ObjectType::Notebook,
                language: Some(language),
                content: content.as_bytes().to_vec(),
            },
        );
    }

    pub fn content(&self, path: &str) -> Option<String> {
        self.entries
            .borrow()
            .get(path)
            .map(|e| String::from_utf8_lossy(&e.content).into_owned())
    }

    pub fn object_type(&self, path: &str) -> Option<ObjectType> {
        self.entries.borrow().get(path).map(|e| e.object_type)
    }

    pub fn language(&self, path: &str) -> Option<Language> {
        self.entries.borrow().get(path).and_then(|e| e.language)
    }

    pub fn paths(&self) -> Vec<String> {
        self.entries.borrow().keys().cloned().collect()
    }
}

impl WorkspaceApi for FakeWorkspace {
    fn get_status(&self, path: &str) -> RemoteResult<Value> {
        let entries = self.entries.borrow();
        let entry = entries
            .get(path)
            .ok_or_else(|| RemoteError::NotFound(path.to_string()))?;
        let mut status = json!({ "path": path, "object_type": entry.object_type.as_str() });
        if let Some(language) = entry.language {
            status["language"] = Value::from(language.as_str());
        }
        Ok(status)
    }

    fn list(&self, path: &str) -> RemoteResult<Vec<WorkspaceObject>> {
        let entries = self.entries.borrow();
        if !entries.contains_key(path) {
            return Err(RemoteError::NotFound(path.to_string()));
        }
        Ok(entries
            .iter()
            .filter(|(candidate, _)| is_child(path, candidate))
            .map(|(candidate, entry)| WorkspaceObject {
                path: candidate.clone(),
                object_type: Some(entry.object_type),
                language: entry.language,
            })
            .collect())
    }

    fn mkdirs(&self, path: &str) -> RemoteResult<()> {
        let mut current = Some(path);
        let mut entries = self.entries.borrow_mut();
        while let Some(dir) = current {
            entries
                .entry(dir.to_string())
                .or_insert_with(|| WorkspaceEntry {
                    object_type: ObjectType::Directory,
                    language: None,
                    content: Vec::new(),
                });
            current = parent_of(dir);
        }
        Ok(())
    }

    fn import(
        &self,
        path: &str,
        content: &[u8],
        language: Option<Language>,
        _format: ExportFormat,
        overwrite: bool,
    ) -> RemoteResult<()> {
        let mut entries = self.entries.borrow_mut();
        let parent = parent_of(path).unwrap_or("/");
        if !entries.contains_key(parent) {
            return Err(RemoteError::NotFound(parent.to_string()));
        }
        if entries.contains_key(path) && !overwrite {
            return Err(already_exists(path));
        }
        entries.insert(
            path.to_string(),
            WorkspaceEntry {
                object_type: ObjectType::Notebook,
                language,
                content: content.to_vec(),
            },
        );
        Ok(())
    }

    fn export(&self, path: &str, _format: ExportFormat) -> RemoteResult<Vec<u8>> {
        self.entries
            .borrow()
            .get(path)
            .filter(|e| e.object_type == ObjectType::Notebook)
            .map(|e| e.content.clone())
            .ok_or_else(|| RemoteError::NotFound(path.to_string()))
    }
}

// === Filesystem ===

/// `None` marks a directory
#[derive(Clone)]
pub(crate) struct FakeFilesystem {
    files: Rc<RefCell<BTreeMap<String, Option<Vec<u8>>>>>,
}

impl Default for FakeFilesystem {
    fn default() -> Self {
        let mut files = BTreeMap::new();
        files.insert("/".to_string(), None);
        Self {
            files: Rc::new(RefCell::new(files)),
        }
    }
}

impl FakeFilesystem {
    pub fn insert_file(&self, path: &str, content: &str) {
        if let Some(parent) = parent_of(path) {
            let _ = self.mkdirs(parent);
        }
        self.files
            .borrow_mut()
            .insert(path.to_string(), Some(content.as_bytes().to_vec()));
    }

    pub fn content(&self, path: &str) -> Option<String> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .flatten()
            .map(|bytes| String::from_utf8_lossy(&bytes).into_owned())
    }

    pub fn paths(&self) -> Vec<String> {
        self.files.borrow().keys().cloned().collect()
    }
}

impl FilesystemApi for FakeFilesystem {
    fn stat(&self, path: &str) -> RemoteResult<FileInfo> {
        let files = self.files.borrow();
        let entry = files
            .get(path)
            .ok_or_else(|| RemoteError::NotFound(path.to_string()))?;
        Ok(FileInfo {
            path: path.to_string(),
            is_dir: entry.is_none(),
            file_size: entry.as_ref().map(|b| b.len() as u64).unwrap_or(0),
        })
    }

    fn list(&self, path: &str) -> RemoteResult<Vec<FileInfo>> {
        let files = self.files.borrow();
        if !files.contains_key(path) {
            return Err(RemoteError::NotFound(path.to_string()));
        }
        Ok(files
            .iter()
            .filter(|(candidate, _)| is_child(path, candidate))
            .map(|(candidate, entry)| FileInfo {
                path: candidate.clone(),
                is_dir: entry.is_none(),
                file_size: entry.as_ref().map(|b| b.len() as u64).unwrap_or(0),
            })
            .collect())
    }

    fn mkdirs(&self, path: &str) -> RemoteResult<()> {
        let mut current = Some(path);
        let mut files = self.files.borrow_mut();
        while let Some(dir) = current {
            files.entry(dir.to_string()).or_insert(None);
            current = parent_of(dir);
        }
        Ok(())
    }

    fn put(&self, path: &str, contents: &[u8], overwrite: bool) -> RemoteResult<()> {
        if self.files.borrow().contains_key(path) && !overwrite {
            return Err(already_exists(path));
        }
        if let Some(parent) = parent_of(path) {
            self.mkdirs(parent)?;
        }
        self.files
            .borrow_mut()
            .insert(path.to_string(), Some(contents.to_vec()));
        Ok(())
    }

    fn read(&self, path: &str) -> RemoteResult<Vec<u8>> {
        self.files
            .borrow()
            .get(path)
            .cloned()
            .flatten()
            .ok_or_else(|| RemoteError::NotFound(path.to_string()))
    }
}
