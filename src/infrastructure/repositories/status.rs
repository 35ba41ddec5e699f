//! JSON Status Repository
//!
//! Implements the StatusRepository port with one pretty-printed JSON file
//! per stack under `~/.stackctl/stacks/`.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::domain::entities::StackStatus;
use crate::domain::ports::{SaveReport, StatusLocator, StatusRepository};
use crate::domain::services::{ValidationErrors, Violation};
use crate::error::{StackError, StackResult};
use crate::infrastructure::fs::{atomic_write, stacks_dir};

pub struct JsonStatusRepository {
    dir: PathBuf,
}

impl JsonStatusRepository {
    /// Repository rooted at an explicit directory (used by tests)
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    /// Repository rooted at `~/.stackctl/stacks`
    pub fn from_home() -> StackResult<Self> {
        Ok(Self::new(stacks_dir()?))
    }

    /// Stack names become file names. Path separators and `%` are
    /// percent-encoded so distinct names never share a file.
    pub fn canonical_path(&self, stack_name: &str) -> PathBuf {
        self.dir.join(format!("{}.json", encode_name(stack_name)))
    }

    fn read(path: &Path) -> StackResult<StackStatus> {
        let content = std::fs::read_to_string(path).map_err(|e| StackError::io(path, e))?;
        let value: Value = serde_json::from_str(&content).map_err(|e| StackError::json(path, e))?;
        StackStatus::from_value(value)
    }

    /// Read `path` and make sure it records `stack_name`, not some other stack
    fn read_for(path: &Path, stack_name: &str) -> StackResult<StackStatus> {
        let status = Self::read(path)?;
        if status.name != stack_name {
            return Err(StackError::Status(ValidationErrors::from(vec![
                Violation::invalid(
                    "name",
                    format!(
                        "{} records stack '{}', not '{}'",
                        path.display(),
                        status.name,
                        stack_name
                    ),
                ),
            ])));
        }
        Ok(status)
    }
}

fn encode_name(name: &str) -> String {
    let mut encoded = String::with_capacity(name.len());
    for c in name.chars() {
        match c {
            '%' => encoded.push_str("%25"),
            '/' => encoded.push_str("%2F"),
            '\\' => encoded.push_str("%5C"),
            c => encoded.push(c),
        }
    }
    encoded
}

fn decode_name(file_stem: &str) -> String {
    file_stem
        .replace("%2F", "/")
        .replace("%5C", "\\")
        .replace("%25", "%")
}

fn render(status: &StackStatus) -> StackResult<Vec<u8>> {
    let mut bytes = serde_json::to_vec_pretty(status)
        .map_err(|e| StackError::json("<status>", e))?;
    bytes.push(b'\n');
    Ok(bytes)
}

impl StatusRepository for JsonStatusRepository {
    fn load(&self, locator: &StatusLocator) -> StackResult<Option<StackStatus>> {
        let canonical = self.canonical_path(&locator.stack_name);
        if canonical.exists() {
            return Self::read_for(&canonical, &locator.stack_name).map(Some);
        }
        match &locator.custom_path {
            Some(custom) if custom.exists() => Self::read_for(custom, &locator.stack_name).map(Some),
            _ => Ok(None),
        }
    }

    fn save(&self, locator: &StatusLocator, status: &StackStatus) -> StackResult<SaveReport> {
        status.validate()?;
        let bytes = render(status)?;

        let canonical = self.canonical_path(&locator.stack_name);
        atomic_write(&canonical, &bytes)?;

        let mut report = SaveReport {
            canonical,
            copy: None,
            copy_error: None,
        };
        if let Some(custom) = &locator.custom_path {
            match atomic_write(custom, &bytes) {
                Ok(()) => report.copy = Some(custom.clone()),
                Err(e) => report.copy_error = Some((custom.clone(), e.to_string())),
            }
        }
        Ok(report)
    }

    fn list(&self) -> StackResult<Vec<String>> {
        if !self.dir.exists() {
            return Ok(Vec::new());
        }
        let entries = std::fs::read_dir(&self.dir).map_err(|e| StackError::io(&self.dir, e))?;
        let mut names: Vec<String> = entries
            .filter_map(|entry| entry.ok())
            .map(|entry| entry.path())
            .filter(|path| path.is_file() && path.extension().is_some_and(|ext| ext == "json"))
            .filter_map(|path| path.file_stem().map(|s| decode_name(&s.to_string_lossy())))
            .collect();
        names.sort();
        Ok(names)
    }
}
