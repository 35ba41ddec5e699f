//! StatusRepository port - persistence of stack status documents

use std::path::PathBuf;

use crate::domain::entities::StackStatus;
use crate::error::StackResult;

/// Where a stack's status lives: the canonical per-stack path, plus an
/// optional caller-supplied copy
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StatusLocator {
    pub stack_name: String,
    pub custom_path: Option<PathBuf>,
}

impl StatusLocator {
    pub fn new(stack_name: impl Into<String>) -> Self {
        Self {
            stack_name: stack_name.into(),
            custom_path: None,
        }
    }

    pub fn with_custom_path(mut self, path: Option<PathBuf>) -> Self {
        self.custom_path = path;
        self
    }
}

/// What a save actually wrote
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SaveReport {
    pub canonical: PathBuf,
    /// Custom copy written successfully
    pub copy: Option<PathBuf>,
    /// Custom copy that failed, with the reason. Does not fail the save.
    pub copy_error: Option<(PathBuf, String)>,
}

pub trait StatusRepository {
    /// Prior status, or `None` on the first deploy of a stack
    fn load(&self, locator: &StatusLocator) -> StackResult<Option<StackStatus>>;

    /// Write the canonical document, then best-effort the custom copy
    fn save(&self, locator: &StatusLocator, status: &StackStatus) -> StackResult<SaveReport>;

    /// Names of every stack with a stored status, sorted
    fn list(&self) -> StackResult<Vec<String>>;
}
