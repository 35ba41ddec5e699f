//! Deploy Options

use std::path::PathBuf;

/// Options for the deploy use case
#[derive(Debug, Clone)]
pub struct DeployOptions {
    /// Directory relative local paths in the config resolve against
    pub base_dir: PathBuf,
    /// Replace remote objects that already exist
    pub overwrite: bool,
    /// Additional path the status document is copied to
    pub save_status: Option<PathBuf>,
}

impl DeployOptions {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            overwrite: false,
            save_status: None,
        }
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }

    pub fn with_save_status(mut self, path: Option<PathBuf>) -> Self {
        self.save_status = path;
        self
    }
}
