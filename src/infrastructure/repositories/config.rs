//! Stack configuration loading
//!
//! A config path may name the JSON file itself or a directory holding a
//! `config.json`. Relative local paths inside the config resolve against
//! the directory the file lives in.

use std::path::{Path, PathBuf};

use serde_json::Value;

use crate::domain::entities::StackConfig;
use crate::error::{StackError, StackResult};

const DIRECTORY_CONFIG: &str = "config.json";

/// A validated stack config plus where it came from
#[derive(Debug, Clone, PartialEq)]
pub struct StackDefinition {
    pub config: StackConfig,
    pub path: PathBuf,
    pub base_dir: PathBuf,
}

pub fn load_stack_definition(path: &Path) -> StackResult<StackDefinition> {
    let file = if path.is_dir() {
        path.join(DIRECTORY_CONFIG)
    } else {
        path.to_path_buf()
    };
    if !file.is_file() {
        return Err(StackError::ConfigNotFound { path: file });
    }

    let content = std::fs::read_to_string(&file).map_err(|e| StackError::io(&file, e))?;
    let value: Value = serde_json::from_str(&content).map_err(|e| StackError::json(&file, e))?;
    let config = StackConfig::from_value(value)?;

    let absolute = file.canonicalize().map_err(|e| StackError::io(&file, e))?;
    let base_dir = absolute
        .parent()
        .map(Path::to_path_buf)
        .unwrap_or_else(|| PathBuf::from("."));

    Ok(StackDefinition {
        config,
        path: file,
        base_dir,
    })
}
