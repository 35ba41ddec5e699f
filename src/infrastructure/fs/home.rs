//! Home directory resolution with test isolation support.
//!
//! On Windows, `dirs::home_dir()` uses the system API rather than
//! environment variables, so setting `HOME` in tests has no effect there.
//! `stackctl_home_dir()` checks `STACKCTL_TEST_HOME` first and only then
//! falls back to `dirs::home_dir()`.
//!
//! Everything stackctl keeps under the home directory lives in
//! `~/.stackctl/`:
//! - `config.toml` - client profiles
//! - `stacks/<name>.json` - deploy status per stack

use std::path::PathBuf;

use crate::error::{StackError, StackResult};

/// Environment variable for test isolation of home directory.
pub const STACKCTL_TEST_HOME_VAR: &str = "STACKCTL_TEST_HOME";

const STATE_DIR: &str = ".stackctl";

/// Get the home directory for stackctl-internal paths.
///
/// Returns `None` if neither `STACKCTL_TEST_HOME` is set nor the system
/// home can be resolved.
pub fn stackctl_home_dir() -> Option<PathBuf> {
    std::env::var(STACKCTL_TEST_HOME_VAR)
        .ok()
        .map(PathBuf::from)
        .or_else(dirs::home_dir)
}

/// `~/.stackctl`
pub fn state_dir() -> StackResult<PathBuf> {
    stackctl_home_dir()
        .map(|home| home.join(STATE_DIR))
        .ok_or(StackError::HomeDirUnavailable)
}

/// `~/.stackctl/stacks`, where deploy status documents are kept
pub fn stacks_dir() -> StackResult<PathBuf> {
    Ok(state_dir()?.join("stacks"))
}
