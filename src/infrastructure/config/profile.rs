//! Client profiles
//!
//! Connection settings for the remote platform live in
//! `~/.stackctl/config.toml`, one table per profile:
//!
//! ```toml
//! [default]
//! host = "https://workspace.example.com"
//! token = "..."
//! timeout_secs = 60
//! ```
//!
//! `STACKCTL_HOST` and `STACKCTL_TOKEN` override whatever the selected
//! profile says.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};
use std::time::Duration;

use serde::Deserialize;

use crate::error::{StackError, StackResult};
use crate::infrastructure::fs::state_dir;

pub const DEFAULT_PROFILE: &str = "default";
pub const HOST_ENV_VAR: &str = "STACKCTL_HOST";
pub const TOKEN_ENV_VAR: &str = "STACKCTL_TOKEN";

const DEFAULT_TIMEOUT_SECS: u64 = 60;

/// One `[profile]` table
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct ProfileConfig {
    pub host: Option<String>,
    pub token: Option<String>,
    pub timeout_secs: Option<u64>,
}

/// Unknown key found while loading the config file
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ConfigWarning {
    pub key: String,
    pub file: PathBuf,
}

impl std::fmt::Display for ConfigWarning {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "unknown key '{}' in {}", self.key, self.file.display())
    }
}

/// Fully resolved connection settings
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ClientProfile {
    pub host: String,
    pub token: Option<String>,
    pub timeout: Duration,
}

pub fn config_path() -> StackResult<PathBuf> {
    Ok(state_dir()?.join("config.toml"))
}

/// Parse every profile in `path`. A missing file is an empty config.
pub fn load_profiles(
    path: &Path,
) -> StackResult<(BTreeMap<String, ProfileConfig>, Vec<ConfigWarning>)> {
    if !path.exists() {
        return Ok((BTreeMap::new(), Vec::new()));
    }
    let content = std::fs::read_to_string(path).map_err(|e| StackError::io(path, e))?;

    let mut unknown: Vec<String> = Vec::new();
    let deserializer = toml::de::Deserializer::new(&content);
    let profiles: BTreeMap<String, ProfileConfig> =
        serde_ignored::deserialize(deserializer, |p| unknown.push(p.to_string())).map_err(
            |e| StackError::ClientConfig(format!("{}: {}", path.display(), e)),
        )?;

    let warnings = unknown
        .into_iter()
        .map(|key| ConfigWarning {
            key,
            file: path.to_path_buf(),
        })
        .collect();
    Ok((profiles, warnings))
}

/// Merge a profile with environment overrides into usable settings
pub fn resolve_profile(
    name: &str,
    profile: ProfileConfig,
    host_env: Option<String>,
    token_env: Option<String>,
) -> StackResult<ClientProfile> {
    let host = host_env
        .filter(|h| !h.trim().is_empty())
        .or(profile.host)
        .ok_or_else(|| {
            StackError::ClientConfig(format!(
                "no host configured for profile '{}' (set {} or add `host` to ~/.stackctl/config.toml)",
                name, HOST_ENV_VAR
            ))
        })?;
    Ok(ClientProfile {
        host,
        token: token_env.filter(|t| !t.is_empty()).or(profile.token),
        timeout: Duration::from_secs(profile.timeout_secs.unwrap_or(DEFAULT_TIMEOUT_SECS)),
    })
}

/// Load the named profile from the user config and apply the environment
pub fn load_client_profile(name: &str) -> StackResult<(ClientProfile, Vec<ConfigWarning>)> {
    let (mut profiles, warnings) = load_profiles(&config_path()?)?;
    let profile = profiles.remove(name).unwrap_or_default();
    let resolved = resolve_profile(
        name,
        profile,
        std::env::var(HOST_ENV_VAR).ok(),
        std::env::var(TOKEN_ENV_VAR).ok(),
    )?;
    Ok((resolved, warnings))
}
