//! Stack status entity - the persisted record of a deploy
//!
//! A status document is read once as prior state, then rebuilt from scratch
//! by the reconciler. It is a pure data structure; persistence is handled by
//! `StatusRepository`.

use std::collections::{HashMap, HashSet};

use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

use super::stack_config::{ResourceConfig, StackConfig};
use crate::domain::services::{validate_status, ValidationErrors, Violation};
use crate::domain::value_objects::{PhysicalId, ResourceKey};
use crate::error::{StackError, StackResult};

/// Deploy status of a whole stack
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackStatus {
    pub name: String,
    /// Echo of the configuration that produced this status
    pub resources: Vec<ResourceConfig>,
    pub deployed: Vec<ResourceStatus>,
    #[serde(default)]
    pub cli_version: String,
}

/// Outcome of the last deploy attempt of one resource
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceStatus {
    pub id: String,
    #[serde(alias = "type")]
    pub service: String,
    #[serde(
        default,
        alias = "deploy_input",
        deserialize_with = "PhysicalId::deserialize_nullable"
    )]
    pub physical_id: PhysicalId,
    /// Last observed remote representation; diagnostic only
    #[serde(default)]
    pub deploy_output: Value,
    #[serde(
        default = "epoch",
        deserialize_with = "deserialize_timestamp"
    )]
    pub timestamp: DateTime<Utc>,
    #[serde(default = "default_success")]
    pub success: bool,
    #[serde(default)]
    pub error_message: Option<String>,
}

fn epoch() -> DateTime<Utc> {
    DateTime::<Utc>::UNIX_EPOCH
}

fn default_success() -> bool {
    true
}

/// Accepts RFC 3339 strings and legacy float epoch seconds.
fn deserialize_timestamp<'de, D>(deserializer: D) -> Result<DateTime<Utc>, D::Error>
where
    D: Deserializer<'de>,
{
    use serde::de::Error;

    match Value::deserialize(deserializer)? {
        Value::String(s) => DateTime::parse_from_rfc3339(&s)
            .map(|dt| dt.with_timezone(&Utc))
            .map_err(D::Error::custom),
        Value::Number(n) => {
            let secs = n
                .as_f64()
                .ok_or_else(|| D::Error::custom("timestamp out of range"))?;
            let whole = secs.trunc() as i64;
            let nanos = ((secs - secs.trunc()) * 1e9) as u32;
            DateTime::from_timestamp(whole, nanos)
                .ok_or_else(|| D::Error::custom("timestamp out of range"))
        }
        Value::Null => Ok(epoch()),
        other => Err(D::Error::custom(format!("invalid timestamp: {}", other))),
    }
}

impl ResourceStatus {
    /// Record a successful deploy
    pub fn succeeded(
        resource: &ResourceConfig,
        physical_id: PhysicalId,
        deploy_output: Value,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: resource.id.clone(),
            service: resource.service.clone(),
            physical_id,
            deploy_output,
            timestamp,
            success: true,
            error_message: None,
        }
    }

    /// Record a failed deploy.
    ///
    /// The prior physical id is carried over so the next run still finds
    /// the remote object.
    pub fn failed(
        resource: &ResourceConfig,
        prior_physical_id: Option<&PhysicalId>,
        error_message: impl Into<String>,
        timestamp: DateTime<Utc>,
    ) -> Self {
        Self {
            id: resource.id.clone(),
            service: resource.service.clone(),
            physical_id: prior_physical_id.cloned().unwrap_or_default(),
            deploy_output: Value::Null,
            timestamp,
            success: false,
            error_message: Some(error_message.into()),
        }
    }

    pub fn key(&self) -> ResourceKey {
        ResourceKey::new(self.id.clone(), &self.service)
    }
}

impl StackStatus {
    /// Validate a raw JSON document and convert it into a typed status.
    pub fn from_value(value: Value) -> StackResult<Self> {
        validate_status(&value).map_err(StackError::Status)?;
        serde_json::from_value(value).map_err(|e| {
            StackError::Status(ValidationErrors::from(vec![Violation::invalid(
                "",
                e.to_string(),
            )]))
        })
    }

    /// Serialize to JSON and run the status validator over the result.
    pub fn validate(&self) -> StackResult<()> {
        let value = serde_json::to_value(self).map_err(|e| {
            StackError::Status(ValidationErrors::from(vec![Violation::invalid(
                "",
                e.to_string(),
            )]))
        })?;
        validate_status(&value).map_err(StackError::Status)
    }

    /// Build a fresh status document from `config` and this run's results.
    ///
    /// Entries from `prior` whose resource is no longer configured are kept
    /// (after the current ones, in their previous order): nothing is ever
    /// forgotten implicitly.
    pub fn assemble(
        config: &StackConfig,
        deployed: Vec<ResourceStatus>,
        prior: Option<&StackStatus>,
        cli_version: impl Into<String>,
    ) -> Self {
        let current: HashSet<ResourceKey> = deployed.iter().map(ResourceStatus::key).collect();
        let mut all = deployed;
        if let Some(prior) = prior {
            all.extend(
                prior
                    .deployed
                    .iter()
                    .filter(|entry| !current.contains(&entry.key()))
                    .cloned(),
            );
        }

        Self {
            name: config.name.clone(),
            resources: config.resources.clone(),
            deployed: all,
            cli_version: cli_version.into(),
        }
    }

    /// Number of entries recorded as failed
    pub fn failure_count(&self) -> usize {
        self.deployed.iter().filter(|d| !d.success).count()
    }
}

/// Lookup table from identity key to prior deploy status
#[derive(Debug, Default)]
pub struct StatusIndex<'a> {
    entries: HashMap<ResourceKey, &'a ResourceStatus>,
}

impl<'a> StatusIndex<'a> {
    pub fn build(status: Option<&'a StackStatus>) -> Self {
        let entries = status
            .map(|s| s.deployed.iter().map(|d| (d.key(), d)).collect())
            .unwrap_or_default();
        Self { entries }
    }

    pub fn get(&self, key: &ResourceKey) -> Option<&'a ResourceStatus> {
        self.entries.get(key).copied()
    }

    /// Prior physical id for `key`; empty ids count as absent
    pub fn physical_id(&self, key: &ResourceKey) -> Option<&'a PhysicalId> {
        self.get(key)
            .map(|status| &status.physical_id)
            .filter(|id| !id.is_empty())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
