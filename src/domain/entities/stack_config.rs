//! Stack configuration entity - the desired state of a stack
//!
//! Loaded fresh from JSON on every run and never mutated.

use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

use crate::domain::services::{validate_config, ValidationErrors, Violation};
use crate::domain::value_objects::{ResourceKey, Service};
use crate::error::{StackError, StackResult};

/// A named collection of resources deployed together
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StackConfig {
    pub name: String,
    pub resources: Vec<ResourceConfig>,
}

/// One entry of the configuration's resource list
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ResourceConfig {
    /// Logical identifier, chosen by the author and stable across deploys
    pub id: String,
    /// Service name as written; may name a service this build does not support
    #[serde(alias = "type")]
    pub service: String,
    /// Service-specific settings
    pub properties: Map<String, Value>,
}

impl StackConfig {
    /// Validate a raw JSON document and convert it into a typed config.
    pub fn from_value(value: Value) -> StackResult<Self> {
        validate_config(&value).map_err(StackError::Config)?;
        serde_json::from_value(value).map_err(|e| {
            StackError::Config(ValidationErrors::from(vec![Violation::invalid(
                "",
                e.to_string(),
            )]))
        })
    }

    /// Re-check an already typed config (duplicate keys, empty ids).
    pub fn validate(&self) -> StackResult<()> {
        let value = serde_json::to_value(self).map_err(|e| {
            StackError::Config(ValidationErrors::from(vec![Violation::invalid(
                "",
                e.to_string(),
            )]))
        })?;
        validate_config(&value).map_err(StackError::Config)
    }
}

impl ResourceConfig {
    pub fn new(id: impl Into<String>, service: impl Into<String>, properties: Value) -> Self {
        Self {
            id: id.into(),
            service: service.into(),
            properties: match properties {
                Value::Object(map) => map,
                _ => Map::new(),
            },
        }
    }

    /// Identity key `(id, service)`
    pub fn key(&self) -> ResourceKey {
        ResourceKey::new(self.id.clone(), &self.service)
    }

    /// Parsed service, `None` when unsupported
    pub fn service_kind(&self) -> Option<Service> {
        Service::parse(&self.service)
    }
}
