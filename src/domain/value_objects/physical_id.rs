//! Physical identifier of a deployed remote object
//!
//! The shape is driver-specific (`{"job_id": 42}`, `{"path": "/Shared/x"}`)
//! and opaque to the reconciler, which only hands it back to the driver that
//! produced it. An empty map means "not yet created".

use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

const JOB_ID: &str = "job_id";
const PATH: &str = "path";

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct PhysicalId(Map<String, Value>);

impl PhysicalId {
    pub fn empty() -> Self {
        Self(Map::new())
    }

    pub fn from_map(map: Map<String, Value>) -> Self {
        Self(map)
    }

    /// Physical id of a job
    pub fn job(job_id: i64) -> Self {
        let mut map = Map::new();
        map.insert(JOB_ID.to_string(), Value::from(job_id));
        Self(map)
    }

    /// Physical id of a path-addressed object (workspace or filesystem)
    pub fn path(path: impl Into<String>) -> Self {
        let mut map = Map::new();
        map.insert(PATH.to_string(), Value::String(path.into()));
        Self(map)
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn job_id(&self) -> Option<i64> {
        self.0.get(JOB_ID).and_then(Value::as_i64)
    }

    pub fn remote_path(&self) -> Option<&str> {
        self.0.get(PATH).and_then(Value::as_str)
    }

    pub fn as_map(&self) -> &Map<String, Value> {
        &self.0
    }

    /// `null` and a missing field both deserialize to the empty id.
    pub(crate) fn deserialize_nullable<'de, D>(deserializer: D) -> Result<PhysicalId, D::Error>
    where
        D: Deserializer<'de>,
    {
        let map: Option<Map<String, Value>> = Option::deserialize(deserializer)?;
        Ok(PhysicalId(map.unwrap_or_default()))
    }
}

impl std::fmt::Display for PhysicalId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        if self.0.is_empty() {
            return f.write_str("-");
        }
        let parts: Vec<String> = self
            .0
            .iter()
            .map(|(k, v)| match v {
                Value::String(s) => format!("{}={}", k, s),
                other => format!("{}={}", k, other),
            })
            .collect();
        f.write_str(&parts.join(","))
    }
}
