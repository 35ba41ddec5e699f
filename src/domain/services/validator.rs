//! Schema checks for stack configuration and status documents
//!
//! Both validators are pure functions over raw JSON. They collect every
//! violation instead of stopping at the first one, so a user can fix a
//! configuration in a single pass.

use std::collections::HashMap;

use serde_json::{Map, Value};

use crate::domain::value_objects::ResourceKey;

/// What is wrong with a field
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ViolationKind {
    /// Required field absent
    Missing,
    /// Field present with the wrong JSON type
    WrongType { expected: &'static str },
    /// Identity key `(id, service)` used twice
    Duplicate { key: String, first: usize },
    /// Anything else
    Invalid(String),
}

/// A single validation failure, located by a JSON path such as `resources[2].id`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Violation {
    pub path: String,
    pub kind: ViolationKind,
}

impl Violation {
    pub fn missing(path: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: ViolationKind::Missing,
        }
    }

    pub fn wrong_type(path: impl Into<String>, expected: &'static str) -> Self {
        Self {
            path: path.into(),
            kind: ViolationKind::WrongType { expected },
        }
    }

    pub fn invalid(path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            path: path.into(),
            kind: ViolationKind::Invalid(message.into()),
        }
    }

    /// Name of the missing field, if this is a missing-field violation
    pub fn missing_field(&self) -> Option<&str> {
        match self.kind {
            ViolationKind::Missing => Some(&self.path),
            _ => None,
        }
    }
}

impl std::fmt::Display for Violation {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match &self.kind {
            ViolationKind::Missing => write!(f, "missing required field '{}'", self.path),
            ViolationKind::WrongType { expected } => {
                if self.path.is_empty() {
                    write!(f, "document must be {}", expected)
                } else {
                    write!(f, "field '{}' must be {}", self.path, expected)
                }
            }
            ViolationKind::Duplicate { key, first } => write!(
                f,
                "duplicate resource '{}' at '{}' (first declared at index {})",
                key, self.path, first
            ),
            ViolationKind::Invalid(message) if self.path.is_empty() => f.write_str(message),
            ViolationKind::Invalid(message) => write!(f, "{}: {}", self.path, message),
        }
    }
}

/// Non-empty list of violations
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ValidationErrors(Vec<Violation>);

impl ValidationErrors {
    pub fn violations(&self) -> &[Violation] {
        &self.0
    }

    pub fn len(&self) -> usize {
        self.0.len()
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Every missing field, in document order
    pub fn missing_fields(&self) -> Vec<&str> {
        self.0.iter().filter_map(Violation::missing_field).collect()
    }
}

impl From<Vec<Violation>> for ValidationErrors {
    fn from(violations: Vec<Violation>) -> Self {
        Self(violations)
    }
}

impl std::fmt::Display for ValidationErrors {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let parts: Vec<String> = self.0.iter().map(ToString::to_string).collect();
        f.write_str(&parts.join("; "))
    }
}

impl std::error::Error for ValidationErrors {}

/// Validate a stack configuration document.
///
/// Requires `name`, `resources`, and `id` / `service` / `properties` on
/// every resource; rejects duplicate identity keys. Unknown services are
/// accepted here and reported per resource at deploy time.
pub fn validate_config(document: &Value) -> Result<(), ValidationErrors> {
    let mut violations = Vec::new();
    if let Some(root) = expect_root(document, &mut violations) {
        check_header(root, &mut violations);
        check_resources(root, &mut violations);
    }
    finish(violations)
}

/// Validate a stack status document.
///
/// Same header and resource checks as [`validate_config`], plus a
/// `deployed` list whose entries carry `id` and `service` and whose
/// identity keys are unique.
pub fn validate_status(document: &Value) -> Result<(), ValidationErrors> {
    let mut violations = Vec::new();
    if let Some(root) = expect_root(document, &mut violations) {
        check_header(root, &mut violations);
        check_resources(root, &mut violations);
        check_deployed(root, &mut violations);
        if let Some(version) = root.get("cli_version") {
            if !version.is_string() && !version.is_null() {
                violations.push(Violation::wrong_type("cli_version", "a string"));
            }
        }
    }
    finish(violations)
}

fn finish(violations: Vec<Violation>) -> Result<(), ValidationErrors> {
    if violations.is_empty() {
        Ok(())
    } else {
        Err(ValidationErrors(violations))
    }
}

fn expect_root<'a>(
    document: &'a Value,
    violations: &mut Vec<Violation>,
) -> Option<&'a Map<String, Value>> {
    let root = document.as_object();
    if root.is_none() {
        violations.push(Violation::wrong_type("", "a JSON object"));
    }
    root
}

fn check_header(root: &Map<String, Value>, violations: &mut Vec<Violation>) {
    match root.get("name") {
        None | Some(Value::Null) => violations.push(Violation::missing("name")),
        Some(Value::String(name)) if name.trim().is_empty() => {
            violations.push(Violation::invalid("name", "must not be empty"))
        }
        Some(Value::String(_)) => {}
        Some(_) => violations.push(Violation::wrong_type("name", "a string")),
    }
}

fn check_resources(root: &Map<String, Value>, violations: &mut Vec<Violation>) {
    let Some(resources) = expect_array(root, "resources", violations) else {
        return;
    };

    let mut seen = HashMap::new();
    for (index, resource) in resources.iter().enumerate() {
        let path = format!("resources[{}]", index);
        let Some(resource) = resource.as_object() else {
            violations.push(Violation::wrong_type(path, "an object"));
            continue;
        };

        let id = require_string(resource, &path, &["id"], violations);
        let service = require_string(resource, &path, &["service", "type"], violations);
        match resource.get("properties") {
            None | Some(Value::Null) => {
                violations.push(Violation::missing(format!("{}.properties", path)))
            }
            Some(Value::Object(_)) => {}
            Some(_) => violations.push(Violation::wrong_type(
                format!("{}.properties", path),
                "an object",
            )),
        }

        if let (Some(id), Some(service)) = (id, service) {
            check_duplicate(&mut seen, ResourceKey::new(id, service), index, &path, violations);
        }
    }
}

fn check_deployed(root: &Map<String, Value>, violations: &mut Vec<Violation>) {
    let Some(deployed) = expect_array(root, "deployed", violations) else {
        return;
    };

    let mut seen = HashMap::new();
    for (index, entry) in deployed.iter().enumerate() {
        let path = format!("deployed[{}]", index);
        let Some(entry) = entry.as_object() else {
            violations.push(Violation::wrong_type(path, "an object"));
            continue;
        };

        let id = require_string(entry, &path, &["id"], violations);
        let service = require_string(entry, &path, &["service", "type"], violations);

        for field in ["physical_id", "deploy_input"] {
            if let Some(value) = entry.get(field) {
                if !value.is_object() && !value.is_null() {
                    violations.push(Violation::wrong_type(
                        format!("{}.{}", path, field),
                        "an object",
                    ));
                }
            }
        }
        if let Some(success) = entry.get("success") {
            if !success.is_boolean() {
                violations.push(Violation::wrong_type(
                    format!("{}.success", path),
                    "a boolean",
                ));
            }
        }

        if let (Some(id), Some(service)) = (id, service) {
            check_duplicate(&mut seen, ResourceKey::new(id, service), index, &path, violations);
        }
    }
}

fn expect_array<'a>(
    root: &'a Map<String, Value>,
    field: &str,
    violations: &mut Vec<Violation>,
) -> Option<&'a Vec<Value>> {
    match root.get(field) {
        None | Some(Value::Null) => {
            violations.push(Violation::missing(field));
            None
        }
        Some(Value::Array(items)) => Some(items),
        Some(_) => {
            violations.push(Violation::wrong_type(field, "an array"));
            None
        }
    }
}

/// Look up the first present alias of a required string field.
fn require_string<'a>(
    object: &'a Map<String, Value>,
    path: &str,
    aliases: &[&str],
    violations: &mut Vec<Violation>,
) -> Option<&'a str> {
    let field_path = format!("{}.{}", path, aliases[0]);
    let value = aliases
        .iter()
        .find_map(|alias| object.get(*alias).filter(|v| !v.is_null()));

    match value {
        None => {
            violations.push(Violation::missing(field_path));
            None
        }
        Some(Value::String(s)) if s.trim().is_empty() => {
            violations.push(Violation::invalid(field_path, "must not be empty"));
            None
        }
        Some(Value::String(s)) => Some(s),
        Some(_) => {
            violations.push(Violation::wrong_type(field_path, "a string"));
            None
        }
    }
}

fn check_duplicate(
    seen: &mut HashMap<ResourceKey, usize>,
    key: ResourceKey,
    index: usize,
    path: &str,
    violations: &mut Vec<Violation>,
) {
    if let Some(first) = seen.get(&key) {
        violations.push(Violation {
            path: path.to_string(),
            kind: ViolationKind::Duplicate {
                key: key.to_string(),
                first: *first,
            },
        });
    } else {
        seen.insert(key, index);
    }
}
