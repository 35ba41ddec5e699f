//! Identity key of a resource within a stack
//!
//! A resource is identified by its logical id *and* its service: two
//! services may reuse the same human-chosen id without colliding.

use super::Service;

/// `(id, service)` pair used to match configuration entries to prior status
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ResourceKey {
    id: String,
    service: String,
}

impl ResourceKey {
    /// Build a key, normalizing known service aliases (`job` == `jobs`).
    ///
    /// Unknown services are kept verbatim (lowercased) so that they still
    /// participate in duplicate detection.
    pub fn new(id: impl Into<String>, service: &str) -> Self {
        let service = Service::parse(service)
            .map(|s| s.as_str().to_string())
            .unwrap_or_else(|| service.trim().to_ascii_lowercase());
        Self {
            id: id.into(),
            service,
        }
    }

    pub fn id(&self) -> &str {
        &self.id
    }

    pub fn service(&self) -> &str {
        &self.service
    }
}

impl std::fmt::Display for ResourceKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}:{}", self.service, self.id)
    }
}
