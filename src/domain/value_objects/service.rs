//! Service value object - selects which resource driver handles a resource
//!
//! - `Jobs`: scheduled jobs, identified by a numeric job id
//! - `Workspace`: notebooks and notebook directories
//! - `Filesystem`: files copied to the remote filesystem

use std::str::FromStr;

/// Kind of remote resource a configuration entry describes
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum Service {
    Jobs,
    Workspace,
    Filesystem,
}

impl Service {
    /// Every supported service, in dispatch-table order
    pub const ALL: [Service; 3] = [Service::Jobs, Service::Workspace, Service::Filesystem];

    /// Canonical name as written in configuration files
    pub fn as_str(&self) -> &'static str {
        match self {
            Service::Jobs => "jobs",
            Service::Workspace => "workspace",
            Service::Filesystem => "filesystem",
        }
    }

    /// Parse a service name, accepting the legacy spellings `job` and `dbfs`
    pub fn parse(name: &str) -> Option<Service> {
        match name.trim().to_ascii_lowercase().as_str() {
            "jobs" | "job" => Some(Service::Jobs),
            "workspace" => Some(Service::Workspace),
            "filesystem" | "dbfs" => Some(Service::Filesystem),
            _ => None,
        }
    }

    /// Whether resources of this service can be synced back to local disk
    pub fn supports_download(&self) -> bool {
        !matches!(self, Service::Jobs)
    }
}

impl FromStr for Service {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Service::parse(s).ok_or_else(|| {
            let valid: Vec<_> = Service::ALL.iter().map(|s| s.as_str()).collect();
            format!("unknown service '{}' (expected one of: {})", s, valid.join(", "))
        })
    }
}

impl std::fmt::Display for Service {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(self.as_str())
    }
}
