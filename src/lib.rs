//! stackctl - declarative stack deployment
//!
//! A stack is a JSON config naming jobs, workspace notebooks and remote
//! filesystem assets. `deploy` reconciles the remote platform with it and
//! records what was deployed, so the next run updates the same objects
//! instead of creating duplicates. `download` syncs the other way.

pub mod application;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use domain::entities::{ResourceConfig, ResourceStatus, StackConfig, StackStatus};
pub use domain::value_objects::{PhysicalId, ResourceKey, Service};
pub use error::{StackError, StackResult};
