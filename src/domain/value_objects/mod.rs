//! Domain Value Objects
//!
//! Immutable value types that represent domain concepts.

mod notebook;
mod physical_id;
mod resource_key;
mod service;

pub use notebook::{ExportFormat, Language, ObjectType};
pub use physical_id::PhysicalId;
pub use resource_key::ResourceKey;
pub use service::Service;
