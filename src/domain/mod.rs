//! Domain Layer
//!
//! The core of stackctl: pure types and rules without I/O dependencies.
//!
//! ## Structure
//!
//! - `entities/` - Stack configuration and stack status documents
//! - `value_objects/` - Immutable value types (Service, ResourceKey, PhysicalId)
//! - `services/` - Document validation
//! - `ports/` - Interface definitions for infrastructure (drivers, remote APIs, persistence)

pub mod entities;
pub mod ports;
pub mod services;
pub mod value_objects;
