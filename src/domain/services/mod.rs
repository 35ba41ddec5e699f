//! Domain Services
//!
//! Stateless domain logic that doesn't belong to a single entity.

mod validator;

pub use validator::{validate_config, validate_status, ValidationErrors, Violation, ViolationKind};
