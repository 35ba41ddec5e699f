//! Domain Entities
//!
//! Core domain objects: the stack configuration (desired state) and the
//! stack status document (record of what was deployed).

mod stack_config;
mod stack_status;

pub use stack_config::{ResourceConfig, StackConfig};
pub use stack_status::{ResourceStatus, StackStatus, StatusIndex};
