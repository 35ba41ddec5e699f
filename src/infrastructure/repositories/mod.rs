//! Repository Implementations
//!
//! Concrete implementations of domain repository ports, plus the stack
//! config loader.

mod config;
mod status;

pub use config::{load_stack_definition, StackDefinition};
pub use status::JsonStatusRepository;
