//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `config/` - Client profiles (`~/.stackctl/config.toml`)
//! - `drivers/` - Per-service resource drivers
//! - `events/` - Console and NDJSON event sinks
//! - `fs/` - Home directory resolution, atomic writes
//! - `repositories/` - Status repository, stack config loader
//! - `rest/` - REST implementations of the remote API ports

pub mod config;
pub mod drivers;
pub mod events;
pub mod fs;
pub mod repositories;
pub mod rest;

pub use drivers::Drivers;
pub use events::{ConsoleEventSink, JsonEventSink};
pub use repositories::{load_stack_definition, JsonStatusRepository, StackDefinition};
pub use rest::{ApiClient, RestDbfsApi, RestJobsApi, RestWorkspaceApi};
