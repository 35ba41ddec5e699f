//! Application Layer
//!
//! Use cases that orchestrate the business flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT contain business rules (those are in Domain)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `DeployUseCase` - Reconcile remote state with a config and persist the status
//! - `DownloadUseCase` - Sync remote objects back to local paths
//! - `StacksQuery` - List and describe stored stacks

pub mod deploy;
pub mod download;
pub mod stacks;

pub use deploy::{DeployOptions, DeployResult, DeployUseCase, CLI_VERSION};
pub use download::{DownloadOptions, DownloadResult, DownloadUseCase};
pub use stacks::{StackSummary, StacksQuery};
