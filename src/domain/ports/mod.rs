//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod filesystem_api;
pub mod jobs_api;
pub mod remote;
pub mod resource_driver;
pub mod stack_events;
pub mod status_repository;
pub mod workspace_api;

pub use filesystem_api::{FileInfo, FilesystemApi};
pub use jobs_api::JobsApi;
pub use remote::{RemoteError, RemoteResult};
pub use resource_driver::{
    DeployAction, Deployed, DownloadReport, DriverError, DriverRegistry, DriverResult,
    ResourceDriver, ResourceRequest,
};
pub use stack_events::{NoopEventSink, StackCommand, StackEvent, StackEventSink};
pub use status_repository::{SaveReport, StatusLocator, StatusRepository};
pub use workspace_api::{WorkspaceApi, WorkspaceObject};
