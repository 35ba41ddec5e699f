//! Resource Drivers
//!
//! One driver per `Service`, each a thin policy layer over a remote API
//! port. `Drivers` is the dispatch table the reconciler selects from.

mod filesystem;
mod jobs;
mod workspace;

#[cfg(test)]
pub(crate) mod testing;

pub use filesystem::FilesystemDriver;
pub use jobs::JobsDriver;
pub use workspace::WorkspaceDriver;

use crate::domain::ports::{
    DriverRegistry, FilesystemApi, JobsApi, ResourceDriver, WorkspaceApi,
};
use crate::domain::value_objects::Service;

/// Service → driver dispatch table
pub struct Drivers<J, W, F> {
    jobs: JobsDriver<J>,
    workspace: WorkspaceDriver<W>,
    filesystem: FilesystemDriver<F>,
}

impl<J, W, F> Drivers<J, W, F>
where
    J: JobsApi,
    W: WorkspaceApi,
    F: FilesystemApi,
{
    pub fn new(jobs: J, workspace: W, filesystem: F) -> Self {
        Self {
            jobs: JobsDriver::new(jobs),
            workspace: WorkspaceDriver::new(workspace),
            filesystem: FilesystemDriver::new(filesystem),
        }
    }
}

impl<J, W, F> DriverRegistry for Drivers<J, W, F>
where
    J: JobsApi,
    W: WorkspaceApi,
    F: FilesystemApi,
{
    fn driver(&self, service: Service) -> &dyn ResourceDriver {
        match service {
            Service::Jobs => &self.jobs,
            Service::Workspace => &self.workspace,
            Service::Filesystem => &self.filesystem,
        }
    }
}
