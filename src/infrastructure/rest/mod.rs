//! REST implementations of the remote API ports
//!
//! All endpoints live under `<host>/api/2.0/` and authenticate with a
//! bearer token.

mod client;
mod dbfs;
mod jobs;
mod workspace;

pub use client::{interpret_response, ApiClient};
pub use dbfs::RestDbfsApi;
pub use jobs::RestJobsApi;
pub use workspace::RestWorkspaceApi;
