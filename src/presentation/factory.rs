//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use crate::application::{DeployUseCase, DownloadUseCase, StacksQuery};
use crate::error::{StackError, StackResult};
use crate::infrastructure::config::ClientProfile;
use crate::infrastructure::{
    ApiClient, Drivers, JsonStatusRepository, RestDbfsApi, RestJobsApi, RestWorkspaceApi,
};

/// Drivers backed by the REST API
pub type RestDrivers = Drivers<RestJobsApi, RestWorkspaceApi, RestDbfsApi>;

pub type ConcreteDeployUseCase = DeployUseCase<JsonStatusRepository, RestDrivers>;

pub type ConcreteDownloadUseCase = DownloadUseCase<JsonStatusRepository, RestDrivers>;

pub fn create_drivers(profile: &ClientProfile) -> StackResult<RestDrivers> {
    let client = ApiClient::new(&profile.host, profile.token.as_deref(), profile.timeout)
        .map_err(|e| StackError::ClientConfig(e.to_string()))?;
    Ok(Drivers::new(
        RestJobsApi::new(client.clone()),
        RestWorkspaceApi::new(client.clone()),
        RestDbfsApi::new(client),
    ))
}

pub fn create_deploy_use_case(profile: &ClientProfile) -> StackResult<ConcreteDeployUseCase> {
    Ok(DeployUseCase::new(
        JsonStatusRepository::from_home()?,
        create_drivers(profile)?,
    ))
}

pub fn create_download_use_case(profile: &ClientProfile) -> StackResult<ConcreteDownloadUseCase> {
    Ok(DownloadUseCase::new(
        JsonStatusRepository::from_home()?,
        create_drivers(profile)?,
    ))
}

pub fn create_stacks_query() -> StackResult<StacksQuery<JsonStatusRepository>> {
    Ok(StacksQuery::new(JsonStatusRepository::from_home()?))
}
