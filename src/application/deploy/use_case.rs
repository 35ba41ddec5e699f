//! Deploy Use Case
//!
//! Orchestrates the deploy flow:
//! 1. Validate the config (fatal, before any remote call)
//! 2. Load and validate the prior status
//! 3. Reconcile each resource in declaration order
//! 4. Assemble, validate and persist the new status
//!
//! Failures of a single resource are recorded in its status entry and
//! never abort the run.

use std::sync::Arc;

use chrono::Utc;

use crate::domain::entities::{ResourceConfig, ResourceStatus, StackConfig, StackStatus, StatusIndex};
use crate::domain::ports::{
    DriverError, DriverRegistry, NoopEventSink, ResourceRequest, StackCommand, StackEvent,
    StackEventSink, StatusLocator, StatusRepository,
};
use crate::error::StackResult;

use super::options::DeployOptions;
use super::result::DeployResult;

/// Version recorded in every status document this build writes
pub const CLI_VERSION: &str = env!("CARGO_PKG_VERSION");

pub struct DeployUseCase<SR, DR>
where
    SR: StatusRepository,
    DR: DriverRegistry,
{
    status_repo: SR,
    drivers: DR,
}

impl<SR, DR> DeployUseCase<SR, DR>
where
    SR: StatusRepository,
    DR: DriverRegistry,
{
    pub fn new(status_repo: SR, drivers: DR) -> Self {
        Self {
            status_repo,
            drivers,
        }
    }

    pub fn execute(&self, config: &StackConfig, options: &DeployOptions) -> StackResult<DeployResult> {
        self.execute_with_events(config, options, Arc::new(NoopEventSink))
    }

    pub fn execute_with_events(
        &self,
        config: &StackConfig,
        options: &DeployOptions,
        event_sink: Arc<dyn StackEventSink>,
    ) -> StackResult<DeployResult> {
        config.validate()?;
        let locator =
            StatusLocator::new(&config.name).with_custom_path(options.save_status.clone());
        let prior = self.status_repo.load(&locator)?;

        let status = self.reconcile(config, prior.as_ref(), options, event_sink.as_ref())?;

        let save_report = self.status_repo.save(&locator, &status)?;
        event_sink.on_event(StackEvent::StatusSaved {
            path: save_report.canonical.clone(),
        });
        if let Some((path, error)) = &save_report.copy_error {
            event_sink.on_event(StackEvent::StatusCopyFailed {
                path: path.clone(),
                error: error.clone(),
            });
        }

        let failed = status
            .deployed
            .iter()
            .take(config.resources.len())
            .filter(|entry| !entry.success)
            .count();
        let succeeded = config.resources.len() - failed;
        event_sink.on_event(StackEvent::Completed {
            command: StackCommand::Deploy,
            succeeded,
            failed,
            skipped: 0,
        });

        Ok(DeployResult {
            status,
            succeeded,
            failed,
            save_report,
        })
    }

    /// Bring every configured resource in line with the config and build
    /// the new status document. Nothing is persisted.
    pub fn reconcile(
        &self,
        config: &StackConfig,
        prior: Option<&StackStatus>,
        options: &DeployOptions,
        event_sink: &dyn StackEventSink,
    ) -> StackResult<StackStatus> {
        config.validate()?;
        if let Some(prior) = prior {
            prior.validate()?;
        }
        let index = StatusIndex::build(prior);

        event_sink.on_event(StackEvent::Started {
            command: StackCommand::Deploy,
            stack: config.name.clone(),
            resource_count: config.resources.len(),
        });

        let deployed = config
            .resources
            .iter()
            .enumerate()
            .map(|(i, resource)| self.deploy_resource(i, resource, &index, options, event_sink))
            .collect();

        let status = StackStatus::assemble(config, deployed, prior, CLI_VERSION);
        status.validate()?;
        Ok(status)
    }

    fn deploy_resource(
        &self,
        index: usize,
        resource: &ResourceConfig,
        prior: &StatusIndex<'_>,
        options: &DeployOptions,
        event_sink: &dyn StackEventSink,
    ) -> ResourceStatus {
        event_sink.on_event(StackEvent::ResourceStarted {
            index,
            id: resource.id.clone(),
            service: resource.service.clone(),
            properties: resource.properties.clone(),
        });

        let prior_id = prior.physical_id(&resource.key());
        let request = ResourceRequest {
            id: &resource.id,
            properties: &resource.properties,
            prior: prior_id,
            base_dir: &options.base_dir,
            overwrite: options.overwrite,
        };
        let outcome = match resource.service_kind() {
            Some(service) => self.drivers.driver(service).deploy(&request),
            None => Err(DriverError::UnsupportedService {
                service: resource.service.clone(),
            }),
        };

        match outcome {
            Ok(deployed) => {
                for message in deployed.warnings {
                    event_sink.on_event(StackEvent::Warning {
                        index,
                        id: resource.id.clone(),
                        message,
                    });
                }
                event_sink.on_event(StackEvent::ResourceDeployed {
                    index,
                    id: resource.id.clone(),
                    action: deployed.action,
                    physical_id: deployed.physical_id.clone(),
                    output: deployed.output.clone(),
                });
                ResourceStatus::succeeded(resource, deployed.physical_id, deployed.output, Utc::now())
            }
            Err(err) => {
                let message = err.to_string();
                event_sink.on_event(StackEvent::ResourceFailed {
                    index,
                    id: resource.id.clone(),
                    error: message.clone(),
                });
                ResourceStatus::failed(resource, prior_id, message, Utc::now())
            }
        }
    }
}
