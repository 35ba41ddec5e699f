//! Download Use Case
//!
//! Reverse sync: bring remote workspace and filesystem objects back to
//! the local paths named in the config. Services without a local
//! representation are skipped. Nothing is written to the status store.

use std::path::PathBuf;
use std::sync::Arc;

use crate::domain::entities::{ResourceConfig, StackConfig, StatusIndex};
use crate::domain::ports::{
    DriverError, DriverRegistry, NoopEventSink, ResourceRequest, StackCommand, StackEvent,
    StackEventSink, StatusLocator, StatusRepository,
};
use crate::error::StackResult;

#[derive(Debug, Clone)]
pub struct DownloadOptions {
    pub base_dir: PathBuf,
    /// Replace local files that already exist
    pub overwrite: bool,
}

impl DownloadOptions {
    pub fn new(base_dir: impl Into<PathBuf>) -> Self {
        Self {
            base_dir: base_dir.into(),
            overwrite: false,
        }
    }

    pub fn with_overwrite(mut self, overwrite: bool) -> Self {
        self.overwrite = overwrite;
        self
    }
}

#[derive(Debug, Clone, Default)]
pub struct DownloadResult {
    /// Every local file written
    pub written: Vec<PathBuf>,
    pub succeeded: usize,
    pub skipped: usize,
    /// `(resource id, error)` per failed resource
    pub errors: Vec<(String, String)>,
}

impl DownloadResult {
    pub fn is_success(&self) -> bool {
        self.errors.is_empty()
    }
}

enum Outcome {
    Downloaded(Vec<PathBuf>),
    Skipped,
    Failed(String),
}

pub struct DownloadUseCase<SR, DR>
where
    SR: StatusRepository,
    DR: DriverRegistry,
{
    status_repo: SR,
    drivers: DR,
}

impl<SR, DR> DownloadUseCase<SR, DR>
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

    pub fn execute(
        &self,
        config: &StackConfig,
        options: &DownloadOptions,
    ) -> StackResult<DownloadResult> {
        self.execute_with_events(config, options, Arc::new(NoopEventSink))
    }

    pub fn execute_with_events(
        &self,
        config: &StackConfig,
        options: &DownloadOptions,
        event_sink: Arc<dyn StackEventSink>,
    ) -> StackResult<DownloadResult> {
        config.validate()?;
        let prior = self.status_repo.load(&StatusLocator::new(&config.name))?;
        let index = StatusIndex::build(prior.as_ref());

        event_sink.on_event(StackEvent::Started {
            command: StackCommand::Download,
            stack: config.name.clone(),
            resource_count: config.resources.len(),
        });

        let mut result = DownloadResult::default();
        for (i, resource) in config.resources.iter().enumerate() {
            match self.download_resource(i, resource, &index, options, event_sink.as_ref()) {
                Outcome::Downloaded(written) => {
                    result.succeeded += 1;
                    result.written.extend(written);
                }
                Outcome::Skipped => result.skipped += 1,
                Outcome::Failed(error) => result.errors.push((resource.id.clone(), error)),
            }
        }

        event_sink.on_event(StackEvent::Completed {
            command: StackCommand::Download,
            succeeded: result.succeeded,
            failed: result.errors.len(),
            skipped: result.skipped,
        });
        Ok(result)
    }

    fn download_resource(
        &self,
        index: usize,
        resource: &ResourceConfig,
        prior: &StatusIndex<'_>,
        options: &DownloadOptions,
        event_sink: &dyn StackEventSink,
    ) -> Outcome {
        let service = match resource.service_kind() {
            Some(service) => service,
            None => {
                let error = DriverError::UnsupportedService {
                    service: resource.service.clone(),
                }
                .to_string();
                event_sink.on_event(StackEvent::ResourceFailed {
                    index,
                    id: resource.id.clone(),
                    error: error.clone(),
                });
                return Outcome::Failed(error);
            }
        };
        if !service.supports_download() {
            event_sink.on_event(StackEvent::ResourceSkipped {
                index,
                id: resource.id.clone(),
                reason: format!("{} resources have no local representation", service),
            });
            return Outcome::Skipped;
        }

        event_sink.on_event(StackEvent::ResourceStarted {
            index,
            id: resource.id.clone(),
            service: resource.service.clone(),
            properties: resource.properties.clone(),
        });
        let request = ResourceRequest {
            id: &resource.id,
            properties: &resource.properties,
            prior: prior.physical_id(&resource.key()),
            base_dir: &options.base_dir,
            overwrite: options.overwrite,
        };

        match self.drivers.driver(service).download(&request) {
            Ok(report) => {
                for message in report.warnings {
                    event_sink.on_event(StackEvent::Warning {
                        index,
                        id: resource.id.clone(),
                        message,
                    });
                }
                event_sink.on_event(StackEvent::ResourceDownloaded {
                    index,
                    id: resource.id.clone(),
                    written: report.written.clone(),
                });
                Outcome::Downloaded(report.written)
            }
            Err(err) => {
                let error = err.to_string();
                event_sink.on_event(StackEvent::ResourceFailed {
                    index,
                    id: resource.id.clone(),
                    error: error.clone(),
                });
                Outcome::Failed(error)
            }
        }
    }
}
