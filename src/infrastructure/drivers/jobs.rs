//! Jobs driver
//!
//! Create-vs-update policy:
//! - with a recorded `job_id` that still exists remotely: update in place
//! - otherwise look the job up by name: none → create, one → adopt and
//!   update it, several → fail (ambiguous target)

use serde_json::Value;

use crate::domain::ports::{
    DeployAction, Deployed, DriverError, DriverResult, JobsApi, ResourceDriver, ResourceRequest,
};
use crate::domain::value_objects::PhysicalId;

pub struct JobsDriver<A> {
    api: A,
}

impl<A: JobsApi> JobsDriver<A> {
    pub fn new(api: A) -> Self {
        Self { api }
    }

    /// Fetch the deployed job as deploy output
    fn finish(
        &self,
        job_id: i64,
        action: DeployAction,
        warnings: Vec<String>,
    ) -> DriverResult<Deployed> {
        let output = self.api.get_job(job_id)?;
        Ok(Deployed::new(PhysicalId::job(job_id), output, action).with_warnings(warnings))
    }
}

impl<A: JobsApi> ResourceDriver for JobsDriver<A> {
    fn deploy(&self, request: &ResourceRequest<'_>) -> DriverResult<Deployed> {
        let name = request.required_str("name")?;
        let settings = Value::Object(request.properties.clone());
        let mut warnings = Vec::new();

        if let Some(job_id) = request.prior.and_then(PhysicalId::job_id) {
            match self.api.get_job(job_id) {
                Ok(_) => {
                    self.api.reset_job(job_id, &settings)?;
                    return self.finish(job_id, DeployAction::Updated, warnings);
                }
                Err(e) if e.is_not_found() => {
                    warnings.push(format!(
                        "job {} recorded in the deploy status no longer exists",
                        job_id
                    ));
                }
                Err(e) => return Err(e.into()),
            }
        }

        let matches = self.api.find_jobs_by_name(name)?;
        match matches.as_slice() {
            [] => {
                let job_id = self.api.create_job(&settings)?;
                self.finish(job_id, DeployAction::Created, warnings)
            }
            [job_id] => {
                warnings.push(format!(
                    "a job named '{}' already exists (job_id {}); updating it",
                    name, job_id
                ));
                self.api.reset_job(*job_id, &settings)?;
                self.finish(*job_id, DeployAction::Adopted, warnings)
            }
            _ => Err(DriverError::AmbiguousName {
                name: name.to_string(),
                count: matches.len(),
            }),
        }
    }
}
