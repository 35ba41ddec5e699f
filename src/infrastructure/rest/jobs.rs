use serde_json::{json, Value};

use super::ApiClient;
use crate::domain::ports::{JobsApi, RemoteError, RemoteResult};

pub struct RestJobsApi {
    client: ApiClient,
}

impl RestJobsApi {
    pub fn new(client: ApiClient) -> Self {
        Self { client }
    }
}

/// A deleted job is reported as an invalid parameter, not a 404
fn is_missing_job(err: &RemoteError) -> bool {
    match err {
        RemoteError::NotFound(_) => true,
        RemoteError::Http { status: 400, body } => body.contains("does not exist"),
        _ => false,
    }
}

impl JobsApi for RestJobsApi {
    fn create_job(&self, settings: &Value) -> RemoteResult<i64> {
        let resp = self.client.post("jobs/create", settings)?;
        resp.get("job_id")
            .and_then(Value::as_i64)
            .ok_or_else(|| RemoteError::Transport("jobs/create returned no job_id".to_string()))
    }

    fn reset_job(&self, job_id: i64, settings: &Value) -> RemoteResult<()> {
        self.client.post(
            "jobs/reset",
            &json!({ "job_id": job_id, "new_settings": settings }),
        )?;
        Ok(())
    }

    fn get_job(&self, job_id: i64) -> RemoteResult<Value> {
        self.client
            .get("jobs/get", &[("job_id", job_id.to_string())])
            .map_err(|e| {
                if is_missing_job(&e) {
                    RemoteError::NotFound(format!("job {} does not exist", job_id))
                } else {
                    e
                }
            })
    }

    fn find_jobs_by_name(&self, name: &str) -> RemoteResult<Vec<i64>> {
        let resp = self.client.get("jobs/list", &[])?;
        Ok(jobs_named(&resp, name))
    }
}

fn jobs_named(listing: &Value, name: &str) -> Vec<i64> {
    listing
        .get("jobs")
        .and_then(Value::as_array)
        .map(|jobs| {
            jobs.iter()
                .filter(|job| job.pointer("/settings/name").and_then(Value::as_str) == Some(name))
                .filter_map(|job| job.get("job_id").and_then(Value::as_i64))
                .collect()
        })
        .unwrap_or_default()
}
