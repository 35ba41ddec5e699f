//! JobsApi port - the remote job endpoints the jobs driver needs

use serde_json::Value;

use super::remote::RemoteResult;

pub trait JobsApi {
    /// Create a job, returning its id
    fn create_job(&self, settings: &Value) -> RemoteResult<i64>;

    /// Replace every setting of an existing job
    fn reset_job(&self, job_id: i64, settings: &Value) -> RemoteResult<()>;

    /// Fetch a job; `RemoteError::NotFound` if it was deleted
    fn get_job(&self, job_id: i64) -> RemoteResult<Value>;

    /// Ids of every job whose settings name equals `name`
    fn find_jobs_by_name(&self, name: &str) -> RemoteResult<Vec<i64>>;
}
