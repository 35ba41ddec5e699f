//! Deploy Result

use crate::domain::entities::StackStatus;
use crate::domain::ports::SaveReport;

/// Result of a deploy run
#[derive(Debug, Clone)]
pub struct DeployResult {
    /// The status document that was persisted
    pub status: StackStatus,
    pub succeeded: usize,
    pub failed: usize,
    pub save_report: SaveReport,
}

impl DeployResult {
    pub fn is_success(&self) -> bool {
        self.failed == 0
    }
}
