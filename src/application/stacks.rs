//! Read-only queries over stored stack status

use crate::domain::entities::StackStatus;
use crate::domain::ports::{StatusLocator, StatusRepository};
use crate::error::StackResult;

/// One line of `stackctl list`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StackSummary {
    pub name: String,
    pub resources: usize,
    pub failed: usize,
}

pub struct StacksQuery<SR: StatusRepository> {
    status_repo: SR,
}

impl<SR: StatusRepository> StacksQuery<SR> {
    pub fn new(status_repo: SR) -> Self {
        Self { status_repo }
    }

    /// Every stack with a stored status. Unreadable documents are listed
    /// with zero counts rather than hiding the stack.
    pub fn list(&self) -> StackResult<Vec<StackSummary>> {
        let names = self.status_repo.list()?;
        Ok(names
            .into_iter()
            .map(|name| match self.describe(&name) {
                Ok(Some(status)) => StackSummary {
                    name,
                    resources: status.deployed.len(),
                    failed: status.failure_count(),
                },
                _ => StackSummary {
                    name,
                    resources: 0,
                    failed: 0,
                },
            })
            .collect())
    }

    pub fn describe(&self, name: &str) -> StackResult<Option<StackStatus>> {
        self.status_repo.load(&StatusLocator::new(name))
    }
}
