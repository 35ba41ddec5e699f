//! Stack Event Port
//!
//! Provides an observable interface for deploy and download runs.
//! Enables progress reporting, JSON event streams, and debugging.

use std::path::PathBuf;

use serde_json::{Map, Value};

use super::resource_driver::DeployAction;
use crate::domain::value_objects::PhysicalId;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StackCommand {
    Deploy,
    Download,
}

impl StackCommand {
    pub fn as_str(&self) -> &'static str {
        match self {
            StackCommand::Deploy => "deploy",
            StackCommand::Download => "download",
        }
    }
}

/// Event emitted during a stack run
#[derive(Debug, Clone)]
pub enum StackEvent {
    /// Run started
    Started {
        command: StackCommand,
        stack: String,
        resource_count: usize,
    },

    /// Processing of one resource started
    ResourceStarted {
        index: usize,
        id: String,
        service: String,
        properties: Map<String, Value>,
    },

    /// Resource deployed
    ResourceDeployed {
        index: usize,
        id: String,
        action: DeployAction,
        physical_id: PhysicalId,
        output: Value,
    },

    /// Resource downloaded to local disk
    ResourceDownloaded {
        index: usize,
        id: String,
        written: Vec<PathBuf>,
    },

    /// Resource intentionally not processed
    ResourceSkipped {
        index: usize,
        id: String,
        reason: String,
    },

    /// Non-fatal note about a resource
    Warning {
        index: usize,
        id: String,
        message: String,
    },

    /// Resource failed; the run continues
    ResourceFailed {
        index: usize,
        id: String,
        error: String,
    },

    /// Status document written
    StatusSaved { path: PathBuf },

    /// Custom status copy could not be written
    StatusCopyFailed { path: PathBuf, error: String },

    /// Run completed
    Completed {
        command: StackCommand,
        succeeded: usize,
        failed: usize,
        skipped: usize,
    },
}

/// Trait for receiving stack events
///
/// Implementations:
/// - ConsoleEventSink: progress lines in the terminal
/// - JsonEventSink: NDJSON event stream for CI
/// - NoopEventSink: silent operation
pub trait StackEventSink {
    fn on_event(&self, event: StackEvent);
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl StackEventSink for NoopEventSink {
    fn on_event(&self, _event: StackEvent) {}
}
