//! JSON Event Sink
//!
//! Outputs stack events as NDJSON for CI/automation consumption.

use std::io::{self, Write};
use std::sync::Mutex;

use serde_json::{json, Value};

use crate::domain::ports::{StackEvent, StackEventSink};

/// Event sink that outputs NDJSON events to stdout
pub struct JsonEventSink {
    writer: Mutex<Box<dyn Write + Send>>,
}

impl JsonEventSink {
    pub fn stdout() -> Self {
        Self {
            writer: Mutex::new(Box::new(io::stdout())),
        }
    }

    /// Create a JSON event sink writing to a custom writer (for testing)
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

pub(crate) fn event_to_json(event: StackEvent) -> Value {
    match event {
        StackEvent::Started {
            command,
            stack,
            resource_count,
        } => json!({
            "event": "start",
            "command": command.as_str(),
            "stack": stack,
            "resource_count": resource_count,
        }),

        StackEvent::ResourceStarted {
            index,
            id,
            service,
            properties,
        } => json!({
            "event": "item_start",
            "index": index,
            "id": id,
            "service": service,
            "properties": properties,
        }),

        StackEvent::ResourceDeployed {
            index,
            id,
            action,
            physical_id,
            output,
        } => json!({
            "event": "item_deployed",
            "index": index,
            "id": id,
            "action": action.as_str(),
            "physical_id": physical_id,
            "output": output,
        }),

        StackEvent::ResourceDownloaded { index, id, written } => json!({
            "event": "item_downloaded",
            "index": index,
            "id": id,
            "written": written
                .iter()
                .map(|p| p.display().to_string())
                .collect::<Vec<_>>(),
        }),

        StackEvent::ResourceSkipped { index, id, reason } => json!({
            "event": "item_skipped",
            "index": index,
            "id": id,
            "reason": reason,
        }),

        StackEvent::Warning { index, id, message } => json!({
            "event": "warning",
            "index": index,
            "id": id,
            "message": message,
        }),

        StackEvent::ResourceFailed { index, id, error } => json!({
            "event": "item_error",
            "index": index,
            "id": id,
            "error": error,
        }),

        StackEvent::StatusSaved { path } => json!({
            "event": "status_saved",
            "path": path.display().to_string(),
        }),

        StackEvent::StatusCopyFailed { path, error } => json!({
            "event": "status_copy_failed",
            "path": path.display().to_string(),
            "error": error,
        }),

        StackEvent::Completed {
            command,
            succeeded,
            failed,
            skipped,
        } => json!({
            "event": "complete",
            "command": command.as_str(),
            "succeeded": succeeded,
            "failed": failed,
            "skipped": skipped,
        }),
    }
}

impl StackEventSink for JsonEventSink {
    fn on_event(&self, event: StackEvent) {
        self.write_event(event_to_json(event));
    }
}
