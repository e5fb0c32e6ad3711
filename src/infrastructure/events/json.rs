//! JSON Event Sink
//!
//! Outputs provisioning events as NDJSON for CI/automation consumption.

use std::io::{self, Write};
use std::sync::Mutex;

use crate::domain::ports::{ProvisionEvent, ProvisionEventSink};

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

    /// Create a JSON event sink writing to a custom writer
    pub fn with_writer<W: Write + Send + 'static>(writer: W) -> Self {
        Self {
            writer: Mutex::new(Box::new(writer)),
        }
    }

    fn write_event(&self, event: serde_json::Value) {
        if let Ok(mut writer) = self.writer.lock() {
            let _ = writeln!(writer, "{}", event);
            let _ = writer.flush();
        }
    }
}

/// JSON representation of one event
pub fn event_json(event: &ProvisionEvent) -> serde_json::Value {
    match event {
        ProvisionEvent::Started {
            stage_count,
            dry_run,
            write_policy,
        } => serde_json::json!({
            "event": "start",
            "stage_count": stage_count,
            "dry_run": dry_run,
            "write_policy": write_policy,
        }),

        ProvisionEvent::StageStarted { index, stage } => serde_json::json!({
            "event": "stage_start",
            "index": index,
            "stage": stage,
        }),

        ProvisionEvent::StageNote { stage, message } => serde_json::json!({
            "event": "note",
            "stage": stage,
            "message": message,
        }),

        ProvisionEvent::Planned { action } => serde_json::json!({
            "event": "planned",
            "action": action,
        }),

        ProvisionEvent::Drift { stage, path, diff } => serde_json::json!({
            "event": "drift",
            "stage": stage,
            "path": path.display().to_string(),
            "diff": diff,
        }),

        ProvisionEvent::StageFinished {
            index,
            stage,
            outcome,
        } => serde_json::json!({
            "event": "stage_finish",
            "index": index,
            "stage": stage,
            "outcome": outcome,
        }),

        ProvisionEvent::StageFailed {
            index,
            stage,
            policy,
            error,
        } => serde_json::json!({
            "event": "stage_error",
            "index": index,
            "stage": stage,
            "policy": policy,
            "error": error,
        }),

        ProvisionEvent::Summary(report) => serde_json::json!({
            "event": "summary",
            "report": report,
        }),

        ProvisionEvent::Completed {
            changed,
            satisfied,
            skipped,
            failed,
            aborted,
        } => serde_json::json!({
            "event": "complete",
            "changed": changed,
            "satisfied": satisfied,
            "skipped": skipped,
            "failed": failed,
            "aborted": aborted,
        }),
    }
}

impl ProvisionEventSink for JsonEventSink {
    fn on_event(&self, event: ProvisionEvent) {
        self.write_event(event_json(&event));
    }
}
