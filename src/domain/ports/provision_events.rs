//! Provision Event Port
//!
//! Provides an observable interface for provisioning runs.
//! Enables human-readable progress lines, NDJSON event streams, and tests
//! that assert on what a run reported.

use std::path::PathBuf;

use crate::domain::entities::SummaryReport;
use crate::domain::value_objects::{FailurePolicy, Outcome, StageId, WritePolicy};

/// Event emitted during a provisioning run
#[derive(Debug, Clone)]
pub enum ProvisionEvent {
    /// Run started
    Started {
        stage_count: usize,
        dry_run: bool,
        write_policy: WritePolicy,
    },

    /// A stage began
    StageStarted { index: usize, stage: StageId },

    /// Progress line from inside a stage
    StageNote { stage: StageId, message: String },

    /// Dry run: a mutation that would have happened
    Planned { action: String },

    /// A generated file differs from what the provisioner last wrote
    Drift {
        stage: StageId,
        path: PathBuf,
        diff: String,
    },

    /// A stage finished (including failures under non-aborting policies)
    StageFinished {
        index: usize,
        stage: StageId,
        outcome: Outcome,
    },

    /// A stage returned an error
    StageFailed {
        index: usize,
        stage: StageId,
        policy: FailurePolicy,
        error: String,
    },

    /// The summary stage's report
    Summary(SummaryReport),

    /// Run finished
    Completed {
        changed: usize,
        satisfied: usize,
        skipped: usize,
        failed: usize,
        aborted: bool,
    },
}

/// Trait for receiving provisioning events
///
/// Implementations:
/// - ConsoleEventSink: status lines in the terminal
/// - JsonEventSink: NDJSON event stream for automation
/// - NoopEventSink: silent operation
pub trait ProvisionEventSink: Send + Sync {
    /// Handle an event
    fn on_event(&self, event: ProvisionEvent);

    /// Whether this sink wants per-stage notes and planned actions
    fn wants_detailed_events(&self) -> bool {
        true
    }
}

/// No-op event sink for silent operation
pub struct NoopEventSink;

impl ProvisionEventSink for NoopEventSink {
    fn on_event(&self, _event: ProvisionEvent) {}

    fn wants_detailed_events(&self) -> bool {
        false
    }
}
