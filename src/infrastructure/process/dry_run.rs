//! Dry-run process runner

use std::sync::Arc;

use crate::domain::ports::{
    CommandError, CommandOutput, CommandRunner, CommandSpec, ProvisionEvent, ProvisionEventSink,
};

/// Executes read-only probes and records everything else
///
/// Recorded commands report success with empty output.
pub struct DryRunRunner<R> {
    inner: R,
    events: Arc<dyn ProvisionEventSink>,
}

impl<R: CommandRunner> DryRunRunner<R> {
    pub fn new(inner: R, events: Arc<dyn ProvisionEventSink>) -> Self {
        Self { inner, events }
    }
}

impl<R: CommandRunner> CommandRunner for DryRunRunner<R> {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError> {
        if spec.is_read_only() {
            return self.inner.run(spec);
        }
        let action = spec.to_string();
        log::info!("dry run: {action}");
        self.events.on_event(ProvisionEvent::Planned { action });
        Ok(CommandOutput::success(""))
    }
}
