pub mod provision;
pub mod render;
pub mod status;

use std::sync::Arc;

use ringprov::config::{Config, Verbosity};
use ringprov::domain::ports::ProvisionEventSink;
use ringprov::infrastructure::JsonEventSink;

use crate::ui::console::ConsoleEventSink;
use crate::ui::context::UiContext;

/// NDJSON on stdout under `--json`, progress lines otherwise
pub(crate) fn event_sink(ui: UiContext, config: &Config) -> Arc<dyn ProvisionEventSink> {
    if ui.json {
        Arc::new(JsonEventSink::stdout())
    } else {
        let quiet = ui.verbose == 0 && config.output.verbosity == Verbosity::Quiet;
        Arc::new(ConsoleEventSink::new(ui, quiet))
    }
}
