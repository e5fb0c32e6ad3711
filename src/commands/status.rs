use anyhow::Result;
use ringprov::config::Config;
use ringprov::presentation::create_provision_use_case;
use ringprov::ProvisionOptions;

use super::event_sink;
use crate::ui::context::UiContext;

/// Summary stage only; never takes the run lock
pub fn cmd_status(config: Config, ui: UiContext) -> Result<()> {
    let events = event_sink(ui, &config);
    let report =
        create_provision_use_case(config).execute_with_events(&ProvisionOptions::status(), events);
    if let Some(aborted) = report.aborted {
        anyhow::bail!("status failed: {}", aborted.error);
    }
    Ok(())
}
