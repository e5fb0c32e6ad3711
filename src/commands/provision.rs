//! `provision` and `plan` entry points

use anyhow::Result;
use ringprov::config::Config;
use ringprov::domain::value_objects::{StageId, WritePolicy};
use ringprov::infrastructure::RunLock;
use ringprov::presentation::{create_plan_use_case, create_provision_use_case};
use ringprov::{ProvisionOptions, ProvisionReport};

use super::event_sink;
use crate::ui::context::UiContext;

pub fn cmd_provision(
    config: Config,
    ui: UiContext,
    force: bool,
    write_policy: Option<WritePolicy>,
    skip: Vec<StageId>,
    dry_run: bool,
) -> Result<()> {
    let mut options = ProvisionOptions::new()
        .with_force(force)
        .with_dry_run(dry_run)
        .with_skip(skip);
    options.write_policy = write_policy;

    if dry_run {
        return run_plan(config, ui, &options);
    }

    let _lock = RunLock::acquire(&config.files.lock_file)?;
    let events = event_sink(ui, &config);
    let report = create_provision_use_case(config).execute_with_events(&options, events);
    finish(&report)
}

pub fn cmd_plan(
    config: Config,
    ui: UiContext,
    write_policy: Option<WritePolicy>,
    skip: Vec<StageId>,
) -> Result<()> {
    let mut options = ProvisionOptions::new().with_dry_run(true).with_skip(skip);
    options.write_policy = write_policy;
    run_plan(config, ui, &options)
}

fn run_plan(config: Config, ui: UiContext, options: &ProvisionOptions) -> Result<()> {
    let events = event_sink(ui, &config);
    let report = create_plan_use_case(config, events.clone()).execute_with_events(options, events);
    finish(&report)
}

fn finish(report: &ProvisionReport) -> Result<()> {
    if let Some(aborted) = &report.aborted {
        anyhow::bail!("stage '{}' failed: {}", aborted.stage, aborted.error);
    }
    for warning in &report.warnings {
        log::info!("completed with warning: {warning}");
    }
    Ok(())
}
