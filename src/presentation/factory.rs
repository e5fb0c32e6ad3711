//! Use Case Factory
//!
//! Creates use cases with infrastructure dependencies wired up.
//! This is the dependency injection point for the application.

use std::sync::Arc;

use crate::application::ProvisionUseCase;
use crate::config::Config;
use crate::domain::ports::ProvisionEventSink;
use crate::domain::services::{render_backend_unit, render_proxy_site};
use crate::infrastructure::{DryRunFs, DryRunRunner, LocalFs, SystemRunner, TomlLedgerRepository};

use super::cli::RenderTarget;

/// Provision use case acting on the real host
pub type LiveProvisionUseCase = ProvisionUseCase<SystemRunner, LocalFs, TomlLedgerRepository>;

/// Provision use case that runs probes but only records mutations
pub type PlanUseCase =
    ProvisionUseCase<DryRunRunner<SystemRunner>, DryRunFs<LocalFs>, TomlLedgerRepository>;

pub fn create_provision_use_case(config: Config) -> LiveProvisionUseCase {
    ProvisionUseCase::new(
        config,
        SystemRunner::new(),
        LocalFs::new(),
        TomlLedgerRepository::new(),
    )
}

/// Planned mutations are reported to `events`
pub fn create_plan_use_case(config: Config, events: Arc<dyn ProvisionEventSink>) -> PlanUseCase {
    ProvisionUseCase::new(
        config,
        DryRunRunner::new(SystemRunner::new(), events.clone()),
        DryRunFs::new(LocalFs::new(), events),
        TomlLedgerRepository::new(),
    )
}

/// Content the provisioner would write for `target`
pub fn render_generated(config: &Config, target: RenderTarget) -> String {
    match target {
        RenderTarget::Proxy => render_proxy_site(&config.proxy_site()),
        RenderTarget::Unit => render_backend_unit(&config.backend_unit()),
    }
}
