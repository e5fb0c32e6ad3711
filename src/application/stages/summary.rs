//! Read-only status report

use crate::application::provision::StageContext;
use crate::domain::entities::{ServiceState, SummaryReport, ToolVersion};
use crate::domain::ports::{CommandSpec, ProvisionEvent};
use crate::domain::value_objects::{Outcome, StageId};
use crate::error::ProvisionResult;

use super::Stage;

pub struct SummaryStage;

const UNKNOWN: &str = "unknown";

/// First non-empty line of a version query, `unknown` on failure
///
/// `nginx -v` writes to stderr.
fn tool_version(ctx: &StageContext<'_>, tool: &str, spec: CommandSpec) -> ToolVersion {
    let version = ctx
        .runner
        .run(&spec.read_only())
        .ok()
        .filter(|o| o.is_success())
        .and_then(|o| {
            o.stdout
                .lines()
                .chain(o.stderr.lines())
                .map(str::trim)
                .find(|l| !l.is_empty())
                .map(str::to_string)
        })
        .unwrap_or_else(|| UNKNOWN.to_string());
    ToolVersion {
        tool: tool.to_string(),
        version,
    }
}

fn service_state(ctx: &StageContext<'_>, service: &str) -> ServiceState {
    // is-active exits non-zero for inactive units but still prints the state
    let state = ctx
        .runner
        .run(&CommandSpec::new("systemctl").args(["is-active", service]).read_only())
        .ok()
        .map(|o| o.text().to_string())
        .filter(|s| !s.is_empty())
        .unwrap_or_else(|| UNKNOWN.to_string());
    ServiceState {
        service: service.to_string(),
        state,
    }
}

fn collect(ctx: &StageContext<'_>) -> SummaryReport {
    let config = ctx.config;
    let versions = vec![
        tool_version(ctx, "postgresql", CommandSpec::new("psql").arg("--version")),
        tool_version(ctx, "nginx", CommandSpec::new("nginx").arg("-v")),
        tool_version(
            ctx,
            "python",
            CommandSpec::new(config.backend.python.as_str()).arg("--version"),
        ),
    ];
    let services = [
        config.database.service.as_str(),
        "nginx",
        config.backend.service.as_str(),
    ]
    .into_iter()
    .map(|service| service_state(ctx, service))
    .collect();

    SummaryReport {
        versions,
        directories: config.app_directories(),
        credentials: config.credentials(),
        services,
    }
}

impl Stage for SummaryStage {
    fn id(&self) -> StageId {
        StageId::Summary
    }

    fn run(&self, ctx: &mut StageContext<'_>) -> ProvisionResult<Outcome> {
        let report = collect(ctx);
        for service in report.services.iter().filter(|s| !s.is_active()) {
            log::debug!("{} is {}", service.service, service.state);
        }
        ctx.emit(ProvisionEvent::Summary(report.clone()));
        ctx.facts.summary = Some(report);
        Ok(Outcome::AlreadySatisfied)
    }
}
