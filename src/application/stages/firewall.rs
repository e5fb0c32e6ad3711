//! Host firewall rules

use crate::application::provision::StageContext;
use crate::domain::ports::{CommandOutput, CommandSpec};
use crate::domain::value_objects::{Outcome, StageId};
use crate::error::{ProvisionError, ProvisionResult};

use super::Stage;

pub struct FirewallStage;

fn added_rule(output: &CommandOutput) -> bool {
    output.stdout.contains("Rule added") || output.stdout.contains("Rules updated")
}

impl Stage for FirewallStage {
    fn id(&self) -> StageId {
        StageId::Firewall
    }

    fn run(&self, ctx: &mut StageContext<'_>) -> ProvisionResult<Outcome> {
        let firewall = &ctx.config.firewall;
        let was_active = ctx
            .runner
            .run(&CommandSpec::new("ufw").arg("status").read_only())
            .map(|o| o.stdout.contains("Status: active"))
            .unwrap_or(false);

        let mut changed = false;
        let mut first_error: Option<ProvisionError> = None;
        let mut attempt = |result: ProvisionResult<CommandOutput>| match result {
            Ok(output) => changed |= added_rule(&output),
            Err(err) => {
                log::warn!("firewall: {err}");
                first_error.get_or_insert(err);
            }
        };

        for rule in &firewall.allow {
            attempt(ctx.run(CommandSpec::new("ufw").args(["allow", rule.as_str()])));
        }
        if firewall.enable {
            attempt(ctx.run(CommandSpec::new("ufw").args(["--force", "enable"])));
        }

        if let Some(err) = first_error {
            return Err(err);
        }
        if firewall.enable && !was_active {
            changed = true;
        }
        Ok(Outcome::from_changed(changed))
    }
}
