//! Bounded readiness poll

use crate::application::provision::StageContext;
use crate::domain::ports::CommandSpec;
use crate::domain::value_objects::{DatabaseReady, Outcome, Readiness, StageId};
use crate::error::{ProvisionError, ProvisionResult};

use super::Stage;

pub struct ReadinessStage;

fn probe_once(ctx: &StageContext<'_>) -> bool {
    let db = &ctx.config.database;
    ctx.probe(CommandSpec::new("systemctl").args(["is-active", "--quiet", db.service.as_str()]))
        && ctx.probe(
            CommandSpec::new("psql")
                .args(["-tAc", "SELECT 1"])
                .as_user(db.os_user.as_str()),
        )
}

impl Stage for ReadinessStage {
    fn id(&self) -> StageId {
        StageId::Readiness
    }

    fn run(&self, ctx: &mut StageContext<'_>) -> ProvisionResult<Outcome> {
        // Mutations are only recorded in a dry run, so the service never comes up
        let max_attempts = if ctx.dry_run {
            1
        } else {
            ctx.config.readiness.max_attempts.max(1)
        };
        let interval = ctx.config.readiness.interval();

        for attempt in 1..=max_attempts {
            if probe_once(ctx) {
                ctx.facts.readiness = Some(Readiness::Ready(DatabaseReady::after(attempt)));
                ctx.note(format!("database ready after {attempt} attempt(s)"));
                return Ok(Outcome::AlreadySatisfied);
            }
            log::debug!("database not ready (attempt {attempt}/{max_attempts})");
            if attempt < max_attempts {
                ctx.sleeper.sleep(interval);
            }
        }

        ctx.facts.readiness = Some(Readiness::NotReady {
            attempts: max_attempts,
        });
        Err(ProvisionError::NotReady {
            attempts: max_attempts,
        })
    }
}
