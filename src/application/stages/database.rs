//! Database objects: database, role password, grants

use crate::application::provision::StageContext;
use crate::domain::ports::CommandSpec;
use crate::domain::services::sql::{quote_ident, quote_literal};
use crate::domain::value_objects::{DatabaseReady, Outcome, StageId};
use crate::error::{ProvisionError, ProvisionResult};

use super::Stage;

pub struct DatabaseStage;

fn psql(ctx: &StageContext<'_>, sql: &str) -> CommandSpec {
    CommandSpec::new("psql")
        .args(["-v", "ON_ERROR_STOP=1", "-tAc", sql])
        .as_user(ctx.config.database.os_user.as_str())
}

fn provision(ctx: &StageContext<'_>, ready: &DatabaseReady) -> ProvisionResult<Outcome> {
    let db = &ctx.config.database;
    log::debug!("database ready after {} probe(s)", ready.attempts());

    let exists_sql = format!(
        "SELECT 1 FROM pg_database WHERE datname = {}",
        quote_literal(&db.name)
    );
    let exists = ctx.run(psql(ctx, &exists_sql).read_only())?.text() == "1";

    if !exists {
        ctx.note(format!("creating database {}", db.name));
        ctx.run(
            CommandSpec::new("createdb")
                .arg(db.name.as_str())
                .as_user(db.os_user.as_str()),
        )?;
    }

    let user = quote_ident(&db.user);
    ctx.run(psql(
        ctx,
        &format!("ALTER USER {user} WITH PASSWORD {}", quote_literal(&db.password)),
    ))?;
    ctx.run(psql(
        ctx,
        &format!(
            "GRANT ALL PRIVILEGES ON DATABASE {} TO {user}",
            quote_ident(&db.name)
        ),
    ))?;
    ctx.run(psql(ctx, &format!("ALTER USER {user} CREATEDB")))?;
    ctx.note(format!("password and grants set for {}", db.user));

    Ok(Outcome::from_changed(!exists))
}

impl Stage for DatabaseStage {
    fn id(&self) -> StageId {
        StageId::Database
    }

    fn run(&self, ctx: &mut StageContext<'_>) -> ProvisionResult<Outcome> {
        let ready = ctx
            .facts
            .readiness
            .as_ref()
            .and_then(|r| r.ready())
            .cloned()
            .ok_or_else(|| ProvisionError::PreconditionUnmet {
                stage: StageId::Database,
                reason: "database readiness was not established".to_string(),
            })?;
        provision(ctx, &ready)
    }
}
