//! PostgreSQL configuration tuning

use std::path::Path;

use crate::application::provision::StageContext;
use crate::domain::ports::CommandSpec;
use crate::domain::services::pg_conf;
use crate::domain::value_objects::{Outcome, StageId};
use crate::error::ProvisionResult;

use super::Stage;

pub struct TuningStage;

fn tune_postgresql_conf(ctx: &StageContext<'_>, path: &Path) -> ProvisionResult<bool> {
    if !ctx.fs.exists(path) {
        log::debug!("{} absent, skipping", path.display());
        return Ok(false);
    }

    let settings = ctx.config.pg_settings();
    let current = ctx.fs.read(path)?;
    let edited = pg_conf::set_parameters(
        &current,
        settings.iter().map(|(key, value)| (*key, value.as_str())),
    );
    if edited.changed {
        ctx.fs.write(path, &edited.content)?;
        ctx.note(format!("updated {}", path.display()));
    }
    Ok(edited.changed)
}

fn tune_hba(ctx: &StageContext<'_>, path: &Path) -> ProvisionResult<bool> {
    if !ctx.fs.exists(path) {
        log::debug!("{} absent, skipping", path.display());
        return Ok(false);
    }

    let current = ctx.fs.read(path)?;
    let edited = pg_conf::append_hba_rules(&current, &ctx.config.database.hba_rules);
    if !edited.changed {
        return Ok(false);
    }

    let mut backup = path.as_os_str().to_owned();
    backup.push(format!(".bak.{}", ctx.clock.today().format("%Y%m%d")));
    let backup = Path::new(&backup);
    ctx.fs.copy(path, backup)?;
    ctx.fs.write(path, &edited.content)?;
    ctx.note(format!(
        "appended access rules to {} (backup {})",
        path.display(),
        backup.display()
    ));
    Ok(true)
}

impl Stage for TuningStage {
    fn id(&self) -> StageId {
        StageId::Tuning
    }

    fn run(&self, ctx: &mut StageContext<'_>) -> ProvisionResult<Outcome> {
        let version = ctx.pg_version();
        let dir = ctx.config.pg_config_dir(&version);

        let conf_changed = tune_postgresql_conf(ctx, &dir.join("postgresql.conf"))?;
        let hba_changed = tune_hba(ctx, &dir.join("pg_hba.conf"))?;

        ctx.run(CommandSpec::new("systemctl").args(["restart", ctx.config.database.service.as_str()]))?;

        Ok(Outcome::from_changed(conf_changed || hba_changed))
    }
}
