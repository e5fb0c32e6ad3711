//! Backend runtime: virtualenv and systemd unit

use crate::application::provision::StageContext;
use crate::domain::ports::CommandSpec;
use crate::domain::services::render_backend_unit;
use crate::domain::value_objects::{Outcome, StageId};
use crate::error::ProvisionResult;

use super::generated::ensure_generated_file;
use super::Stage;

pub struct BackendStage;

fn ensure_venv(ctx: &StageContext<'_>) -> ProvisionResult<bool> {
    let venv = ctx.config.venv_dir();
    if ctx.fs.is_dir(&venv) {
        return Ok(false);
    }
    ctx.run(
        CommandSpec::new(ctx.config.backend.python.as_str())
            .args(["-m", "venv"])
            .arg(venv.display().to_string())
            .as_user(ctx.config.app.user.as_str()),
    )?;
    ctx.note(format!("created virtualenv {}", venv.display()));
    Ok(true)
}

impl Stage for BackendStage {
    fn id(&self) -> StageId {
        StageId::Backend
    }

    fn run(&self, ctx: &mut StageContext<'_>) -> ProvisionResult<Outcome> {
        let venv_created = ensure_venv(ctx)?;

        let content = render_backend_unit(&ctx.config.backend_unit());
        let path = ctx.config.unit_path();
        let unit_written = ensure_generated_file(ctx, &path, &content)?;

        // Registered for boot only; the app is deployed separately
        if unit_written {
            ctx.run(CommandSpec::new("systemctl").arg("daemon-reload"))?;
            ctx.run(CommandSpec::new("systemctl").args(["enable", ctx.config.backend.service.as_str()]))?;
        }

        Ok(Outcome::from_changed(venv_created || unit_written))
    }
}
