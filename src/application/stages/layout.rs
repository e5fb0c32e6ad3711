//! Application directory layout

use crate::application::provision::StageContext;
use crate::domain::ports::CommandSpec;
use crate::domain::value_objects::{Outcome, StageId};
use crate::error::ProvisionResult;

use super::Stage;

pub struct LayoutStage;

impl Stage for LayoutStage {
    fn id(&self) -> StageId {
        StageId::Layout
    }

    fn run(&self, ctx: &mut StageContext<'_>) -> ProvisionResult<Outcome> {
        let app = &ctx.config.app;

        let mut created = false;
        for dir in ctx.config.app_directories() {
            if !ctx.fs.is_dir(&dir) {
                ctx.fs.create_dir_all(&dir)?;
                ctx.note(format!("created {}", dir.display()));
                created = true;
            }
        }

        let root = app.root.display().to_string();
        ctx.run(
            CommandSpec::new("chown")
                .arg("-R")
                .arg(format!("{}:{}", app.user, app.group))
                .arg(root.as_str()),
        )?;
        ctx.run(CommandSpec::new("chmod").args(["-R", app.mode.as_str(), root.as_str()]))?;

        Ok(Outcome::from_changed(created))
    }
}
