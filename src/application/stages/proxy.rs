//! Reverse-proxy site

use crate::application::provision::StageContext;
use crate::domain::ports::CommandSpec;
use crate::domain::services::render_proxy_site;
use crate::domain::value_objects::{Outcome, StageId};
use crate::error::ProvisionResult;

use super::generated::ensure_generated_file;
use super::Stage;

pub struct ProxyStage;

/// Enable the freshly written site, validate and reload
fn activate(ctx: &StageContext<'_>) -> ProvisionResult<()> {
    let site = ctx.config.site_path();
    let link = ctx.config.site_link();

    if ctx.fs.exists(&link) {
        ctx.fs.remove(&link)?;
    }
    ctx.fs.symlink(&site, &link)?;
    ctx.note(format!("enabled {}", link.display()));

    let default_link = ctx.config.default_site_link();
    if ctx.config.proxy.remove_default_site && ctx.fs.exists(&default_link) {
        ctx.fs.remove(&default_link)?;
        ctx.note(format!("removed {}", default_link.display()));
    }

    ctx.run(CommandSpec::new("nginx").arg("-t"))?;
    ctx.run(CommandSpec::new("systemctl").args(["reload", "nginx"]))?;
    Ok(())
}

impl Stage for ProxyStage {
    fn id(&self) -> StageId {
        StageId::Proxy
    }

    fn run(&self, ctx: &mut StageContext<'_>) -> ProvisionResult<Outcome> {
        let content = render_proxy_site(&ctx.config.proxy_site());
        let path = ctx.config.site_path();

        let written = ensure_generated_file(ctx, &path, &content)?;
        if written {
            activate(ctx)?;
        }
        Ok(Outcome::from_changed(written))
    }
}
