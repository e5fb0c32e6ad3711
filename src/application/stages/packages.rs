//! OS package installation

use crate::application::provision::StageContext;
use crate::domain::ports::CommandSpec;
use crate::domain::value_objects::{Outcome, StageId};
use crate::error::ProvisionResult;

use super::Stage;

pub struct PackagesStage;

fn is_installed(ctx: &StageContext<'_>, package: &str) -> bool {
    let spec = CommandSpec::new("dpkg-query")
        .args(["-W", "-f=${Status}", package])
        .read_only();
    ctx.runner
        .run(&spec)
        .map(|out| out.is_success() && out.text().ends_with("install ok installed"))
        .unwrap_or(false)
}

fn apt_get() -> CommandSpec {
    CommandSpec::new("apt-get").env("DEBIAN_FRONTEND", "noninteractive")
}

impl Stage for PackagesStage {
    fn id(&self) -> StageId {
        StageId::Packages
    }

    fn run(&self, ctx: &mut StageContext<'_>) -> ProvisionResult<Outcome> {
        let missing: Vec<&str> = ctx
            .config
            .packages
            .install
            .iter()
            .map(String::as_str)
            .filter(|p| !is_installed(ctx, p))
            .collect();

        if missing.is_empty() {
            return Ok(Outcome::AlreadySatisfied);
        }

        ctx.note(format!("installing {}", missing.join(" ")));
        ctx.run(apt_get().arg("update"))?;
        ctx.run(
            apt_get()
                .args(["install", "-y", "--no-install-recommends"])
                .args(missing.iter().copied()),
        )?;
        Ok(Outcome::Changed)
    }
}
