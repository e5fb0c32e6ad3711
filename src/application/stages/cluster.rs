//! Database cluster: detect version, create `<version> main`, start service

use crate::application::provision::StageContext;
use crate::domain::ports::CommandSpec;
use crate::domain::value_objects::{Outcome, PgVersion, StageId};
use crate::error::ProvisionResult;

use super::Stage;

pub struct ClusterStage;

/// Whether `pg_lsclusters --no-header` lists the cluster
///
/// Columns: version, cluster, port, status, owner, data dir, log file.
fn cluster_listed(listing: &str, version: &PgVersion, cluster: &str) -> bool {
    listing.lines().any(|line| {
        let mut cols = line.split_whitespace();
        cols.next() == Some(version.as_str()) && cols.next() == Some(cluster)
    })
}

impl Stage for ClusterStage {
    fn id(&self) -> StageId {
        StageId::Cluster
    }

    fn run(&self, ctx: &mut StageContext<'_>) -> ProvisionResult<Outcome> {
        let version = ctx.pg_version();
        ctx.note(format!("PostgreSQL {version}"));

        let db = &ctx.config.database;
        let listing = ctx
            .runner
            .run(&CommandSpec::new("pg_lsclusters").arg("--no-header").read_only())
            .map(|o| o.stdout)
            .unwrap_or_default();

        let created = if cluster_listed(&listing, &version, &db.cluster) {
            false
        } else {
            ctx.note(format!("creating cluster {version}/{}", db.cluster));
            ctx.run(
                CommandSpec::new("pg_createcluster")
                    .args([version.as_str(), db.cluster.as_str()])
                    .arg("--start"),
            )?;
            true
        };

        ctx.run(CommandSpec::new("systemctl").args(["enable", db.service.as_str()]))?;
        ctx.run(CommandSpec::new("systemctl").args(["start", db.service.as_str()]))?;

        Ok(Outcome::from_changed(created))
    }
}
