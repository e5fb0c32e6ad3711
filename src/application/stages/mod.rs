//! Provisioning stages
//!
//! One reconciler per resource group. Each inspects the host through the
//! context's ports, changes only what is missing, and reports an `Outcome`.

mod backend;
mod cluster;
mod database;
mod firewall;
mod generated;
mod layout;
mod packages;
mod proxy;
mod readiness;
mod summary;
mod tuning;

use crate::application::provision::StageContext;
use crate::domain::value_objects::{Outcome, StageId};
use crate::error::ProvisionResult;

pub use backend::BackendStage;
pub use cluster::ClusterStage;
pub use database::DatabaseStage;
pub use firewall::FirewallStage;
pub use layout::LayoutStage;
pub use packages::PackagesStage;
pub use proxy::ProxyStage;
pub use readiness::ReadinessStage;
pub use summary::SummaryStage;
pub use tuning::TuningStage;

pub trait Stage {
    fn id(&self) -> StageId;

    /// Reconcile this stage's resources
    ///
    /// An `Err` is handled by the pipeline according to the stage's
    /// failure policy.
    fn run(&self, ctx: &mut StageContext<'_>) -> ProvisionResult<Outcome>;
}

/// The stage implementing `id`
pub fn stage_for(id: StageId) -> Box<dyn Stage> {
    match id {
        StageId::Packages => Box::new(PackagesStage),
        StageId::Cluster => Box::new(ClusterStage),
        StageId::Readiness => Box::new(ReadinessStage),
        StageId::Database => Box::new(DatabaseStage),
        StageId::Tuning => Box::new(TuningStage),
        StageId::Layout => Box::new(LayoutStage),
        StageId::Proxy => Box::new(ProxyStage),
        StageId::Backend => Box::new(BackendStage),
        StageId::Firewall => Box::new(FirewallStage),
        StageId::Summary => Box::new(SummaryStage),
    }
}

/// All stages in execution order
pub fn pipeline() -> Vec<Box<dyn Stage>> {
    StageId::ALL.into_iter().map(stage_for).collect()
}
