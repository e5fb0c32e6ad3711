//! Application Layer
//!
//! Use cases that orchestrate the provisioning flow.
//! This layer:
//! - Depends on Domain layer (entities, services, ports)
//! - Does NOT talk to the host directly (that goes through ports)
//! - Coordinates between Infrastructure and Domain
//!
//! ## Use Cases
//!
//! - `ProvisionUseCase` - Runs the stages under their failure policies
//!
//! ## Stages
//!
//! - `stages` - One reconciler per resource group, in execution order

pub mod provision;
pub mod stages;

#[cfg(test)]
mod testing;

pub use provision::{
    AbortedRun, Facts, ProvisionOptions, ProvisionReport, ProvisionUseCase, StageContext,
    StageRecord,
};
pub use stages::{pipeline, stage_for, Stage};
