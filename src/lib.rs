//! ringprov - idempotent provisioner for the Ring web application host
//!
//! Brings a fresh Debian-family VM to a working deployment target in ten
//! ordered stages: packages, database cluster, readiness, database objects,
//! database tuning, directory layout, reverse proxy, backend service,
//! firewall and a closing summary. Every stage inspects before it acts, so
//! re-running converges instead of repeating work.

pub mod application;
pub mod config;
pub mod domain;
pub mod error;
pub mod infrastructure;
pub mod presentation;

// Re-exports for convenience
pub use application::{ProvisionOptions, ProvisionReport, ProvisionUseCase};
pub use config::{Config, ConfigWarning};
pub use domain::value_objects::{Outcome, StageId, WritePolicy};
pub use error::{ProvisionError, ProvisionResult};
