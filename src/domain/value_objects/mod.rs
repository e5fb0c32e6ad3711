//! Value Objects
//!
//! Immutable, validated types with no identity of their own.

mod config_warning;
mod failure_policy;
mod hash;
mod outcome;
mod pg_version;
mod readiness;
mod stage_id;
mod write_policy;

pub use config_warning::ConfigWarning;
pub use failure_policy::FailurePolicy;
pub use hash::ContentHash;
pub use outcome::Outcome;
pub use pg_version::PgVersion;
pub use readiness::{DatabaseReady, Readiness};
pub use stage_id::StageId;
pub use write_policy::WritePolicy;
