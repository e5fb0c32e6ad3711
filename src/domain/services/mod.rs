//! Domain Services
//!
//! Pure logic over configuration text and generated files.
//! No I/O dependencies.

pub mod pg_conf;
mod planner;
pub mod sql;
mod templates;

pub use pg_conf::Edited;
pub use planner::{
    unified_diff, ConflictReason, FileAction, Planner, SkipReason, TargetFileState,
};
pub use templates::{render_backend_unit, render_proxy_site, BackendUnit, ProxySite};
