//! Process Runner Implementations

mod dry_run;
mod system;

pub use dry_run::DryRunRunner;
pub use system::SystemRunner;
