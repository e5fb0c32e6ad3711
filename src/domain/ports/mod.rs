//! Domain Ports (Interfaces)
//!
//! These traits define the boundaries of the domain layer.
//! Infrastructure layer provides concrete implementations.

pub mod clock;
pub mod command_runner;
pub mod file_system;
pub mod ledger_repository;
pub mod provision_events;

pub use clock::{Clock, NoopSleeper, Sleeper};
pub use command_runner::{CommandError, CommandOutput, CommandRunner, CommandSpec};
pub use file_system::{FileSystem, FsError, FsResult};
pub use ledger_repository::{LedgerError, LedgerRepository};
pub use provision_events::{NoopEventSink, ProvisionEvent, ProvisionEventSink};
