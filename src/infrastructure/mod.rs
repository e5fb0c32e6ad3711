//! Infrastructure Layer
//!
//! Concrete implementations of domain ports.
//! This layer handles all I/O operations.
//!
//! ## Structure
//!
//! - `fs/` - File system implementations (Local, DryRun)
//! - `process/` - Command runners (System, DryRun)
//! - `events/` - Event sinks (JSON)
//! - `repositories/` - State ledger persistence

pub mod clock;
pub mod events;
pub mod fs;
pub mod lock;
pub mod process;
pub mod repositories;

pub use clock::{SystemClock, ThreadSleeper};
pub use events::JsonEventSink;
pub use fs::{DryRunFs, LocalFs};
pub use lock::RunLock;
pub use process::{DryRunRunner, SystemRunner};
pub use repositories::TomlLedgerRepository;
