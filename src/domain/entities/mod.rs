//! Domain Entities

mod ledger;
mod summary;

pub use ledger::{LedgerEntry, StateLedger};
pub use summary::{DatabaseCredentials, ServiceState, SummaryReport, ToolVersion};
