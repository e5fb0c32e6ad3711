//! Ledger Repository Port
//!
//! Loads and persists the state ledger of generated-file hashes.

use std::path::Path;

use thiserror::Error;

use crate::domain::entities::StateLedger;

#[derive(Debug, Error)]
pub enum LedgerError {
    #[error("state ledger I/O error: {0}")]
    IoError(String),

    #[error("state ledger parse error: {0}")]
    ParseError(String),

    #[error("state ledger version {found} is not supported (expected {expected})")]
    VersionMismatch { found: u32, expected: u32 },
}

pub trait LedgerRepository {
    /// Load the ledger, or an empty one if missing or unreadable
    fn load_or_new(&self, path: &Path) -> StateLedger {
        self.load(path).unwrap_or_else(|err| {
            log::warn!("ignoring state ledger at {}: {}", path.display(), err);
            StateLedger::new()
        })
    }

    /// Load the ledger; a missing file yields an empty ledger
    fn load(&self, path: &Path) -> Result<StateLedger, LedgerError>;

    fn save(&self, ledger: &StateLedger, path: &Path) -> Result<(), LedgerError>;
}
