//! Error types for ringprov
//!
//! Uses `thiserror` for library errors. The binary wraps these in `anyhow`.

use std::path::PathBuf;
use thiserror::Error;

use crate::domain::ports::{CommandError, FsError, LedgerError};
use crate::domain::value_objects::StageId;

/// Result type alias for provisioning operations
pub type ProvisionResult<T> = Result<T, ProvisionError>;

/// Main error type for provisioning operations
#[derive(Error, Debug)]
pub enum ProvisionError {
    /// An external tool could not be spawned or exited non-zero
    #[error(transparent)]
    Command(#[from] CommandError),

    /// File system operation failed
    #[error(transparent)]
    Fs(#[from] FsError),

    /// State ledger could not be read or written
    #[error(transparent)]
    Ledger(#[from] LedgerError),

    /// Configuration file is invalid
    #[error("invalid configuration in {file}: {message}")]
    InvalidConfig { file: PathBuf, message: String },

    /// The database never became ready within the poll bound
    #[error("database not ready after {attempts} attempts")]
    NotReady { attempts: u32 },

    /// A stage was entered without the precondition an earlier stage must establish
    #[error("precondition not met for {stage}: {reason}")]
    PreconditionUnmet { stage: StageId, reason: String },

    /// Another provisioning run holds the run lock
    #[error("another ringprov run holds the lock at {path}")]
    AlreadyRunning { path: PathBuf },

    /// Unknown stage name passed on the command line
    #[error("unknown stage '{name}' (expected one of: {expected})")]
    UnknownStage { name: String, expected: String },
}
