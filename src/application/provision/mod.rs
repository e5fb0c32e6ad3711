//! Provision Module
//!
//! Orchestrates a provisioning run.
//!
//! ## Structure
//!
//! - `context` - What stages may touch (`StageContext`, `Facts`)
//! - `options` - Run options (`ProvisionOptions`)
//! - `result` - Run report (`ProvisionReport`, `StageRecord`)
//! - `use_case` - Stage sequencing and failure policy (`ProvisionUseCase`)
//!
//! ## Usage
//!
//! ```ignore
//! use ringprov::application::provision::{ProvisionOptions, ProvisionUseCase};
//!
//! let use_case = ProvisionUseCase::new(config, runner, fs, ledger_repo);
//! let report = use_case.execute(&ProvisionOptions::new());
//! ```

mod context;
mod options;
mod result;
mod use_case;

pub use context::{Facts, StageContext};
pub use options::ProvisionOptions;
pub use result::{AbortedRun, ProvisionReport, StageRecord};
pub use use_case::ProvisionUseCase;
