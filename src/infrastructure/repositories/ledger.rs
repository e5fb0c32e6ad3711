//! TOML Ledger Repository
//!
//! Implements the LedgerRepository port using TOML format.

use std::collections::BTreeMap;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::domain::entities::{LedgerEntry, StateLedger};
use crate::domain::ports::{FileSystem, LedgerError, LedgerRepository};
use crate::domain::value_objects::StageId;
use crate::infrastructure::fs::LocalFs;

/// TOML-based ledger repository
///
/// Stores the ledger as `state.toml`, one `[files."<path>"]` table per
/// generated file.
pub struct TomlLedgerRepository<F = LocalFs> {
    fs: F,
}

impl TomlLedgerRepository<LocalFs> {
    pub fn new() -> Self {
        Self { fs: LocalFs::new() }
    }
}

impl Default for TomlLedgerRepository<LocalFs> {
    fn default() -> Self {
        Self::new()
    }
}

impl<F: FileSystem> TomlLedgerRepository<F> {
    pub fn with_fs(fs: F) -> Self {
        Self { fs }
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlFileEntry {
    hash: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    stage: Option<StageId>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    written_at: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
struct TomlLedger {
    version: u32,
    #[serde(default)]
    files: BTreeMap<String, TomlFileEntry>,
}

impl<F: FileSystem> LedgerRepository for TomlLedgerRepository<F> {
    fn load(&self, path: &Path) -> Result<StateLedger, LedgerError> {
        if !self.fs.exists(path) {
            return Ok(StateLedger::new());
        }

        let content = self
            .fs
            .read(path)
            .map_err(|e| LedgerError::IoError(e.to_string()))?;
        let parsed: TomlLedger =
            toml::from_str(&content).map_err(|e| LedgerError::ParseError(e.to_string()))?;

        if parsed.version != StateLedger::VERSION {
            return Err(LedgerError::VersionMismatch {
                found: parsed.version,
                expected: StateLedger::VERSION,
            });
        }

        let mut ledger = StateLedger::new();
        for (key, entry) in parsed.files {
            let mut loaded = LedgerEntry::new(entry.hash);
            if let Some(stage) = entry.stage {
                loaded = loaded.with_stage(stage);
            }
            if let Some(written_at) = entry.written_at {
                loaded = loaded.with_written_at(written_at);
            }
            ledger.set_entry(key, loaded);
        }

        Ok(ledger)
    }

    fn save(&self, ledger: &StateLedger, path: &Path) -> Result<(), LedgerError> {
        let files = ledger
            .entries()
            .map(|(key, entry)| {
                (
                    key.to_string(),
                    TomlFileEntry {
                        hash: entry.hash().to_string(),
                        stage: entry.stage(),
                        written_at: entry.written_at().map(str::to_string),
                    },
                )
            })
            .collect();

        let content = toml::to_string_pretty(&TomlLedger {
            version: ledger.version(),
            files,
        })
        .map_err(|e| LedgerError::ParseError(e.to_string()))?;

        self.fs
            .write(path, &content)
            .map_err(|e| LedgerError::IoError(e.to_string()))
    }
}
