//! State ledger - tracks hashes of generated files
//!
//! Records the content hash of every file the provisioner writes, so the
//! reconcile policy can tell a file it owns from one an operator edited.
//! Pure data; I/O lives in `LedgerRepository`.

use std::collections::BTreeMap;
use std::path::Path;

use crate::domain::value_objects::{ContentHash, StageId};

/// Normalize a path for ledger keys (always forward slashes)
pub(crate) fn ledger_key(path: &Path) -> String {
    path.to_string_lossy().replace('\\', "/")
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LedgerEntry {
    hash: String,
    stage: Option<StageId>,
    written_at: Option<String>,
}

impl LedgerEntry {
    pub fn new(hash: impl Into<String>) -> Self {
        Self {
            hash: hash.into(),
            stage: None,
            written_at: None,
        }
    }

    pub fn with_stage(mut self, stage: StageId) -> Self {
        self.stage = Some(stage);
        self
    }

    pub fn with_written_at(mut self, written_at: impl Into<String>) -> Self {
        self.written_at = Some(written_at.into());
        self
    }

    pub fn hash(&self) -> &str {
        &self.hash
    }

    pub fn stage(&self) -> Option<StageId> {
        self.stage
    }

    pub fn written_at(&self) -> Option<&str> {
        self.written_at.as_deref()
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StateLedger {
    version: u32,
    entries: BTreeMap<String, LedgerEntry>,
}

impl Default for StateLedger {
    fn default() -> Self {
        Self::new()
    }
}

impl StateLedger {
    /// Current format version
    pub const VERSION: u32 = 1;

    pub fn new() -> Self {
        Self {
            version: Self::VERSION,
            entries: BTreeMap::new(),
        }
    }

    pub fn version(&self) -> u32 {
        self.version
    }

    /// Recorded hash for a generated file
    pub fn recorded_hash(&self, path: &Path) -> Option<ContentHash> {
        self.entries
            .get(&ledger_key(path))
            .map(|e| ContentHash::new(e.hash()))
    }

    pub fn get(&self, path: &Path) -> Option<&LedgerEntry> {
        self.entries.get(&ledger_key(path))
    }

    /// Record a file's hash; returns true if the ledger changed
    pub fn record(&mut self, path: &Path, entry: LedgerEntry) -> bool {
        let key = ledger_key(path);
        if self.entries.get(&key) == Some(&entry) {
            return false;
        }
        self.entries.insert(key, entry);
        true
    }

    /// Insert an entry under a raw key (used when loading)
    pub fn set_entry(&mut self, key: impl Into<String>, entry: LedgerEntry) {
        self.entries.insert(key.into(), entry);
    }

    pub fn entries(&self) -> impl Iterator<Item = (&str, &LedgerEntry)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}
