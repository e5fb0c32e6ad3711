//! Generated file planning
//!
//! Pure domain logic deciding what happens to a generated file (nginx site,
//! systemd unit) given the write policy, the file's current state and what
//! the ledger recorded for it. No I/O; the caller reads and writes.

use similar::TextDiff;

use crate::domain::value_objects::{ContentHash, WritePolicy};

/// The action to take for a generated file
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FileAction {
    /// Write the file (new, or a safe update of a file we own)
    Write,
    /// Leave the file as it is
    Skip(SkipReason),
    /// The file differs from what we would write and we cannot prove we own it
    Conflict(ConflictReason),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SkipReason {
    /// Write-once policy and the file exists
    Exists,
    /// Content already matches
    UpToDate,
}

/// Reason for a conflict
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ConflictReason {
    /// File was edited since we last wrote it
    Modified,
    /// File exists but the ledger has no record of it
    Untracked,
}

impl ConflictReason {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Modified => "modified since last run",
            Self::Untracked => "not written by ringprov",
        }
    }
}

impl FileAction {
    pub fn should_write(&self) -> bool {
        matches!(self, Self::Write)
    }

    pub fn is_conflict(&self) -> bool {
        matches!(self, Self::Conflict(_))
    }

    /// Turn a conflict into a write (`--force`)
    pub fn resolve_overwrite(self) -> Self {
        match self {
            Self::Conflict(_) => Self::Write,
            other => other,
        }
    }
}

/// What is on disk at the target path
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TargetFileState {
    pub exists: bool,
    /// Hash of the current content, if readable
    pub current_hash: Option<ContentHash>,
}

impl TargetFileState {
    pub fn not_exists() -> Self {
        Self {
            exists: false,
            current_hash: None,
        }
    }

    pub fn exists_with_hash(hash: ContentHash) -> Self {
        Self {
            exists: true,
            current_hash: Some(hash),
        }
    }

    pub fn exists_unreadable() -> Self {
        Self {
            exists: true,
            current_hash: None,
        }
    }
}

pub struct Planner;

impl Planner {
    /// Plan one generated file
    ///
    /// `recorded` is the ledger hash from the last time the file was written.
    pub fn plan_file(
        policy: WritePolicy,
        desired: &ContentHash,
        target: &TargetFileState,
        recorded: Option<&ContentHash>,
    ) -> FileAction {
        if !target.exists {
            return FileAction::Write;
        }

        if target.current_hash.as_ref() == Some(desired) {
            return FileAction::Skip(SkipReason::UpToDate);
        }

        if policy == WritePolicy::WriteOnce {
            return FileAction::Skip(SkipReason::Exists);
        }

        let Some(current) = &target.current_hash else {
            return FileAction::Conflict(ConflictReason::Untracked);
        };

        match recorded {
            Some(recorded) if recorded == current => FileAction::Write,
            Some(_) => FileAction::Conflict(ConflictReason::Modified),
            None => FileAction::Conflict(ConflictReason::Untracked),
        }
    }
}

/// Unified diff from the on-disk content to the generated content
pub fn unified_diff(path: &str, current: &str, desired: &str) -> String {
    TextDiff::from_lines(current, desired)
        .unified_diff()
        .context_radius(2)
        .header(&format!("{path} (on disk)"), &format!("{path} (generated)"))
        .to_string()
}
