//! Stage outcome value object

use std::fmt;

use serde::Serialize;

/// Result of reconciling one stage's resources
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum Outcome {
    /// Everything the stage manages was already in the desired state
    AlreadySatisfied,
    /// At least one resource was created or modified
    Changed,
    /// The stage did not run
    Skipped { reason: String },
    /// The stage failed under a non-aborting policy
    Failed { error: String },
}

impl Outcome {
    pub fn skipped(reason: impl Into<String>) -> Self {
        Outcome::Skipped {
            reason: reason.into(),
        }
    }

    /// `Changed` if anything changed, otherwise `AlreadySatisfied`
    pub fn from_changed(changed: bool) -> Self {
        if changed {
            Outcome::Changed
        } else {
            Outcome::AlreadySatisfied
        }
    }

    pub fn is_changed(&self) -> bool {
        matches!(self, Outcome::Changed)
    }

    pub fn is_failed(&self) -> bool {
        matches!(self, Outcome::Failed { .. })
    }
}

impl fmt::Display for Outcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Outcome::AlreadySatisfied => f.write_str("already satisfied"),
            Outcome::Changed => f.write_str("changed"),
            Outcome::Skipped { reason } => write!(f, "skipped ({reason})"),
            Outcome::Failed { error } => write!(f, "failed: {error}"),
        }
    }
}
