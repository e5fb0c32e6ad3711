//! Failure policy value object

use std::fmt;

use serde::{Deserialize, Serialize};

/// How the pipeline reacts when a stage returns an error
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FailurePolicy {
    /// Stop the run and exit non-zero
    Abort,
    /// Record the failure, surface a warning, continue
    Warn,
    /// Record the failure quietly, continue
    Ignore,
}

impl FailurePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            FailurePolicy::Abort => "abort",
            FailurePolicy::Warn => "warn",
            FailurePolicy::Ignore => "ignore",
        }
    }

    /// Whether a failure under this policy ends the run
    pub fn stops_run(&self) -> bool {
        matches!(self, FailurePolicy::Abort)
    }
}

impl fmt::Display for FailurePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
