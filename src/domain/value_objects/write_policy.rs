//! Write policy for generated files

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// How generated files (proxy site, service unit) are treated on re-runs
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum WritePolicy {
    /// Write only when absent; never touch an existing file
    #[default]
    WriteOnce,
    /// Compare content hashes and update files the provisioner owns
    Reconcile,
}

impl WritePolicy {
    pub fn as_str(&self) -> &'static str {
        match self {
            WritePolicy::WriteOnce => "write-once",
            WritePolicy::Reconcile => "reconcile",
        }
    }
}

impl fmt::Display for WritePolicy {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for WritePolicy {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "write-once" | "write_once" | "writeonce" => Ok(WritePolicy::WriteOnce),
            "reconcile" => Ok(WritePolicy::Reconcile),
            other => Err(format!(
                "unknown write policy '{other}' (expected write-once or reconcile)"
            )),
        }
    }
}
