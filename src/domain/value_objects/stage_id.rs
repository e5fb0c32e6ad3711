//! Stage identity
//!
//! The ten provisioning stages in execution order. Each stage's failure
//! policy is declared here, next to its name, rather than inferred.

use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use super::FailurePolicy;
use crate::error::ProvisionError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum StageId {
    Packages,
    Cluster,
    Readiness,
    Database,
    Tuning,
    Layout,
    Proxy,
    Backend,
    Firewall,
    Summary,
}

impl StageId {
    /// All stages in pipeline order
    pub const ALL: [StageId; 10] = [
        StageId::Packages,
        StageId::Cluster,
        StageId::Readiness,
        StageId::Database,
        StageId::Tuning,
        StageId::Layout,
        StageId::Proxy,
        StageId::Backend,
        StageId::Firewall,
        StageId::Summary,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            StageId::Packages => "packages",
            StageId::Cluster => "cluster",
            StageId::Readiness => "readiness",
            StageId::Database => "database",
            StageId::Tuning => "tuning",
            StageId::Layout => "layout",
            StageId::Proxy => "proxy",
            StageId::Backend => "backend",
            StageId::Firewall => "firewall",
            StageId::Summary => "summary",
        }
    }

    /// Human-readable title for progress output
    pub fn title(&self) -> &'static str {
        match self {
            StageId::Packages => "Installing packages",
            StageId::Cluster => "Ensuring database cluster",
            StageId::Readiness => "Waiting for database",
            StageId::Database => "Provisioning database objects",
            StageId::Tuning => "Tuning database configuration",
            StageId::Layout => "Creating application directories",
            StageId::Proxy => "Configuring reverse proxy",
            StageId::Backend => "Registering backend service",
            StageId::Firewall => "Applying firewall rules",
            StageId::Summary => "Summary",
        }
    }

    /// What happens to the run when this stage fails
    pub fn failure_policy(&self) -> FailurePolicy {
        match self {
            StageId::Packages
            | StageId::Cluster
            | StageId::Tuning
            | StageId::Layout
            | StageId::Proxy
            | StageId::Backend => FailurePolicy::Abort,
            StageId::Readiness | StageId::Database => FailurePolicy::Warn,
            StageId::Firewall | StageId::Summary => FailurePolicy::Ignore,
        }
    }

    fn expected_names() -> String {
        Self::ALL
            .iter()
            .map(|s| s.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl fmt::Display for StageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for StageId {
    type Err = ProvisionError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .iter()
            .copied()
            .find(|stage| stage.as_str() == wanted)
            .ok_or_else(|| ProvisionError::UnknownStage {
                name: s.to_string(),
                expected: Self::expected_names(),
            })
    }
}
