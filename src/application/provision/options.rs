//! Provision Options

use crate::domain::value_objects::{StageId, WritePolicy};

/// Options for the provision use case
#[derive(Debug, Clone, Default)]
pub struct ProvisionOptions {
    /// Record mutations instead of performing them
    pub dry_run: bool,
    /// Overwrite drifted generated files (implies reconcile)
    pub force: bool,
    /// Overrides the configured write policy
    pub write_policy: Option<WritePolicy>,
    /// Stages to leave out of this run
    pub skip: Vec<StageId>,
    /// Run only these stages (empty means all)
    pub only: Vec<StageId>,
}

impl ProvisionOptions {
    pub fn new() -> Self {
        Self::default()
    }

    /// Options for `status`: the summary stage alone
    pub fn status() -> Self {
        Self {
            only: vec![StageId::Summary],
            ..Self::default()
        }
    }

    pub fn with_dry_run(mut self, dry_run: bool) -> Self {
        self.dry_run = dry_run;
        self
    }

    pub fn with_force(mut self, force: bool) -> Self {
        self.force = force;
        self
    }

    pub fn with_write_policy(mut self, policy: WritePolicy) -> Self {
        self.write_policy = Some(policy);
        self
    }

    pub fn with_skip(mut self, stages: impl IntoIterator<Item = StageId>) -> Self {
        self.skip.extend(stages);
        self
    }

    /// The policy in effect given the configured default
    pub fn effective_write_policy(&self, configured: WritePolicy) -> WritePolicy {
        if self.force {
            WritePolicy::Reconcile
        } else {
            self.write_policy.unwrap_or(configured)
        }
    }

    /// Whether `stage` runs at all
    pub fn selects(&self, stage: StageId) -> bool {
        (self.only.is_empty() || self.only.contains(&stage)) && !self.skip.contains(&stage)
    }
}
