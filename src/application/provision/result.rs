//! Provision Result

use crate::domain::entities::SummaryReport;
use crate::domain::value_objects::{FailurePolicy, Outcome, StageId};

/// What happened to one stage
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct StageRecord {
    pub index: usize,
    pub stage: StageId,
    pub policy: FailurePolicy,
    pub outcome: Outcome,
}

/// Result of a provisioning run
#[derive(Debug, Clone, Default)]
pub struct ProvisionReport {
    /// One record per stage that was reached, in order
    pub records: Vec<StageRecord>,
    /// The error that stopped the run under the Abort policy
    pub aborted: Option<AbortedRun>,
    pub summary: Option<SummaryReport>,
    /// Non-fatal problems: tolerated stage failures, ledger write errors
    pub warnings: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AbortedRun {
    pub stage: StageId,
    pub error: String,
}

impl ProvisionReport {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn outcome_of(&self, stage: StageId) -> Option<&Outcome> {
        self.records
            .iter()
            .find(|r| r.stage == stage)
            .map(|r| &r.outcome)
    }

    pub fn changed(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Changed))
    }

    pub fn satisfied(&self) -> usize {
        self.count(|o| matches!(o, Outcome::AlreadySatisfied))
    }

    pub fn skipped(&self) -> usize {
        self.count(|o| matches!(o, Outcome::Skipped { .. }))
    }

    pub fn failed(&self) -> usize {
        self.count(Outcome::is_failed)
    }

    fn count(&self, pred: impl Fn(&Outcome) -> bool) -> usize {
        self.records.iter().filter(|r| pred(&r.outcome)).count()
    }

    /// No Abort-policy stage failed
    pub fn is_success(&self) -> bool {
        self.aborted.is_none()
    }

    /// Finished, but a Warn-policy stage failed or was skipped
    pub fn is_partial(&self) -> bool {
        self.is_success() && !self.warnings.is_empty()
    }
}
