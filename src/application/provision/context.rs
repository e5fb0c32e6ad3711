//! Stage execution context
//!
//! Everything a stage may touch: the ports, the effective configuration,
//! facts published by earlier stages, and the state ledger.

use std::path::Path;

use crate::config::Config;
use crate::domain::entities::{LedgerEntry, StateLedger, SummaryReport};
use crate::domain::ports::{
    Clock, CommandOutput, CommandRunner, CommandSpec, FileSystem, ProvisionEvent,
    ProvisionEventSink, Sleeper,
};
use crate::domain::value_objects::{ContentHash, PgVersion, Readiness, StageId, WritePolicy};
use crate::error::ProvisionResult;

/// Facts established by earlier stages in this run
#[derive(Debug, Clone, Default)]
pub struct Facts {
    /// Detected PostgreSQL major version
    pub pg_version: Option<PgVersion>,
    /// Outcome of the readiness poll
    pub readiness: Option<Readiness>,
    pub summary: Option<SummaryReport>,
}

pub struct StageContext<'a> {
    pub config: &'a Config,
    pub runner: &'a dyn CommandRunner,
    pub fs: &'a dyn FileSystem,
    pub sleeper: &'a dyn Sleeper,
    pub clock: &'a dyn Clock,
    events: &'a dyn ProvisionEventSink,
    pub write_policy: WritePolicy,
    pub force: bool,
    pub dry_run: bool,
    pub facts: Facts,
    pub ledger: StateLedger,
    ledger_dirty: bool,
    stage: StageId,
}

impl<'a> StageContext<'a> {
    #[allow(clippy::too_many_arguments)]
    pub fn new(
        config: &'a Config,
        runner: &'a dyn CommandRunner,
        fs: &'a dyn FileSystem,
        sleeper: &'a dyn Sleeper,
        clock: &'a dyn Clock,
        events: &'a dyn ProvisionEventSink,
        ledger: StateLedger,
    ) -> Self {
        Self {
            config,
            runner,
            fs,
            sleeper,
            clock,
            events,
            write_policy: config.files.write_policy,
            force: false,
            dry_run: false,
            facts: Facts::default(),
            ledger,
            ledger_dirty: false,
            stage: StageId::Packages,
        }
    }

    pub fn stage(&self) -> StageId {
        self.stage
    }

    pub(crate) fn enter(&mut self, stage: StageId) {
        self.stage = stage;
    }

    /// Run a command; non-zero exit is an error
    pub fn run(&self, spec: CommandSpec) -> ProvisionResult<CommandOutput> {
        Ok(self.runner.check(&spec)?)
    }

    /// Run a probe; never an error
    pub fn probe(&self, spec: CommandSpec) -> bool {
        self.runner.succeeds(&spec.read_only())
    }

    /// Progress line for the current stage
    pub fn note(&self, message: impl Into<String>) {
        let message = message.into();
        log::info!("[{}] {}", self.stage, message);
        if self.events.wants_detailed_events() {
            self.events.on_event(ProvisionEvent::StageNote {
                stage: self.stage,
                message,
            });
        }
    }

    pub fn emit(&self, event: ProvisionEvent) {
        self.events.on_event(event);
    }

    /// Major version from an earlier stage, or detected now
    pub fn pg_version(&mut self) -> PgVersion {
        if let Some(version) = &self.facts.pg_version {
            return version.clone();
        }
        let output = self
            .runner
            .run(&CommandSpec::new("psql").arg("--version").read_only())
            .ok()
            .filter(CommandOutput::is_success)
            .map(|o| o.stdout)
            .unwrap_or_default();
        let version = PgVersion::parse_or(&output, &self.config.database.fallback_version);
        self.facts.pg_version = Some(version.clone());
        version
    }

    /// Record a written file in the ledger
    pub fn record_file(&mut self, path: &Path, content: &str) {
        let entry = LedgerEntry::new(ContentHash::from_content(content).as_str())
            .with_stage(self.stage)
            .with_written_at(self.clock.today().format("%Y-%m-%d").to_string());
        if self.ledger.record(path, entry) {
            self.ledger_dirty = true;
        }
    }

    pub fn ledger_dirty(&self) -> bool {
        self.ledger_dirty
    }
}
