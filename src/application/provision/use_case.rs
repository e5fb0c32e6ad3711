//! Provision Use Case
//!
//! Runs the stages in order over one shared context:
//! 1. Load the state ledger
//! 2. Run each selected stage, applying its failure policy to errors
//! 3. Save the ledger if a stage wrote a generated file
//!
//! Stages own the reconciliation logic; this type only sequences them and
//! decides what an error means for the rest of the run.

use std::sync::Arc;

use crate::application::stages::{pipeline, Stage};
use crate::config::Config;
use crate::domain::ports::{
    Clock, CommandRunner, FileSystem, LedgerRepository, NoopEventSink, ProvisionEvent,
    ProvisionEventSink, Sleeper,
};
use crate::domain::value_objects::{FailurePolicy, Outcome};
use crate::error::ProvisionError;
use crate::infrastructure::{SystemClock, ThreadSleeper};

use super::context::StageContext;
use super::options::ProvisionOptions;
use super::result::{AbortedRun, ProvisionReport, StageRecord};

/// Provision use case - sequences the stages against the host ports
pub struct ProvisionUseCase<R, F, L>
where
    R: CommandRunner,
    F: FileSystem,
    L: LedgerRepository,
{
    config: Config,
    runner: R,
    fs: F,
    ledger_repo: L,
    sleeper: Box<dyn Sleeper>,
    clock: Box<dyn Clock>,
}

impl<R, F, L> ProvisionUseCase<R, F, L>
where
    R: CommandRunner,
    F: FileSystem,
    L: LedgerRepository,
{
    pub fn new(config: Config, runner: R, fs: F, ledger_repo: L) -> Self {
        Self {
            config,
            runner,
            fs,
            ledger_repo,
            sleeper: Box::new(ThreadSleeper),
            clock: Box::new(SystemClock),
        }
    }

    pub fn with_sleeper(mut self, sleeper: impl Sleeper + 'static) -> Self {
        self.sleeper = Box::new(sleeper);
        self
    }

    pub fn with_clock(mut self, clock: impl Clock + 'static) -> Self {
        self.clock = Box::new(clock);
        self
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    /// Execute the provision use case
    pub fn execute(&self, options: &ProvisionOptions) -> ProvisionReport {
        self.execute_with_events(options, Arc::new(NoopEventSink))
    }

    /// Execute the provision use case with event reporting
    pub fn execute_with_events(
        &self,
        options: &ProvisionOptions,
        events: Arc<dyn ProvisionEventSink>,
    ) -> ProvisionReport {
        let stages: Vec<(usize, Box<dyn Stage>)> = pipeline()
            .into_iter()
            .enumerate()
            .filter(|(_, stage)| options.only.is_empty() || options.only.contains(&stage.id()))
            .collect();

        let state_file = &self.config.files.state_file;
        let ledger = self.ledger_repo.load_or_new(state_file);

        let mut ctx = StageContext::new(
            &self.config,
            &self.runner,
            &self.fs,
            self.sleeper.as_ref(),
            self.clock.as_ref(),
            events.as_ref(),
            ledger,
        );
        ctx.write_policy = options.effective_write_policy(self.config.files.write_policy);
        ctx.force = options.force;
        ctx.dry_run = options.dry_run;

        events.on_event(ProvisionEvent::Started {
            stage_count: stages.len(),
            dry_run: options.dry_run,
            write_policy: ctx.write_policy,
        });
        log::info!(
            "provisioning {} stage(s), write policy {}{}",
            stages.len(),
            ctx.write_policy,
            if options.dry_run { ", dry run" } else { "" }
        );

        let mut report = ProvisionReport::new();
        for (index, stage) in &stages {
            let (index, id) = (*index, stage.id());
            let policy = id.failure_policy();

            if !options.selects(id) {
                let outcome = Outcome::skipped("skipped on request");
                events.on_event(ProvisionEvent::StageFinished {
                    index,
                    stage: id,
                    outcome: outcome.clone(),
                });
                report.records.push(StageRecord {
                    index,
                    stage: id,
                    policy,
                    outcome,
                });
                continue;
            }

            events.on_event(ProvisionEvent::StageStarted { index, stage: id });
            ctx.enter(id);

            let outcome = match stage.run(&mut ctx) {
                Ok(outcome) => outcome,
                Err(err) => {
                    let error = err.to_string();
                    events.on_event(ProvisionEvent::StageFailed {
                        index,
                        stage: id,
                        policy,
                        error: error.clone(),
                    });

                    match (&err, policy) {
                        (ProvisionError::PreconditionUnmet { reason, .. }, _) => {
                            log::warn!("{id}: skipped, {reason}");
                            report.warnings.push(format!("{id}: {error}"));
                            Outcome::skipped(reason.clone())
                        }
                        (_, FailurePolicy::Abort) => {
                            log::error!("{id}: {error}");
                            report.records.push(StageRecord {
                                index,
                                stage: id,
                                policy,
                                outcome: Outcome::Failed {
                                    error: error.clone(),
                                },
                            });
                            report.aborted = Some(AbortedRun { stage: id, error });
                            break;
                        }
                        (_, FailurePolicy::Warn) => {
                            log::warn!("{id}: {error}");
                            report.warnings.push(format!("{id}: {error}"));
                            Outcome::Failed { error }
                        }
                        (_, FailurePolicy::Ignore) => {
                            log::debug!("{id}: ignoring failure: {error}");
                            Outcome::Failed { error }
                        }
                    }
                }
            };

            events.on_event(ProvisionEvent::StageFinished {
                index,
                stage: id,
                outcome: outcome.clone(),
            });
            report.records.push(StageRecord {
                index,
                stage: id,
                policy,
                outcome,
            });
        }

        report.summary = ctx.facts.summary.clone();

        if ctx.ledger_dirty() && !options.dry_run {
            if let Err(err) = self.ledger_repo.save(&ctx.ledger, state_file) {
                log::warn!("could not save state ledger: {err}");
                report.warnings.push(format!("state ledger: {err}"));
            }
        }

        events.on_event(ProvisionEvent::Completed {
            changed: report.changed(),
            satisfied: report.satisfied(),
            skipped: report.skipped(),
            failed: report.failed(),
            aborted: report.aborted.is_some(),
        });

        report
    }
}
