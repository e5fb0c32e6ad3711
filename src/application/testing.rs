//! In-memory fakes for stage and use case tests

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::Mutex;
use std::time::Duration;

use chrono::NaiveDate;

use crate::application::provision::{Facts, StageContext};
use crate::application::stages::Stage;
use crate::config::Config;
use crate::domain::entities::StateLedger;
use crate::domain::ports::{
    Clock, CommandError, CommandOutput, CommandRunner, CommandSpec, FileSystem, FsError, FsResult,
    ProvisionEvent, ProvisionEventSink, Sleeper,
};
use crate::domain::value_objects::{Outcome, WritePolicy};
use crate::error::ProvisionResult;

type Script = Box<dyn Fn(&[String]) -> CommandOutput>;

/// Answers commands from a closure over argv and records every call
pub struct ScriptedRunner {
    script: Script,
    calls: RefCell<Vec<CommandSpec>>,
}

impl ScriptedRunner {
    pub fn new(script: impl Fn(&[String]) -> CommandOutput + 'static) -> Self {
        Self {
            script: Box::new(script),
            calls: RefCell::new(Vec::new()),
        }
    }

    /// Every command succeeds with empty output
    pub fn succeeding() -> Self {
        Self::new(|_| CommandOutput::success(""))
    }

    pub fn calls(&self) -> Vec<CommandSpec> {
        self.calls.borrow().clone()
    }
}

impl CommandRunner for ScriptedRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, CommandError> {
        self.calls.borrow_mut().push(spec.clone());
        let argv: Vec<String> = spec.argv().into_iter().map(String::from).collect();
        Ok((self.script)(&argv))
    }
}

#[derive(Debug, Default)]
pub struct MemoryFs {
    files: RefCell<BTreeMap<PathBuf, String>>,
    dirs: RefCell<BTreeSet<PathBuf>>,
    links: RefCell<BTreeMap<PathBuf, PathBuf>>,
}

impl MemoryFs {
    pub fn with_file(self, path: impl Into<PathBuf>, content: &str) -> Self {
        self.files
            .borrow_mut()
            .insert(path.into(), content.to_string());
        self
    }

    pub fn file(&self, path: impl AsRef<Path>) -> Option<String> {
        self.files.borrow().get(path.as_ref()).cloned()
    }

    pub fn link(&self, path: impl AsRef<Path>) -> Option<PathBuf> {
        self.links.borrow().get(path.as_ref()).cloned()
    }

    pub fn add_link(&self, link: impl Into<PathBuf>, target: impl Into<PathBuf>) {
        self.links.borrow_mut().insert(link.into(), target.into());
    }

    pub fn has_dir(&self, path: impl AsRef<Path>) -> bool {
        self.dirs.borrow().contains(path.as_ref())
    }

    pub fn paths(&self) -> Vec<PathBuf> {
        self.files.borrow().keys().cloned().collect()
    }
}

impl FileSystem for MemoryFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        self.file(path)
            .ok_or_else(|| FsError::NotFound(path.to_path_buf()))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        self.files
            .borrow_mut()
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        self.files.borrow().contains_key(path)
            || self.dirs.borrow().contains(path)
            || self.links.borrow().contains_key(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.has_dir(path)
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        let removed = self.files.borrow_mut().remove(path).is_some()
            || self.links.borrow_mut().remove(path).is_some();
        if removed {
            Ok(())
        } else {
            Err(FsError::NotFound(path.to_path_buf()))
        }
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        let mut dirs = self.dirs.borrow_mut();
        for ancestor in path.ancestors() {
            if !ancestor.as_os_str().is_empty() {
                dirs.insert(ancestor.to_path_buf());
            }
        }
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()> {
        let content = self.read(from)?;
        self.write(to, &content)
    }

    fn symlink(&self, target: &Path, link: &Path) -> FsResult<()> {
        if self.exists(link) {
            return Err(FsError::Other(format!("{} already exists", link.display())));
        }
        self.add_link(link, target);
        Ok(())
    }
}

pub struct FixedClock(pub NaiveDate);

impl Default for FixedClock {
    fn default() -> Self {
        Self(NaiveDate::from_ymd_opt(2026, 10, 18).unwrap())
    }
}

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

#[derive(Default)]
pub struct CountingSleeper {
    pub count: Cell<u32>,
    pub total: Cell<Duration>,
}

impl Sleeper for CountingSleeper {
    fn sleep(&self, duration: Duration) {
        self.count.set(self.count.get() + 1);
        self.total.set(self.total.get() + duration);
    }
}

#[derive(Default)]
pub struct RecordingSink {
    events: Mutex<Vec<ProvisionEvent>>,
}

impl RecordingSink {
    pub fn events(&self) -> Vec<ProvisionEvent> {
        self.events.lock().unwrap().clone()
    }
}

impl ProvisionEventSink for RecordingSink {
    fn on_event(&self, event: ProvisionEvent) {
        self.events.lock().unwrap().push(event);
    }
}

/// Runs single stages against fakes, carrying facts and ledger across calls
pub struct Harness {
    pub config: Config,
    pub runner: ScriptedRunner,
    pub fs: MemoryFs,
    pub clock: FixedClock,
    pub sleeper: CountingSleeper,
    pub sink: RecordingSink,
    pub ledger: StateLedger,
    pub facts: Facts,
    pub write_policy: WritePolicy,
    pub force: bool,
    pub dry_run: bool,
}

impl Harness {
    pub fn new(runner: ScriptedRunner) -> Self {
        Self {
            config: Config::default(),
            runner,
            fs: MemoryFs::default(),
            clock: FixedClock::default(),
            sleeper: CountingSleeper::default(),
            sink: RecordingSink::default(),
            ledger: StateLedger::new(),
            facts: Facts::default(),
            write_policy: WritePolicy::WriteOnce,
            force: false,
            dry_run: false,
        }
    }

    pub fn with_fs(mut self, fs: MemoryFs) -> Self {
        self.fs = fs;
        self
    }

    pub fn run_stage(&mut self, stage: &dyn Stage) -> ProvisionResult<Outcome> {
        let mut ctx = StageContext::new(
            &self.config,
            &self.runner,
            &self.fs,
            &self.sleeper,
            &self.clock,
            &self.sink,
            std::mem::take(&mut self.ledger),
        );
        ctx.write_policy = self.write_policy;
        ctx.force = self.force;
        ctx.dry_run = self.dry_run;
        ctx.facts = self.facts.clone();
        ctx.enter(stage.id());

        let result = stage.run(&mut ctx);

        self.facts = ctx.facts;
        self.ledger = ctx.ledger;
        result
    }

    /// Display form of every command that was not a probe
    pub fn mutations(&self) -> Vec<String> {
        self.runner
            .calls()
            .iter()
            .filter(|c| !c.is_read_only())
            .map(ToString::to_string)
            .collect()
    }

    pub fn commands(&self) -> Vec<String> {
        self.runner.calls().iter().map(ToString::to_string).collect()
    }

    pub fn notes(&self) -> Vec<String> {
        self.sink
            .events()
            .into_iter()
            .filter_map(|e| match e {
                ProvisionEvent::StageNote { message, .. } => Some(message),
                _ => None,
            })
            .collect()
    }
}
