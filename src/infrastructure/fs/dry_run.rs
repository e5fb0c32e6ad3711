//! Dry-run file system
//!
//! Reads fall through to the wrapped file system; mutations are recorded in
//! an in-memory overlay and reported as planned actions. Later reads see the
//! overlay, so a stage that writes then re-reads a file behaves as it would
//! on a real run.

use std::collections::{BTreeMap, BTreeSet};
use std::path::{Path, PathBuf};
use std::sync::{Arc, Mutex, MutexGuard};

use crate::domain::ports::{FileSystem, FsError, FsResult, ProvisionEvent, ProvisionEventSink};

#[derive(Debug, Default)]
struct Overlay {
    /// `Some` = written content, `None` = removed
    files: BTreeMap<PathBuf, Option<String>>,
    dirs: BTreeSet<PathBuf>,
}

pub struct DryRunFs<F> {
    inner: F,
    overlay: Mutex<Overlay>,
    events: Arc<dyn ProvisionEventSink>,
}

impl<F: FileSystem> DryRunFs<F> {
    pub fn new(inner: F, events: Arc<dyn ProvisionEventSink>) -> Self {
        Self {
            inner,
            overlay: Mutex::new(Overlay::default()),
            events,
        }
    }

    fn overlay(&self) -> MutexGuard<'_, Overlay> {
        // A poisoned overlay is still a consistent map
        self.overlay.lock().unwrap_or_else(|e| e.into_inner())
    }

    fn plan(&self, action: String) {
        log::info!("dry run: {action}");
        self.events.on_event(ProvisionEvent::Planned { action });
    }
}

impl<F: FileSystem> FileSystem for DryRunFs<F> {
    fn read(&self, path: &Path) -> FsResult<String> {
        match self.overlay().files.get(path) {
            Some(Some(content)) => return Ok(content.clone()),
            Some(None) => return Err(FsError::NotFound(path.to_path_buf())),
            None => {}
        }
        self.inner.read(path)
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        self.plan(format!("write {} ({} bytes)", path.display(), content.len()));
        self.overlay()
            .files
            .insert(path.to_path_buf(), Some(content.to_string()));
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        let overlay = self.overlay();
        match overlay.files.get(path) {
            Some(entry) => entry.is_some(),
            None => overlay.dirs.contains(path) || self.inner.exists(path),
        }
    }

    fn is_dir(&self, path: &Path) -> bool {
        self.overlay().dirs.contains(path) || self.inner.is_dir(path)
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        self.plan(format!("remove {}", path.display()));
        self.overlay().files.insert(path.to_path_buf(), None);
        Ok(())
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        if self.is_dir(path) {
            return Ok(());
        }
        self.plan(format!("mkdir -p {}", path.display()));
        self.overlay().dirs.insert(path.to_path_buf());
        Ok(())
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()> {
        let content = self.read(from)?;
        self.plan(format!("copy {} -> {}", from.display(), to.display()));
        self.overlay().files.insert(to.to_path_buf(), Some(content));
        Ok(())
    }

    fn symlink(&self, target: &Path, link: &Path) -> FsResult<()> {
        self.plan(format!("ln -s {} {}", target.display(), link.display()));
        self.overlay()
            .files
            .insert(link.to_path_buf(), Some(String::new()));
        Ok(())
    }
}
