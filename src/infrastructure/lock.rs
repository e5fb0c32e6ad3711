//! Advisory run lock
//!
//! Held for the duration of a provisioning run so two runs never interleave
//! their package installs and config edits.

use std::fs::{self, File};
use std::io;
use std::path::{Path, PathBuf};

use fs2::FileExt;

use crate::domain::ports::FsError;
use crate::error::{ProvisionError, ProvisionResult};

/// Exclusive lock on a file, released on drop
#[derive(Debug)]
pub struct RunLock {
    file: File,
    path: PathBuf,
}

impl RunLock {
    /// Take the lock without blocking
    pub fn acquire(path: &Path) -> ProvisionResult<Self> {
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).map_err(|e| FsError::from_io(parent, e))?;
        }

        let file = File::create(path).map_err(|e| FsError::from_io(path, e))?;
        file.try_lock_exclusive()
            .map_err(|e| lock_error(path, e))?;

        log::debug!("acquired run lock {}", path.display());
        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

/// Contention means another run holds the lock; anything else is an I/O failure
fn lock_error(path: &Path, err: io::Error) -> ProvisionError {
    if err.kind() == fs2::lock_contended_error().kind() {
        ProvisionError::AlreadyRunning {
            path: path.to_path_buf(),
        }
    } else {
        FsError::from_io(path, err).into()
    }
}

impl Drop for RunLock {
    fn drop(&mut self) {
        let _ = self.file.unlock();
    }
}
