//! FileSystem port - abstraction over file I/O operations
//!
//! Stages read and write configuration files through this trait so the
//! provisioner can run against an in-memory tree in tests and against a
//! recording overlay in dry runs.

use std::path::{Path, PathBuf};

use crate::domain::value_objects::ContentHash;

/// Result type for file system operations
pub type FsResult<T> = Result<T, FsError>;

/// File system operation errors
#[derive(Debug)]
pub enum FsError {
    /// File not found
    NotFound(PathBuf),
    /// Permission denied
    PermissionDenied(PathBuf),
    /// I/O error
    Io(PathBuf, std::io::Error),
    /// Other error
    Other(String),
}

impl FsError {
    /// Classify an I/O error against the path it concerns
    pub fn from_io(path: &Path, err: std::io::Error) -> Self {
        match err.kind() {
            std::io::ErrorKind::NotFound => FsError::NotFound(path.to_path_buf()),
            std::io::ErrorKind::PermissionDenied => FsError::PermissionDenied(path.to_path_buf()),
            _ => FsError::Io(path.to_path_buf(), err),
        }
    }
}

impl std::fmt::Display for FsError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            FsError::NotFound(path) => write!(f, "File not found: {}", path.display()),
            FsError::PermissionDenied(path) => {
                write!(f, "Permission denied: {}", path.display())
            }
            FsError::Io(path, err) => write!(f, "I/O error on {}: {}", path.display(), err),
            FsError::Other(msg) => write!(f, "{}", msg),
        }
    }
}

impl std::error::Error for FsError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            FsError::Io(_, err) => Some(err),
            _ => None,
        }
    }
}

/// Abstract file system interface
///
/// Implementations:
/// - `LocalFs` - standard file I/O with atomic writes
/// - `DryRunFs` - reads through, records writes in an overlay
/// - `MemoryFs` - in-memory tree for testing
pub trait FileSystem {
    /// Read file content as string
    fn read(&self, path: &Path) -> FsResult<String>;

    /// Write content to file atomically, creating parent directories
    fn write(&self, path: &Path, content: &str) -> FsResult<()>;

    /// Check if a file, directory or symlink exists at `path`
    ///
    /// Dangling symlinks count as existing.
    fn exists(&self, path: &Path) -> bool;

    /// Check if `path` is a directory
    fn is_dir(&self, path: &Path) -> bool;

    /// Remove a file or symlink
    fn remove(&self, path: &Path) -> FsResult<()>;

    /// Create directory and parents
    fn create_dir_all(&self, path: &Path) -> FsResult<()>;

    /// Copy a file's content to another path
    fn copy(&self, from: &Path, to: &Path) -> FsResult<()>;

    /// Create a symlink at `link` pointing to `target`
    fn symlink(&self, target: &Path, link: &Path) -> FsResult<()>;

    /// Compute content hash (SHA-256)
    fn hash(&self, path: &Path) -> FsResult<ContentHash> {
        self.read(path).map(|content| ContentHash::from_content(&content))
    }
}

impl<T: FileSystem + ?Sized> FileSystem for &T {
    fn read(&self, path: &Path) -> FsResult<String> {
        (**self).read(path)
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        (**self).write(path, content)
    }

    fn exists(&self, path: &Path) -> bool {
        (**self).exists(path)
    }

    fn is_dir(&self, path: &Path) -> bool {
        (**self).is_dir(path)
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        (**self).remove(path)
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        (**self).create_dir_all(path)
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()> {
        (**self).copy(from, to)
    }

    fn symlink(&self, target: &Path, link: &Path) -> FsResult<()> {
        (**self).symlink(target, link)
    }

    fn hash(&self, path: &Path) -> FsResult<ContentHash> {
        (**self).hash(path)
    }
}
