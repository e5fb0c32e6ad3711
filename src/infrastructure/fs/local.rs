//! Local File System Implementation
//!
//! Implements the FileSystem port for local disk operations.

use std::io::Write;
use std::os::unix::fs::PermissionsExt;
use std::path::Path;

use tempfile::NamedTempFile;

use crate::domain::ports::file_system::{FileSystem, FsError, FsResult};

/// Mode for newly generated files
const NEW_FILE_MODE: u32 = 0o644;

/// Local file system implementation
///
/// Writes go to a temporary file in the target directory and are renamed
/// into place, so a reader never sees a half-written config.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFs;

impl LocalFs {
    pub fn new() -> Self {
        Self
    }
}

impl FileSystem for LocalFs {
    fn read(&self, path: &Path) -> FsResult<String> {
        std::fs::read_to_string(path).map_err(|e| FsError::from_io(path, e))
    }

    fn write(&self, path: &Path, content: &str) -> FsResult<()> {
        let parent = match path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        std::fs::create_dir_all(parent).map_err(|e| FsError::from_io(parent, e))?;

        // Keep the mode of a file being replaced
        let mode = std::fs::metadata(path)
            .map(|m| m.permissions().mode())
            .unwrap_or(NEW_FILE_MODE);

        let mut tmp = NamedTempFile::new_in(parent).map_err(|e| FsError::from_io(parent, e))?;
        tmp.write_all(content.as_bytes())
            .and_then(|_| tmp.as_file().sync_all())
            .map_err(|e| FsError::from_io(path, e))?;
        tmp.as_file()
            .set_permissions(std::fs::Permissions::from_mode(mode))
            .map_err(|e| FsError::from_io(path, e))?;
        tmp.persist(path)
            .map_err(|e| FsError::from_io(path, e.error))?;

        log::debug!("wrote {}", path.display());
        Ok(())
    }

    fn exists(&self, path: &Path) -> bool {
        std::fs::symlink_metadata(path).is_ok()
    }

    fn is_dir(&self, path: &Path) -> bool {
        path.is_dir()
    }

    fn remove(&self, path: &Path) -> FsResult<()> {
        std::fs::remove_file(path).map_err(|e| FsError::from_io(path, e))
    }

    fn create_dir_all(&self, path: &Path) -> FsResult<()> {
        std::fs::create_dir_all(path).map_err(|e| FsError::from_io(path, e))
    }

    fn copy(&self, from: &Path, to: &Path) -> FsResult<()> {
        std::fs::copy(from, to)
            .map(|_| ())
            .map_err(|e| FsError::from_io(from, e))
    }

    fn symlink(&self, target: &Path, link: &Path) -> FsResult<()> {
        std::os::unix::fs::symlink(target, link).map_err(|e| FsError::from_io(link, e))
    }
}
