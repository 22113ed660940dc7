//! In-memory filesystem adapter for testing.

use std::{
    collections::HashMap,
    path::{Path, PathBuf},
    sync::{Arc, RwLock, RwLockReadGuard, RwLockWriteGuard},
};

use velocity_core::{
    application::{ApplicationError, ports::Filesystem},
    error::VelocityResult,
};

/// In-memory filesystem for testing.
///
/// Clones share the same underlying files, so a test can hand one clone to
/// a service and inspect the other afterwards. Directories are implicit: a
/// path exists if it is a file or the ancestor of one.
#[derive(Debug, Clone, Default)]
pub struct MemoryFilesystem {
    files: Arc<RwLock<HashMap<PathBuf, String>>>,
}

impl MemoryFilesystem {
    /// Create a new empty memory filesystem.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a file (testing helper).
    pub fn with_file(self, path: impl Into<PathBuf>, content: impl Into<String>) -> Self {
        if let Ok(mut files) = self.files.write() {
            files.insert(path.into(), content.into());
        }
        self
    }

    /// Read a file's content (testing helper).
    pub fn read_file(&self, path: &Path) -> Option<String> {
        self.files.read().ok()?.get(path).cloned()
    }

    /// True if `path` is a file or an implicit directory above one.
    pub fn exists(&self, path: &Path) -> bool {
        self.files
            .read()
            .map(|files| files.keys().any(|p| p.starts_with(path)))
            .unwrap_or(false)
    }

    fn read(&self) -> VelocityResult<RwLockReadGuard<'_, HashMap<PathBuf, String>>> {
        Ok(self
            .files
            .read()
            .map_err(|_| ApplicationError::LockPoisoned)?)
    }

    fn write(&self) -> VelocityResult<RwLockWriteGuard<'_, HashMap<PathBuf, String>>> {
        Ok(self
            .files
            .write()
            .map_err(|_| ApplicationError::LockPoisoned)?)
    }
}

fn not_found(path: &Path) -> ApplicationError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: "No such file".into(),
    }
}

impl Filesystem for MemoryFilesystem {
    fn read_to_string(&self, path: &Path) -> VelocityResult<String> {
        let files = self.read()?;
        files
            .get(path)
            .cloned()
            .ok_or_else(|| not_found(path).into())
    }

    fn write_file(&self, path: &Path, content: &str) -> VelocityResult<()> {
        self.write()?
            .insert(path.to_path_buf(), content.to_string());
        Ok(())
    }

    fn copy_file(&self, from: &Path, to: &Path) -> VelocityResult<()> {
        let mut files = self.write()?;
        let content = files.get(from).cloned().ok_or_else(|| not_found(from))?;
        files.insert(to.to_path_buf(), content);
        Ok(())
    }

    fn remove_file(&self, path: &Path) -> VelocityResult<()> {
        self.write()?
            .remove(path)
            .map(|_| ())
            .ok_or_else(|| not_found(path).into())
    }
}
