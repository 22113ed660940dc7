//! Local filesystem adapter using std::fs.

use std::fs::File;
use std::io;
use std::path::Path;

use tracing::trace;
use velocity_core::{
    application::{ApplicationError, ports::Filesystem},
    error::{VelocityError, VelocityResult},
};

/// Production filesystem implementation using `std::fs`.
#[derive(Debug, Clone, Copy, Default)]
pub struct LocalFilesystem;

impl LocalFilesystem {
    /// Create a new local filesystem adapter.
    pub fn new() -> Self {
        Self
    }
}

impl Filesystem for LocalFilesystem {
    fn read_to_string(&self, path: &Path) -> VelocityResult<String> {
        trace!(path = %path.display(), "read");
        std::fs::read_to_string(path).map_err(|e| map_io_error(path, e, "read file"))
    }

    fn write_file(&self, path: &Path, content: &str) -> VelocityResult<()> {
        trace!(path = %path.display(), bytes = content.len(), "write");
        std::fs::write(path, content).map_err(|e| map_io_error(path, e, "write file"))
    }

    fn copy_file(&self, from: &Path, to: &Path) -> VelocityResult<()> {
        trace!(from = %from.display(), to = %to.display(), "copy");
        let mut source = File::open(from).map_err(|e| map_io_error(from, e, "read file"))?;
        let mut dest = File::create(to).map_err(|e| map_io_error(to, e, "write file"))?;
        io::copy(&mut source, &mut dest)
            .map(|_| ())
            .map_err(|e| map_io_error(to, e, "copy file"))
    }

    fn remove_file(&self, path: &Path) -> VelocityResult<()> {
        trace!(path = %path.display(), "remove");
        std::fs::remove_file(path).map_err(|e| map_io_error(path, e, "remove file"))
    }
}

pub(crate) fn map_io_error(path: &Path, e: io::Error, operation: &str) -> VelocityError {
    ApplicationError::FilesystemError {
        path: path.to_path_buf(),
        reason: format!("Failed to {}: {}", operation, e),
    }
    .into()
}
