//! Git-backed template fetcher.
//!
//! Each fetch performs a fresh shallow clone into a temporary directory and
//! copies the working tree, minus `.git`, into the destination. Symlinks are
//! recreated as symlinks. There is no local template cache.

use std::ffi::OsString;
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::process::{Command, Stdio};

use thiserror::Error;
use tracing::{debug, info, instrument};
use walkdir::WalkDir;

use velocity_core::{
    application::{
        ApplicationError,
        ports::{FetchOptions, TemplateFetcher},
    },
    domain::TemplateSource,
    error::{VelocityError, VelocityResult},
};

/// Version-control metadata that never reaches the new project.
const VCS_DIR: &str = ".git";

#[derive(Debug, Error)]
enum FetchError {
    #[error("failed to run {program:?}: {source}")]
    Spawn { program: OsString, source: io::Error },

    #[error("git clone of {url} failed ({status}): {stderr}")]
    Clone {
        url: String,
        status: String,
        stderr: String,
    },

    #[error("failed to create temporary checkout: {0}")]
    Checkout(#[source] io::Error),

    #[error("failed to walk template checkout: {0}")]
    Walk(#[from] walkdir::Error),

    #[error("failed to copy {}: {source}", path.display())]
    Copy { path: PathBuf, source: io::Error },
}

impl From<FetchError> for VelocityError {
    fn from(err: FetchError) -> Self {
        let app = match err {
            FetchError::Spawn { ref program, .. } => ApplicationError::CommandFailed {
                command: program.to_string_lossy().into_owned(),
                directory: PathBuf::from("."),
                reason: err.to_string(),
            },
            FetchError::Clone { ref url, .. } => ApplicationError::CommandFailed {
                command: format!("git clone {url}"),
                directory: PathBuf::from("."),
                reason: err.to_string(),
            },
            FetchError::Copy { ref path, .. } => ApplicationError::FilesystemError {
                path: path.clone(),
                reason: err.to_string(),
            },
            FetchError::Checkout(_) | FetchError::Walk(_) => ApplicationError::FilesystemError {
                path: std::env::temp_dir(),
                reason: err.to_string(),
            },
        };
        app.into()
    }
}

/// Fetches templates with the `git` executable.
#[derive(Debug, Clone)]
pub struct GitTemplateFetcher {
    program: OsString,
}

impl Default for GitTemplateFetcher {
    fn default() -> Self {
        Self::new()
    }
}

impl GitTemplateFetcher {
    pub fn new() -> Self {
        Self {
            program: OsString::from("git"),
        }
    }

    /// Use a different git executable.
    pub fn with_program(mut self, program: impl Into<OsString>) -> Self {
        self.program = program.into();
        self
    }

    fn clone_into(&self, source: &TemplateSource, checkout: &Path) -> Result<(), FetchError> {
        let url = source.clone_url();

        let mut cmd = Command::new(&self.program);
        cmd.args(["clone", "--depth", "1", "--quiet"]);
        if let Some(reference) = source.reference() {
            cmd.args(["--branch", reference]);
        }
        cmd.arg(&url)
            .arg(checkout)
            .env("GIT_TERMINAL_PROMPT", "0")
            .stdin(Stdio::null());

        debug!(%url, reference = ?source.reference(), "Cloning template");
        let output = cmd.output().map_err(|source| FetchError::Spawn {
            program: self.program.clone(),
            source,
        })?;

        if output.status.success() {
            Ok(())
        } else {
            Err(FetchError::Clone {
                url,
                status: output.status.to_string(),
                stderr: String::from_utf8_lossy(&output.stderr).trim().to_string(),
            })
        }
    }
}

impl TemplateFetcher for GitTemplateFetcher {
    #[instrument(skip_all, fields(source = %source, destination = %destination.display()))]
    fn fetch(
        &self,
        source: &TemplateSource,
        destination: &Path,
        options: FetchOptions,
    ) -> VelocityResult<()> {
        if !options.force && has_entries(destination)? {
            return Err(ApplicationError::DestinationNotEmpty {
                path: destination.to_path_buf(),
            }
            .into());
        }

        let checkout = tempfile::Builder::new()
            .prefix("velocity-template-")
            .tempdir()
            .map_err(FetchError::Checkout)?;

        self.clone_into(source, checkout.path())?;

        fs::create_dir_all(destination).map_err(|source| FetchError::Copy {
            path: destination.to_path_buf(),
            source,
        })?;
        let copied = copy_tree(checkout.path(), destination)?;

        info!(files = copied, "Template fetched");
        Ok(())
    }
}

/// `true` if `dir` exists and contains anything.
fn has_entries(dir: &Path) -> VelocityResult<bool> {
    match fs::read_dir(dir) {
        Ok(mut entries) => Ok(entries.next().is_some()),
        Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(e) => Err(crate::filesystem::map_io_error(dir, e, "read directory")),
    }
}

/// Copy every file under `from` into `to`, skipping VCS metadata and
/// overwriting existing files. Returns the number of files copied.
fn copy_tree(from: &Path, to: &Path) -> Result<usize, FetchError> {
    let mut copied = 0;

    let walker = WalkDir::new(from)
        .min_depth(1)
        .into_iter()
        .filter_entry(|entry| entry.file_name() != VCS_DIR);

    for entry in walker {
        let entry = entry?;
        let relative = entry
            .path()
            .strip_prefix(from)
            .map_err(|_| FetchError::Copy {
                path: entry.path().to_path_buf(),
                source: io::Error::other("path escapes checkout"),
            })?;
        let target = to.join(relative);

        let copy_err = |source| FetchError::Copy {
            path: target.clone(),
            source,
        };

        let file_type = entry.file_type();
        if file_type.is_symlink() {
            copy_link(entry.path(), &target).map_err(copy_err)?;
            copied += 1;
        } else if file_type.is_dir() {
            fs::create_dir_all(&target).map_err(copy_err)?;
        } else if file_type.is_file() {
            fs::copy(entry.path(), &target).map_err(copy_err)?;
            copied += 1;
        } else {
            return Err(copy_err(io::Error::new(
                io::ErrorKind::Unsupported,
                "template contains a special file",
            )));
        }
    }

    Ok(copied)
}

/// Recreate the symlink at `link` pointing where the original points,
/// replacing whatever `target` held before.
fn copy_link(link: &Path, target: &Path) -> io::Result<()> {
    let points_to = fs::read_link(link)?;
    match fs::symlink_metadata(target) {
        Ok(existing) if existing.is_dir() => fs::remove_dir_all(target)?,
        Ok(_) => fs::remove_file(target)?,
        Err(e) if e.kind() == io::ErrorKind::NotFound => {}
        Err(e) => return Err(e),
    }
    debug!(link = %target.display(), to = %points_to.display(), "Recreating symlink");
    make_symlink(link, &points_to, target)
}

#[cfg(unix)]
fn make_symlink(_original: &Path, points_to: &Path, target: &Path) -> io::Result<()> {
    std::os::unix::fs::symlink(points_to, target)
}

#[cfg(windows)]
fn make_symlink(original: &Path, points_to: &Path, target: &Path) -> io::Result<()> {
    // Windows needs to know whether the link names a directory.
    if fs::metadata(original).map(|m| m.is_dir()).unwrap_or(false) {
        std::os::windows::fs::symlink_dir(points_to, target)
    } else {
        std::os::windows::fs::symlink_file(points_to, target)
    }
}
