//! Driven (output) ports - implemented by infrastructure.
//!
//! These traits define what the application needs from external systems.
//! The `velocity-adapters` crate provides the filesystem, process and fetch
//! implementations; the CLI provides the prompter and progress reporter.

use std::collections::HashMap;
use std::path::Path;

use crate::application::PipelineStep;
use crate::domain::{Feature, TemplateSource};
use crate::error::VelocityResult;

/// Port for filesystem operations.
///
/// Implemented by:
/// - `velocity_adapters::filesystem::LocalFilesystem` (production)
/// - `velocity_adapters::filesystem::MemoryFilesystem` (testing)
pub trait Filesystem: Send + Sync {
    /// Read a UTF-8 file into a string.
    fn read_to_string(&self, path: &Path) -> VelocityResult<String>;

    /// Write content to a file, replacing it if present.
    fn write_file(&self, path: &Path, content: &str) -> VelocityResult<()>;

    /// Copy a file, replacing the destination if present.
    fn copy_file(&self, from: &Path, to: &Path) -> VelocityResult<()>;

    /// Delete a file. Fails if it does not exist.
    fn remove_file(&self, path: &Path) -> VelocityResult<()>;
}

/// Port for running shell commands.
///
/// Implemented by `velocity_adapters::command::ShellCommandRunner`.
#[cfg_attr(test, mockall::automock)]
pub trait CommandRunner: Send + Sync {
    /// Run `command` through the platform shell with `directory` as the
    /// working directory, blocking until it exits.
    ///
    /// A non-zero exit status is an error.
    fn run(&self, directory: &Path, command: &str) -> VelocityResult<()>;
}

/// How a template is placed into its destination.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FetchOptions {
    /// Overwrite whatever already exists at the destination.
    pub force: bool,
}

/// Port for downloading a template into a directory.
///
/// Implemented by `velocity_adapters::fetcher::GitTemplateFetcher`.
#[cfg_attr(test, mockall::automock)]
pub trait TemplateFetcher: Send + Sync {
    /// Copy the template tree (without VCS metadata) into `destination`,
    /// creating it if needed. Always fetches fresh content.
    fn fetch(
        &self,
        source: &TemplateSource,
        destination: &Path,
        options: FetchOptions,
    ) -> VelocityResult<()>;
}

/// Port for progress notifications emitted while the pipeline runs.
///
/// All methods default to doing nothing.
pub trait ProgressReporter: Send + Sync {
    fn step_started(&self, _step: PipelineStep) {}
    fn step_finished(&self, _step: PipelineStep) {}
    fn step_failed(&self, _step: PipelineStep) {}
}

/// Reporter that ignores every notification.
#[derive(Debug, Clone, Copy, Default)]
pub struct SilentProgress;

impl ProgressReporter for SilentProgress {}

// ── Prompting ─────────────────────────────────────────────────────────────────

/// A single interactive question.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Question {
    /// Free-text question for the project directory.
    ProjectDirectory { message: String, initial: String },
    /// Yes/no question for one feature toggle.
    Toggle {
        feature: Feature,
        message: String,
        initial: bool,
    },
}

/// Answers to a completed prompt session.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Answers {
    pub project_directory: Option<String>,
    pub toggles: HashMap<Feature, bool>,
}

/// Port for interactive prompting.
///
/// Implemented by the CLI (dialoguer). Returning `Ok(None)` means the user
/// cancelled the session; no partial answers are used in that case.
#[cfg_attr(test, mockall::automock)]
pub trait Prompter {
    fn ask(&self, questions: &[Question]) -> VelocityResult<Option<Answers>>;
}
