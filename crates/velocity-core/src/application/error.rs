//! Application layer errors.
//!
//! These errors represent failures in orchestration and in the outside world
//! (filesystem, processes, network), not in the domain model.

use std::path::PathBuf;
use thiserror::Error;

use crate::application::PipelineStep;
use crate::error::ErrorCategory;

/// Errors that occur during application orchestration.
#[derive(Debug, Error, Clone)]
pub enum ApplicationError {
    /// The template could not be downloaded. Nothing after it runs.
    #[error("Unable to download the project template from {template}: {reason}")]
    TemplateFetch { template: String, reason: String },

    /// A pipeline step after the fetch failed; the pipeline stopped there.
    #[error("Step '{step}' failed: {reason}")]
    StepFailed { step: PipelineStep, reason: String },

    /// An external command exited unsuccessfully or could not be spawned.
    #[error("Command `{command}` failed in {}: {reason}", directory.display())]
    CommandFailed {
        command: String,
        directory: PathBuf,
        reason: String,
    },

    /// Filesystem operation failed.
    #[error("Filesystem error at {path}: {reason}")]
    FilesystemError { path: PathBuf, reason: String },

    /// Fetching without force into a directory that already has content.
    #[error("Destination {path} is not empty")]
    DestinationNotEmpty { path: PathBuf },

    /// The interactive prompt could not be shown or read.
    #[error("Prompt failed: {reason}")]
    PromptFailed { reason: String },

    /// A shared in-memory adapter's lock was poisoned.
    #[error("Adapter state lock poisoned")]
    LockPoisoned,
}

impl ApplicationError {
    /// Get user-actionable suggestions.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::TemplateFetch { template, .. } => vec![
                "We were unable to download the project template.".into(),
                format!("Check that {template} is reachable from this machine"),
                "Ensure git is installed and in your PATH".into(),
                "Check your network connection and try again".into(),
            ],
            Self::StepFailed { step, .. } => vec![
                format!("Project setup stopped at '{step}'"),
                "Files written before this step were left in place".into(),
                "Fix the cause above, remove the directory and run again".into(),
            ],
            Self::CommandFailed { command, .. } => vec![
                format!("Run `{command}` manually to see the full output"),
                "Ensure the command is installed and in your PATH".into(),
            ],
            Self::FilesystemError { path, .. } => vec![
                format!("Failed to access: {}", path.display()),
                "Check that you have write permissions".into(),
            ],
            Self::DestinationNotEmpty { path } => vec![
                format!("Directory already has content: {}", path.display()),
                "Choose an empty or new directory".into(),
            ],
            Self::PromptFailed { .. } => vec![
                "Interactive prompts need a terminal".into(),
                "Pass a directory and --yes to run without prompts".into(),
            ],
            Self::LockPoisoned => vec!["Check the error details above".into()],
        }
    }

    /// Get error category.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::TemplateFetch { .. } => ErrorCategory::Fetch,
            Self::StepFailed { .. }
            | Self::CommandFailed { .. }
            | Self::FilesystemError { .. }
            | Self::LockPoisoned => ErrorCategory::Internal,
            Self::DestinationNotEmpty { .. } | Self::PromptFailed { .. } => {
                ErrorCategory::Validation
            }
        }
    }
}
