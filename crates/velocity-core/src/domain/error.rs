// ============================================================================
// domain/error.rs - DOMAIN ERRORS
// ============================================================================

use thiserror::Error;

/// Root domain error type.
///
/// All errors are:
/// - Cloneable (so they can be carried inside step reports)
/// - Categorizable (for CLI display)
/// - Actionable (provides suggestions)
#[derive(Debug, Error, Clone, PartialEq)]
pub enum DomainError {
    // ========================================================================
    // Validation Errors
    // ========================================================================
    #[error("Invalid project directory '{input}': {reason}")]
    InvalidProjectDirectory { input: String, reason: String },

    #[error("Working directory must be absolute: {path}")]
    RelativeWorkingDirectory { path: String },

    #[error("Invalid template source '{input}': {reason}")]
    InvalidTemplateSource { input: String, reason: String },

    #[error("Invalid manifest: {reason}")]
    InvalidManifest { reason: String },
}

impl DomainError {
    /// Get user-actionable suggestions for fixing this error.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::InvalidProjectDirectory { input, .. } => vec![
                format!("'{input}' does not name a directory the app can live in"),
                "Pass a directory name, e.g. create-velocity-app my-app".into(),
                "Relative paths are resolved against the current directory".into(),
            ],
            Self::InvalidTemplateSource { .. } => vec![
                "Use the shorthand host:owner/repo, e.g. gitlab:etribes/velocity-boilerplate"
                    .into(),
                "Or a full git URL (https://, ssh://, git@, file://)".into(),
                "Check template.source in your configuration file".into(),
            ],
            Self::InvalidManifest { reason } => vec![
                format!("The template's package.json could not be updated: {reason}"),
                "The template may be corrupted; try again or report the issue".into(),
            ],
            _ => vec!["See --help for more details".into()],
        }
    }

    /// Error category for CLI display styling.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::InvalidProjectDirectory { .. } => ErrorCategory::Validation,
            Self::InvalidTemplateSource { .. } => ErrorCategory::Configuration,
            Self::InvalidManifest { .. } => ErrorCategory::Template,
            Self::RelativeWorkingDirectory { .. } => ErrorCategory::Internal,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    Validation,
    Configuration,
    Template,
    Internal,
}
