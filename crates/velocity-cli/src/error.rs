//! CLI errors: what went wrong, what to try next, and the exit code.
//!
//! Core errors are wrapped unchanged in [`CliError::Core`]; their category
//! decides the exit code (see [`CliError::exit_code`]).

use std::error::Error;

use owo_colors::OwoColorize;
use thiserror::Error;

use velocity_core::error::VelocityError;

pub use velocity_core::error::ErrorCategory as CoreCategory;

pub type CliResult<T> = Result<T, CliError>;

/// Everything that can stop a run.
#[derive(Debug, Error)]
pub enum CliError {
    /// The config file or a `VELOCITY__*` variable is unreadable or invalid.
    #[error("Configuration error: {message}")]
    ConfigError {
        message: String,
        #[source]
        source: Option<Box<dyn std::error::Error + Send + Sync>>,
    },

    /// Resolver or pipeline failure; suggestions come from the core error.
    #[error("{0}")]
    Core(#[from] VelocityError),

    /// Local I/O outside the pipeline (current directory, stdout).
    #[error("I/O error: {message}")]
    IoError {
        message: String,
        #[source]
        source: std::io::Error,
    },

    /// The prompt session was dismissed.
    #[error("Operation cancelled")]
    Cancelled,

    /// Prompting was needed but this build lacks the `interactive` feature.
    #[error("Feature not available: {feature}")]
    FeatureNotAvailable { feature: &'static str },
}

impl From<std::io::Error> for CliError {
    fn from(err: std::io::Error) -> Self {
        CliError::IoError {
            message: err.to_string(),
            source: err,
        }
    }
}

impl CliError {
    /// Next things for the user to try.
    pub fn suggestions(&self) -> Vec<String> {
        match self {
            Self::ConfigError { .. } => vec![
                "Check your config file and VELOCITY__* environment variables".into(),
                format!(
                    "Default config location: {}",
                    crate::config::AppConfig::config_path().display()
                ),
            ],

            Self::Core(core_err) => core_err.suggestions(),

            Self::IoError { message, .. } => vec![
                format!("I/O operation failed: {}", message),
                "Check file permissions".into(),
                "Ensure the parent directory exists".into(),
            ],

            Self::Cancelled => vec!["No changes were made".into()],

            Self::FeatureNotAvailable { feature } => vec![
                format!("The '{}' feature is not available in this build", feature),
                "Pass a directory and --yes to run without prompts".into(),
                format!(
                    "Or install with the feature enabled: cargo install velocity-cli --features {}",
                    feature
                ),
            ],
        }
    }

    /// Validation problems are the user's; fetch, step and I/O failures are
    /// internal.
    pub fn category(&self) -> ErrorCategory {
        match self {
            Self::ConfigError { .. } => ErrorCategory::Configuration,
            Self::Core(core) => match core.category() {
                CoreCategory::Validation => ErrorCategory::UserError,
                CoreCategory::Configuration => ErrorCategory::Configuration,
                CoreCategory::Template | CoreCategory::Fetch | CoreCategory::Internal => {
                    ErrorCategory::Internal
                }
            },
            Self::IoError { .. } => ErrorCategory::Internal,
            Self::Cancelled => ErrorCategory::UserError,
            Self::FeatureNotAvailable { .. } => ErrorCategory::Configuration,
        }
    }

    /// Exit code to pass to the OS.
    ///
    /// | Category      | Code |
    /// |---------------|------|
    /// | User error    |  2   |
    /// | Configuration |  4   |
    /// | Internal      |  1   |
    pub fn exit_code(&self) -> u8 {
        match self.category() {
            ErrorCategory::UserError => 2,
            ErrorCategory::Configuration => 4,
            ErrorCategory::Internal => 1,
        }
    }

    /// Render for a terminal: red headline, dimmed causes, yellow suggestions.
    pub fn format_colored(&self, verbose: bool) -> String {
        self.render(verbose, true)
    }

    /// Same layout as [`Self::format_colored`] without ANSI codes.
    pub fn format_plain(&self, verbose: bool) -> String {
        self.render(verbose, false)
    }

    fn render(&self, verbose: bool, color: bool) -> String {
        let paint = |text: &str, style: Paint| -> String {
            if !color {
                return text.to_owned();
            }
            match style {
                Paint::Failure => text.red().bold().to_string(),
                Paint::Message => text.red().to_string(),
                Paint::Muted => text.dimmed().to_string(),
                Paint::Heading => text.yellow().bold().to_string(),
            }
        };

        let mut out = format!(
            "\n{} {}\n",
            paint("Error!", Paint::Failure),
            paint(&self.to_string(), Paint::Message)
        );

        if verbose {
            for cause in self.causes() {
                out.push_str(&format!("  {}\n", paint(&format!("Caused by: {cause}"), Paint::Muted)));
            }
        }

        let suggestions = self.suggestions();
        if !suggestions.is_empty() {
            out.push_str(&format!("\n{}\n", paint("Suggestions:", Paint::Heading)));
            for suggestion in &suggestions {
                out.push_str(&format!("  {suggestion}\n"));
            }
        }

        if !verbose {
            out.push_str(&format!(
                "\n{}\n",
                paint("Use --verbose for more details.", Paint::Muted)
            ));
        }

        out
    }

    /// Messages of the underlying errors, outermost first.
    fn causes(&self) -> Vec<String> {
        let mut causes = Vec::new();
        let mut next = self.source();
        while let Some(err) = next {
            causes.push(err.to_string());
            next = err.source();
        }
        causes
    }

    /// Emit one tracing event, at WARN for user errors and ERROR otherwise.
    pub fn log(&self) {
        let category = self.category();
        let code = self.exit_code();
        let causes = self.causes();
        match category {
            ErrorCategory::UserError => {
                tracing::warn!(?category, code, ?causes, "{}", self)
            }
            ErrorCategory::Configuration | ErrorCategory::Internal => {
                tracing::error!(?category, code, ?causes, "{}", self)
            }
        }
    }
}

#[derive(Clone, Copy)]
enum Paint {
    Failure,
    Message,
    Muted,
    Heading,
}

/// Error categories for classification.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorCategory {
    /// User input error (validation, invalid arguments, cancellation).
    UserError,
    /// Configuration error.
    Configuration,
    /// Internal/system error, including failed downloads and steps.
    Internal,
}

// ── IntoCli trait ─────────────────────────────────────────────────────────────

/// Extension trait to convert I/O results into [`CliError`] at call-sites
/// with a descriptive context message.
pub trait IntoCli<T> {
    /// Convert to `CliResult` attaching a human-readable context message.
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>;
}

impl<T> IntoCli<T> for Result<T, std::io::Error> {
    fn with_cli_context<F, S>(self, f: F) -> CliResult<T>
    where
        F: FnOnce() -> S,
        S: Into<String>,
    {
        self.map_err(|e| CliError::IoError {
            message: f().into(),
            source: e,
        })
    }
}
