//! Application layer for create-velocity-app.
//!
//! This layer contains:
//! - **Services**: Use case orchestration (OptionResolver, ScaffoldService)
//! - **Ports**: Interface definitions (traits) for external dependencies
//! - **Errors**: Application-specific error types
//!
//! The application layer coordinates the domain layer; the rules about
//! paths, package managers and manifests live in `crate::domain`.

pub mod error;
pub mod ports;
pub mod services;
pub mod step;

// Re-export main services
pub use services::{
    CliOptions, Environment, OptionResolver, Resolution, ResolverDefaults, ScaffoldReport,
    ScaffoldService,
};

// Re-export port traits (for adapter implementation)
pub use ports::{
    Answers, CommandRunner, FetchOptions, Filesystem, ProgressReporter, Prompter, Question,
    TemplateFetcher,
};

pub use error::ApplicationError;
pub use step::PipelineStep;
