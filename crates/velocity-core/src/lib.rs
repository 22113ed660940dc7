//! Velocity Core - Hexagonal Architecture Implementation
//!
//! This crate provides the domain and application layers for
//! create-velocity-app, following hexagonal (ports and adapters) architecture.
//!
//! ## Architecture Overview
//!
//! ```text
//! ┌─────────────────────────────────────────┐
//! │    velocity-cli (create-velocity-app)   │
//! │   (Flags, prompts, progress, output)    │
//! └──────────────────┬──────────────────────┘
//!                    │ calls
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Application Services            │
//! │   (OptionResolver, ScaffoldService)     │
//! └──────────────────┬──────────────────────┘
//!                    │ uses
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │      Application Ports (Traits)         │
//! │ (Fetcher, Filesystem, Runner, Prompter) │
//! └──────────────────┬──────────────────────┘
//!                    │ implemented by
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │   velocity-adapters (Infrastructure)    │
//! │ (GitTemplateFetcher, LocalFilesystem)   │
//! └─────────────────────────────────────────┘
//!                    │
//!                    ▼
//! ┌─────────────────────────────────────────┐
//! │         Domain Layer (Pure Logic)       │
//! │ (ProjectConfig, PackageManager, Layout) │
//! └─────────────────────────────────────────┘
//! ```
//!
//! ## Usage
//!
//! ```rust,no_run
//! use velocity_core::prelude::*;
//! # fn demo(
//! #     prompter: &dyn Prompter,
//! #     fetcher: Box<dyn TemplateFetcher>,
//! #     runner: Box<dyn CommandRunner>,
//! #     filesystem: Box<dyn Filesystem>,
//! # ) -> VelocityResult<()> {
//! let env = Environment {
//!     cwd: "/home/me/code".into(),
//!     user_agent: std::env::var("npm_config_user_agent").ok(),
//! };
//!
//! // 1. Merge defaults, answers and flags
//! let resolver = OptionResolver::new(prompter, ResolverDefaults::default());
//! let Resolution::Proceed(config) = resolver.resolve(&CliOptions::default(), &env)? else {
//!     return Ok(());
//! };
//!
//! // 2. Run the pipeline with injected adapters
//! let service = ScaffoldService::new(fetcher, runner, filesystem);
//! let report = service.scaffold(&config)?;
//! println!("created {}", report.app_name);
//! # Ok(())
//! # }
//! ```

pub mod domain;

pub mod application;

pub mod error;

// Public API - what external crates should use
pub mod prelude {
    pub use crate::application::{
        ApplicationError, PipelineStep,
        ports::{
            Answers, CommandRunner, FetchOptions, Filesystem, ProgressReporter, Prompter,
            Question, SilentProgress, TemplateFetcher,
        },
        services::{
            CliOptions, DEFAULT_PROJECT_DIRECTORY, Environment, OptionResolver, Resolution,
            ResolverDefaults, ScaffoldReport, ScaffoldService,
        },
    };
    pub use crate::domain::{
        DomainError, Feature, Features, PackageManager, ProjectConfig, ProjectOptions,
        TemplateLayout, TemplateSource,
    };
    pub use crate::error::{ErrorCategory, VelocityError, VelocityResult};
}
