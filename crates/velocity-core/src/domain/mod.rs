//! Core domain layer for create-velocity-app.
//!
//! This module contains pure logic: the project configuration model, the
//! template's file layout, package-manager conventions and template sources.
//! All I/O is handled via ports (traits) defined in the application layer.
//!
//! ## Hexagonal Architecture Compliance
//!
//! - **No async**: Domain logic is synchronous
//! - **No I/O**: No filesystem, network, process or environment access
//! - **Immutable entities**: `ProjectConfig` is never mutated after construction
pub mod entities;
pub mod error;
pub mod value_objects;

pub use entities::{
    DEFAULT_TEMPLATE_SOURCE, Features, GitHost, NextStep, PackageManifest, ProjectConfig,
    ProjectOptions, TemplateLayout, TemplateSource, first_command, next_steps,
    resolve_project_directory,
};

pub use error::{DomainError, ErrorCategory};

pub use value_objects::{Feature, PackageManager};
