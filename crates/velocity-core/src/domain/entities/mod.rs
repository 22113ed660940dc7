pub mod layout;
pub mod manifest;
pub mod next_steps;
pub mod project_config;
pub mod template_source;

pub use layout::TemplateLayout;
pub use manifest::PackageManifest;
pub use next_steps::{NextStep, first_command, next_steps};
pub use project_config::{Features, ProjectConfig, ProjectOptions, resolve_project_directory};
pub use template_source::{DEFAULT_TEMPLATE_SOURCE, GitHost, TemplateSource};
