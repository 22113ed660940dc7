//! Application services - orchestrate use cases.
//!
//! Services coordinate the domain layer and ports to accomplish the two
//! use cases of the tool: "work out what the user wants" and "create the
//! project".

pub mod option_resolver;
pub mod scaffold_service;

pub use option_resolver::{
    CliOptions, DEFAULT_PROJECT_DIRECTORY, Environment, OptionResolver, Resolution,
    ResolverDefaults, resolve_package_manager,
};
pub use scaffold_service::{GIT_INIT_COMMAND, ScaffoldReport, ScaffoldService};
