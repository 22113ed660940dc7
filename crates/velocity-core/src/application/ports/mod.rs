//! Application ports (traits) for external dependencies.
//!
//! In hexagonal architecture, ports define interfaces that the application
//! needs from the outside world. Adapters in `velocity-adapters` and the CLI
//! implement these.
//!
//! ## Port Types
//!
//! - **Driven (Output) Ports**: Called by application, implemented by infrastructure
//!   - `Filesystem`: File operations
//!   - `CommandRunner`: Shell commands (install, git init)
//!   - `TemplateFetcher`: Template download
//!   - `ProgressReporter`: Step notifications
//!   - `Prompter`: Interactive questions

pub mod output;

pub use output::{
    Answers, CommandRunner, FetchOptions, Filesystem, ProgressReporter, Prompter, Question,
    SilentProgress, TemplateFetcher,
};

#[cfg(test)]
pub use output::{MockCommandRunner, MockPrompter, MockTemplateFetcher};
