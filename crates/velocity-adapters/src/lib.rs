//! Infrastructure adapters for create-velocity-app.
//!
//! This crate implements the ports defined in `velocity-core::application::ports`.
//! It contains all external dependencies and I/O operations.

pub mod command;
pub mod fetcher;
pub mod filesystem;

// Re-export commonly used adapters
pub use command::ShellCommandRunner;
pub use fetcher::GitTemplateFetcher;
pub use filesystem::{LocalFilesystem, MemoryFilesystem};
