//! Command runner adapters.

mod shell;

pub use shell::ShellCommandRunner;
