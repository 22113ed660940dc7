//! Ambient arguments: verbosity, color and the configuration file.
//!
//! Declared here and flattened into [`super::Cli`] so they stay apart from
//! the project options.

use clap::Args;
use std::path::PathBuf;

/// Arguments that control how the tool behaves rather than what it creates.
#[derive(Debug, Args)]
pub struct GlobalArgs {
    /// Increase logging verbosity.
    ///
    /// Pass once for INFO, twice for DEBUG, three times for TRACE. There is
    /// no short form because `-v` prints the version. Conflicts with
    /// `--quiet`.
    #[arg(
        long = "verbose",
        action = clap::ArgAction::Count,
        help = "Increase verbosity (repeat for more)",
        long_help = "Increase logging verbosity:
    (none)                          - Only warnings and errors
    --verbose                       - Info level (progress messages)
    --verbose --verbose             - Debug level (detailed diagnostics)
    --verbose --verbose --verbose   - Trace level (very verbose)"
    )]
    pub verbose: u8,

    /// Suppress all non-error output.
    #[arg(
        short = 'q',
        long = "quiet",
        conflicts_with = "verbose",
        help = "Suppress non-error output"
    )]
    pub quiet: bool,

    /// Disable ANSI colour codes.
    ///
    /// Automatically honoured when `NO_COLOR` is set in the environment
    /// (see <https://no-color.org>).
    #[arg(
        long = "no-color",
        env = "NO_COLOR",
        value_parser = clap::builder::FalseyValueParser::new(),
        help = "Disable colored output"
    )]
    pub no_color: bool,

    /// Configuration file path.
    #[arg(
        short = 'c',
        long = "config",
        value_name = "FILE",
        help = "Configuration file path"
    )]
    pub config: Option<PathBuf>,
}
