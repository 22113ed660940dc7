//! Tracing subscriber initialisation.
//!
//! Only the CLI crate is allowed to call [`init_logging`]; `velocity-core`
//! and `velocity-adapters` only *emit* spans and events.
//!
//! # Verbosity mapping
//!
//! | Flag(s)                 | Filter level |
//! |-------------------------|--------------|
//! | (none)                  | WARN         |
//! | `--verbose`             | INFO         |
//! | `--verbose` ×2          | DEBUG        |
//! | `--verbose` ×3 or more  | TRACE        |
//! | `--quiet`               | ERROR        |
//!
//! `RUST_LOG` overrides all of the above if set.

use std::io::IsTerminal as _;

use tracing_subscriber::{
    EnvFilter, filter::LevelFilter, layer::SubscriberExt, util::SubscriberInitExt,
};

use crate::cli::GlobalArgs;

/// Crates whose events are shown at the selected level.
const CRATES: [&str; 3] = ["create_velocity_app", "velocity_core", "velocity_adapters"];

/// Install the stderr subscriber. Call once, before the first event.
pub fn init_logging(args: &GlobalArgs) -> anyhow::Result<()> {
    let filter = match EnvFilter::try_from_default_env() {
        Ok(from_env) => from_env,
        Err(_) => EnvFilter::try_new(filter_directives(derive_level(args)))?,
    };

    // Spinners and prompts share stderr; keep log lines short.
    let fmt_layer = tracing_subscriber::fmt::layer()
        .compact()
        .without_time()
        .with_target(args.verbose > 1)
        .with_ansi(!args.no_color && std::io::stderr().is_terminal())
        .with_writer(std::io::stderr);

    tracing_subscriber::registry()
        .with(filter)
        .with(fmt_layer)
        .try_init()
        .map_err(|e| anyhow::anyhow!("tracing subscriber already set: {e}"))
}

/// `crate=level` for each of our crates; dependencies stay silent.
fn filter_directives(level: LevelFilter) -> String {
    let level = level.to_string().to_lowercase();
    CRATES.map(|krate| format!("{krate}={level}")).join(",")
}

/// `--quiet` wins over any number of `--verbose`.
fn derive_level(args: &GlobalArgs) -> LevelFilter {
    if args.quiet {
        return LevelFilter::ERROR;
    }
    match args.verbose {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        _ => LevelFilter::TRACE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn args(verbose: u8, quiet: bool) -> GlobalArgs {
        GlobalArgs {
            verbose,
            quiet,
            no_color: true,
            config: None,
        }
    }

    #[test]
    fn verbosity_levels() {
        let cases = [
            (0, LevelFilter::WARN),
            (1, LevelFilter::INFO),
            (2, LevelFilter::DEBUG),
            (3, LevelFilter::TRACE),
            (10, LevelFilter::TRACE),
        ];
        for (verbose, expected) in cases {
            assert_eq!(derive_level(&args(verbose, false)), expected, "{verbose}");
        }
    }

    #[test]
    fn quiet_shows_only_errors() {
        assert_eq!(derive_level(&args(0, true)), LevelFilter::ERROR);
        assert_eq!(derive_level(&args(3, true)), LevelFilter::ERROR);
    }

    #[test]
    fn directives_cover_all_crates() {
        assert_eq!(
            filter_directives(LevelFilter::DEBUG),
            "create_velocity_app=debug,velocity_core=debug,velocity_adapters=debug"
        );
    }
}
