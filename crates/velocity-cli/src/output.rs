//! Terminal output for the create command.
//!
//! Everything the user is meant to read goes through [`OutputManager`] on
//! stdout. Errors are rendered separately on stderr by `main`.

use std::io::{self, IsTerminal};

use console::Term;
use owo_colors::OwoColorize;

use crate::cli::GlobalArgs;
use crate::config::AppConfig;

/// Writes user-facing lines, honouring `--quiet` and colour settings.
pub struct OutputManager {
    quiet: bool,
    no_color: bool,
    term: Term,
}

impl OutputManager {
    /// Colour is off when requested by flag, `NO_COLOR` or config, and when
    /// stdout is not a terminal.
    pub fn new(args: &GlobalArgs, config: &AppConfig) -> Self {
        let no_color = args.no_color || config.output.no_color || !io::stdout().is_terminal();
        Self::with_settings(args.quiet, no_color)
    }

    pub fn with_settings(quiet: bool, no_color: bool) -> Self {
        Self {
            quiet,
            no_color,
            term: Term::stdout(),
        }
    }

    /// One line of output; nothing in quiet mode.
    pub fn print(&self, line: &str) -> io::Result<()> {
        if self.quiet {
            return Ok(());
        }
        self.term.write_line(line)
    }

    /// `⚠ <msg>` in yellow.
    pub fn warning(&self, msg: &str) -> io::Result<()> {
        let marker = "\u{26a0}";
        let line = if self.no_color {
            format!("{marker} {msg}")
        } else {
            format!("{} {}", marker.yellow().bold(), msg.yellow())
        };
        self.print(&line)
    }

    /// Commands the user can type, in cyan.
    pub fn command(&self, text: &str) -> String {
        self.paint(text, |t| t.cyan().to_string())
    }

    /// Bold green label, e.g. `Success!`.
    pub fn positive(&self, text: &str) -> String {
        self.paint(text, |t| t.green().bold().to_string())
    }

    fn paint(&self, text: &str, style: impl Fn(&str) -> String) -> String {
        if self.no_color {
            text.to_owned()
        } else {
            style(text)
        }
    }

    pub fn supports_color(&self) -> bool {
        !self.no_color
    }

    pub fn is_quiet(&self) -> bool {
        self.quiet
    }
}

// ── tests ─────────────────────────────────────────────────────────────────────
