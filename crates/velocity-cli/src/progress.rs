//! Pipeline progress on stderr.
//!
//! Long-running steps (template download, dependency install) get an
//! `indicatif` spinner on a terminal and a plain line otherwise. Short steps
//! are only visible in the logs.

use std::sync::Mutex;
use std::time::Duration;

use console::Term;
use indicatif::{ProgressBar, ProgressStyle};
use owo_colors::OwoColorize;
use tracing::debug;
use velocity_core::application::{PipelineStep, ports::ProgressReporter};

const TICK: Duration = Duration::from_millis(80);

/// [`ProgressReporter`] that draws spinners.
pub struct SpinnerProgress {
    quiet: bool,
    no_color: bool,
    term: Term,
    active: Mutex<Option<ProgressBar>>,
}

impl SpinnerProgress {
    pub fn new(quiet: bool, no_color: bool) -> Self {
        Self {
            quiet,
            no_color,
            term: Term::stderr(),
            active: Mutex::new(None),
        }
    }

    /// Progress lines are cosmetic; a closed stderr must not fail the run.
    fn write_line(&self, line: &str) {
        if let Err(e) = self.term.write_line(line) {
            debug!(error = %e, "Could not write progress line");
        }
    }

    fn style(&self) -> ProgressStyle {
        let template = if self.no_color {
            "{spinner} {msg}"
        } else {
            "{spinner:.cyan} {msg}"
        };
        ProgressStyle::with_template(template).unwrap_or_else(|_| ProgressStyle::default_spinner())
    }

    fn finish(&self, step: PipelineStep, ok: bool) {
        if self.quiet || !step.is_long_running() {
            return;
        }
        let spinner = self.active.lock().ok().and_then(|mut slot| slot.take());
        let Some(spinner) = spinner else {
            return;
        };
        spinner.finish_and_clear();

        let label = step.description().trim_end_matches("...");
        let line = match (ok, self.no_color) {
            (true, true) => format!("\u{2713} {label}"),
            (true, false) => format!("{} {label}", "\u{2713}".green().bold()),
            (false, true) => format!("\u{2717} {label}"),
            (false, false) => format!("{} {label}", "\u{2717}".red().bold()),
        };
        self.write_line(&line);
    }
}

impl ProgressReporter for SpinnerProgress {
    fn step_started(&self, step: PipelineStep) {
        if self.quiet || !step.is_long_running() {
            return;
        }

        if !self.term.is_term() {
            self.write_line(step.description());
            return;
        }

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(self.style());
        spinner.set_message(step.description());
        spinner.enable_steady_tick(TICK);

        if let Ok(mut slot) = self.active.lock() {
            if let Some(previous) = slot.replace(spinner) {
                previous.finish_and_clear();
            }
        }
    }

    fn step_finished(&self, step: PipelineStep) {
        self.finish(step, true);
    }

    fn step_failed(&self, step: PipelineStep) {
        self.finish(step, false);
    }
}
