//! Shell command runner.
//!
//! Runs a command string through the platform shell (`sh -c` on Unix,
//! `cmd /C` on Windows) inside a working directory. Output is captured;
//! on failure the tail of stderr becomes the error reason.

use std::path::Path;
use std::process::{Command, Output, Stdio};

use tracing::{debug, instrument};
use velocity_core::{
    application::{ApplicationError, ports::CommandRunner},
    error::VelocityResult,
};

/// Lines of captured output kept in an error message.
const OUTPUT_TAIL_LINES: usize = 20;

/// Production command runner backed by `std::process`.
#[derive(Debug, Clone, Copy, Default)]
pub struct ShellCommandRunner;

impl ShellCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ShellCommandRunner {
    #[instrument(skip(self, directory), fields(directory = %directory.display()))]
    fn run(&self, directory: &Path, command: &str) -> VelocityResult<()> {
        let failed = |reason: String| ApplicationError::CommandFailed {
            command: command.to_string(),
            directory: directory.to_path_buf(),
            reason,
        };

        let output = shell(command)
            .current_dir(directory)
            .stdin(Stdio::null())
            .output()
            .map_err(|e| failed(format!("could not be started: {e}")))?;

        if output.status.success() {
            debug!("Command finished");
            return Ok(());
        }

        let status = match output.status.code() {
            Some(code) => format!("exit code {code}"),
            None => "terminated by signal".to_string(),
        };
        let detail = output_tail(&output);
        let reason = if detail.is_empty() {
            status
        } else {
            format!("{status}\n{detail}")
        };
        Err(failed(reason).into())
    }
}

#[cfg(windows)]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("cmd");
    cmd.arg("/C").arg(command);
    cmd
}

#[cfg(not(windows))]
fn shell(command: &str) -> Command {
    let mut cmd = Command::new("sh");
    cmd.arg("-c").arg(command);
    cmd
}

/// Last lines of stderr, falling back to stdout when stderr is empty.
fn output_tail(output: &Output) -> String {
    let stderr = String::from_utf8_lossy(&output.stderr);
    let text = if stderr.trim().is_empty() {
        String::from_utf8_lossy(&output.stdout)
    } else {
        stderr
    };

    let lines: Vec<&str> = text.trim_end().lines().collect();
    let start = lines.len().saturating_sub(OUTPUT_TAIL_LINES);
    lines[start..].join("\n")
}
