//! The `create` command: resolve options, run the scaffold pipeline and
//! print what to do next.

use std::env;

use tracing::{debug, info, instrument};

use velocity_adapters::{GitTemplateFetcher, LocalFilesystem, ShellCommandRunner};
use velocity_core::application::{
    Environment, OptionResolver, Resolution, ScaffoldReport, ScaffoldService,
};

use crate::{
    cli::Cli,
    config::AppConfig,
    error::{CliError, CliResult, IntoCli},
    output::OutputManager,
    progress::SpinnerProgress,
    prompt,
};

/// Environment variable set by npm, pnpm, yarn and bun when they launch us.
const USER_AGENT_VAR: &str = "npm_config_user_agent";

#[instrument(skip_all, fields(directory = ?cli.directory, yes = cli.yes))]
pub fn execute(cli: Cli, config: AppConfig, output: OutputManager) -> CliResult<()> {
    let env = Environment {
        cwd: env::current_dir().with_cli_context(|| "Failed to read the current directory")?,
        user_agent: env::var(USER_AGENT_VAR).ok(),
    };
    debug!(cwd = %env.cwd.display(), user_agent = ?env.user_agent, "Environment");

    let source = config.template_source().map_err(|e| CliError::ConfigError {
        message: format!("invalid template source '{}'", config.template.source),
        source: Some(Box::new(e)),
    })?;

    let flags = cli.to_cli_options();
    let prompter = prompt::prompter(!output.supports_color());
    let resolver = OptionResolver::new(prompter.as_ref(), config.resolver_defaults());

    let project = match resolver.resolve(&flags, &env).map_err(prompt::explain)? {
        Resolution::Proceed(project) => project,
        Resolution::Cancelled => return Err(CliError::Cancelled),
    };

    if flags.package_managers.len() > 1 {
        output.warning(&format!(
            "Several package managers were requested; using {}.",
            project.package_manager()
        ))?;
    }

    let service = ScaffoldService::new(
        Box::new(GitTemplateFetcher::new()),
        Box::new(ShellCommandRunner::new()),
        Box::new(LocalFilesystem::new()),
    )
    .with_source(source)
    .with_progress(Box::new(SpinnerProgress::new(
        output.is_quiet(),
        !output.supports_color(),
    )));

    output.print(&format!(
        "Creating a new Velocity app in {}.",
        output.command(&project.project_directory().display().to_string())
    ))?;
    output.print("")?;

    let report = service.scaffold(&project)?;
    info!(
        app = %report.app_name,
        path = %report.project_directory.display(),
        steps = report.steps.len(),
        "Project created"
    );

    for line in success_lines(&report, &output) {
        output.print(&line)?;
    }
    Ok(())
}

/// The closing message: what was created and which commands to try.
fn success_lines(report: &ScaffoldReport, output: &OutputManager) -> Vec<String> {
    let directory = report.project_directory.display().to_string();
    let mut lines = vec![
        String::new(),
        format!(
            "{} Created {} at {}",
            output.positive("Success!"),
            report.app_name,
            directory
        ),
        "Inside that directory, you can run several commands:".to_string(),
        String::new(),
    ];

    for step in report.next_steps() {
        lines.push(output.command(&format!("  {}", step.command)));
        lines.push(format!("    {}", step.description));
        lines.push(String::new());
    }

    lines.push("We suggest that you begin by typing:".to_string());
    lines.push(String::new());
    lines.push(format!("  {} {}", output.command("cd"), directory));
    lines.push(format!("  {}", output.command(&report.first_command())));
    lines
}
