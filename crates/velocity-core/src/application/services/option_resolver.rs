//! Option Resolver - turns flags, answers and defaults into a `ProjectConfig`.
//!
//! Precedence, lowest first:
//! 1. Defaults (built-in, possibly overridden by the user's config file)
//! 2. Interactive answers
//! 3. Explicit command-line flags (a flag suppresses its question entirely)

use std::collections::HashMap;
use std::path::PathBuf;

use tracing::{debug, instrument, warn};

use crate::{
    application::ports::{Answers, Prompter, Question},
    domain::{Feature, Features, PackageManager, ProjectConfig, ProjectOptions},
    error::VelocityResult,
};

/// Initial answer offered by the directory question.
pub const DEFAULT_PROJECT_DIRECTORY: &str = "my-velocity-app";

/// What the user passed on the command line. `None` / absent means "not given".
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CliOptions {
    pub project_directory: Option<String>,
    /// Features explicitly set via flag.
    pub features: HashMap<Feature, bool>,
    /// Every `--use-<manager>` flag that was passed.
    pub package_managers: Vec<PackageManager>,
    pub skip_install: bool,
    pub disable_git: bool,
    /// Use defaults for everything not given.
    pub yes: bool,
}

/// Lowest-precedence values.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ResolverDefaults {
    pub project_directory: String,
    pub features: Features,
}

impl Default for ResolverDefaults {
    fn default() -> Self {
        Self {
            project_directory: DEFAULT_PROJECT_DIRECTORY.into(),
            features: Features::default(),
        }
    }
}

/// Process-wide state the resolver needs, passed in explicitly.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Environment {
    /// Absolute current working directory.
    pub cwd: PathBuf,
    /// Value of `npm_config_user_agent`, if set.
    pub user_agent: Option<String>,
}

/// Outcome of option resolution.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Resolution {
    /// Run the pipeline with this configuration.
    Proceed(ProjectConfig),
    /// The user cancelled the interactive session; do not run anything.
    Cancelled,
}

/// Merges defaults, prompt answers and flags.
pub struct OptionResolver<'a> {
    prompter: &'a dyn Prompter,
    defaults: ResolverDefaults,
}

impl<'a> OptionResolver<'a> {
    pub fn new(prompter: &'a dyn Prompter, defaults: ResolverDefaults) -> Self {
        Self { prompter, defaults }
    }

    /// Build the final configuration, prompting if needed.
    #[instrument(skip_all, fields(yes = flags.yes, directory = ?flags.project_directory))]
    pub fn resolve(&self, flags: &CliOptions, env: &Environment) -> VelocityResult<Resolution> {
        let flag_directory = flags
            .project_directory
            .as_deref()
            .map(str::trim)
            .filter(|d| !d.is_empty());

        let answers = if flags.yes && flag_directory.is_some() {
            debug!("--yes with a directory: skipping prompts");
            Answers::default()
        } else {
            let questions = self.questions(flag_directory.is_some(), flags);
            if questions.is_empty() {
                Answers::default()
            } else {
                debug!(count = questions.len(), "Prompting");
                match self.prompter.ask(&questions)? {
                    Some(answers) => answers,
                    None => {
                        debug!("Prompt cancelled by user");
                        return Ok(Resolution::Cancelled);
                    }
                }
            }
        };

        let directory = flag_directory
            .map(str::to_owned)
            .or(answers.project_directory)
            .unwrap_or_else(|| self.defaults.project_directory.clone());

        let mut features = self.defaults.features;
        for (feature, enabled) in answers.toggles.iter().chain(flags.features.iter()) {
            features.set(*feature, *enabled);
        }

        let options = ProjectOptions {
            package_manager: resolve_package_manager(
                &flags.package_managers,
                env.user_agent.as_deref(),
            ),
            features,
            skip_install: flags.skip_install,
            disable_git: flags.disable_git,
        };

        let config = ProjectConfig::new(&directory, &env.cwd, options)?;
        debug!(
            directory = %config.project_directory().display(),
            app_name = config.app_name(),
            package_manager = %config.package_manager(),
            "Options resolved"
        );
        Ok(Resolution::Proceed(config))
    }

    /// Questions for everything the flags left open, in display order.
    fn questions(&self, has_directory: bool, flags: &CliOptions) -> Vec<Question> {
        let mut questions = Vec::new();

        if !has_directory {
            questions.push(Question::ProjectDirectory {
                message: "What is your project named?".into(),
                initial: self.defaults.project_directory.clone(),
            });
        }

        for feature in Feature::ALL {
            if !flags.features.contains_key(&feature) {
                questions.push(Question::Toggle {
                    feature,
                    message: feature.prompt_message(),
                    initial: self.defaults.features.get(feature),
                });
            }
        }

        questions
    }
}

/// Explicit flag first, otherwise the manager that launched us.
///
/// When several managers were requested, the first in
/// [`PackageManager::PRIORITY`] (npm, pnpm, yarn, bun) wins.
pub fn resolve_package_manager(
    requested: &[PackageManager],
    user_agent: Option<&str>,
) -> PackageManager {
    let chosen = PackageManager::PRIORITY
        .into_iter()
        .find(|pm| requested.contains(pm));

    match chosen {
        Some(pm) => {
            if requested.len() > 1 {
                warn!(
                    requested = ?requested,
                    chosen = %pm,
                    "Multiple package managers requested; using the first by priority"
                );
            }
            pm
        }
        None => PackageManager::detect(user_agent),
    }
}
