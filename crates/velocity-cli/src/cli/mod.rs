//! CLI argument definitions using the clap derive API.
//!
//! This module is the *only* place that knows about argument names, aliases
//! and help text. No business logic lives here.

use std::collections::HashMap;

use clap::{ArgAction, Args, Parser, ValueEnum};
use velocity_core::{
    application::CliOptions,
    domain::{Feature, PackageManager},
};

pub mod global;
pub use global::GlobalArgs;

// ── Top-level CLI ─────────────────────────────────────────────────────────────

/// Main CLI entry-point.
#[derive(Debug, Parser)]
#[command(
    name     = "create-velocity-app",
    bin_name = "create-velocity-app",
    version  = env!("CARGO_PKG_VERSION"),
    author   = env!("CARGO_PKG_AUTHORS"),
    about    = "Bootstrap a new Velocity app from the boilerplate template",
    override_usage = "create-velocity-app [DIRECTORY] [OPTIONS]",
    after_help = "EXAMPLES:\n\
        \x20 create-velocity-app\n\
        \x20 create-velocity-app my-app --yes\n\
        \x20 create-velocity-app ../shop --use-pnpm --skip-install --disable-git\n\
        \x20 create-velocity-app --completions bash > ~/.local/share/bash-completion/completions/create-velocity-app",
    disable_version_flag = true,
)]
pub struct Cli {
    /// Where to create the project. The final path segment becomes the app
    /// name. Asked interactively when omitted.
    #[arg(value_name = "DIRECTORY", help = "Project directory")]
    pub directory: Option<String>,

    #[command(flatten)]
    pub features: FeatureArgs,

    #[command(flatten)]
    pub package_manager: PackageManagerArgs,

    /// Leave dependency installation to the user.
    #[arg(
        long = "skip-install",
        help = "Explicitly tell the CLI to skip installing packages."
    )]
    pub skip_install: bool,

    /// Accept defaults for every option that was not given.
    #[arg(long = "yes", help = "Use defaults for unprovided options.")]
    pub yes: bool,

    /// Remove `.gitignore` instead of running `git init`.
    #[arg(long = "disable-git", help = "Skip initializing a git repository.")]
    pub disable_git: bool,

    /// Print a completion script and exit.
    #[arg(
        long = "completions",
        value_name = "SHELL",
        value_enum,
        help = "Generate shell completions"
    )]
    pub completions: Option<Shell>,

    #[arg(
        short = 'v',
        long = "version",
        action = ArgAction::Version,
        help = "Output the current version of create-velocity-app."
    )]
    pub version: Option<bool>,

    #[command(flatten)]
    pub global: GlobalArgs,
}

impl Cli {
    /// Translate parsed flags into the resolver's input.
    ///
    /// A feature flag means "on"; an absent flag leaves the feature open.
    pub fn to_cli_options(&self) -> CliOptions {
        CliOptions {
            project_directory: self.directory.clone(),
            features: self.features.selected(),
            package_managers: self.package_manager.selected(),
            skip_install: self.skip_install,
            disable_git: self.disable_git,
            yes: self.yes,
        }
    }
}

// ── Feature flags ─────────────────────────────────────────────────────────────

/// Presence-only feature flags.
#[derive(Debug, Args)]
pub struct FeatureArgs {
    #[arg(long = "eslint", help = "Initialize with ESLint config. (default)")]
    pub eslint: bool,

    #[arg(long = "prettier", help = "Initialize with Prettier config. (default)")]
    pub prettier: bool,

    #[arg(
        long = "i18n",
        help = "Initialize with i18n setup. (default, disabling not yet implemented)"
    )]
    pub i18n: bool,

    #[arg(
        long = "basic-auth",
        help = "Initialize with Basic Auth setup. (default, disabling not yet implemented)"
    )]
    pub basic_auth: bool,

    #[arg(
        long = "openid-connect",
        help = "Initialize with OpenID Connect demo integration. (default, disabling not yet implemented)"
    )]
    pub openid_connect: bool,
}

impl FeatureArgs {
    pub fn selected(&self) -> HashMap<Feature, bool> {
        [
            (Feature::Eslint, self.eslint),
            (Feature::Prettier, self.prettier),
            (Feature::I18n, self.i18n),
            (Feature::BasicAuth, self.basic_auth),
            (Feature::OpenidConnect, self.openid_connect),
        ]
        .into_iter()
        .filter(|(_, given)| *given)
        .map(|(feature, _)| (feature, true))
        .collect()
    }
}

// ── Package manager flags ─────────────────────────────────────────────────────

#[derive(Debug, Args)]
pub struct PackageManagerArgs {
    #[arg(
        long = "use-npm",
        help = "Explicitly tell the CLI to bootstrap the application using npm."
    )]
    pub use_npm: bool,

    #[arg(
        long = "use-pnpm",
        help = "Explicitly tell the CLI to bootstrap the application using pnpm."
    )]
    pub use_pnpm: bool,

    #[arg(
        long = "use-yarn",
        help = "Explicitly tell the CLI to bootstrap the application using Yarn."
    )]
    pub use_yarn: bool,

    #[arg(
        long = "use-bun",
        help = "Explicitly tell the CLI to bootstrap the application using Bun."
    )]
    pub use_bun: bool,
}

impl PackageManagerArgs {
    /// Every manager whose flag was passed, in flag order.
    pub fn selected(&self) -> Vec<PackageManager> {
        [
            (PackageManager::Npm, self.use_npm),
            (PackageManager::Pnpm, self.use_pnpm),
            (PackageManager::Yarn, self.use_yarn),
            (PackageManager::Bun, self.use_bun),
        ]
        .into_iter()
        .filter_map(|(pm, given)| given.then_some(pm))
        .collect()
    }
}

// ── value enums ───────────────────────────────────────────────────────────────

/// Supported shells for completion generation.
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum Shell {
    Bash,
    Zsh,
    Fish,
    PowerShell,
    Elvish,
}

// ── tests ─────────────────────────────────────────────────────────────────────
