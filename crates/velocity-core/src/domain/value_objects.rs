//! Domain value objects: PackageManager and Feature.
//!
//! # Design
//!
//! These are pure value types: `Copy`, equality-by-value, no identity.
//! This file defines the types, their string representations and the command
//! phrasing each package manager uses.

use std::fmt;

// ── PackageManager ────────────────────────────────────────────────────────────

/// A JavaScript package manager the generated project can be bootstrapped with.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash)]
pub enum PackageManager {
    #[default]
    Npm,
    Pnpm,
    Yarn,
    Bun,
}

impl PackageManager {
    /// Fixed priority order used when several managers are requested at once.
    pub const PRIORITY: [PackageManager; 4] = [Self::Npm, Self::Pnpm, Self::Yarn, Self::Bun];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Npm => "npm",
            Self::Pnpm => "pnpm",
            Self::Yarn => "yarn",
            Self::Bun => "bun",
        }
    }

    /// Infer the package manager that launched the tool.
    ///
    /// `user_agent` is the value of `npm_config_user_agent`, which every
    /// supported manager sets for the processes it spawns (`npx`, `pnpm dlx`,
    /// `yarn create`, `bunx`). Anything unrecognised falls back to npm.
    pub fn detect(user_agent: Option<&str>) -> Self {
        match user_agent {
            Some(ua) if ua.starts_with("yarn") => Self::Yarn,
            Some(ua) if ua.starts_with("pnpm") => Self::Pnpm,
            Some(ua) if ua.starts_with("bun") => Self::Bun,
            _ => Self::Npm,
        }
    }

    /// The shell command that installs the project's dependencies.
    pub fn install_command(&self) -> String {
        format!("{} install", self.as_str())
    }

    /// The shell command that runs a `package.json` script.
    ///
    /// Yarn runs scripts without the `run` keyword; the others require it.
    pub fn run_script(&self, script: &str) -> String {
        match self {
            Self::Yarn => format!("{} {script}", self.as_str()),
            _ => format!("{} run {script}", self.as_str()),
        }
    }

    /// The shell command for `start`, which every manager accepts without `run`.
    pub fn start_command(&self) -> String {
        format!("{} start", self.as_str())
    }
}

impl fmt::Display for PackageManager {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

// ── Feature ───────────────────────────────────────────────────────────────────

/// An optional part of the boilerplate the user can opt out of.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Feature {
    Eslint,
    Prettier,
    I18n,
    BasicAuth,
    OpenidConnect,
}

impl Feature {
    /// All features, in prompt order.
    pub const ALL: [Feature; 5] = [
        Self::Eslint,
        Self::Prettier,
        Self::I18n,
        Self::BasicAuth,
        Self::OpenidConnect,
    ];

    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Eslint => "eslint",
            Self::Prettier => "prettier",
            Self::I18n => "i18n",
            Self::BasicAuth => "basic_auth",
            Self::OpenidConnect => "openid_connect",
        }
    }

    /// Human-readable product name shown in prompts.
    pub const fn display_name(&self) -> &'static str {
        match self {
            Self::Eslint => "ESLint",
            Self::Prettier => "Prettier",
            Self::I18n => "i18n",
            Self::BasicAuth => "Basic Auth",
            Self::OpenidConnect => "OpenID Connect",
        }
    }

    /// Whether turning the feature off changes the generated project.
    ///
    /// i18n, Basic Auth and OpenID Connect are accepted as options but the
    /// template offers no way to strip them yet.
    pub const fn can_be_disabled(&self) -> bool {
        matches!(self, Self::Eslint | Self::Prettier)
    }

    /// The yes/no question asked when the feature was not set via a flag.
    pub fn prompt_message(&self) -> String {
        let question = match self {
            Self::Eslint | Self::Prettier => {
                format!("Would you like to use {}?", self.display_name())
            }
            Self::OpenidConnect => format!(
                "Would you like to include the {} demo integration?",
                self.display_name()
            ),
            Self::I18n | Self::BasicAuth => {
                format!("Would you like to include the {} setup?", self.display_name())
            }
        };

        if self.can_be_disabled() {
            question
        } else {
            format!("{question} (disabling not yet implemented)")
        }
    }
}

impl fmt::Display for Feature {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn detect_reads_launching_manager_from_user_agent() {
        assert_eq!(
            PackageManager::detect(Some("yarn/1.22.19 npm/? node/v20.11.0 darwin arm64")),
            PackageManager::Yarn
        );
        assert_eq!(
            PackageManager::detect(Some("pnpm/8.15.1 npm/? node/v20.11.0 linux x64")),
            PackageManager::Pnpm
        );
        assert_eq!(
            PackageManager::detect(Some("bun/1.0.25 npm/? node/v21.6.0 linux x64")),
            PackageManager::Bun
        );
        assert_eq!(
            PackageManager::detect(Some("npm/10.2.4 node/v20.11.0 linux x64 workspaces/false")),
            PackageManager::Npm
        );
    }

    #[test]
    fn detect_falls_back_to_npm() {
        assert_eq!(PackageManager::detect(None), PackageManager::Npm);
        assert_eq!(PackageManager::detect(Some("")), PackageManager::Npm);
        assert_eq!(PackageManager::detect(Some("deno/1.40")), PackageManager::Npm);
    }

    #[test]
    fn yarn_runs_scripts_without_run_keyword() {
        assert_eq!(PackageManager::Yarn.run_script("dev"), "yarn dev");
        assert_eq!(PackageManager::Npm.run_script("dev"), "npm run dev");
        assert_eq!(PackageManager::Pnpm.run_script("build"), "pnpm run build");
        assert_eq!(PackageManager::Bun.run_script("build"), "bun run build");
    }

    #[test]
    fn start_never_uses_run() {
        for pm in PackageManager::PRIORITY {
            assert_eq!(pm.start_command(), format!("{pm} start"));
        }
    }

    #[test]
    fn install_command_uses_manager_name() {
        assert_eq!(PackageManager::Pnpm.install_command(), "pnpm install");
    }

    #[test]
    fn unimplemented_features_say_so_in_prompt() {
        assert!(!Feature::Eslint.prompt_message().contains("not yet implemented"));
        assert!(Feature::I18n.prompt_message().contains("not yet implemented"));
        assert!(
            Feature::OpenidConnect
                .prompt_message()
                .contains("demo integration")
        );
    }
}
