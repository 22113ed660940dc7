//! Application configuration.
//!
//! [`AppConfig`] is loaded once at startup and passed down by reference. The
//! CLI layer owns config; the core crate only sees the values derived from
//! it ([`ResolverDefaults`], [`TemplateSource`]).
//!
//! # Resolution order (highest priority first)
//!
//! 1. CLI flags and prompt answers (handled by the option resolver)
//! 2. Environment variables: `VELOCITY__DEFAULTS__ESLINT=false`
//! 3. Config file: `--config <FILE>`, else the platform config directory
//! 4. Built-in defaults (always present)

use std::path::{Path, PathBuf};

use anyhow::Context as _;
use config::{Config, Environment, File, FileFormat};
use serde::{Deserialize, Serialize};
use tracing::debug;

use velocity_core::{
    application::{ResolverDefaults, services::DEFAULT_PROJECT_DIRECTORY},
    domain::{DEFAULT_TEMPLATE_SOURCE, DomainError, Features, TemplateSource},
};

/// Prefix for environment overrides. Nested keys use the same separator.
const ENV_PREFIX: &str = "VELOCITY";
const ENV_SEPARATOR: &str = "__";

/// Application configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AppConfig {
    /// Default answers for new projects.
    pub defaults: Defaults,
    /// Where the project template comes from.
    pub template: TemplateConfig,
    /// Output settings.
    pub output: OutputConfig,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Defaults {
    pub project_directory: String,
    pub eslint: bool,
    pub prettier: bool,
    pub i18n: bool,
    pub basic_auth: bool,
    pub openid_connect: bool,
}

impl Default for Defaults {
    fn default() -> Self {
        let features = Features::default();
        Self {
            project_directory: DEFAULT_PROJECT_DIRECTORY.into(),
            eslint: features.eslint,
            prettier: features.prettier,
            i18n: features.i18n,
            basic_auth: features.basic_auth,
            openid_connect: features.openid_connect,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TemplateConfig {
    /// `host:owner/repo[#ref]` shorthand or a git URL.
    pub source: String,
}

impl Default for TemplateConfig {
    fn default() -> Self {
        Self {
            source: DEFAULT_TEMPLATE_SOURCE.into(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputConfig {
    pub no_color: bool,
}

impl AppConfig {
    /// Load configuration: defaults, then the config file, then environment.
    ///
    /// `config_file` is the path the user passed via `--config`; it must
    /// exist. Without it the default location is used if present.
    pub fn load(config_file: Option<&PathBuf>) -> anyhow::Result<Self> {
        let (path, required) = match config_file {
            Some(path) => (path.clone(), true),
            None => (Self::config_path(), false),
        };
        Self::load_from(&path, required)
    }

    fn load_from(path: &Path, required: bool) -> anyhow::Result<Self> {
        debug!(path = %path.display(), required, "Loading configuration");

        let settings = Config::builder()
            .add_source(
                Config::try_from(&AppConfig::default())
                    .context("Failed to build default configuration")?,
            )
            .add_source(
                File::from(path)
                    .format(FileFormat::Toml)
                    .required(required),
            )
            .add_source(
                Environment::with_prefix(ENV_PREFIX)
                    .prefix_separator(ENV_SEPARATOR)
                    .separator(ENV_SEPARATOR)
                    .try_parsing(true),
            )
            .build()
            .with_context(|| format!("Failed to read configuration from {}", path.display()))?;

        settings
            .try_deserialize()
            .context("Configuration has invalid values")
    }

    /// Path to the default configuration file.
    ///
    /// Uses `directories::ProjectDirs` for cross-platform correctness,
    /// falling back to `.create-velocity-app.toml` in the current directory.
    pub fn config_path() -> PathBuf {
        directories::ProjectDirs::from("de", "etribes", "create-velocity-app")
            .map(|d| d.config_dir().join("config.toml"))
            .unwrap_or_else(|| PathBuf::from(".create-velocity-app.toml"))
    }

    /// Lowest-precedence values for the option resolver.
    pub fn resolver_defaults(&self) -> ResolverDefaults {
        let d = &self.defaults;
        ResolverDefaults {
            project_directory: d.project_directory.clone(),
            features: Features {
                eslint: d.eslint,
                prettier: d.prettier,
                i18n: d.i18n,
                basic_auth: d.basic_auth,
                openid_connect: d.openid_connect,
            },
        }
    }

    /// The configured template, parsed.
    pub fn template_source(&self) -> Result<TemplateSource, DomainError> {
        self.template.source.parse()
    }
}
