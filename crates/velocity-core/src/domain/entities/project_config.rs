//! The `ProjectConfig` aggregate root.
//!
//! A `ProjectConfig` is the fully-resolved description of the project the user
//! wants to create. Identity (`project_directory`, `app_name`) is normalized at
//! construction; once a `ProjectConfig` exists it is guaranteed consistent and
//! it is never mutated afterwards.
//!
//! # Domain purity
//!
//! This module must not import `tracing` and never touches the real process
//! environment: the working directory is an explicit argument.

use std::path::{Component, Path, PathBuf};

use crate::domain::{
    error::DomainError,
    value_objects::{Feature, PackageManager},
};

// ── Features ──────────────────────────────────────────────────────────────────

/// Opt-out toggles for the optional parts of the boilerplate.
///
/// Every feature is on by default.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Features {
    pub eslint: bool,
    pub prettier: bool,
    pub i18n: bool,
    pub basic_auth: bool,
    pub openid_connect: bool,
}

impl Features {
    pub const fn get(&self, feature: Feature) -> bool {
        match feature {
            Feature::Eslint => self.eslint,
            Feature::Prettier => self.prettier,
            Feature::I18n => self.i18n,
            Feature::BasicAuth => self.basic_auth,
            Feature::OpenidConnect => self.openid_connect,
        }
    }

    pub fn set(&mut self, feature: Feature, enabled: bool) {
        let slot = match feature {
            Feature::Eslint => &mut self.eslint,
            Feature::Prettier => &mut self.prettier,
            Feature::I18n => &mut self.i18n,
            Feature::BasicAuth => &mut self.basic_auth,
            Feature::OpenidConnect => &mut self.openid_connect,
        };
        *slot = enabled;
    }
}

impl Default for Features {
    fn default() -> Self {
        Self {
            eslint: true,
            prettier: true,
            i18n: true,
            basic_auth: true,
            openid_connect: true,
        }
    }
}

// ── ProjectOptions ────────────────────────────────────────────────────────────

/// Everything about a project except its location.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ProjectOptions {
    pub package_manager: PackageManager,
    pub features: Features,
    pub skip_install: bool,
    pub disable_git: bool,
}

// ── Aggregate root ────────────────────────────────────────────────────────────

/// A fully-resolved project configuration.
///
/// Guaranteed on construction:
/// - `project_directory` is absolute and free of `.` / `..` components
/// - `app_name` is the non-empty final segment of `project_directory`
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ProjectConfig {
    project_directory: PathBuf,
    app_name: String,
    options: ProjectOptions,
}

impl ProjectConfig {
    /// Resolve `directory` against `cwd` and derive the app name from it.
    ///
    /// `directory` is trimmed first. Absolute inputs ignore `cwd`.
    pub fn new(directory: &str, cwd: &Path, options: ProjectOptions) -> Result<Self, DomainError> {
        let (project_directory, app_name) = resolve_project_directory(directory, cwd)?;
        Ok(Self {
            project_directory,
            app_name,
            options,
        })
    }

    pub fn project_directory(&self) -> &Path {
        &self.project_directory
    }
    pub fn app_name(&self) -> &str {
        &self.app_name
    }
    pub const fn package_manager(&self) -> PackageManager {
        self.options.package_manager
    }
    pub const fn features(&self) -> Features {
        self.options.features
    }
    pub const fn eslint(&self) -> bool {
        self.options.features.eslint
    }
    pub const fn prettier(&self) -> bool {
        self.options.features.prettier
    }
    pub const fn skip_install(&self) -> bool {
        self.options.skip_install
    }
    pub const fn disable_git(&self) -> bool {
        self.options.disable_git
    }
}

// ── Path resolution ───────────────────────────────────────────────────────────

/// Resolve a user-supplied directory to `(absolute_path, app_name)`.
pub fn resolve_project_directory(
    input: &str,
    cwd: &Path,
) -> Result<(PathBuf, String), DomainError> {
    let trimmed = input.trim();
    if trimmed.is_empty() {
        return Err(DomainError::InvalidProjectDirectory {
            input: input.into(),
            reason: "directory cannot be empty".into(),
        });
    }

    if !cwd.is_absolute() {
        return Err(DomainError::RelativeWorkingDirectory {
            path: cwd.display().to_string(),
        });
    }

    let resolved = normalize_lexically(&cwd.join(trimmed));

    let app_name = resolved
        .file_name()
        .ok_or_else(|| DomainError::InvalidProjectDirectory {
            input: trimmed.into(),
            reason: format!("'{}' has no final path segment", resolved.display()),
        })?
        .to_str()
        .ok_or_else(|| DomainError::InvalidProjectDirectory {
            input: trimmed.into(),
            reason: "directory name is not valid UTF-8".into(),
        })?
        .to_string();

    Ok((resolved, app_name))
}

/// Collapse `.` and `..` without touching the filesystem.
///
/// `..` at the root stays at the root, matching how shells resolve `/..`.
fn normalize_lexically(path: &Path) -> PathBuf {
    let mut out = PathBuf::new();
    for component in path.components() {
        match component {
            Component::Prefix(_) | Component::RootDir => out.push(component.as_os_str()),
            Component::CurDir => {}
            Component::ParentDir => {
                if matches!(out.components().next_back(), Some(Component::Normal(_))) {
                    out.pop();
                }
            }
            Component::Normal(segment) => out.push(segment),
        }
    }
    out
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cwd() -> PathBuf {
        if cfg!(windows) {
            PathBuf::from(r"C:\work")
        } else {
            PathBuf::from("/work")
        }
    }

    #[test]
    fn plain_name_resolves_under_cwd() {
        let (dir, name) = resolve_project_directory("my-app", &cwd()).unwrap();
        assert_eq!(dir, cwd().join("my-app"));
        assert_eq!(name, "my-app");
    }

    #[test]
    fn input_is_trimmed() {
        let (_, name) = resolve_project_directory("  my-app \n", &cwd()).unwrap();
        assert_eq!(name, "my-app");
    }

    #[test]
    fn parent_components_are_collapsed() {
        let (dir, name) = resolve_project_directory("../sibling/./app", &cwd()).unwrap();
        assert!(dir.is_absolute());
        assert_eq!(name, "app");
        assert!(!dir.components().any(|c| matches!(c, Component::ParentDir)));
        assert!(!dir.components().any(|c| matches!(c, Component::CurDir)));
    }

    #[test]
    fn trailing_separator_keeps_last_segment() {
        let (_, name) = resolve_project_directory("nested/my-app/", &cwd()).unwrap();
        assert_eq!(name, "my-app");
    }

    #[test]
    #[cfg(unix)]
    fn absolute_input_ignores_cwd() {
        let (dir, name) = resolve_project_directory("/srv/apps/shop", &cwd()).unwrap();
        assert_eq!(dir, PathBuf::from("/srv/apps/shop"));
        assert_eq!(name, "shop");
    }

    #[test]
    fn app_name_is_always_last_segment_of_directory() {
        for input in ["a", "a/b", "./a/../b/c", "x/y/z/.", "deep/er/../est"] {
            let (dir, name) = resolve_project_directory(input, &cwd()).unwrap();
            assert!(dir.is_absolute(), "not absolute for {input}");
            assert_eq!(
                dir.file_name().and_then(|n| n.to_str()),
                Some(name.as_str()),
                "mismatch for {input}"
            );
        }
    }

    #[test]
    fn empty_input_is_rejected() {
        assert!(matches!(
            resolve_project_directory("   ", &cwd()),
            Err(DomainError::InvalidProjectDirectory { .. })
        ));
    }

    #[test]
    #[cfg(unix)]
    fn root_is_rejected() {
        assert!(matches!(
            resolve_project_directory("/", &cwd()),
            Err(DomainError::InvalidProjectDirectory { .. })
        ));
        assert!(matches!(
            resolve_project_directory("../../..", &cwd()),
            Err(DomainError::InvalidProjectDirectory { .. })
        ));
    }

    #[test]
    fn relative_cwd_is_rejected() {
        assert!(matches!(
            resolve_project_directory("app", Path::new("relative/dir")),
            Err(DomainError::RelativeWorkingDirectory { .. })
        ));
    }

    #[test]
    fn features_default_to_enabled() {
        let features = Features::default();
        assert!(Feature::ALL.iter().all(|f| features.get(*f)));
    }

    #[test]
    fn features_set_and_get_agree() {
        let mut features = Features::default();
        for feature in Feature::ALL {
            features.set(feature, false);
            assert!(!features.get(feature));
        }
        assert_eq!(
            features,
            Features {
                eslint: false,
                prettier: false,
                i18n: false,
                basic_auth: false,
                openid_connect: false,
            }
        );
    }

    #[test]
    fn config_exposes_resolved_identity() {
        let options = ProjectOptions {
            package_manager: PackageManager::Bun,
            skip_install: true,
            ..ProjectOptions::default()
        };
        let config = ProjectConfig::new("shop", &cwd(), options).unwrap();
        assert_eq!(config.app_name(), "shop");
        assert_eq!(config.project_directory(), cwd().join("shop"));
        assert_eq!(config.package_manager(), PackageManager::Bun);
        assert!(config.skip_install());
        assert!(!config.disable_git());
        assert!(config.eslint());
    }
}
