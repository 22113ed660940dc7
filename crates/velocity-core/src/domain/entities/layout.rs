use std::path::{Path, PathBuf};

use crate::domain::value_objects::PackageManager;

/// Relative paths of the boilerplate files the init pipeline touches.
///
/// The defaults describe the velocity boilerplate; other templates with the
/// same shape can override individual entries.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct TemplateLayout {
    pub manifest: PathBuf,
    pub lint_config: PathBuf,
    pub formatter_config: PathBuf,
    pub example_env: PathBuf,
    pub local_env: PathBuf,
    pub lockfile: PathBuf,
    /// The package manager whose format `lockfile` is written in.
    pub lockfile_manager: PackageManager,
    pub ignore_file: PathBuf,
}

impl TemplateLayout {
    /// Whether installing with `manager` would conflict with the shipped lockfile.
    pub fn lockfile_conflicts_with(&self, manager: PackageManager) -> bool {
        manager != self.lockfile_manager
    }

    pub fn manifest_in(&self, root: &Path) -> PathBuf {
        root.join(&self.manifest)
    }
    pub fn lint_config_in(&self, root: &Path) -> PathBuf {
        root.join(&self.lint_config)
    }
    pub fn formatter_config_in(&self, root: &Path) -> PathBuf {
        root.join(&self.formatter_config)
    }
    pub fn example_env_in(&self, root: &Path) -> PathBuf {
        root.join(&self.example_env)
    }
    pub fn local_env_in(&self, root: &Path) -> PathBuf {
        root.join(&self.local_env)
    }
    pub fn lockfile_in(&self, root: &Path) -> PathBuf {
        root.join(&self.lockfile)
    }
    pub fn ignore_file_in(&self, root: &Path) -> PathBuf {
        root.join(&self.ignore_file)
    }
}

impl Default for TemplateLayout {
    fn default() -> Self {
        Self {
            manifest: "package.json".into(),
            lint_config: ".eslintrc".into(),
            formatter_config: ".prettierrc".into(),
            example_env: "example.env".into(),
            local_env: ".env".into(),
            lockfile: "package-lock.json".into(),
            lockfile_manager: PackageManager::Npm,
            ignore_file: ".gitignore".into(),
        }
    }
}
