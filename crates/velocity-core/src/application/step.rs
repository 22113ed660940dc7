use std::fmt;

/// One stage of the project initialization pipeline, in execution order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum PipelineStep {
    FetchTemplate,
    RenameManifest,
    RemoveLintConfig,
    RemoveFormatterConfig,
    CreateLocalEnv,
    RemoveLockfile,
    InstallDependencies,
    RemoveIgnoreFile,
    InitializeGit,
}

impl PipelineStep {
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::FetchTemplate => "fetch-template",
            Self::RenameManifest => "rename-manifest",
            Self::RemoveLintConfig => "remove-lint-config",
            Self::RemoveFormatterConfig => "remove-formatter-config",
            Self::CreateLocalEnv => "create-local-env",
            Self::RemoveLockfile => "remove-lockfile",
            Self::InstallDependencies => "install-dependencies",
            Self::RemoveIgnoreFile => "remove-ignore-file",
            Self::InitializeGit => "initialize-git",
        }
    }

    /// Progress line shown while the step runs.
    pub const fn description(&self) -> &'static str {
        match self {
            Self::FetchTemplate => "Downloading project template...",
            Self::RenameManifest => "Updating app name in package.json...",
            Self::RemoveLintConfig => "Removing ESLint config...",
            Self::RemoveFormatterConfig => "Removing Prettier config...",
            Self::CreateLocalEnv => "Creating local .env...",
            Self::RemoveLockfile => "Removing lockfile of another package manager...",
            Self::InstallDependencies => "Installing dependencies...",
            Self::RemoveIgnoreFile => "Removing .gitignore...",
            Self::InitializeGit => "Initializing git repository...",
        }
    }

    /// Steps that spawn long-running external work.
    pub const fn is_long_running(&self) -> bool {
        matches!(self, Self::FetchTemplate | Self::InstallDependencies)
    }
}

impl fmt::Display for PipelineStep {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
