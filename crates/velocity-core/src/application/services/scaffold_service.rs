//! Scaffold Service - the project initialization pipeline.
//!
//! Given a resolved [`ProjectConfig`], this service runs, strictly in order:
//! 1. Fetch the template into the project directory (fatal on failure)
//! 2. Rename the package in `package.json`
//! 3. Remove the ESLint config (if disabled)
//! 4. Remove the Prettier config (if disabled)
//! 5. Copy `example.env` to `.env`
//! 6. Install dependencies (unless skipped), removing a foreign lockfile first
//! 7. Remove `.gitignore` (git disabled) or run `git init`
//!
//! Every step goes through [`ScaffoldService::run_step`], which stops the
//! pipeline on the first failure and reports which step failed. Nothing is
//! rolled back: a failure leaves the partially customized directory on disk.

use std::path::{Path, PathBuf};

use tracing::{debug, error, info, instrument, warn};

use crate::{
    application::{
        ApplicationError, PipelineStep,
        ports::{
            CommandRunner, FetchOptions, Filesystem, ProgressReporter, SilentProgress,
            TemplateFetcher,
        },
    },
    domain::{
        NextStep, PackageManager, PackageManifest, ProjectConfig, TemplateLayout,
        TemplateSource, first_command, next_steps,
    },
    error::{VelocityError, VelocityResult},
};

/// Command that initializes version control in the new project.
pub const GIT_INIT_COMMAND: &str = "git init";

/// What a successful run produced.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ScaffoldReport {
    pub project_directory: PathBuf,
    pub app_name: String,
    pub package_manager: PackageManager,
    /// Steps that ran, in order.
    pub steps: Vec<PipelineStep>,
}

impl ScaffoldReport {
    pub fn next_steps(&self) -> Vec<NextStep> {
        next_steps(self.package_manager)
    }

    pub fn first_command(&self) -> String {
        first_command(self.package_manager)
    }
}

/// Main scaffolding service.
pub struct ScaffoldService {
    fetcher: Box<dyn TemplateFetcher>,
    runner: Box<dyn CommandRunner>,
    filesystem: Box<dyn Filesystem>,
    progress: Box<dyn ProgressReporter>,
    source: TemplateSource,
    layout: TemplateLayout,
}

impl ScaffoldService {
    /// Create a new scaffold service with the given adapters, the default
    /// template source and the default template layout.
    pub fn new(
        fetcher: Box<dyn TemplateFetcher>,
        runner: Box<dyn CommandRunner>,
        filesystem: Box<dyn Filesystem>,
    ) -> Self {
        Self {
            fetcher,
            runner,
            filesystem,
            progress: Box::new(SilentProgress),
            source: TemplateSource::default(),
            layout: TemplateLayout::default(),
        }
    }

    pub fn with_progress(mut self, progress: Box<dyn ProgressReporter>) -> Self {
        self.progress = progress;
        self
    }

    pub fn with_source(mut self, source: TemplateSource) -> Self {
        self.source = source;
        self
    }

    pub fn with_layout(mut self, layout: TemplateLayout) -> Self {
        self.layout = layout;
        self
    }

    pub fn source(&self) -> &TemplateSource {
        &self.source
    }

    /// Create the project described by `config`.
    #[instrument(
        skip_all,
        fields(
            app = %config.app_name(),
            directory = %config.project_directory().display(),
            package_manager = %config.package_manager(),
        )
    )]
    pub fn scaffold(&self, config: &ProjectConfig) -> VelocityResult<ScaffoldReport> {
        let root = config.project_directory();
        let mut steps = Vec::new();

        info!(source = %self.source, "Creating project");

        self.run_step(PipelineStep::FetchTemplate, &mut steps, || {
            self.fetcher
                .fetch(&self.source, root, FetchOptions { force: true })
        })?;

        let result = self.customize(config, root, &mut steps);
        if result.is_err() {
            warn!(
                path = %root.display(),
                "Project left partially initialized; nothing was rolled back"
            );
        }
        result?;

        info!(steps = steps.len(), "Project created");
        Ok(ScaffoldReport {
            project_directory: root.to_path_buf(),
            app_name: config.app_name().to_string(),
            package_manager: config.package_manager(),
            steps,
        })
    }

    // -------------------------------------------------------------------------
    // Pipeline
    // -------------------------------------------------------------------------

    /// Everything after the fetch.
    fn customize(
        &self,
        config: &ProjectConfig,
        root: &Path,
        steps: &mut Vec<PipelineStep>,
    ) -> VelocityResult<()> {
        let layout = &self.layout;

        self.run_step(PipelineStep::RenameManifest, steps, || {
            self.rename_manifest(&layout.manifest_in(root), config.app_name())
        })?;

        // TODO: also drop the eslint/prettier devDependencies from package.json
        if !config.eslint() {
            self.run_step(PipelineStep::RemoveLintConfig, steps, || {
                self.filesystem.remove_file(&layout.lint_config_in(root))
            })?;
        }

        if !config.prettier() {
            self.run_step(PipelineStep::RemoveFormatterConfig, steps, || {
                self.filesystem.remove_file(&layout.formatter_config_in(root))
            })?;
        }

        self.run_step(PipelineStep::CreateLocalEnv, steps, || {
            self.filesystem
                .copy_file(&layout.example_env_in(root), &layout.local_env_in(root))
        })?;

        if config.skip_install() {
            debug!("Dependency installation skipped");
        } else {
            let manager = config.package_manager();
            if layout.lockfile_conflicts_with(manager) {
                self.run_step(PipelineStep::RemoveLockfile, steps, || {
                    self.filesystem.remove_file(&layout.lockfile_in(root))
                })?;
            }
            self.run_step(PipelineStep::InstallDependencies, steps, || {
                self.runner.run(root, &manager.install_command())
            })?;
        }

        if config.disable_git() {
            self.run_step(PipelineStep::RemoveIgnoreFile, steps, || {
                self.filesystem.remove_file(&layout.ignore_file_in(root))
            })?;
        } else {
            self.run_step(PipelineStep::InitializeGit, steps, || {
                self.runner.run(root, GIT_INIT_COMMAND)
            })?;
        }

        Ok(())
    }

    /// Rewrite the manifest's `name` field.
    fn rename_manifest(&self, path: &Path, app_name: &str) -> VelocityResult<()> {
        let text = self.filesystem.read_to_string(path)?;
        let mut manifest = PackageManifest::parse(&text)?;
        debug!(from = ?manifest.name(), to = app_name, "Renaming package");
        manifest.set_name(app_name);
        self.filesystem
            .write_file(path, &manifest.to_pretty_string()?)
    }

    /// Run one step, reporting progress and translating failure into an
    /// error that names the step.
    fn run_step<F>(
        &self,
        step: PipelineStep,
        completed: &mut Vec<PipelineStep>,
        action: F,
    ) -> VelocityResult<()>
    where
        F: FnOnce() -> VelocityResult<()>,
    {
        debug!(%step, "Step started");
        self.progress.step_started(step);

        match action() {
            Ok(()) => {
                self.progress.step_finished(step);
                completed.push(step);
                Ok(())
            }
            Err(e) => {
                self.progress.step_failed(step);
                error!(%step, error = %e, "Step failed");
                Err(self.step_error(step, e))
            }
        }
    }

    fn step_error(&self, step: PipelineStep, cause: VelocityError) -> VelocityError {
        match step {
            PipelineStep::FetchTemplate => ApplicationError::TemplateFetch {
                template: self.source.to_string(),
                reason: cause.to_string(),
            },
            _ => ApplicationError::StepFailed {
                step,
                reason: cause.to_string(),
            },
        }
        .into()
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;
    use std::sync::{Arc, Mutex};

    use mockall::Sequence;

    use super::*;
    use crate::application::ports::{MockCommandRunner, MockTemplateFetcher};
    use crate::domain::{DEFAULT_TEMPLATE_SOURCE, Features, ProjectOptions};

    // ── fakes ─────────────────────────────────────────────────────────────

    /// Shared in-memory file map; clones see the same files.
    #[derive(Clone, Default)]
    struct FakeFs {
        files: Arc<Mutex<HashMap<PathBuf, String>>>,
    }

    impl FakeFs {
        fn put(&self, path: PathBuf, content: &str) {
            self.files.lock().unwrap().insert(path, content.into());
        }
        fn get(&self, path: &Path) -> Option<String> {
            self.files.lock().unwrap().get(path).cloned()
        }
        fn len(&self) -> usize {
            self.files.lock().unwrap().len()
        }
        fn exists(&self, path: &Path) -> bool {
            self.get(path).is_some()
        }
    }

    fn missing(path: &Path) -> VelocityError {
        ApplicationError::FilesystemError {
            path: path.to_path_buf(),
            reason: "No such file or directory".into(),
        }
        .into()
    }

    impl Filesystem for FakeFs {
        fn read_to_string(&self, path: &Path) -> VelocityResult<String> {
            self.get(path).ok_or_else(|| missing(path))
        }
        fn write_file(&self, path: &Path, content: &str) -> VelocityResult<()> {
            self.put(path.to_path_buf(), content);
            Ok(())
        }
        fn copy_file(&self, from: &Path, to: &Path) -> VelocityResult<()> {
            let content = self.read_to_string(from)?;
            self.write_file(to, &content)
        }
        fn remove_file(&self, path: &Path) -> VelocityResult<()> {
            self.files
                .lock()
                .unwrap()
                .remove(path)
                .map(|_| ())
                .ok_or_else(|| missing(path))
        }
    }

    /// Records which steps were reported.
    #[derive(Clone, Default)]
    struct RecordingProgress {
        events: Arc<Mutex<Vec<(&'static str, PipelineStep)>>>,
    }

    impl ProgressReporter for RecordingProgress {
        fn step_started(&self, step: PipelineStep) {
            self.events.lock().unwrap().push(("started", step));
        }
        fn step_finished(&self, step: PipelineStep) {
            self.events.lock().unwrap().push(("finished", step));
        }
        fn step_failed(&self, step: PipelineStep) {
            self.events.lock().unwrap().push(("failed", step));
        }
    }

    // ── helpers ───────────────────────────────────────────────────────────

    fn root() -> PathBuf {
        if cfg!(windows) {
            PathBuf::from(r"C:\work\my-app")
        } else {
            PathBuf::from("/work/my-app")
        }
    }

    fn config(options: ProjectOptions) -> ProjectConfig {
        let parent = root().parent().unwrap().to_path_buf();
        ProjectConfig::new("my-app", &parent, options).unwrap()
    }

    /// A fetcher that drops the boilerplate files into `fs`.
    fn boilerplate_fetcher(fs: &FakeFs) -> MockTemplateFetcher {
        let fs = fs.clone();
        let mut fetcher = MockTemplateFetcher::new();
        fetcher
            .expect_fetch()
            .withf(|source, dest, options| {
                source.to_string() == DEFAULT_TEMPLATE_SOURCE
                    && dest.to_path_buf() == root()
                    && options.force
            })
            .times(1)
            .returning(move |_, dest, _| {
                fs.put(
                    dest.join("package.json"),
                    "{\n  \"name\": \"velocity-boilerplate\",\n  \"private\": true\n}",
                );
                fs.put(dest.join(".eslintrc"), "{}");
                fs.put(dest.join(".prettierrc"), "{}");
                fs.put(dest.join("example.env"), "API_URL=http://localhost\n");
                fs.put(dest.join("package-lock.json"), "{}");
                fs.put(dest.join(".gitignore"), "node_modules\n");
                Ok(())
            });
        fetcher
    }

    fn service(
        fs: &FakeFs,
        fetcher: MockTemplateFetcher,
        runner: MockCommandRunner,
    ) -> ScaffoldService {
        ScaffoldService::new(Box::new(fetcher), Box::new(runner), Box::new(fs.clone()))
    }

    // ── scenarios ─────────────────────────────────────────────────────────

    #[test]
    fn defaults_produce_renamed_project_with_git() {
        let fs = FakeFs::default();
        let mut runner = MockCommandRunner::new();
        let mut seq = Sequence::new();
        runner
            .expect_run()
            .withf(|dir, cmd| dir.to_path_buf() == root() && cmd.to_string() == "npm install")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));
        runner
            .expect_run()
            .withf(|dir, cmd| dir.to_path_buf() == root() && cmd.to_string() == "git init")
            .times(1)
            .in_sequence(&mut seq)
            .returning(|_, _| Ok(()));

        let report = service(&fs, boilerplate_fetcher(&fs), runner)
            .scaffold(&config(ProjectOptions::default()))
            .unwrap();

        let manifest = fs.get(&root().join("package.json")).unwrap();
        assert!(manifest.contains("\"name\": \"my-app\""));
        assert!(manifest.contains("\"private\": true"));
        assert!(fs.exists(&root().join(".eslintrc")));
        assert!(fs.exists(&root().join(".prettierrc")));
        assert_eq!(
            fs.get(&root().join(".env")).as_deref(),
            Some("API_URL=http://localhost\n")
        );
        assert!(fs.exists(&root().join("package-lock.json")));
        assert!(fs.exists(&root().join(".gitignore")));

        assert_eq!(report.app_name, "my-app");
        assert_eq!(report.project_directory, root());
        assert_eq!(
            report.steps,
            vec![
                PipelineStep::FetchTemplate,
                PipelineStep::RenameManifest,
                PipelineStep::CreateLocalEnv,
                PipelineStep::InstallDependencies,
                PipelineStep::InitializeGit,
            ]
        );
    }

    #[test]
    fn disabled_linters_remove_their_configs() {
        let fs = FakeFs::default();
        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(|_, _| Ok(()));

        let options = ProjectOptions {
            features: Features {
                eslint: false,
                prettier: false,
                ..Features::default()
            },
            ..ProjectOptions::default()
        };
        service(&fs, boilerplate_fetcher(&fs), runner)
            .scaffold(&config(options))
            .unwrap();

        assert!(!fs.exists(&root().join(".eslintrc")));
        assert!(!fs.exists(&root().join(".prettierrc")));
    }

    #[test]
    fn unimplemented_feature_toggles_change_nothing() {
        let fs = FakeFs::default();
        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(|_, _| Ok(()));

        let options = ProjectOptions {
            features: Features {
                i18n: false,
                basic_auth: false,
                openid_connect: false,
                ..Features::default()
            },
            ..ProjectOptions::default()
        };
        let report = service(&fs, boilerplate_fetcher(&fs), runner)
            .scaffold(&config(options))
            .unwrap();

        assert_eq!(report.steps.len(), 5);
        assert_eq!(fs.len(), 7);
    }

    #[test]
    fn foreign_manager_removes_lockfile_before_install() {
        let fs = FakeFs::default();
        let mut runner = MockCommandRunner::new();
        let lockfile = root().join("package-lock.json");
        let fs_during_install = fs.clone();
        runner
            .expect_run()
            .withf(|dir, cmd| dir.to_path_buf() == root() && cmd.to_string() == "yarn install")
            .times(1)
            .returning(move |_, _| {
                assert!(!fs_during_install.exists(&lockfile), "lockfile present during install");
                Ok(())
            });
        runner
            .expect_run()
            .withf(|dir, cmd| dir.to_path_buf() == root() && cmd.to_string() == "git init")
            .returning(|_, _| Ok(()));

        let options = ProjectOptions {
            package_manager: PackageManager::Yarn,
            ..ProjectOptions::default()
        };
        let report = service(&fs, boilerplate_fetcher(&fs), runner)
            .scaffold(&config(options))
            .unwrap();

        assert!(!fs.exists(&root().join("package-lock.json")));
        assert!(report.steps.contains(&PipelineStep::RemoveLockfile));
    }

    #[test]
    fn skip_install_short_circuits_lockfile_removal() {
        let fs = FakeFs::default();
        let mut runner = MockCommandRunner::new();
        runner.expect_run().never();

        let options = ProjectOptions {
            package_manager: PackageManager::Yarn,
            skip_install: true,
            disable_git: true,
            ..ProjectOptions::default()
        };
        let report = service(&fs, boilerplate_fetcher(&fs), runner)
            .scaffold(&config(options))
            .unwrap();

        assert!(fs.exists(&root().join("package-lock.json")));
        assert!(!fs.exists(&root().join(".gitignore")));
        assert!(!report.steps.contains(&PipelineStep::InstallDependencies));
        assert!(!report.steps.contains(&PipelineStep::InitializeGit));
        assert_eq!(report.first_command(), "yarn dev");
    }

    #[test]
    fn fetch_failure_is_fatal_and_attributed() {
        let fs = FakeFs::default();
        let mut fetcher = MockTemplateFetcher::new();
        fetcher.expect_fetch().times(1).returning(|_, _, _| {
            Err(ApplicationError::CommandFailed {
                command: "git clone".into(),
                directory: PathBuf::from("/tmp"),
                reason: "could not resolve host".into(),
            }
            .into())
        });
        let mut runner = MockCommandRunner::new();
        runner.expect_run().never();

        let err = service(&fs, fetcher, runner)
            .scaffold(&config(ProjectOptions::default()))
            .unwrap_err();

        assert!(err.is_fetch_failure());
        assert!(err.to_string().contains("gitlab:etribes/velocity-boilerplate"));
        assert_eq!(fs.len(), 0);
    }

    #[test]
    fn failing_step_stops_the_pipeline() {
        let fs = FakeFs::default();
        let inner = fs.clone();
        let mut fetcher = MockTemplateFetcher::new();
        fetcher.expect_fetch().returning(move |_, dest, _| {
            // No example.env in this template.
            inner.put(dest.join("package.json"), "{\"name\":\"x\"}");
            Ok(())
        });
        let mut runner = MockCommandRunner::new();
        runner.expect_run().never();

        let err = service(&fs, fetcher, runner)
            .scaffold(&config(ProjectOptions::default()))
            .unwrap_err();

        match err {
            VelocityError::Application(ApplicationError::StepFailed { step, .. }) => {
                assert_eq!(step, PipelineStep::CreateLocalEnv);
            }
            other => panic!("unexpected error: {other:?}"),
        }
        // Earlier work is kept.
        assert!(
            fs.get(&root().join("package.json"))
                .unwrap()
                .contains("my-app")
        );
    }

    #[test]
    fn failing_install_skips_git() {
        let fs = FakeFs::default();
        let mut runner = MockCommandRunner::new();
        runner
            .expect_run()
            .withf(|dir, cmd| dir.to_path_buf() == root() && cmd.to_string() == "npm install")
            .times(1)
            .returning(|dir, cmd| {
                Err(ApplicationError::CommandFailed {
                    command: cmd.into(),
                    directory: dir.to_path_buf(),
                    reason: "exit status: 1".into(),
                }
                .into())
            });
        runner
            .expect_run()
            .withf(|dir, cmd| dir.to_path_buf() == root() && cmd.to_string() == "git init")
            .never();

        let err = service(&fs, boilerplate_fetcher(&fs), runner)
            .scaffold(&config(ProjectOptions::default()))
            .unwrap_err();

        assert!(matches!(
            err,
            VelocityError::Application(ApplicationError::StepFailed {
                step: PipelineStep::InstallDependencies,
                ..
            })
        ));
    }

    #[test]
    fn invalid_manifest_fails_rename_step() {
        let fs = FakeFs::default();
        let inner = fs.clone();
        let mut fetcher = MockTemplateFetcher::new();
        fetcher.expect_fetch().returning(move |_, dest, _| {
            inner.put(dest.join("package.json"), "not json");
            Ok(())
        });
        let mut runner = MockCommandRunner::new();
        runner.expect_run().never();

        let err = service(&fs, fetcher, runner)
            .scaffold(&config(ProjectOptions::default()))
            .unwrap_err();
        assert!(matches!(
            err,
            VelocityError::Application(ApplicationError::StepFailed {
                step: PipelineStep::RenameManifest,
                ..
            })
        ));
    }

    #[test]
    fn progress_is_reported_for_each_step() {
        let fs = FakeFs::default();
        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(|_, _| Ok(()));
        let progress = RecordingProgress::default();

        let options = ProjectOptions {
            skip_install: true,
            ..ProjectOptions::default()
        };
        service(&fs, boilerplate_fetcher(&fs), runner)
            .with_progress(Box::new(progress.clone()))
            .scaffold(&config(options))
            .unwrap();

        let events = progress.events.lock().unwrap().clone();
        assert_eq!(events.first(), Some(&("started", PipelineStep::FetchTemplate)));
        assert_eq!(events.last(), Some(&("finished", PipelineStep::InitializeGit)));
        assert_eq!(events.len(), 8);
    }

    #[test]
    fn custom_source_and_layout_are_used() {
        let fs = FakeFs::default();
        let inner = fs.clone();
        let source: TemplateSource = "github:acme/starter#v2".parse().unwrap();

        let mut fetcher = MockTemplateFetcher::new();
        fetcher
            .expect_fetch()
            .withf(|s, _, _| s.to_string() == "github:acme/starter#v2")
            .returning(move |_, dest, _| {
                inner.put(dest.join("app/package.json"), "{}");
                inner.put(dest.join(".env.example"), "A=1");
                Ok(())
            });
        let mut runner = MockCommandRunner::new();
        runner.expect_run().returning(|_, _| Ok(()));

        let layout = TemplateLayout {
            manifest: "app/package.json".into(),
            example_env: ".env.example".into(),
            ..TemplateLayout::default()
        };
        let options = ProjectOptions {
            skip_install: true,
            ..ProjectOptions::default()
        };
        service(&fs, fetcher, runner)
            .with_source(source)
            .with_layout(layout)
            .scaffold(&config(options))
            .unwrap();

        assert!(
            fs.get(&root().join("app/package.json"))
                .unwrap()
                .contains("my-app")
        );
        assert_eq!(fs.get(&root().join(".env")).as_deref(), Some("A=1"));
    }

    #[test]
    fn report_lists_next_steps_for_manager() {
        let report = ScaffoldReport {
            project_directory: root(),
            app_name: "my-app".into(),
            package_manager: PackageManager::Pnpm,
            steps: vec![],
        };
        let commands: Vec<_> = report.next_steps().into_iter().map(|s| s.command).collect();
        assert_eq!(commands, ["pnpm run dev", "pnpm run build", "pnpm start"]);
    }
}
