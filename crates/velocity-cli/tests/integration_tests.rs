//! Integration tests for the create-velocity-app binary.

use std::fs;
use std::path::Path;
use std::process::Command as Process;

use assert_cmd::cargo;
use predicates::prelude::*;
use tempfile::TempDir;

fn cli() -> assert_cmd::Command {
    let mut cmd = cargo::cargo_bin_cmd!("create-velocity-app");
    cmd.env_remove("npm_config_user_agent")
        .env_remove("VELOCITY__TEMPLATE__SOURCE")
        .env("NO_COLOR", "1");
    cmd
}

fn git_available() -> bool {
    Process::new("git")
        .arg("--version")
        .output()
        .map(|o| o.status.success())
        .unwrap_or(false)
}

fn git(args: &[&str], cwd: &Path) {
    let ok = Process::new("git")
        .args(args)
        .current_dir(cwd)
        .status()
        .expect("spawn git")
        .success();
    assert!(ok, "git {:?} failed", args);
}

/// A local repository shaped like the boilerplate.
fn boilerplate_repo() -> TempDir {
    let repo = TempDir::new().unwrap();
    let root = repo.path();
    fs::write(
        root.join("package.json"),
        "{\n  \"name\": \"velocity-boilerplate\",\n  \"private\": true\n}\n",
    )
    .unwrap();
    fs::write(root.join(".eslintrc"), "{}\n").unwrap();
    fs::write(root.join(".prettierrc"), "{}\n").unwrap();
    fs::write(root.join("example.env"), "PORT=3000\n").unwrap();
    fs::write(root.join("package-lock.json"), "{}\n").unwrap();
    fs::write(root.join(".gitignore"), "node_modules\n").unwrap();

    git(&["-c", "init.defaultBranch=main", "init", "--quiet"], root);
    git(&["add", "."], root);
    git(
        &[
            "-c",
            "user.name=Velocity Tests",
            "-c",
            "user.email=tests@example.com",
            "commit",
            "--quiet",
            "-m",
            "boilerplate",
        ],
        root,
    );
    repo
}

#[test]
fn test_help_flag() {
    cli()
        .arg("--help")
        .assert()
        .success()
        .stdout(predicate::str::contains("create-velocity-app"))
        .stdout(predicate::str::contains("--use-pnpm"))
        .stdout(predicate::str::contains("--skip-install"))
        .stdout(predicate::str::contains("--disable-git"));
}

#[test]
fn test_version_flag() {
    for flag in ["--version", "-v"] {
        cli()
            .arg(flag)
            .assert()
            .success()
            .stdout(predicate::str::contains(env!("CARGO_PKG_VERSION")));
    }
}

#[test]
fn test_completions() {
    cli()
        .args(["--completions", "bash"])
        .assert()
        .success()
        .stdout(predicate::str::contains("create-velocity-app"));
}

#[test]
fn test_create_from_local_template() {
    if !git_available() {
        eprintln!("git not available; skipping");
        return;
    }
    let repo = boilerplate_repo();
    let work = TempDir::new().unwrap();

    cli()
        .current_dir(work.path())
        .env(
            "VELOCITY__TEMPLATE__SOURCE",
            format!("file://{}", repo.path().display()),
        )
        .args([
            "my-app",
            "--yes",
            "--use-yarn",
            "--skip-install",
            "--disable-git",
        ])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success! Created my-app at"))
        .stdout(predicate::str::contains("yarn dev"))
        .stdout(predicate::str::contains("We suggest that you begin by typing:"));

    let app = work.path().join("my-app");
    let manifest = fs::read_to_string(app.join("package.json")).unwrap();
    assert!(manifest.contains("\"name\": \"my-app\""));
    assert!(app.join(".eslintrc").exists());
    assert_eq!(fs::read_to_string(app.join(".env")).unwrap(), "PORT=3000\n");
    assert!(!app.join(".gitignore").exists());
    assert!(!app.join(".git").exists());
}

#[test]
fn test_no_color_env_is_accepted() {
    if !git_available() {
        eprintln!("git not available; skipping");
        return;
    }
    let repo = boilerplate_repo();
    let work = TempDir::new().unwrap();

    cli()
        .current_dir(work.path())
        .env("NO_COLOR", "1")
        .env(
            "VELOCITY__TEMPLATE__SOURCE",
            format!("file://{}", repo.path().display()),
        )
        .args(["my-app", "--yes", "--skip-install", "--disable-git"])
        .assert()
        .success()
        .stdout(predicate::str::contains("Success! Created my-app at"))
        .stdout(predicate::str::contains("\u{1b}[").not());
}

#[test]
fn test_quiet_create_prints_nothing() {
    if !git_available() {
        eprintln!("git not available; skipping");
        return;
    }
    let repo = boilerplate_repo();
    let work = TempDir::new().unwrap();

    cli()
        .current_dir(work.path())
        .env(
            "VELOCITY__TEMPLATE__SOURCE",
            format!("file://{}", repo.path().display()),
        )
        .args(["quiet-app", "--yes", "--skip-install", "--disable-git", "-q"])
        .assert()
        .success()
        .stdout(predicate::str::is_empty());

    assert!(work.path().join("quiet-app/.env").exists());
}
