//! Test environment builder for isolated infracheck testing.
//!
//! Provides `TestEnv` - a template tree in a temp directory, an isolated
//! HOME, and helpers to run the CLI or the library against it.

use std::path::{Path, PathBuf};
use std::process::{Command, Output};

use infracheck::config::LayoutConfig;
use infracheck::{PropertyRunner, RunOptions, VerifyReport, Workspace};
use tempfile::TempDir;

use super::fixtures;

/// Result of running an infracheck CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn is_success(&self) -> bool {
        self.success
    }

    /// Combine stdout and stderr
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parsed NDJSON lines of stdout
    pub fn events(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l)
                    .unwrap_or_else(|e| panic!("not JSON ({e}): {l}\nstdout:\n{}", self.stdout))
            })
            .collect()
    }
}

/// Isolated template tree plus HOME.
pub struct TestEnv {
    pub template_root: TempDir,
    pub home_dir: TempDir,
}

impl TestEnv {
    pub fn builder() -> TestEnvBuilder {
        TestEnvBuilder::new()
    }

    /// The template every property holds for
    pub fn compliant() -> Self {
        Self::builder().build()
    }

    pub fn root(&self) -> &Path {
        self.template_root.path()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.template_root.path().join(relative)
    }

    pub fn read_file(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    pub fn write_file(&self, relative: &str, content: &str) {
        let full_path = self.path(relative);
        if let Some(parent) = full_path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create directories");
        }
        std::fs::write(&full_path, content).expect("Failed to write file");
    }

    pub fn remove_file(&self, relative: &str) {
        let full_path = self.path(relative);
        if full_path.exists() {
            std::fs::remove_file(&full_path).expect("Failed to remove file");
        }
    }

    pub fn remove_dir(&self, relative: &str) {
        let full_path = self.path(relative);
        if full_path.exists() {
            std::fs::remove_dir_all(&full_path).expect("Failed to remove directory");
        }
    }

    /// Replace the first occurrence of `from` in a template file.
    pub fn edit_file(&self, relative: &str, from: &str, to: &str) {
        let content = self.read_file(relative);
        assert!(
            content.contains(from),
            "Cannot edit {}: '{}' not found in:\n{}",
            relative,
            from,
            content
        );
        self.write_file(relative, &content.replacen(from, to, 1));
    }

    /// Write `~/.config/infracheck/config.toml` inside the isolated HOME
    pub fn write_user_config(&self, content: &str) {
        let path = self.home_dir.path().join(".config/infracheck/config.toml");
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).expect("Failed to create config dir");
        }
        std::fs::write(&path, content).expect("Failed to write user config");
    }

    pub fn workspace(&self) -> Workspace {
        Workspace::new(self.root(), LayoutConfig::default())
    }

    /// Evaluate through the library with a small deterministic sample count.
    pub fn verify(&self, only: &[&str]) -> VerifyReport {
        self.verify_with(only, 32, Some(7))
    }

    /// Evaluate through the library with an explicit case budget and seed.
    pub fn verify_with(&self, only: &[&str], cases: u32, seed: Option<u64>) -> VerifyReport {
        let options = RunOptions {
            only: only.iter().map(|s| s.to_string()).collect(),
            cases,
            seed,
            ..RunOptions::default()
        };
        PropertyRunner::new(self.workspace())
            .execute(&options)
            .expect("selection failed")
    }

    /// Run infracheck against this template with `--root`
    pub fn run(&self, args: &[&str]) -> TestResult {
        let root = self.root().display().to_string();
        let mut full: Vec<&str> = vec!["--root", &root, "--color", "never", "--no-animation"];
        full.extend_from_slice(args);
        self.run_from(self.home_dir.path(), &full, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let root = self.root().display().to_string();
        let mut full: Vec<&str> = vec!["--root", &root, "--color", "never", "--no-animation"];
        full.extend_from_slice(args);
        self.run_from(self.home_dir.path(), &full, env_vars)
    }

    /// Run infracheck from `cwd` without adding any flags
    pub fn run_from(&self, cwd: &Path, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_infracheck"));
        cmd.current_dir(cwd)
            .args(args)
            .env("HOME", self.home_dir.path())
            .env("XDG_CONFIG_HOME", self.home_dir.path().join(".config"))
            .env_remove("INFRACHECK_CASES")
            .env_remove("INFRACHECK_SEED")
            .env_remove("INFRACHECK_PARALLEL")
            .env_remove("INFRACHECK_COLOR")
            .env_remove("INFRACHECK_LOG")
            .env_remove("GITHUB_ACTIONS")
            .env_remove("CI");

        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute infracheck");
        output_to_result(output)
    }
}

fn output_to_result(output: Output) -> TestResult {
    TestResult {
        success: output.status.success(),
        exit_code: output.status.code().unwrap_or(-1),
        stdout: String::from_utf8_lossy(&output.stdout).to_string(),
        stderr: String::from_utf8_lossy(&output.stderr).to_string(),
    }
}

/// Builder for TestEnv with fluent API
pub struct TestEnvBuilder {
    compliant: bool,
    files: Vec<(String, String)>,
    removed: Vec<String>,
    project_config: Option<String>,
}

impl TestEnvBuilder {
    pub fn new() -> Self {
        Self {
            compliant: true,
            files: Vec::new(),
            removed: Vec::new(),
            project_config: None,
        }
    }

    /// Start from an empty directory instead of the compliant template
    pub fn empty(mut self) -> Self {
        self.compliant = false;
        self
    }

    pub fn with_file(mut self, relative: &str, content: &str) -> Self {
        self.files.push((relative.to_string(), content.to_string()));
        self
    }

    pub fn without_file(mut self, relative: &str) -> Self {
        self.removed.push(relative.to_string());
        self
    }

    /// Write `infracheck.toml` at the template root
    pub fn with_project_config(mut self, toml: &str) -> Self {
        self.project_config = Some(toml.to_string());
        self
    }

    pub fn build(self) -> TestEnv {
        let env = TestEnv {
            template_root: TempDir::new().expect("Failed to create template temp dir"),
            home_dir: TempDir::new().expect("Failed to create home temp dir"),
        };

        if self.compliant {
            for (relative, content) in fixtures::compliant_template() {
                env.write_file(relative, &content);
            }
        }
        for (relative, content) in &self.files {
            env.write_file(relative, content);
        }
        for relative in &self.removed {
            env.remove_file(relative);
        }
        if let Some(config) = &self.project_config {
            env.write_file("infracheck.toml", config);
        }

        env
    }
}

impl Default for TestEnvBuilder {
    fn default() -> Self {
        Self::new()
    }
}
