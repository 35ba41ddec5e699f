//! Test environment builder for isolated stackctl runs.

use std::path::{Path, PathBuf};
use std::process::Command;

use tempfile::TempDir;

/// Result of running a stackctl CLI command
#[derive(Debug)]
pub struct TestResult {
    pub success: bool,
    pub exit_code: i32,
    pub stdout: String,
    pub stderr: String,
}

impl TestResult {
    pub fn combined_output(&self) -> String {
        format!("{}\n{}", self.stdout, self.stderr)
    }

    /// Parse stdout as newline-delimited JSON
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|line| !line.trim().is_empty())
            .map(|line| {
                serde_json::from_str(line)
                    .unwrap_or_else(|e| panic!("not JSON: {line:?}: {e}\nstdout:\n{}", self.stdout))
            })
            .collect()
    }
}

pub struct TestEnv {
    pub project_root: TempDir,
    pub home_dir: TempDir,
    extra_env: Vec<(String, String)>,
}

impl TestEnv {
    pub fn new() -> Self {
        Self {
            project_root: TempDir::new().expect("Failed to create project dir"),
            home_dir: TempDir::new().expect("Failed to create home dir"),
            extra_env: Vec::new(),
        }
    }

    /// Point the client at `host` through the environment
    pub fn with_host(mut self, host: &str) -> Self {
        self.extra_env
            .push(("STACKCTL_HOST".to_string(), host.to_string()));
        self
    }

    pub fn project_path(&self, relative: &str) -> PathBuf {
        self.project_root.path().join(relative)
    }

    pub fn home_path(&self, relative: &str) -> PathBuf {
        self.home_dir.path().join(relative)
    }

    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_from(self.project_root.path(), args)
    }

    pub fn run_from(&self, cwd: &Path, args: &[&str]) -> TestResult {
        let mut cmd = Command::new(env!("CARGO_BIN_EXE_stackctl"));
        cmd.current_dir(cwd)
            .args(args)
            .env("STACKCTL_TEST_HOME", self.home_dir.path())
            .env("NO_COLOR", "1")
            .env_remove("STACKCTL_HOST")
            .env_remove("STACKCTL_TOKEN");
        for (key, value) in &self.extra_env {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute stackctl");
        TestResult {
            success: output.status.success(),
            exit_code: output.status.code().unwrap_or(-1),
            stdout: String::from_utf8_lossy(&output.stdout).to_string(),
            stderr: String::from_utf8_lossy(&output.stderr).to_string(),
        }
    }

    pub fn write_project_file(&self, relative: &str, content: &str) -> PathBuf {
        write_file(&self.project_path(relative), content)
    }

    pub fn write_home_file(&self, relative: &str, content: &str) -> PathBuf {
        write_file(&self.home_path(relative), content)
    }

    /// Stored deploy status of `stack`, if any
    pub fn read_status(&self, stack: &str) -> Option<serde_json::Value> {
        let path = self.home_path(&format!(".stackctl/stacks/{}.json", stack));
        let content = std::fs::read_to_string(path).ok()?;
        Some(serde_json::from_str(&content).expect("status file is not JSON"))
    }
}

fn write_file(path: &Path, content: &str) -> PathBuf {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
    path.to_path_buf()
}
