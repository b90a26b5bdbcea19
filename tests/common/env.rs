//! Test project builder for isolated bridgewright runs.
//!
//! Provides `TestProject` - a temp project tree plus an isolated user config
//! directory, with helpers to run the `bridgewright` binary against it.

use std::path::{Path, PathBuf};
use std::io::Write;
use std::process::{Command, Output, Stdio};

use tempfile::TempDir;

/// Result of running a bridgewright CLI command
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

    /// Parse stdout as NDJSON
    pub fn json_lines(&self) -> Vec<serde_json::Value> {
        self.stdout
            .lines()
            .filter(|l| !l.trim().is_empty())
            .map(|l| {
                serde_json::from_str(l)
                    .unwrap_or_else(|e| panic!("line is not JSON ({}): {}", e, l))
            })
            .collect()
    }

    /// The last JSON document on stdout (the command's summary)
    pub fn json(&self) -> serde_json::Value {
        self.json_lines()
            .pop()
            .unwrap_or_else(|| panic!("no JSON on stdout:\n{}", self.stdout))
    }

    /// JSON events with the given `event` field
    pub fn events(&self, name: &str) -> Vec<serde_json::Value> {
        self.json_lines()
            .into_iter()
            .filter(|v| v["event"] == name)
            .collect()
    }
}

/// Isolated project with its own user config directory
pub struct TestProject {
    pub root: TempDir,
    pub config_dir: TempDir,
    bin: PathBuf,
}

impl TestProject {
    pub fn builder() -> TestProjectBuilder {
        TestProjectBuilder::new()
    }

    pub fn path(&self, relative: &str) -> PathBuf {
        self.root.path().join(relative)
    }

    /// Run bridgewright from the project root
    pub fn run(&self, args: &[&str]) -> TestResult {
        self.run_from(self.root.path(), args)
    }

    pub fn run_from(&self, cwd: &Path, args: &[&str]) -> TestResult {
        self.run_from_with_env(cwd, args, &[])
    }

    pub fn run_with_env(&self, args: &[&str], env_vars: &[(&str, &str)]) -> TestResult {
        self.run_from_with_env(self.root.path(), args, env_vars)
    }

    pub fn run_from_with_env(
        &self,
        cwd: &Path,
        args: &[&str],
        env_vars: &[(&str, &str)],
    ) -> TestResult {
        let mut cmd = self.command(cwd, args);
        for (key, value) in env_vars {
            cmd.env(key, value);
        }

        let output = cmd.output().expect("Failed to execute bridgewright");
        output_to_result(output)
    }

    /// Run with `input` on stdin
    pub fn run_with_stdin(&self, args: &[&str], input: &str) -> TestResult {
        let mut child = self
            .command(self.root.path(), args)
            .stdin(Stdio::piped())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .expect("Failed to execute bridgewright");
        child
            .stdin
            .take()
            .expect("stdin is piped")
            .write_all(input.as_bytes())
            .expect("Failed to write stdin");
        let output = child.wait_with_output().expect("Failed to wait for bridgewright");
        output_to_result(output)
    }

    fn command(&self, cwd: &Path, args: &[&str]) -> Command {
        let mut cmd = Command::new(&self.bin);
        cmd.current_dir(cwd)
            .args(args)
            .env("BRIDGEWRIGHT_CONFIG_DIR", self.config_dir.path())
            .env_remove("BRIDGEWRIGHT_PACKAGE_PREFIX")
            .env_remove("BRIDGEWRIGHT_PLATFORM")
            .env_remove("BRIDGEWRIGHT_CONFLICT_POLICY")
            .env_remove("BRIDGEWRIGHT_VERBOSITY")
            .env_remove("RUST_LOG");
        cmd
    }

    pub fn read(&self, relative: &str) -> String {
        std::fs::read_to_string(self.path(relative))
            .unwrap_or_else(|e| panic!("Failed to read {}: {}", relative, e))
    }

    pub fn write(&self, relative: &str, content: &str) {
        write_file(&self.path(relative), content);
    }

    pub fn remove(&self, relative: &str) {
        std::fs::remove_file(self.path(relative)).expect("Failed to remove file");
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

fn write_file(path: &Path, content: &str) {
    if let Some(parent) = path.parent() {
        std::fs::create_dir_all(parent).expect("Failed to create directories");
    }
    std::fs::write(path, content).expect("Failed to write file");
}

/// Builder for TestProject with fluent API
pub struct TestProjectBuilder {
    sources: Vec<(String, String)>,
    files: Vec<(String, String)>,
    config: Option<String>,
}

impl TestProjectBuilder {
    pub fn new() -> Self {
        Self {
            sources: Vec::new(),
            files: Vec::new(),
            config: None,
        }
    }

    /// Java source under `java/src/main/java`
    pub fn with_source(mut self, relative: &str, content: &str) -> Self {
        self.sources.push((relative.to_string(), content.to_string()));
        self
    }

    /// Any file relative to the project root
    pub fn with_file(mut self, relative: &str, content: &str) -> Self {
        self.files.push((relative.to_string(), content.to_string()));
        self
    }

    /// Contents of `bridgewright.toml`
    pub fn with_config(mut self, config: &str) -> Self {
        self.config = Some(config.to_string());
        self
    }

    pub fn build(self) -> TestProject {
        let root = TempDir::new().expect("Failed to create project dir");
        let config_dir = TempDir::new().expect("Failed to create config dir");

        for (relative, content) in &self.sources {
            write_file(
                &root.path().join("java/src/main/java").join(relative),
                content,
            );
        }
        for (relative, content) in &self.files {
            write_file(&root.path().join(relative), content);
        }
        if let Some(config) = &self.config {
            write_file(&root.path().join("bridgewright.toml"), config);
        }

        TestProject {
            root,
            config_dir,
            bin: PathBuf::from(env!("CARGO_BIN_EXE_bridgewright")),
        }
    }
}

impl Default for TestProjectBuilder {
    fn default() -> Self {
        Self::new()
    }
}
