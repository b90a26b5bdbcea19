//! Subprocess command runner
//!
//! Implements the `CommandRunner` port with `std::process`. Toolchain steps run
//! with captured output; launched hosts inherit the terminal. An optional
//! timeout kills the child and reports no exit code.

use std::io::Read;
use std::process::{Child, Command, ExitStatus, Stdio};
use std::thread;
use std::time::{Duration, Instant};

use tracing::debug;

use crate::domain::ports::{CommandOutput, CommandRunner, CommandSpec, ToolchainFailure};

const POLL_INTERVAL: Duration = Duration::from_millis(25);

/// Lines of stderr kept in failure messages
const STDERR_TAIL_LINES: usize = 20;

/// Runs commands as local child processes
#[derive(Debug, Clone, Copy, Default)]
pub struct ProcessCommandRunner;

impl ProcessCommandRunner {
    pub fn new() -> Self {
        Self
    }
}

impl CommandRunner for ProcessCommandRunner {
    fn run(&self, spec: &CommandSpec) -> Result<CommandOutput, ToolchainFailure> {
        debug!(command = %spec.display(), cwd = %spec.cwd.display(), "spawning");

        let mut child = command(spec)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .spawn()
            .map_err(|e| spawn_failure(spec, e))?;

        let stdout = drain(child.stdout.take());
        let stderr = drain(child.stderr.take());

        let status = wait_or_kill(&mut child, spec.timeout)?;

        let output = CommandOutput {
            stdout: stdout.join().unwrap_or_default(),
            stderr: stderr.join().unwrap_or_default(),
        };

        if status.success() {
            return Ok(output);
        }
        let message = format!("{} failed:\n{}", spec.display(), tail(&output.stderr));
        Err(match status.code() {
            Some(code) => ToolchainFailure::exited(code, message),
            None => ToolchainFailure::other(message),
        })
    }

    fn launch(&self, spec: &CommandSpec) -> Result<(), ToolchainFailure> {
        debug!(command = %spec.display(), cwd = %spec.cwd.display(), "launching attached");

        let mut child = command(spec)
            .stdin(Stdio::inherit())
            .stdout(Stdio::inherit())
            .stderr(Stdio::inherit())
            .spawn()
            .map_err(|e| spawn_failure(spec, e))?;

        let status = wait_or_kill(&mut child, spec.timeout)?;
        if status.success() {
            return Ok(());
        }
        let message = format!("{} exited with {}", spec.display(), status);
        Err(match status.code() {
            Some(code) => ToolchainFailure::exited(code, message),
            None => ToolchainFailure::other(message),
        })
    }
}

fn command(spec: &CommandSpec) -> Command {
    let mut command = Command::new(&spec.program);
    command
        .args(&spec.args)
        .current_dir(&spec.cwd)
        .envs(spec.env.iter().map(|(k, v)| (k.as_str(), v.as_str())));
    command
}

fn spawn_failure(spec: &CommandSpec, e: std::io::Error) -> ToolchainFailure {
    ToolchainFailure::other(format!("failed to run {}: {}", spec.program, e))
}

fn wait_or_kill(child: &mut Child, timeout: Option<Duration>) -> Result<ExitStatus, ToolchainFailure> {
    wait(child, timeout).map_err(|message| {
        let _ = child.kill();
        let _ = child.wait();
        ToolchainFailure::other(message)
    })
}

fn drain<R: Read + Send + 'static>(pipe: Option<R>) -> thread::JoinHandle<String> {
    thread::spawn(move || {
        let mut buf = Vec::new();
        if let Some(mut pipe) = pipe {
            let _ = pipe.read_to_end(&mut buf);
        }
        String::from_utf8_lossy(&buf).into_owned()
    })
}

fn wait(child: &mut Child, timeout: Option<Duration>) -> Result<ExitStatus, String> {
    let Some(timeout) = timeout else {
        return child.wait().map_err(|e| e.to_string());
    };
    let deadline = Instant::now() + timeout;
    loop {
        match child.try_wait() {
            Ok(Some(status)) => return Ok(status),
            Ok(None) if Instant::now() >= deadline => {
                return Err(format!("timed out after {}s", timeout.as_secs()));
            }
            Ok(None) => thread::sleep(POLL_INTERVAL),
            Err(e) => return Err(e.to_string()),
        }
    }
}

fn tail(text: &str) -> String {
    let lines: Vec<&str> = text.lines().collect();
    let start = lines.len().saturating_sub(STDERR_TAIL_LINES);
    lines[start..].join("\n")
}
