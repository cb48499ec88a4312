//! External command invocations and their execution.
//!
//! An invocation is an immutable program-plus-arguments value; the runner
//! executes one invocation, captures stdout and stderr separately, and
//! classifies the outcome. One invocation, one outcome: no retries.

use std::fmt;
use std::io;
use std::path::Path;
use std::process::Command;

use thiserror::Error;

/// One external-process call, immutable once built.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandInvocation {
    program: String,
    args: Vec<String>,
}

impl CommandInvocation {
    /// Create an invocation from a program name and its ordered arguments.
    pub fn new(program: impl Into<String>, args: Vec<String>) -> Self {
        Self {
            program: program.into(),
            args,
        }
    }

    /// The program to execute.
    pub fn program(&self) -> &str {
        &self.program
    }

    /// The ordered argument list.
    pub fn args(&self) -> &[String] {
        &self.args
    }

    /// Whether any argument equals the given path, for inspecting built
    /// invocations in tests and reports.
    pub fn references_path(&self, path: &Path) -> bool {
        let rendered = path.to_string_lossy();
        self.args.iter().any(|arg| *arg == rendered)
    }
}

impl fmt::Display for CommandInvocation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.program)?;
        for arg in &self.args {
            write!(f, " {arg}")?;
        }
        Ok(())
    }
}

/// Captured result of one successful invocation.
///
/// Created by the runner, consumed immediately by the caller.
#[derive(Debug, Clone)]
pub struct RunOutput {
    pub stdout: Vec<u8>,
    pub stderr: Vec<u8>,
    pub exit_code: i32,
}

impl RunOutput {
    /// Stdout as lossy UTF-8, for display.
    pub fn stdout_lossy(&self) -> String {
        String::from_utf8_lossy(&self.stdout).to_string()
    }
}

/// Errors raised while executing one invocation.
#[derive(Error, Debug)]
pub enum RunError {
    /// The process ran and exited with a failure status.
    #[error("{tool} failed with exit code {exit_code}: {stderr}")]
    CommandFailed {
        tool: String,
        exit_code: i32,
        stderr: String,
    },

    /// The process was interrupted before completion (killed by a signal).
    #[error("{tool} was interrupted before completion")]
    Cancelled { tool: String },

    /// The process could not be started at all.
    #[error("Failed to start {tool}: {source}")]
    Spawn {
        tool: String,
        #[source]
        source: io::Error,
    },
}

/// Result type for runner operations.
pub type RunResult<T> = Result<T, RunError>;

/// Executes one external command and classifies the outcome.
///
/// Implemented by `SystemRunner` for production; tests substitute mock
/// runners to observe which invocations a pipeline issues.
pub trait CommandRunner {
    fn run(&self, invocation: &CommandInvocation) -> RunResult<RunOutput>;
}

/// Runner backed by `std::process::Command`.
///
/// Command-line echoing is a constructor-time choice, not a process-wide
/// flag.
#[derive(Debug, Clone)]
pub struct SystemRunner {
    log_commands: bool,
}

impl SystemRunner {
    pub fn new() -> Self {
        Self { log_commands: true }
    }

    /// Control whether each command line is echoed at debug level.
    pub fn with_command_logging(mut self, enabled: bool) -> Self {
        self.log_commands = enabled;
        self
    }
}

impl Default for SystemRunner {
    fn default() -> Self {
        Self::new()
    }
}

impl CommandRunner for SystemRunner {
    fn run(&self, invocation: &CommandInvocation) -> RunResult<RunOutput> {
        if self.log_commands {
            tracing::debug!("Running: {}", invocation);
        }

        let output = Command::new(invocation.program())
            .args(invocation.args())
            .output()
            .map_err(|e| RunError::Spawn {
                tool: invocation.program().to_string(),
                source: e,
            })?;

        match output.status.code() {
            // No exit code means the child was killed by a signal.
            None => Err(RunError::Cancelled {
                tool: invocation.program().to_string(),
            }),
            Some(0) => Ok(RunOutput {
                stdout: output.stdout,
                stderr: output.stderr,
                exit_code: 0,
            }),
            Some(code) => Err(RunError::CommandFailed {
                tool: invocation.program().to_string(),
                exit_code: code,
                stderr: String::from_utf8_lossy(&output.stderr).to_string(),
            }),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn invocation_renders_as_command_line() {
        let invocation = CommandInvocation::new(
            "ffmpeg",
            vec!["-y".to_string(), "out.m4a".to_string()],
        );
        assert_eq!(invocation.to_string(), "ffmpeg -y out.m4a");
    }

    #[test]
    fn invocation_finds_referenced_paths() {
        let invocation =
            CommandInvocation::new("convert", vec!["xc:red".to_string(), "/tmp/c.png".to_string()]);
        assert!(invocation.references_path(Path::new("/tmp/c.png")));
        assert!(!invocation.references_path(Path::new("/tmp/other.png")));
    }

    #[test]
    fn run_error_displays_diagnostics() {
        let err = RunError::CommandFailed {
            tool: "ffmpeg".to_string(),
            exit_code: 1,
            stderr: "Unknown encoder".to_string(),
        };
        let msg = err.to_string();
        assert!(msg.contains("ffmpeg"));
        assert!(msg.contains("exit code 1"));
        assert!(msg.contains("Unknown encoder"));
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_captures_stdout() {
        let runner = SystemRunner::new().with_command_logging(false);
        let invocation = CommandInvocation::new(
            "sh",
            vec!["-c".to_string(), "echo hello".to_string()],
        );

        let output = runner.run(&invocation).unwrap();
        assert_eq!(output.exit_code, 0);
        assert_eq!(output.stdout_lossy().trim(), "hello");
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_separates_stderr_and_classifies_failure() {
        let runner = SystemRunner::new().with_command_logging(false);
        let invocation = CommandInvocation::new(
            "sh",
            vec!["-c".to_string(), "echo oops >&2; exit 7".to_string()],
        );

        match runner.run(&invocation) {
            Err(RunError::CommandFailed {
                tool,
                exit_code,
                stderr,
            }) => {
                assert_eq!(tool, "sh");
                assert_eq!(exit_code, 7);
                assert_eq!(stderr.trim(), "oops");
            }
            other => panic!("expected CommandFailed, got {other:?}"),
        }
    }

    #[cfg(unix)]
    #[test]
    fn system_runner_reports_missing_program_as_spawn_error() {
        let runner = SystemRunner::new().with_command_logging(false);
        let invocation = CommandInvocation::new("mediagen-no-such-tool", vec![]);

        assert!(matches!(
            runner.run(&invocation),
            Err(RunError::Spawn { .. })
        ));
    }
}
