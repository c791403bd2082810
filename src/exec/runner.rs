//! Shell command execution.
//!
//! # Responsibilities
//! - Launch one external command and wait for it to finish
//! - Capture stdout/stderr and the exit status
//! - Enforce the configured timeout, killing the child on expiry
//!
//! # Design Decisions
//! - `run` is infallible by signature: both terminal outcomes are values,
//!   so a broken command can never unwind through the request handler
//! - Commands go through `sh -c`, so a configured entry may carry arguments,
//!   redirections, and pipelines
//! - No timeout is enforced unless one was configured

use std::process::Stdio;
use std::time::Duration;

use async_trait::async_trait;
use thiserror::Error;
use tokio::process::Command;

/// Why a command did not succeed.
#[derive(Debug, Error)]
pub enum CommandError {
    #[error("failed to launch: {0}")]
    Launch(#[source] std::io::Error),

    #[error("exited with {0}")]
    NonZeroExit(std::process::ExitStatus),

    #[error("timed out after {0:?}")]
    Timeout(Duration),
}

/// Terminal outcome of one command invocation.
///
/// `output` is the combined stdout and stderr captured before the command
/// finished or failed.
#[derive(Debug)]
pub enum CommandOutcome {
    Success { output: String },
    Failure { error: CommandError, output: String },
}

impl CommandOutcome {
    pub fn is_success(&self) -> bool {
        matches!(self, CommandOutcome::Success { .. })
    }
}

/// Execution port between the dispatcher and the operating system.
#[async_trait]
pub trait CommandRunner: Send + Sync {
    /// Run one command to completion and report its outcome.
    async fn run(&self, command: &str) -> CommandOutcome;
}

/// Runs commands through the system shell.
pub struct ShellRunner {
    timeout: Option<Duration>,
}

impl ShellRunner {
    /// `timeout` bounds each command's runtime; `None` waits indefinitely.
    pub fn new(timeout: Option<Duration>) -> Self {
        Self { timeout }
    }
}

#[async_trait]
impl CommandRunner for ShellRunner {
    async fn run(&self, command: &str) -> CommandOutcome {
        let mut cmd = Command::new("sh");
        cmd.arg("-c")
            .arg(command)
            .stdin(Stdio::null())
            .stdout(Stdio::piped())
            .stderr(Stdio::piped())
            .kill_on_drop(true);

        let child = match cmd.spawn() {
            Ok(child) => child,
            Err(e) => {
                return CommandOutcome::Failure {
                    error: CommandError::Launch(e),
                    output: String::new(),
                }
            }
        };

        let wait = child.wait_with_output();
        let output = match self.timeout {
            Some(limit) => match tokio::time::timeout(limit, wait).await {
                Ok(result) => result,
                // Dropping the wait future reaps the child via kill_on_drop.
                Err(_) => {
                    return CommandOutcome::Failure {
                        error: CommandError::Timeout(limit),
                        output: String::new(),
                    }
                }
            },
            None => wait.await,
        };

        let output = match output {
            Ok(output) => output,
            Err(e) => {
                return CommandOutcome::Failure {
                    error: CommandError::Launch(e),
                    output: String::new(),
                }
            }
        };

        let combined = combine_streams(&output.stdout, &output.stderr);
        if output.status.success() {
            CommandOutcome::Success { output: combined }
        } else {
            CommandOutcome::Failure {
                error: CommandError::NonZeroExit(output.status),
                output: combined,
            }
        }
    }
}

fn combine_streams(stdout: &[u8], stderr: &[u8]) -> String {
    let mut combined = String::from_utf8_lossy(stdout).into_owned();
    if !stderr.is_empty() {
        if !combined.is_empty() && !combined.ends_with('\n') {
            combined.push('\n');
        }
        combined.push_str(&String::from_utf8_lossy(stderr));
    }
    combined
}
