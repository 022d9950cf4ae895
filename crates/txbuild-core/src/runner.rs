//! Running external processes.
//!
//! `ProcessRunner` is the seam between the pipeline and the OS. The system
//! implementation blocks until the child exits; there is no timeout.

use std::fmt;
use std::process::{Command, ExitStatus, Stdio};

use crate::command::{CommandSpec, StdoutMode};
use crate::error::{PipelineError, Result};

/// Exit status of a finished child. `code == None` means it was killed by a signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, serde::Serialize)]
pub struct RunStatus {
    pub code: Option<i32>,
}

impl RunStatus {
    pub fn from_code(code: i32) -> Self {
        Self { code: Some(code) }
    }

    pub fn signaled() -> Self {
        Self { code: None }
    }

    pub fn success(&self) -> bool {
        self.code == Some(0)
    }
}

impl From<ExitStatus> for RunStatus {
    fn from(status: ExitStatus) -> Self {
        Self {
            code: status.code(),
        }
    }
}

impl fmt::Display for RunStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.code {
            Some(code) => write!(f, "exit code {code}"),
            None => write!(f, "terminated by signal"),
        }
    }
}

pub trait ProcessRunner {
    /// Run `cmd` to completion. `Err` only when it could not be started.
    fn run(&self, cmd: &CommandSpec) -> Result<RunStatus>;
}

impl<R: ProcessRunner + ?Sized> ProcessRunner for &R {
    fn run(&self, cmd: &CommandSpec) -> Result<RunStatus> {
        (**self).run(cmd)
    }
}

/// Spawns real processes with inherited stderr.
#[derive(Debug, Default, Clone, Copy)]
pub struct SystemRunner;

impl ProcessRunner for SystemRunner {
    fn run(&self, cmd: &CommandSpec) -> Result<RunStatus> {
        tracing::info!("+ {}", cmd);
        let stdout = match cmd.stdout {
            StdoutMode::Inherit => Stdio::inherit(),
            StdoutMode::Discard => Stdio::null(),
        };
        let status = Command::new(&cmd.program)
            .args(&cmd.args)
            .stdout(stdout)
            .status()
            .map_err(|source| PipelineError::Spawn {
                program: cmd.program_name(),
                source,
            })?;
        let status = RunStatus::from(status);
        tracing::debug!(program = %cmd.program_name(), %status, "process finished");
        Ok(status)
    }
}
