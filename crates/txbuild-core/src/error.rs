//! Error type shared by every pipeline step.
//!
//! Each variant maps to one way the run can abort. The driver stops at the
//! first error; nothing here is retried.

use std::io;
use std::path::PathBuf;

use crate::runner::RunStatus;

#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    /// Required environment variable is unset or empty.
    #[error("environment variable {name} is not set or empty")]
    MissingEnv { name: &'static str },

    /// External program ran but exited non-zero (or was killed).
    #[error("{program} failed: {status}")]
    ToolFailed { program: String, status: RunStatus },

    /// External program could not be started at all.
    #[error("could not start {program}")]
    Spawn {
        program: String,
        #[source]
        source: io::Error,
    },

    /// Decompressing the artifact failed even though the build tool succeeded.
    #[error("integrity check of {} failed: {status}", path.display())]
    IntegrityFailed { path: PathBuf, status: RunStatus },

    #[error("required file {} does not exist", path.display())]
    MissingFile { path: PathBuf },

    #[error("checksum mismatch for {}: expected {expected}, got {actual}", path.display())]
    ChecksumMismatch {
        path: PathBuf,
        expected: String,
        actual: String,
    },

    #[error("malformed checksum file {}", path.display())]
    MalformedChecksum { path: PathBuf },

    #[error("could not read gene symbol list {}", path.display())]
    SymbolList {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("gene symbol list {} contains no symbols", path.display())]
    EmptySymbolList { path: PathBuf },

    #[error("{context}")]
    Io {
        context: String,
        #[source]
        source: io::Error,
    },
}

impl PipelineError {
    pub(crate) fn io(context: impl Into<String>, source: io::Error) -> Self {
        PipelineError::Io {
            context: context.into(),
            source,
        }
    }
}

pub type Result<T, E = PipelineError> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn missing_env_names_variable() {
        let e = PipelineError::MissingEnv { name: "DATA_DIR" };
        assert_eq!(e.to_string(), "environment variable DATA_DIR is not set or empty");
    }

    #[test]
    fn tool_failed_shows_exit_code() {
        let e = PipelineError::ToolFailed {
            program: "mehari".to_string(),
            status: RunStatus::from_code(3),
        };
        assert_eq!(e.to_string(), "mehari failed: exit code 3");
    }

    #[test]
    fn io_error_keeps_source() {
        use std::error::Error;
        let e = PipelineError::io(
            "create /x",
            io::Error::new(io::ErrorKind::PermissionDenied, "denied"),
        );
        assert_eq!(e.to_string(), "create /x");
        assert!(e.source().is_some());
    }
}
