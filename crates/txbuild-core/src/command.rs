//! Pure builders for the external commands the pipeline runs.
//!
//! Nothing in this module touches the filesystem or spawns processes.

use std::ffi::OsString;
use std::fmt;
use std::path::Path;

use crate::config::PipelineConfig;
use crate::paths::ArtifactPaths;
use crate::symbols::GeneSymbolSet;

/// What happens to a child's stdout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum StdoutMode {
    #[default]
    Inherit,
    Discard,
}

/// One process invocation: program, arguments, stdout handling.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandSpec {
    pub program: OsString,
    pub args: Vec<OsString>,
    pub stdout: StdoutMode,
}

impl CommandSpec {
    pub fn new(program: impl Into<OsString>) -> Self {
        Self {
            program: program.into(),
            args: Vec::new(),
            stdout: StdoutMode::Inherit,
        }
    }

    pub fn arg(mut self, arg: impl Into<OsString>) -> Self {
        self.args.push(arg.into());
        self
    }

    pub fn args<I, S>(mut self, args: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<OsString>,
    {
        self.args.extend(args.into_iter().map(Into::into));
        self
    }

    pub fn discard_stdout(mut self) -> Self {
        self.stdout = StdoutMode::Discard;
        self
    }

    /// Program name for error messages.
    pub fn program_name(&self) -> String {
        self.program.to_string_lossy().into_owned()
    }
}

impl fmt::Display for CommandSpec {
    /// Shell-like rendering for the command trace.
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", shell_quote(&self.program.to_string_lossy()))?;
        for arg in &self.args {
            write!(f, " {}", shell_quote(&arg.to_string_lossy()))?;
        }
        if self.stdout == StdoutMode::Discard {
            write!(f, " > /dev/null")?;
        }
        Ok(())
    }
}

fn shell_quote(s: &str) -> String {
    let plain = !s.is_empty()
        && s.chars()
            .all(|c| c.is_ascii_alphanumeric() || "-_./=:,+@%".contains(c));
    if plain {
        s.to_string()
    } else {
        format!("'{}'", s.replace('\'', r"'\''"))
    }
}

/// `mehari db create txs ...` with one `--gene-symbols=` flag per symbol.
pub fn build_db_command(
    program: &Path,
    paths: &ArtifactPaths,
    config: &PipelineConfig,
    symbols: &GeneSymbolSet,
) -> CommandSpec {
    CommandSpec::new(program)
        .args(["db", "create", "txs"])
        .arg("--path-out")
        .arg(&paths.artifact)
        .arg("--path-seqrepo-instance")
        .arg(config.seqrepo_instance_path())
        .arg("--path-cdot-json")
        .arg(config.cdot_json_path())
        .arg("--genome-release")
        .arg(&config.genome_release)
        .args(symbols.to_flags())
}

/// `zstd -d -c <artifact> > /dev/null`
pub fn build_verify_command(program: &Path, artifact: &Path) -> CommandSpec {
    CommandSpec::new(program)
        .args(["-d", "-c"])
        .arg(artifact)
        .discard_stdout()
}
