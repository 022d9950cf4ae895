//! The pass-2 build: resolve, prepare, build, verify, checksum.
//!
//! Stages run strictly in order and the first error aborts the run. A failed
//! run never leaves checksum files behind: stale ones are removed before the
//! tool runs and new ones are only written after verification.

use std::fmt;

use crate::checksum::{self, ChecksumFile};
use crate::command::{build_db_command, build_verify_command, CommandSpec};
use crate::config::{PipelineConfig, ToolConfig};
use crate::error::{PipelineError, Result};
use crate::paths::ArtifactPaths;
use crate::runner::ProcessRunner;
use crate::symbols::GeneSymbolSet;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, serde::Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum Stage {
    Start,
    EnvResolved,
    DirEnsured,
    ToolInvoked,
    Verified,
    Checksummed,
}

impl fmt::Display for Stage {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let s = match self {
            Stage::Start => "start",
            Stage::EnvResolved => "env-resolved",
            Stage::DirEnsured => "dir-ensured",
            Stage::ToolInvoked => "tool-invoked",
            Stage::Verified => "verified",
            Stage::Checksummed => "checksummed",
        };
        f.write_str(s)
    }
}

/// Outcome of a successful run.
#[derive(Debug, Clone, serde::Serialize)]
pub struct PipelineReport {
    pub stage: Stage,
    pub genome_release: String,
    pub symbol_count: usize,
    pub paths: ArtifactPaths,
    pub checksums: Vec<ChecksumFile>,
}

pub struct Pipeline<R> {
    config: PipelineConfig,
    tools: ToolConfig,
    symbols: GeneSymbolSet,
    paths: ArtifactPaths,
    runner: R,
    stage: Stage,
}

impl<R: ProcessRunner> Pipeline<R> {
    /// `config` is already resolved, so the pipeline starts at `EnvResolved`.
    pub fn new(
        config: PipelineConfig,
        tools: ToolConfig,
        symbols: GeneSymbolSet,
        runner: R,
    ) -> Self {
        let paths = ArtifactPaths::derive(&config);
        let mut pipeline = Self {
            config,
            tools,
            symbols,
            paths,
            runner,
            stage: Stage::Start,
        };
        pipeline.advance(Stage::EnvResolved);
        pipeline
    }

    pub fn stage(&self) -> Stage {
        self.stage
    }

    pub fn paths(&self) -> &ArtifactPaths {
        &self.paths
    }

    pub fn db_command(&self) -> CommandSpec {
        build_db_command(&self.tools.mehari, &self.paths, &self.config, &self.symbols)
    }

    pub fn verify_command(&self) -> CommandSpec {
        build_verify_command(&self.tools.zstd, &self.paths.artifact)
    }

    /// Commands `run` would execute, in order. No side effects.
    pub fn plan(&self) -> Vec<CommandSpec> {
        vec![self.db_command(), self.verify_command()]
    }

    pub fn run(mut self) -> Result<PipelineReport> {
        let result = self.run_stages();
        if let Err(e) = &result {
            tracing::error!(stage = %self.stage, "pipeline aborted: {}", e);
        }
        result
    }

    fn run_stages(&mut self) -> Result<PipelineReport> {
        self.paths.ensure_output_dir()?;
        self.paths.remove_stale_checksums()?;
        self.advance(Stage::DirEnsured);

        self.invoke_tool()?;
        self.advance(Stage::ToolInvoked);

        self.verify_artifact()?;
        self.advance(Stage::Verified);

        let checksums = self.write_checksums()?;
        self.advance(Stage::Checksummed);
        for c in &checksums {
            tracing::info!("{}", c.line);
        }

        Ok(PipelineReport {
            stage: self.stage,
            genome_release: self.config.genome_release.clone(),
            symbol_count: self.symbols.len(),
            paths: self.paths.clone(),
            checksums,
        })
    }

    fn invoke_tool(&self) -> Result<()> {
        tracing::info!(
            symbols = self.symbols.len(),
            release = %self.config.genome_release,
            "building transcript database"
        );
        let cmd = self.db_command();
        let status = self.runner.run(&cmd)?;
        if !status.success() {
            return Err(PipelineError::ToolFailed {
                program: cmd.program_name(),
                status,
            });
        }
        if !self.paths.artifact.is_file() {
            return Err(PipelineError::MissingFile {
                path: self.paths.artifact.clone(),
            });
        }
        if self.tools.require_report && !self.paths.report.is_file() {
            return Err(PipelineError::MissingFile {
                path: self.paths.report.clone(),
            });
        }
        Ok(())
    }

    fn verify_artifact(&self) -> Result<()> {
        let status = self.runner.run(&self.verify_command())?;
        if !status.success() {
            return Err(PipelineError::IntegrityFailed {
                path: self.paths.artifact.clone(),
                status,
            });
        }
        Ok(())
    }

    /// Both files are hashed before either `.sha256` is written, and a write
    /// failure removes whatever was already written.
    fn write_checksums(&self) -> Result<Vec<ChecksumFile>> {
        let checksums = vec![
            checksum::compute_checksum(&self.paths.artifact)?,
            checksum::compute_checksum(&self.paths.report)?,
        ];
        for (i, sum) in checksums.iter().enumerate() {
            if let Err(e) = checksum::write_checksum(sum) {
                for written in &checksums[..i] {
                    if let Err(rm) = std::fs::remove_file(&written.path) {
                        tracing::warn!(
                            path = %written.path.display(),
                            "could not remove checksum: {}",
                            rm
                        );
                    }
                }
                return Err(e);
            }
        }
        Ok(checksums)
    }

    fn advance(&mut self, next: Stage) {
        debug_assert!(next > self.stage);
        tracing::debug!(from = %self.stage, to = %next, "stage");
        self.stage = next;
    }
}
