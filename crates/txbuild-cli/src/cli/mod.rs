//! CLI for the pass-2 transcript database build.

mod commands;

use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

use commands::{
    run_check, run_checksum, run_completions, run_config_init, run_config_show, run_man,
    run_pipeline, run_symbols,
};

/// Top-level CLI.
#[derive(Debug, Parser)]
#[command(name = "txbuild", version)]
#[command(
    about = "Build the pass-2 transcript database with mehari, verify it and write checksums",
    long_about = None
)]
pub struct Cli {
    /// Append logs to this file instead of stderr.
    #[arg(long, global = true, value_name = "PATH")]
    pub log_file: Option<PathBuf>,

    /// Only log warnings and errors (RUST_LOG still wins).
    #[arg(short, long, global = true)]
    pub quiet: bool,

    /// Tool configuration file (default: ~/.config/txbuild/config.toml).
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    #[command(subcommand)]
    pub command: CliCommand,
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Run the build: invoke mehari, verify the artifact, write checksums.
    ///
    /// Reads DATA_DIR, GENOME_RELEASE and CDOT_FILENAME from the environment.
    Run {
        /// Print the commands that would run and exit without side effects.
        #[arg(long)]
        dry_run: bool,
        /// Print a JSON summary on stdout after a successful run.
        #[arg(long)]
        json: bool,
        /// Gene symbol file overriding the built-in list.
        #[arg(long, value_name = "FILE")]
        symbols: Option<PathBuf>,
    },

    /// Print the effective gene symbol list, one per line.
    Symbols {
        /// Print the generated `--gene-symbols=` flags instead.
        #[arg(long)]
        flags: bool,
        /// Gene symbol file overriding the built-in list.
        #[arg(long, value_name = "FILE")]
        symbols: Option<PathBuf>,
    },

    /// Write `<PATH>.sha256` for a file.
    Checksum {
        /// Path to the file.
        path: PathBuf,
    },

    /// Verify one or more `.sha256` files.
    Check {
        /// Checksum files.
        #[arg(required = true, num_args = 1..)]
        paths: Vec<PathBuf>,
    },

    /// Show or create the tool configuration.
    Config {
        #[command(subcommand)]
        action: ConfigAction,
    },

    /// Generate shell completions.
    Completions {
        /// Target shell.
        shell: clap_complete::Shell,
    },

    /// Print the man page (roff) to stdout.
    Man,
}

#[derive(Debug, Subcommand)]
pub enum ConfigAction {
    /// Print the effective configuration as TOML.
    Show,
    /// Write the default configuration file.
    Init {
        /// Overwrite an existing file.
        #[arg(long)]
        force: bool,
    },
}

impl Cli {
    pub fn run(self) -> Result<()> {
        let config = self.config.as_deref();
        match self.command {
            CliCommand::Run {
                dry_run,
                json,
                symbols,
            } => run_pipeline(config, symbols.as_deref(), dry_run, json)?,
            CliCommand::Symbols { flags, symbols } => {
                run_symbols(config, symbols.as_deref(), flags)?
            }
            CliCommand::Checksum { path } => run_checksum(&path)?,
            CliCommand::Check { paths } => run_check(&paths)?,
            CliCommand::Config { action } => match action {
                ConfigAction::Show => run_config_show(config)?,
                ConfigAction::Init { force } => run_config_init(config, force)?,
            },
            CliCommand::Completions { shell } => run_completions(shell),
            CliCommand::Man => run_man()?,
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests;
