//! Logging init: stderr by default (the command trace must be visible), or
//! append to a file given with `--log-file`.

use anyhow::{Context, Result};
use std::fs;
use std::io;
use std::path::Path;
use tracing_subscriber::fmt::writer::BoxMakeWriter;
use tracing_subscriber::fmt::MakeWriter;
use tracing_subscriber::EnvFilter;

const DEFAULT_FILTER: &str = "info,txbuild_core=debug,txbuild=debug";
const QUIET_FILTER: &str = "warn";

/// Writer that is either a file or stderr (used when file clone fails).
enum FileOrStderr {
    File(fs::File),
    Stderr,
}

impl io::Write for FileOrStderr {
    fn write(&mut self, buf: &[u8]) -> io::Result<usize> {
        match self {
            FileOrStderr::File(f) => f.write(buf),
            FileOrStderr::Stderr => io::stderr().lock().write(buf),
        }
    }

    fn flush(&mut self) -> io::Result<()> {
        match self {
            FileOrStderr::File(f) => f.flush(),
            FileOrStderr::Stderr => io::stderr().lock().flush(),
        }
    }
}

struct FileMakeWriter(fs::File);

impl<'a> MakeWriter<'a> for FileMakeWriter {
    type Writer = FileOrStderr;

    fn make_writer(&'a self) -> Self::Writer {
        self.0
            .try_clone()
            .map(FileOrStderr::File)
            .unwrap_or(FileOrStderr::Stderr)
    }
}

fn env_filter(quiet: bool) -> EnvFilter {
    let fallback = if quiet { QUIET_FILTER } else { DEFAULT_FILTER };
    EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(fallback))
}

/// Initialize structured logging. `RUST_LOG` wins over `quiet`.
pub fn init_logging(log_file: Option<&Path>, quiet: bool) -> Result<()> {
    let (writer, ansi) = match log_file {
        Some(path) => {
            if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
                fs::create_dir_all(parent)
                    .with_context(|| format!("create log dir {}", parent.display()))?;
            }
            let file = fs::OpenOptions::new()
                .create(true)
                .append(true)
                .open(path)
                .with_context(|| format!("open log file {}", path.display()))?;
            (BoxMakeWriter::new(FileMakeWriter(file)), false)
        }
        None => (BoxMakeWriter::new(io::stderr), true),
    };

    tracing_subscriber::fmt()
        .with_env_filter(env_filter(quiet))
        .with_writer(writer)
        .with_ansi(ansi)
        .with_target(false)
        .init();

    if let Some(path) = log_file {
        tracing::debug!("logging to {}", path.display());
    }
    Ok(())
}

/// Stderr-only fallback when `init_logging` fails, so the CLI doesn't crash.
pub fn init_logging_stderr() {
    tracing_subscriber::fmt()
        .with_env_filter(env_filter(false))
        .with_writer(io::stderr)
        .with_ansi(false)
        .init();
}
