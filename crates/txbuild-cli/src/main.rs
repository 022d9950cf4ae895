use clap::Parser;
use txbuild_core::logging;

mod cli;

use crate::cli::Cli;

fn main() {
    let cli = Cli::parse();

    // Initialize logging as early as possible; the flags decide where it goes.
    if let Err(err) = logging::init_logging(cli.log_file.as_deref(), cli.quiet) {
        logging::init_logging_stderr();
        tracing::warn!("falling back to stderr logging: {:#}", err);
    }

    if let Err(err) = cli.run() {
        eprintln!("txbuild error: {:#}", err);
        std::process::exit(1);
    }
}
