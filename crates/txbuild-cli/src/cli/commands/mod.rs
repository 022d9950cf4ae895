//! CLI command handlers. Each command is in its own file.

mod check;
mod checksum;
mod completions;
mod config;
mod run;
mod symbols;

pub use check::run_check;
pub use checksum::run_checksum;
pub use completions::{run_completions, run_man};
pub use config::{run_config_init, run_config_show};
pub use run::run_pipeline;
pub use symbols::run_symbols;
