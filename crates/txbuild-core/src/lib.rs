pub mod config;
pub mod error;
pub mod logging;

pub mod checksum;
pub mod command;
pub mod paths;
pub mod pipeline;
pub mod runner;
pub mod symbols;

pub use error::{PipelineError, Result};
