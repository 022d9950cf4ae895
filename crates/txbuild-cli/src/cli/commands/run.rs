//! `txbuild run` – the pass-2 build.

use anyhow::{Context, Result};
use std::path::Path;
use txbuild_core::config::{self, PipelineConfig};
use txbuild_core::pipeline::Pipeline;
use txbuild_core::runner::SystemRunner;
use txbuild_core::symbols::GeneSymbolSet;

pub fn run_pipeline(
    config_path: Option<&Path>,
    symbols_path: Option<&Path>,
    dry_run: bool,
    json: bool,
) -> Result<()> {
    run_with_env(
        |name| std::env::var(name).ok(),
        config_path,
        symbols_path,
        dry_run,
        json,
    )
}

/// Environment is resolved first so a missing variable aborts before anything
/// else is read or created.
fn run_with_env<F>(
    lookup: F,
    config_path: Option<&Path>,
    symbols_path: Option<&Path>,
    dry_run: bool,
    json: bool,
) -> Result<()>
where
    F: Fn(&str) -> Option<String>,
{
    let env = PipelineConfig::from_lookup(lookup)?;
    tracing::debug!("resolved environment: {:?}", env);
    let tools = config::load(config_path)?;

    let symbols = GeneSymbolSet::load(symbols_path.or(tools.gene_symbols.as_deref()))?;
    let pipeline = Pipeline::new(env, tools, symbols, SystemRunner);

    if dry_run {
        for cmd in pipeline.plan() {
            println!("{cmd}");
        }
        return Ok(());
    }

    let report = pipeline.run()?;
    if json {
        let out = serde_json::to_string_pretty(&report).context("serialize run report")?;
        println!("{out}");
    }
    Ok(())
}
