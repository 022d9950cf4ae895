//! `txbuild symbols` – show the gene symbol list.

use anyhow::Result;
use std::path::Path;
use txbuild_core::config;
use txbuild_core::symbols::GeneSymbolSet;

pub fn run_symbols(
    config_path: Option<&Path>,
    symbols_path: Option<&Path>,
    flags: bool,
) -> Result<()> {
    let tools = config::load(config_path)?;
    let set = GeneSymbolSet::load(symbols_path.or(tools.gene_symbols.as_deref()))?;
    if flags {
        for flag in set.to_flags() {
            println!("{flag}");
        }
    } else {
        for symbol in set.iter() {
            println!("{symbol}");
        }
    }
    Ok(())
}
