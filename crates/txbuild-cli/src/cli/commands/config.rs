//! `txbuild config show|init`.

use anyhow::Result;
use std::path::Path;
use txbuild_core::config;

pub fn run_config_show(config_path: Option<&Path>) -> Result<()> {
    let cfg = config::load(config_path)?;
    print!("{}", toml::to_string_pretty(&cfg)?);
    Ok(())
}

pub fn run_config_init(config_path: Option<&Path>, force: bool) -> Result<()> {
    let path = config::write_default(config_path, force)?;
    println!("Wrote {}", path.display());
    Ok(())
}
