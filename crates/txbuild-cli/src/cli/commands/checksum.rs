//! Checksum command: write `<file>.sha256`.

use anyhow::Result;
use std::path::Path;
use txbuild_core::checksum;

/// Write the checksum file and print its line.
pub fn run_checksum(path: &Path) -> Result<()> {
    let sum = checksum::write_sha256_file(path)?;
    println!("{}", sum.line);
    Ok(())
}
