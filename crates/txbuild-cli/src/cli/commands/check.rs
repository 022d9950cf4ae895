//! `txbuild check <SUMFILE>...` – verify checksum files like `sha256sum -c`.

use anyhow::{bail, Result};
use std::path::PathBuf;
use txbuild_core::checksum;

/// Verify every file, report each result, fail if any did not match.
pub fn run_check(paths: &[PathBuf]) -> Result<()> {
    let failed = check_all(paths);
    if failed > 0 {
        bail!("{failed} of {} checksum file(s) did not verify", paths.len());
    }
    Ok(())
}

fn check_all(paths: &[PathBuf]) -> usize {
    let mut failed = 0;
    for sum_path in paths {
        match checksum::verify_sha256_file(sum_path) {
            Ok(targets) => {
                for target in targets {
                    println!("{}: OK", target.display());
                }
            }
            Err(e) => {
                tracing::warn!(path = %sum_path.display(), "{}", e);
                println!("{}: FAILED", sum_path.display());
                failed += 1;
            }
        }
    }
    failed
}
