//! Output layout under `DATA_DIR/pass-2/`.

use std::fs;
use std::path::{Path, PathBuf};

use crate::config::PipelineConfig;
use crate::error::{PipelineError, Result};

pub const OUTPUT_SUBDIR: &str = "pass-2";
pub const ARTIFACT_NAME: &str = "txs.bin.zst";

/// Files derived from the data directory. The tool writes the artifact and
/// report; the checksum step writes the two `.sha256` files.
#[derive(Debug, Clone, PartialEq, Eq, serde::Serialize)]
pub struct ArtifactPaths {
    pub output_dir: PathBuf,
    pub artifact: PathBuf,
    pub artifact_sha256: PathBuf,
    pub report: PathBuf,
    pub report_sha256: PathBuf,
}

impl ArtifactPaths {
    pub fn derive(config: &PipelineConfig) -> Self {
        Self::in_dir(config.data_dir.join(OUTPUT_SUBDIR))
    }

    pub fn in_dir(output_dir: PathBuf) -> Self {
        let artifact = output_dir.join(ARTIFACT_NAME);
        let report = with_suffix(&artifact, ".report");
        Self {
            artifact_sha256: with_suffix(&artifact, ".sha256"),
            report_sha256: with_suffix(&report, ".sha256"),
            artifact,
            report,
            output_dir,
        }
    }

    /// Create the output directory; already existing is fine.
    pub fn ensure_output_dir(&self) -> Result<()> {
        fs::create_dir_all(&self.output_dir).map_err(|e| {
            PipelineError::io(format!("create {}", self.output_dir.display()), e)
        })
    }

    /// Drop checksum files left over from an earlier run.
    pub fn remove_stale_checksums(&self) -> Result<()> {
        for path in [&self.artifact_sha256, &self.report_sha256] {
            match fs::remove_file(path) {
                Ok(()) => tracing::debug!(path = %path.display(), "removed stale checksum"),
                Err(e) if e.kind() == std::io::ErrorKind::NotFound => {}
                Err(e) => {
                    return Err(PipelineError::io(format!("remove {}", path.display()), e));
                }
            }
        }
        Ok(())
    }
}

/// Append `suffix` to the full file name (`a.zst` + `.sha256` -> `a.zst.sha256`).
pub fn with_suffix(path: &Path, suffix: &str) -> PathBuf {
    let mut s = path.as_os_str().to_os_string();
    s.push(suffix);
    PathBuf::from(s)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn derives_layout_from_data_dir() {
        let cfg = PipelineConfig {
            data_dir: PathBuf::from("/data"),
            genome_release: "GRCh38".into(),
            cdot_filename: "cdot.json".into(),
        };
        let p = ArtifactPaths::derive(&cfg);
        assert_eq!(p.output_dir, PathBuf::from("/data/pass-2"));
        assert_eq!(p.artifact, PathBuf::from("/data/pass-2/txs.bin.zst"));
        assert_eq!(p.artifact_sha256, PathBuf::from("/data/pass-2/txs.bin.zst.sha256"));
        assert_eq!(p.report, PathBuf::from("/data/pass-2/txs.bin.zst.report"));
        assert_eq!(
            p.report_sha256,
            PathBuf::from("/data/pass-2/txs.bin.zst.report.sha256")
        );
    }

    #[test]
    fn ensure_output_dir_is_idempotent() {
        let dir = tempfile::tempdir().unwrap();
        let p = ArtifactPaths::in_dir(dir.path().join("pass-2"));
        p.ensure_output_dir().unwrap();
        p.ensure_output_dir().unwrap();
        assert!(p.output_dir.is_dir());
    }

    #[test]
    fn remove_stale_checksums_ignores_missing() {
        let dir = tempfile::tempdir().unwrap();
        let p = ArtifactPaths::in_dir(dir.path().to_path_buf());
        fs::write(&p.artifact_sha256, "old").unwrap();
        p.remove_stale_checksums().unwrap();
        assert!(!p.artifact_sha256.exists());
        p.remove_stale_checksums().unwrap();
    }
}
