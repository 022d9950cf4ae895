use anyhow::{bail, Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::error::PipelineError;

pub const ENV_DATA_DIR: &str = "DATA_DIR";
pub const ENV_GENOME_RELEASE: &str = "GENOME_RELEASE";
pub const ENV_CDOT_FILENAME: &str = "CDOT_FILENAME";

/// Values resolved from the calling environment, read once per run.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PipelineConfig {
    /// Root of the working data tree.
    pub data_dir: PathBuf,
    /// Genome release, passed through to the tool and used in the source path.
    pub genome_release: String,
    /// File name of the cdot transcript JSON under `tmp/<release>/`.
    pub cdot_filename: String,
}

impl PipelineConfig {
    /// Resolve from the process environment.
    pub fn from_env() -> Result<Self, PipelineError> {
        Self::from_lookup(|name| std::env::var(name).ok())
    }

    /// Resolve through `lookup`; empty values count as unset. Variables are
    /// checked in a fixed order and the first missing one is reported.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, PipelineError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let require = |name: &'static str| {
            lookup(name)
                .filter(|v| !v.is_empty())
                .ok_or(PipelineError::MissingEnv { name })
        };
        let data_dir = require(ENV_DATA_DIR)?;
        let genome_release = require(ENV_GENOME_RELEASE)?;
        let cdot_filename = require(ENV_CDOT_FILENAME)?;
        Ok(Self {
            data_dir: PathBuf::from(data_dir),
            genome_release,
            cdot_filename,
        })
    }

    /// `<data_dir>/tmp/<genome_release>/<cdot_filename>`
    pub fn cdot_json_path(&self) -> PathBuf {
        self.data_dir
            .join("tmp")
            .join(&self.genome_release)
            .join(&self.cdot_filename)
    }

    /// `<data_dir>/seqrepo/master`
    pub fn seqrepo_instance_path(&self) -> PathBuf {
        self.data_dir.join("seqrepo").join("master")
    }
}

/// External programs and switches, loaded from `~/.config/txbuild/config.toml`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct ToolConfig {
    /// Database-build tool; a bare name is looked up on `PATH`.
    pub mehari: PathBuf,
    /// Decompressor used for the integrity check.
    pub zstd: PathBuf,
    /// Optional symbol file replacing the built-in list.
    pub gene_symbols: Option<PathBuf>,
    /// Fail right after the build step when the report file is missing.
    pub require_report: bool,
}

impl Default for ToolConfig {
    fn default() -> Self {
        Self {
            mehari: PathBuf::from("mehari"),
            zstd: PathBuf::from("zstd"),
            gene_symbols: None,
            require_report: true,
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("txbuild")?;
    Ok(xdg_dirs.get_config_file("config.toml"))
}

/// Load configuration from `path`, or from the XDG location when `None`.
/// A missing file yields defaults; nothing is written.
pub fn load(path: Option<&Path>) -> Result<ToolConfig> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if !path.exists() {
        tracing::debug!("no config at {}, using defaults", path.display());
        return Ok(ToolConfig::default());
    }
    let data =
        fs::read_to_string(&path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: ToolConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}

/// Write the default configuration to `path` (XDG location when `None`).
pub fn write_default(path: Option<&Path>, force: bool) -> Result<PathBuf> {
    let path = match path {
        Some(p) => p.to_path_buf(),
        None => config_path()?,
    };
    if path.exists() && !force {
        bail!("{} already exists (use --force to overwrite)", path.display());
    }
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let toml = toml::to_string_pretty(&ToolConfig::default())?;
    fs::write(&path, toml).with_context(|| format!("write config {}", path.display()))?;
    tracing::info!("wrote default config to {}", path.display());
    Ok(path)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn lookup_from(pairs: &[(&str, &str)]) -> impl Fn(&str) -> Option<String> {
        let map: HashMap<String, String> = pairs
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        move |name| map.get(name).cloned()
    }

    #[test]
    fn resolves_all_variables() {
        let cfg = PipelineConfig::from_lookup(lookup_from(&[
            ("DATA_DIR", "/data"),
            ("GENOME_RELEASE", "GRCh38"),
            ("CDOT_FILENAME", "cdot-0.2.21.refseq.grch38.json.gz"),
        ]))
        .unwrap();
        assert_eq!(cfg.data_dir, PathBuf::from("/data"));
        assert_eq!(
            cfg.cdot_json_path(),
            PathBuf::from("/data/tmp/GRCh38/cdot-0.2.21.refseq.grch38.json.gz")
        );
        assert_eq!(cfg.seqrepo_instance_path(), PathBuf::from("/data/seqrepo/master"));
    }

    #[test]
    fn first_missing_variable_is_reported() {
        let err = PipelineConfig::from_lookup(lookup_from(&[("GENOME_RELEASE", "GRCh37")]))
            .unwrap_err();
        assert!(matches!(err, PipelineError::MissingEnv { name: "DATA_DIR" }));

        let err = PipelineConfig::from_lookup(lookup_from(&[
            ("DATA_DIR", "/data"),
            ("GENOME_RELEASE", "GRCh37"),
        ]))
        .unwrap_err();
        assert!(matches!(err, PipelineError::MissingEnv { name: "CDOT_FILENAME" }));
    }

    #[test]
    fn empty_value_counts_as_unset() {
        let err = PipelineConfig::from_lookup(lookup_from(&[
            ("DATA_DIR", "/data"),
            ("GENOME_RELEASE", ""),
            ("CDOT_FILENAME", "x.json"),
        ]))
        .unwrap_err();
        assert!(matches!(err, PipelineError::MissingEnv { name: "GENOME_RELEASE" }));
    }

    #[test]
    fn default_tool_config_values() {
        let cfg = ToolConfig::default();
        assert_eq!(cfg.mehari, PathBuf::from("mehari"));
        assert_eq!(cfg.zstd, PathBuf::from("zstd"));
        assert!(cfg.gene_symbols.is_none());
        assert!(cfg.require_report);
    }

    #[test]
    fn tool_config_partial_toml_fills_defaults() {
        let toml = r#"
            mehari = "/opt/mehari/bin/mehari"
            require_report = false
        "#;
        let cfg: ToolConfig = toml::from_str(toml).unwrap();
        assert_eq!(cfg.mehari, PathBuf::from("/opt/mehari/bin/mehari"));
        assert_eq!(cfg.zstd, PathBuf::from("zstd"));
        assert!(!cfg.require_report);
    }

    #[test]
    fn load_missing_file_yields_defaults_without_writing() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("config.toml");
        let cfg = load(Some(&path)).unwrap();
        assert_eq!(cfg, ToolConfig::default());
        assert!(!path.exists());
    }

    #[test]
    fn write_default_refuses_overwrite_without_force() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("sub").join("config.toml");
        write_default(Some(&path), false).unwrap();
        assert_eq!(load(Some(&path)).unwrap(), ToolConfig::default());
        assert!(write_default(Some(&path), false).is_err());
        write_default(Some(&path), true).unwrap();
    }
}
