//! Gene symbols passed to the build tool as `--gene-symbols=<symbol>` flags.
//!
//! Symbols are never validated here; the tool decides what it accepts.

use std::fs;
use std::path::Path;

use crate::error::{PipelineError, Result};

const EMBEDDED: &str = include_str!("../data/gene-symbols.txt");

/// Ordered list of gene symbols. Duplicates are kept as given.
#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct GeneSymbolSet {
    symbols: Vec<String>,
}

impl GeneSymbolSet {
    /// The list compiled into the binary.
    pub fn embedded() -> Self {
        Self::parse(EMBEDDED)
    }

    /// Split on whitespace; `#` comments run to end of line.
    pub fn parse(text: &str) -> Self {
        let symbols = text
            .lines()
            .map(|line| line.split_once('#').map_or(line, |(head, _)| head))
            .flat_map(str::split_whitespace)
            .map(str::to_string)
            .collect();
        Self { symbols }
    }

    /// Load a symbol file. An empty list is rejected so the tool is never
    /// called without a gene filter by accident.
    pub fn from_path(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path).map_err(|source| PipelineError::SymbolList {
            path: path.to_path_buf(),
            source,
        })?;
        let set = Self::parse(&text);
        if set.is_empty() {
            return Err(PipelineError::EmptySymbolList {
                path: path.to_path_buf(),
            });
        }
        Ok(set)
    }

    /// Override file if given, else the embedded list.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(p) => Self::from_path(p),
            None => Ok(Self::embedded()),
        }
    }

    pub fn len(&self) -> usize {
        self.symbols.len()
    }

    pub fn is_empty(&self) -> bool {
        self.symbols.is_empty()
    }

    pub fn iter(&self) -> impl Iterator<Item = &str> {
        self.symbols.iter().map(String::as_str)
    }

    /// One `--gene-symbols=<symbol>` per entry, in order.
    pub fn to_flags(&self) -> Vec<String> {
        self.iter().map(|s| format!("--gene-symbols={s}")).collect()
    }
}

impl<S: Into<String>> FromIterator<S> for GeneSymbolSet {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        Self {
            symbols: iter.into_iter().map(Into::into).collect(),
        }
    }
}
