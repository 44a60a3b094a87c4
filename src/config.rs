// src/config.rs

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::{
    fs,
    path::{Path, PathBuf},
};

use crate::error::EtlError;

/// File locations for one run. Passed explicitly to the pipeline.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, deny_unknown_fields)]
pub struct EtlConfig {
    /// Dirty input table.
    pub input: PathBuf,
    /// Cleaned table (`.parquet` for Parquet, CSV otherwise).
    pub output: PathBuf,
    /// Data dictionary (`.parquet` for Parquet, CSV otherwise).
    pub dictionary: PathBuf,
    /// Optional JSON run summary.
    pub report: Option<PathBuf>,
}

impl Default for EtlConfig {
    fn default() -> Self {
        Self {
            input: PathBuf::from("PolitiFact_DIRTY.csv"),
            output: PathBuf::from("PolitiFact_CLEAN.csv"),
            dictionary: PathBuf::from("PolitiFact_DataDictionary.csv"),
            report: None,
        }
    }
}

impl EtlConfig {
    pub fn from_yaml_str(s: &str) -> Result<Self, EtlError> {
        serde_yaml::from_str(s).map_err(|e| EtlError::Config(e.to_string()))
    }

    pub fn from_yaml_file(path: &Path) -> Result<Self> {
        let text = fs::read_to_string(path)
            .with_context(|| format!("reading config file {:?}", path))?;
        Ok(Self::from_yaml_str(&text)?)
    }

    /// Replace each path that was given explicitly.
    pub fn with_overrides(
        mut self,
        input: Option<PathBuf>,
        output: Option<PathBuf>,
        dictionary: Option<PathBuf>,
        report: Option<PathBuf>,
    ) -> Self {
        if let Some(p) = input {
            self.input = p;
        }
        if let Some(p) = output {
            self.output = p;
        }
        if let Some(p) = dictionary {
            self.dictionary = p;
        }
        if report.is_some() {
            self.report = report;
        }
        self
    }
}
