//! TOML configuration file support.
//!
//! Settings that rarely change between runs can live in a config file
//! instead of on the command line. Command-line flags win over the file.
//!
//! ```toml
//! # fbmn-export.toml
//! [export]
//! id_column = "Row.names"
//! na_value = "NA"
//! feature_prefix = "FT"
//! clean_spectra = true
//!
//! [output]
//! full_table = "xcms_all.txt"
//! ms2_table = "xcms_onlyMS2.txt"
//! full_mgf = "ms2spectra_all.mgf"
//! representative_mgf = "ms2spectra_maxTic.mgf"
//! summary = "export_summary.json"
//! ```

use anyhow::{Context, Result};
use fbmn_export::pipeline::ExportConfig;
use serde::Deserialize;
use std::path::Path;

/// Root configuration structure for fbmn-export.toml files.
#[derive(Debug, Default, Deserialize)]
pub struct Config {
    /// Export behaviour.
    #[serde(default)]
    pub export: ExportSection,

    /// Artifact file names.
    #[serde(default)]
    pub output: OutputSection,
}

/// The `[export]` table.
#[derive(Debug, Default, Deserialize)]
pub struct ExportSection {
    /// Header of the feature identifier column.
    pub id_column: Option<String>,

    /// Token written for missing table cells.
    pub na_value: Option<String>,

    /// Prefix stripped from feature identifiers to form MGF SCANS.
    pub feature_prefix: Option<String>,

    /// Drop zero-intensity peaks.
    pub clean_spectra: Option<bool>,
}

/// The `[output]` table.
#[derive(Debug, Default, Deserialize)]
pub struct OutputSection {
    pub full_table: Option<String>,
    pub ms2_table: Option<String>,
    pub full_mgf: Option<String>,
    pub representative_mgf: Option<String>,
    pub summary: Option<String>,
}

impl Config {
    /// Load configuration from a TOML file.
    pub fn from_file(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        Self::from_str(&content)
    }

    /// Parse configuration from a TOML string.
    pub fn from_str(content: &str) -> Result<Self> {
        toml::from_str(content).context("Failed to parse TOML configuration")
    }

    /// Load the file if one was given, otherwise use defaults.
    pub fn load(path: Option<&Path>) -> Result<Self> {
        match path {
            Some(path) => Self::from_file(path),
            None => Ok(Self::default()),
        }
    }

    /// Overlay the file's values onto the library defaults.
    pub fn to_export_config(&self) -> ExportConfig {
        let mut config = ExportConfig::default();
        let export = &self.export;
        let output = &self.output;

        if let Some(v) = &export.id_column {
            config.id_column = v.clone();
        }
        if let Some(v) = &export.na_value {
            config.na_value = v.clone();
        }
        if let Some(v) = &export.feature_prefix {
            config.feature_prefix = v.clone();
        }
        if let Some(v) = export.clean_spectra {
            config.clean_spectra = v;
        }

        let names = &mut config.outputs;
        for (slot, value) in [
            (&mut names.full_table, &output.full_table),
            (&mut names.ms2_table, &output.ms2_table),
            (&mut names.full_mgf, &output.full_mgf),
            (&mut names.representative_mgf, &output.representative_mgf),
            (&mut names.summary, &output.summary),
        ] {
            if let Some(value) = value {
                *slot = value.clone();
            }
        }

        config
    }
}
