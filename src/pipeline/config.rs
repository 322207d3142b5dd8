use serde::{Deserialize, Serialize};

use crate::table::DEFAULT_ID_COLUMN;

/// File names of the export artifacts inside the output directory
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct OutputNames {
    /// Full feature table
    pub full_table: String,
    /// Feature table restricted to features with MS2 spectra
    pub ms2_table: String,
    /// Every (cleaned) spectrum
    pub full_mgf: String,
    /// One representative spectrum per feature
    pub representative_mgf: String,
    /// JSON summary of the run
    pub summary: String,
}

impl Default for OutputNames {
    fn default() -> Self {
        Self {
            full_table: "xcms_all.txt".to_string(),
            ms2_table: "xcms_onlyMS2.txt".to_string(),
            full_mgf: "ms2spectra_all.mgf".to_string(),
            representative_mgf: "ms2spectra_maxTic.mgf".to_string(),
            summary: "export_summary.json".to_string(),
        }
    }
}

impl OutputNames {
    /// All artifact names in write order
    pub fn all(&self) -> [&str; 5] {
        [
            self.full_table.as_str(),
            self.ms2_table.as_str(),
            self.full_mgf.as_str(),
            self.representative_mgf.as_str(),
            self.summary.as_str(),
        ]
    }
}

/// Settings for an export run
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExportConfig {
    /// Header of the feature identifier column
    pub id_column: String,
    /// Token written for missing table cells
    pub na_value: String,
    /// Prefix stripped from feature identifiers to form MGF `SCANS`
    pub feature_prefix: String,
    /// Drop zero-intensity peaks before writing spectra
    pub clean_spectra: bool,
    /// Artifact file names
    pub outputs: OutputNames,
}

impl Default for ExportConfig {
    fn default() -> Self {
        Self {
            id_column: DEFAULT_ID_COLUMN.to_string(),
            na_value: "NA".to_string(),
            feature_prefix: "FT".to_string(),
            clean_spectra: true,
            outputs: OutputNames::default(),
        }
    }
}
