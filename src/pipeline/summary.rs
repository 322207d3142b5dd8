use std::fmt;

use serde::{Deserialize, Serialize};

use super::OutputNames;

/// Counts and file names of a completed export, written as JSON
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExportSummary {
    /// RFC 3339 creation timestamp
    pub created_at: String,
    /// Rows in the full table
    pub features: usize,
    /// Sample columns in both tables
    pub samples: usize,
    /// Rows in the MS2-only table
    pub ms2_features: usize,
    /// Records in the full MGF
    pub spectra: usize,
    /// Spectra not linked to any feature
    pub unlinked_spectra: usize,
    /// Records in the representative MGF
    pub representative_spectra: usize,
    /// Zero-intensity peaks dropped by cleaning
    pub removed_peaks: usize,
    /// Artifact file names
    pub files: OutputNames,
}

impl ExportSummary {
    /// Share of features that have at least one MS2 spectrum
    pub fn ms2_coverage(&self) -> f64 {
        if self.features == 0 {
            0.0
        } else {
            self.ms2_features as f64 / self.features as f64
        }
    }
}

impl fmt::Display for ExportSummary {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Exported {} features ({} samples), {} with MS2 ({:.1}%); {} spectra, {} representatives",
            self.features,
            self.samples,
            self.ms2_features,
            self.ms2_coverage() * 100.0,
            self.spectra,
            self.representative_spectra
        )
    }
}
