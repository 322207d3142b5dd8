use crate::mgf::MgfError;

/// Errors that can occur while building or writing an export
#[derive(Debug, thiserror::Error)]
pub enum ExportError {
    /// I/O error reading inputs or writing artifacts
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// CSV/TSV parsing or writing error
    #[error("CSV error: {0}")]
    CsvError(#[from] csv::Error),

    /// JSON serialization error for the export summary
    #[error("JSON serialization error: {0}")]
    JsonError(#[from] serde_json::Error),

    /// MGF parsing error
    #[error("MGF error: {0}")]
    MgfError(#[from] MgfError),

    /// Missing required column in an input table
    #[error("Missing required column: {0}")]
    MissingColumn(String),

    /// A cell could not be parsed into the type its column requires
    #[error("Invalid value '{value}' in column '{column}' (row {row})")]
    InvalidValue {
        /// Column header
        column: String,
        /// 1-based data row number
        row: usize,
        /// Offending cell content
        value: String,
    },

    /// The same feature identifier was defined twice
    #[error("Duplicate feature identifier: {0}")]
    DuplicateFeature(String),

    /// The same sample column appears twice in the intensity table header
    #[error("Duplicate sample column: {0}")]
    DuplicateSample(String),

    /// A feature identifier was referenced but never defined
    #[error("Feature '{feature_id}' referenced by {context} is not defined in the feature set")]
    UnknownFeature {
        /// The dangling identifier
        feature_id: String,
        /// Where the reference came from, e.g. "intensity table"
        context: String,
    },

    /// A defined feature has no entry in the intensity mapping
    #[error("No intensity entry for feature '{0}'")]
    MissingIntensities(String),
}

impl ExportError {
    pub(crate) fn unknown_feature(feature_id: impl Into<String>, context: impl Into<String>) -> Self {
        Self::UnknownFeature {
            feature_id: feature_id.into(),
            context: context.into(),
        }
    }

    /// Returns true for errors caused by inconsistent feature identifiers
    pub fn is_integrity_error(&self) -> bool {
        matches!(
            self,
            ExportError::DuplicateFeature(_)
                | ExportError::UnknownFeature { .. }
                | ExportError::MissingIntensities(_)
        )
    }
}
