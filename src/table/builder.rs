use log::{debug, warn};

use super::{CellValue, Column, ExportTable, TableRow, RANGE_COLUMNS};
use crate::error::ExportError;
use crate::feature::{Feature, FeatureSet, SampleIntensities, PEAK_INDEX_COLUMN};

/// Identifier column header expected by the networking service
pub const DEFAULT_ID_COLUMN: &str = "Row.names";

/// Joins feature metadata with the per-sample intensity matrix
///
/// The join is an outer join on the sample axis: a feature lacking a value
/// for some sample gets a missing cell, never a dropped row. On the feature
/// axis both inputs must agree; any identifier present in only one of them
/// is a data-integrity error.
#[derive(Debug, Clone)]
pub struct FeatureTableBuilder {
    id_column: String,
}

impl Default for FeatureTableBuilder {
    fn default() -> Self {
        Self {
            id_column: DEFAULT_ID_COLUMN.to_string(),
        }
    }
}

impl FeatureTableBuilder {
    /// Create a builder with the default identifier column header
    pub fn new() -> Self {
        Self::default()
    }

    /// Override the identifier column header
    pub fn with_id_column(mut self, id_column: impl Into<String>) -> Self {
        self.id_column = id_column.into();
        self
    }

    /// Build one row per feature, in feature set order
    pub fn build(
        &self,
        features: &FeatureSet,
        intensities: &SampleIntensities,
    ) -> Result<ExportTable, ExportError> {
        if let Some(orphan) = intensities.feature_ids().find(|id| !features.contains(id)) {
            return Err(ExportError::unknown_feature(orphan, "intensity table"));
        }

        let include_npeaks = features.has_npeaks();
        let auxiliary: Vec<&str> = features
            .auxiliary_columns()
            .into_iter()
            .filter(|name| *name != PEAK_INDEX_COLUMN)
            .collect();
        let samples = intensities.samples();

        let mut columns: Vec<Column> = RANGE_COLUMNS.iter().map(|c| Column::metadata(*c)).collect();
        if include_npeaks {
            columns.push(Column::metadata("npeaks"));
        }
        columns.extend(auxiliary.iter().map(|name| Column::metadata(*name)));
        columns.extend(samples.iter().map(|name| Column::sample(name.as_str())));

        let mut table = ExportTable::new(self.id_column.clone(), columns);
        let mut without_signal = 0usize;

        for feature in features {
            let sample_values = intensities
                .get(&feature.id)
                .ok_or_else(|| ExportError::MissingIntensities(feature.id.clone()))?;

            let mut cells = metadata_cells(feature, include_npeaks, &auxiliary);

            let mut any_signal = false;
            for sample in samples {
                let area = sample_values.get(sample).copied().flatten();
                any_signal |= area.is_some();
                cells.push(area.map(CellValue::Number));
            }
            if !any_signal && !samples.is_empty() {
                without_signal += 1;
            }

            table.push_row(TableRow {
                feature_id: feature.id.clone(),
                cells,
            })?;
        }

        if without_signal > 0 {
            warn!(
                "{} of {} features have no intensity in any sample",
                without_signal,
                features.len()
            );
        }
        debug!(
            "Built export table: {} rows, {} columns ({} samples)",
            table.len(),
            table.columns().len() + 1,
            samples.len()
        );

        Ok(table)
    }
}

fn metadata_cells(feature: &Feature, include_npeaks: bool, auxiliary: &[&str]) -> Vec<Option<CellValue>> {
    let mut cells: Vec<Option<CellValue>> = [
        feature.mz.med,
        feature.mz.min,
        feature.mz.max,
        feature.rt.med,
        feature.rt.min,
        feature.rt.max,
    ]
    .into_iter()
    .map(|v| Some(CellValue::Number(v)))
    .collect();

    if include_npeaks {
        cells.push(feature.npeaks.map(CellValue::Count));
    }

    for name in auxiliary {
        let value = feature
            .auxiliary
            .get(*name)
            .filter(|v| !v.is_empty())
            .map(|v| CellValue::Text(v.clone()));
        cells.push(value);
    }

    cells
}
