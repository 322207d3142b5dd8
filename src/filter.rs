//! MS2-only export filtering.
//!
//! Restricts the feature table to features that have at least one MS2
//! spectrum. Paired with the representative selection over the same spectra,
//! this yields the "MS2-only" table/MGF pair whose feature identifier sets
//! are identical.

use std::collections::HashSet;

use log::debug;

use crate::error::ExportError;
use crate::selector::{RepresentativeSelection, RepresentativeSpectrumSelector};
use crate::spectrum::SpectrumCollection;
use crate::table::ExportTable;

/// Filtered table plus its representative spectra
#[derive(Debug, Clone)]
pub struct Ms2OnlyExport<'a> {
    /// Table rows that have at least one spectrum
    pub table: ExportTable,
    /// One spectrum per remaining row
    pub representatives: RepresentativeSelection<'a>,
}

/// Row filter keyed on spectrum membership
#[derive(Debug, Clone, Copy, Default)]
pub struct ExportFilter;

impl ExportFilter {
    /// Create a filter
    pub fn new() -> Self {
        Self
    }

    /// Keep the rows of `table` whose feature has a spectrum in `spectra`.
    ///
    /// Row order and column schema are preserved. A spectrum linked to a
    /// feature missing from the table is a data-integrity error.
    pub fn filter(
        &self,
        table: &ExportTable,
        spectra: &SpectrumCollection,
    ) -> Result<ExportTable, ExportError> {
        let known: HashSet<&str> = table.feature_ids().collect();

        let mut with_spectra: HashSet<&str> = HashSet::new();
        for spectrum in spectra {
            if let Some(id) = spectrum.feature_id.as_deref() {
                if !known.contains(id) {
                    return Err(ExportError::unknown_feature(id, "MS2 spectrum"));
                }
                with_spectra.insert(id);
            }
        }

        let filtered = table.filter_rows(|row| with_spectra.contains(row.feature_id.as_str()));
        debug!(
            "MS2-only table keeps {} of {} features",
            filtered.len(),
            table.len()
        );
        Ok(filtered)
    }

    /// Build the MS2-only table and representative spectra from one collection
    pub fn ms2_only<'a>(
        &self,
        table: &ExportTable,
        spectra: &'a SpectrumCollection,
    ) -> Result<Ms2OnlyExport<'a>, ExportError> {
        let table = self.filter(table, spectra)?;
        let representatives = RepresentativeSpectrumSelector::new().select(spectra);
        Ok(Ms2OnlyExport {
            table,
            representatives,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{Feature, FeatureSet, SampleIntensities, ValueRange};
    use crate::spectrum::SpectrumBuilder;
    use crate::table::FeatureTableBuilder;

    fn table(ids: &[&str]) -> ExportTable {
        let features = FeatureSet::from_features(ids.iter().map(|id| {
            Feature::new(
                *id,
                ValueRange::spanning(200.0, 200.1),
                ValueRange::spanning(10.0, 20.0),
            )
        }))
        .unwrap();
        let mut intensities = SampleIntensities::new();
        for id in ids {
            intensities.insert(*id, "s1", Some(1.0));
        }
        FeatureTableBuilder::new().build(&features, &intensities).unwrap()
    }

    fn linked(id: &str, intensity: f64) -> crate::spectrum::Spectrum {
        SpectrumBuilder::new(200.05, 15.0)
            .feature(id)
            .add_peak(100.0, intensity)
            .build()
    }

    #[test]
    fn test_filter_keeps_features_with_spectra_in_order() {
        let table = table(&["f1", "f2", "f3"]);
        let spectra: SpectrumCollection =
            vec![linked("f2", 1.0), linked("f1", 2.0), linked("f2", 3.0)].into();

        let export = ExportFilter::new().ms2_only(&table, &spectra).unwrap();
        let ids: Vec<_> = export.table.feature_ids().collect();
        assert_eq!(ids, vec!["f1", "f2"]);
        assert_eq!(export.representatives.len(), 2);

        let table_ids: HashSet<_> = export.table.feature_ids().collect();
        let spectrum_ids: HashSet<_> = export.representatives.feature_ids().collect();
        assert_eq!(table_ids, spectrum_ids);
    }

    #[test]
    fn test_unknown_spectrum_feature_is_fatal() {
        let table = table(&["f1"]);
        let spectra: SpectrumCollection = vec![linked("f1", 1.0), linked("f7", 1.0)].into();

        let err = ExportFilter::new().filter(&table, &spectra).unwrap_err();
        assert!(err.is_integrity_error());
        assert!(err.to_string().contains("f7"));
    }

    #[test]
    fn test_unlinked_spectra_are_ignored() {
        let table = table(&["f1"]);
        let spectra: SpectrumCollection =
            vec![SpectrumBuilder::new(100.0, 1.0).add_peak(50.0, 1.0).build()].into();

        let export = ExportFilter::new().ms2_only(&table, &spectra).unwrap();
        assert!(export.table.is_empty());
        assert!(export.representatives.is_empty());
    }

    #[test]
    fn test_empty_spectra_yield_empty_export() {
        let table = table(&["f1", "f2"]);
        let spectra = SpectrumCollection::new();

        let export = ExportFilter::new().ms2_only(&table, &spectra).unwrap();
        assert!(export.table.is_empty());
        assert_eq!(export.table.header(), table.header());
        assert!(export.representatives.is_empty());
    }
}
