//! Property tests for table construction, selection and filtering

use std::collections::HashSet;

use fbmn_export::prelude::*;
use proptest::prelude::*;

/// Features `f0..fn`, each with a value for sample `s1` unless masked out
fn features_and_intensities(n: usize, present: &[bool]) -> (FeatureSet, SampleIntensities) {
    let features = FeatureSet::from_features((0..n).map(|i| {
        Feature::new(
            format!("f{i}"),
            ValueRange::spanning(100.0 + i as f64, 100.5 + i as f64),
            ValueRange::spanning(10.0, 20.0),
        )
    }))
    .unwrap();

    let mut intensities = SampleIntensities::with_samples(["s1", "s2"]);
    for i in 0..n {
        let value = present.get(i).copied().unwrap_or(false).then_some(i as f64);
        intensities.insert(format!("f{i}"), "s1", value);
    }
    (features, intensities)
}

/// Spectra from (feature index or none, peak intensities)
fn spectra_from(specs: &[(Option<usize>, Vec<u8>)]) -> SpectrumCollection {
    specs
        .iter()
        .enumerate()
        .map(|(i, (feature, peaks))| {
            let mut builder = SpectrumBuilder::new(100.0, i as f64);
            if let Some(f) = feature {
                builder = builder.feature(format!("f{f}"));
            }
            for (j, &intensity) in peaks.iter().enumerate() {
                builder = builder.add_peak(50.0 + j as f64, f64::from(intensity));
            }
            builder.build()
        })
        .collect()
}

fn spectrum_specs(n_features: usize) -> impl Strategy<Value = Vec<(Option<usize>, Vec<u8>)>> {
    prop::collection::vec(
        (
            prop::option::weighted(0.9, 0..n_features),
            prop::collection::vec(0u8..4, 0..4),
        ),
        0..40,
    )
}

proptest! {
    /// One row per feature, in feature set order, whatever the intensity gaps
    #[test]
    fn test_table_rows_match_features(present in prop::collection::vec(any::<bool>(), 0..30)) {
        let (features, intensities) = features_and_intensities(present.len(), &present);
        let table = FeatureTableBuilder::new().build(&features, &intensities).unwrap();

        prop_assert_eq!(table.len(), features.len());
        let table_ids: Vec<_> = table.feature_ids().collect();
        let feature_ids: Vec<_> = features.ids().collect();
        prop_assert_eq!(table_ids, feature_ids);
        prop_assert_eq!(table.sample_columns(), vec!["s1", "s2"]);
    }

    /// Each representative has the maximal TIC of its group and is the first such spectrum
    #[test]
    fn test_representative_is_first_max(specs in spectrum_specs(6)) {
        let spectra = spectra_from(&specs);
        let selection = RepresentativeSpectrumSelector::new().select(&spectra);

        let linked: HashSet<&str> = spectra.iter().filter_map(|s| s.feature_id.as_deref()).collect();
        prop_assert_eq!(selection.len(), linked.len());

        for entry in selection.entries() {
            let group: Vec<(usize, f64)> = spectra
                .iter()
                .enumerate()
                .filter(|(_, s)| s.feature_id.as_deref() == Some(entry.feature_id))
                .map(|(i, s)| (i, s.total_ion_current()))
                .collect();
            let max = group.iter().map(|(_, tic)| *tic).fold(f64::MIN, f64::max);
            let first_max = group.iter().find(|(_, tic)| *tic == max).map(|(i, _)| *i);

            prop_assert_eq!(entry.total_ion_current, max);
            prop_assert_eq!(Some(entry.input_index), first_max);
            prop_assert_eq!(entry.group_size, group.len());
        }
    }

    /// The MS2-only table and the representative spectra cover the same features
    #[test]
    fn test_ms2_export_identifier_sets_agree(specs in spectrum_specs(8)) {
        let present = vec![true; 8];
        let (features, intensities) = features_and_intensities(8, &present);
        let spectra = spectra_from(&specs);

        let artifacts = ExportPipeline::default().run(&features, &intensities, &spectra).unwrap();

        let table_ids: HashSet<&str> = artifacts.ms2_table.feature_ids().collect();
        let spectrum_ids: HashSet<&str> = artifacts
            .representatives
            .iter()
            .filter_map(|s| s.feature_id.as_deref())
            .collect();
        prop_assert_eq!(&table_ids, &spectrum_ids);
        prop_assert_eq!(artifacts.representatives.len(), artifacts.ms2_table.len());

        let full_order: Vec<&str> = artifacts.full_table.feature_ids().collect();
        let kept: Vec<&str> = artifacts.ms2_table.feature_ids().collect();
        let expected: Vec<&str> = full_order.into_iter().filter(|id| table_ids.contains(id)).collect();
        prop_assert_eq!(kept, expected);
    }

    /// Building twice from the same inputs gives the same artifacts
    #[test]
    fn test_pipeline_is_idempotent(specs in spectrum_specs(5)) {
        let present = vec![true, false, true, false, true];
        let (features, intensities) = features_and_intensities(5, &present);
        let spectra = spectra_from(&specs);
        let pipeline = ExportPipeline::default();

        let first = pipeline.run(&features, &intensities, &spectra).unwrap();
        let second = pipeline.run(&features, &intensities, &spectra).unwrap();

        prop_assert_eq!(first.full_table, second.full_table);
        prop_assert_eq!(first.ms2_table, second.ms2_table);
        prop_assert_eq!(first.representatives, second.representatives);
    }

    /// Cleaning drops exactly the zero-intensity peaks and is idempotent
    #[test]
    fn test_cleaning_drops_only_zero_peaks(specs in spectrum_specs(3)) {
        let spectra = spectra_from(&specs);
        let cleaned = spectra.cleaned();

        let zeros: usize = spectra
            .iter()
            .map(|s| s.peaks.iter().filter(|p| p.intensity == 0.0).count())
            .sum();
        prop_assert_eq!(cleaned.total_peaks() + zeros, spectra.total_peaks());
        prop_assert_eq!(cleaned.cleaned(), cleaned.clone());
        for (before, after) in spectra.iter().zip(cleaned.iter()) {
            prop_assert_eq!(before.total_ion_current(), after.total_ion_current());
        }
    }
}
