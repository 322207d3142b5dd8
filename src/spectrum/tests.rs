use super::*;

fn ms2(feature: Option<&str>, peaks: &[(f64, f64)]) -> Spectrum {
    let mut builder = SpectrumBuilder::new(250.0, 60.0);
    if let Some(id) = feature {
        builder = builder.feature(id);
    }
    for &(mz, intensity) in peaks {
        builder = builder.add_peak(mz, intensity);
    }
    builder.build()
}

#[test]
fn test_total_ion_current() {
    let spectrum = ms2(Some("FT1"), &[(100.0, 5.0), (101.0, 3.0)]);
    assert_eq!(spectrum.total_ion_current(), 8.0);
    assert_eq!(spectrum.peak_count(), 2);

    let empty = ms2(Some("FT2"), &[]);
    assert_eq!(empty.total_ion_current(), 0.0);
    assert!(empty.is_empty());
    assert!(empty.base_peak().is_none());
}

#[test]
fn test_base_peak_first_on_ties() {
    let spectrum = ms2(None, &[(100.0, 7.0), (150.0, 9.0), (200.0, 9.0)]);
    assert_eq!(spectrum.base_peak().map(|p| p.mz), Some(150.0));
}

#[test]
fn test_cleaning_strips_zero_intensity() {
    let spectrum = ms2(Some("FT1"), &[(100.0, 0.0), (101.0, 3.0), (102.0, 0.0)]);
    let cleaned = spectrum.cleaned();

    assert_eq!(cleaned.peaks, vec![Peak::new(101.0, 3.0)]);
    assert_eq!(cleaned.feature_id, spectrum.feature_id);
    assert_eq!(cleaned.total_ion_current(), spectrum.total_ion_current());
    assert_eq!(cleaned.cleaned(), cleaned);
}

#[test]
fn test_collection_feature_ids() {
    let collection: SpectrumCollection = vec![
        ms2(Some("FT2"), &[(100.0, 1.0)]),
        ms2(None, &[(100.0, 1.0)]),
        ms2(Some("FT1"), &[(100.0, 1.0)]),
        ms2(Some("FT2"), &[(100.0, 1.0)]),
    ]
    .into();

    assert_eq!(collection.feature_ids(), vec!["FT2", "FT1"]);
    assert_eq!(collection.unlinked_count(), 1);
    assert_eq!(collection.total_peaks(), 4);
}

#[test]
fn test_builder_fields() {
    let spectrum = SpectrumBuilder::new(301.1, 62.4)
        .scan(17)
        .title("scan 17")
        .charge(-1)
        .precursor_intensity(1e5)
        .feature("FT0012")
        .build();

    assert_eq!(spectrum.scan, Some(17));
    assert_eq!(spectrum.title.as_deref(), Some("scan 17"));
    assert_eq!(spectrum.precursor_charge, Some(-1));
    assert_eq!(spectrum.precursor_intensity, Some(1e5));
    assert!(spectrum.has_feature());
}
