use super::*;

const SAMPLE_FEATURES: &str = "\tmzmed\tmzmin\tmzmax\trtmed\trtmin\trtmax\tnpeaks\tQC\tpeakidx
FT001\t200.1\t200.05\t200.15\t15\t10\t20\t3\t2\tc(1, 5, 9)
FT002\t315.2\t315.1\t315.3\t35\t30\t40\t2\t1\t2,7";

const SAMPLE_INTENSITIES: &str = "\tsample_a.mzML\tsample_b.mzML
FT001\t1000.5\tNA
FT002\t\t2500";

#[test]
fn test_feature_tsv_parsing() {
    let features = FeatureSet::from_reader(SAMPLE_FEATURES.as_bytes()).unwrap();

    assert_eq!(features.len(), 2);
    let ids: Vec<_> = features.ids().collect();
    assert_eq!(ids, vec!["FT001", "FT002"]);

    let first = features.get("FT001").unwrap();
    assert_eq!(first.mz.med, 200.1);
    assert_eq!(first.rt.min, 10.0);
    assert_eq!(first.rt.max, 20.0);
    assert_eq!(first.npeaks, Some(3));
    assert_eq!(first.peak_indices, vec![1, 5, 9]);
    assert_eq!(first.auxiliary.get("QC"), Some(&"2".to_string()));

    let second = features.get("FT002").unwrap();
    assert_eq!(second.peak_indices, vec![2, 7]);
}

#[test]
fn test_feature_tsv_missing_column() {
    let tsv = "id\tmzmed\tmzmin\tmzmax\trtmed\trtmin\nFT001\t1\t1\t1\t1\t1\n";
    let err = FeatureSet::from_reader(tsv.as_bytes()).unwrap_err();
    assert!(matches!(err, ExportError::MissingColumn(ref c) if c == "rtmax"));
}

#[test]
fn test_feature_tsv_invalid_value() {
    let tsv = "id\tmzmed\tmzmin\tmzmax\trtmed\trtmin\trtmax\nFT001\tabc\t1\t1\t1\t1\t1\n";
    let err = FeatureSet::from_reader(tsv.as_bytes()).unwrap_err();
    match err {
        ExportError::InvalidValue { column, row, value } => {
            assert_eq!(column, "mzmed");
            assert_eq!(row, 1);
            assert_eq!(value, "abc");
        }
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn test_duplicate_feature_rejected() {
    let feature = Feature::new(
        "FT001",
        ValueRange::spanning(100.0, 100.1),
        ValueRange::spanning(10.0, 20.0),
    );
    let err = FeatureSet::from_features(vec![feature.clone(), feature]).unwrap_err();
    assert!(matches!(err, ExportError::DuplicateFeature(ref id) if id == "FT001"));
    assert!(err.is_integrity_error());
}

#[test]
fn test_auxiliary_column_union() {
    let mz = ValueRange::spanning(100.0, 100.1);
    let rt = ValueRange::spanning(10.0, 20.0);
    let features = FeatureSet::from_features(vec![
        Feature::new("FT001", mz, rt).with_auxiliary("QC", "1"),
        Feature::new("FT002", mz, rt)
            .with_auxiliary("Blank", "0")
            .with_auxiliary("QC", "2"),
    ])
    .unwrap();

    assert_eq!(features.auxiliary_columns(), vec!["QC", "Blank"]);
    assert!(!features.has_npeaks());
}

#[test]
fn test_intensity_tsv_parsing() {
    let intensities = SampleIntensities::from_reader(SAMPLE_INTENSITIES.as_bytes()).unwrap();

    assert_eq!(intensities.samples(), &["sample_a.mzML", "sample_b.mzML"]);
    assert_eq!(intensities.len(), 2);
    assert_eq!(intensities.value("FT001", "sample_a.mzML"), Some(1000.5));
    assert_eq!(intensities.value("FT001", "sample_b.mzML"), None);
    assert_eq!(intensities.value("FT002", "sample_a.mzML"), None);
    assert_eq!(intensities.value("FT002", "sample_b.mzML"), Some(2500.0));
}

#[test]
fn test_intensity_duplicate_sample_rejected() {
    let input = "id\ts1\ts1\nFT1\t5\t7\n";
    let err = SampleIntensities::from_reader(input.as_bytes()).unwrap_err();
    assert!(matches!(err, ExportError::DuplicateSample(ref s) if s == "s1"));
}

#[test]
fn test_intensity_duplicate_row_rejected() {
    let input = "id\ts1\ts2\nFT1\t5\t7\nFT2\t1\t2\nFT1\t100\t200\n";
    let err = SampleIntensities::from_reader(input.as_bytes()).unwrap_err();
    assert!(matches!(err, ExportError::DuplicateFeature(ref id) if id == "FT1"));
    assert!(err.is_integrity_error());
}

#[test]
fn test_intensity_sample_union() {
    let mut intensities = SampleIntensities::with_samples(["s1"]);
    intensities.insert("FT001", "s1", Some(1.0));
    intensities.insert("FT002", "s2", Some(2.0));
    intensities.ensure_feature("FT003");

    assert_eq!(intensities.samples(), &["s1", "s2"]);
    assert_eq!(intensities.get("FT003").map(|row| row.len()), Some(0));
    let ids: Vec<_> = intensities.feature_ids().collect();
    assert_eq!(ids, vec!["FT001", "FT002", "FT003"]);
}

#[test]
fn test_value_range() {
    let range = ValueRange::spanning(10.0, 20.0);
    assert_eq!(range.med, 15.0);
    assert_eq!(range.width(), 10.0);
    assert!(range.contains(12.5));
    assert!(!range.contains(20.5));
}
