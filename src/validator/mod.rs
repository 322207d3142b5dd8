//! # Export Validation
//!
//! Re-reads a written export directory and checks that the artifacts are
//! consistent with each other.
//!
//! ## Checks
//!
//! 1. **Structure**: the directory and all five artifacts exist
//! 2. **Readability**: both tables and both MGF files parse
//! 3. **Tables**: one schema, unique identifiers, MS2-only rows are an
//!    ordered subset of the full table
//! 4. **Representatives**: exactly one spectrum per MS2-only row and no others
//! 5. **Spectra**: every spectrum feature exists and has an MS2-only row
//! 6. **Summary**: recorded counts match the files
//!
//! ## Usage
//!
//! ```rust,no_run
//! use fbmn_export::pipeline::ExportConfig;
//! use fbmn_export::validator::validate_export_dir;
//! use std::path::Path;
//!
//! match validate_export_dir(Path::new("gnps_export"), &ExportConfig::default()) {
//!     Ok(report) => println!("{}", report),
//!     Err(e) => eprintln!("Validation failed: {}", e),
//! }
//! ```

use std::path::Path;

use log::debug;

pub use report::{CheckStatus, ValidationCheck, ValidationReport};

use crate::pipeline::ExportConfig;

mod linkage;
mod report;
mod structure;

/// Errors that stop validation before any linkage check can run
#[derive(Debug, thiserror::Error)]
pub enum ValidationError {
    /// The export directory itself is unusable
    #[error("Structure error: {0}")]
    StructureError(String),

    /// I/O error while inspecting the directory
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),
}

/// Validate the export written to `dir` using the file names in `config`
pub fn validate_export_dir(
    dir: &Path,
    config: &ExportConfig,
) -> Result<ValidationReport, ValidationError> {
    let mut report = ValidationReport::new(dir.display().to_string());
    let names = &config.outputs;

    if structure::check_structure(dir, names, &mut report)? {
        linkage::check_linkage(dir, names, &mut report);
    }

    debug!(
        "Validation of {}: {} checks, {} failed",
        dir.display(),
        report.checks.len(),
        report.failure_count()
    );
    Ok(report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::feature::{Feature, FeatureSet, SampleIntensities, ValueRange};
    use crate::pipeline::ExportPipeline;
    use crate::spectrum::{SpectrumBuilder, SpectrumCollection};

    fn write_export(dir: &Path) {
        let features = FeatureSet::from_features(["FT1", "FT2", "FT3"].map(|id| {
            Feature::new(
                id,
                ValueRange::spanning(100.0, 100.01),
                ValueRange::spanning(5.0, 6.0),
            )
        }))
        .unwrap();
        let mut intensities = SampleIntensities::new();
        for id in ["FT1", "FT2", "FT3"] {
            intensities.insert(id, "s1", Some(10.0));
        }
        let spectra: SpectrumCollection = vec![
            SpectrumBuilder::new(100.0, 5.5).feature("FT1").add_peak(50.0, 1.0).build(),
            SpectrumBuilder::new(100.0, 5.6).feature("FT3").add_peak(50.0, 2.0).build(),
            SpectrumBuilder::new(100.0, 5.7).feature("FT3").add_peak(50.0, 3.0).build(),
        ]
        .into();

        let pipeline = ExportPipeline::default();
        let artifacts = pipeline.run(&features, &intensities, &spectra).unwrap();
        pipeline.write_to_dir(&artifacts, dir).unwrap();
    }

    #[test]
    fn test_validation_report_display() {
        let mut report = ValidationReport::new("out");
        report.add_check(ValidationCheck::ok("Test check 1"));
        report.add_check(ValidationCheck::warning("Test check 2", "This is a warning"));
        report.add_check(ValidationCheck::failed("Test check 3", "This failed"));

        let output = format!("{}", report);
        assert!(output.contains("✓"));
        assert!(output.contains("⚠"));
        assert!(output.contains("✗"));
        assert!(output.contains("1 passed, 1 warnings, 1 failed"));
        assert!(output.ends_with("Validation FAILED\n"));
        assert_eq!(report.failures().count(), 1);
        assert_eq!(
            report.check("Test check 2").and_then(|c| c.status.message()),
            Some("This is a warning")
        );
    }

    #[test]
    fn test_valid_export_passes() {
        let dir = tempfile::tempdir().unwrap();
        write_export(dir.path());

        let report = validate_export_dir(dir.path(), &ExportConfig::default()).unwrap();
        assert!(!report.has_failures(), "{report}");
        assert!(!report.has_warnings(), "{report}");
    }

    #[test]
    fn test_missing_directory_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let result = validate_export_dir(&dir.path().join("absent"), &ExportConfig::default());
        assert!(matches!(result, Err(ValidationError::StructureError(_))));
    }

    #[test]
    fn test_missing_file_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_export(dir.path());
        std::fs::remove_file(dir.path().join("ms2spectra_maxTic.mgf")).unwrap();

        let report = validate_export_dir(dir.path(), &ExportConfig::default()).unwrap();
        assert_eq!(report.failure_count(), 1);
        assert!(report.check("File present: ms2spectra_maxTic.mgf").is_some());
    }

    #[test]
    fn test_row_without_representative_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_export(dir.path());

        let path = dir.path().join("xcms_onlyMS2.txt");
        let full = std::fs::read_to_string(dir.path().join("xcms_all.txt")).unwrap();
        std::fs::write(&path, full).unwrap();

        let report = validate_export_dir(dir.path(), &ExportConfig::default()).unwrap();
        let check = report
            .check("MS2-only table matches representative spectra")
            .unwrap();
        assert!(matches!(&check.status, CheckStatus::Failed(msg) if msg.contains("FT2")));
    }

    #[test]
    fn test_duplicate_representative_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_export(dir.path());

        let path = dir.path().join("ms2spectra_maxTic.mgf");
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::write(&path, format!("{text}{text}")).unwrap();

        let report = validate_export_dir(dir.path(), &ExportConfig::default()).unwrap();
        assert!(report.has_failures());
        let check = report.check("One representative per feature").unwrap();
        assert!(matches!(check.status, CheckStatus::Failed(_)));
        let summary = report.check("Summary matches artifacts").unwrap();
        assert!(matches!(summary.status, CheckStatus::Warning(_)));
    }

    #[test]
    fn test_unlinked_record_sharing_scans_fails() {
        let dir = tempfile::tempdir().unwrap();
        write_export(dir.path());

        let path = dir.path().join("ms2spectra_all.mgf");
        let text = std::fs::read_to_string(&path).unwrap();
        let orphan = "BEGIN IONS\nTITLE=orphan\nSCANS=1\nPEPMASS=200\n60 4\nEND IONS\n";
        std::fs::write(&path, format!("{orphan}\n{text}")).unwrap();

        let report = validate_export_dir(dir.path(), &ExportConfig::default()).unwrap();
        let check = report.check("SCANS values identify one feature").unwrap();
        assert!(matches!(&check.status, CheckStatus::Failed(msg) if msg.contains('1')));
    }

    #[test]
    fn test_features_sharing_scans_fail() {
        let dir = tempfile::tempdir().unwrap();
        write_export(dir.path());

        let path = dir.path().join("ms2spectra_all.mgf");
        let text = std::fs::read_to_string(&path).unwrap();
        std::fs::write(&path, text.replace("SCANS=3", "SCANS=1")).unwrap();

        let report = validate_export_dir(dir.path(), &ExportConfig::default()).unwrap();
        let check = report.check("SCANS values identify one feature").unwrap();
        assert!(matches!(check.status, CheckStatus::Failed(_)));
    }
}
