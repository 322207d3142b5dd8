//! # fbmn-export - Feature-Based Molecular Networking Export
//!
//! `fbmn_export` turns the output of an LC-MS feature detection run into the
//! file pair expected by feature-based molecular networking services: a
//! tab-separated feature quantification table and an MGF file of MS2
//! spectra, linked through a shared feature identifier.
//!
//! ## Key Features
//!
//! - **Feature Table**: Joins per-feature m/z and retention time ranges with
//!   the per-sample intensity matrix. Missing sample values become `NA`
//!   cells, never dropped rows.
//!
//! - **Representative Spectra**: Reduces the MS2 spectra of each feature to
//!   the one with the highest total ion current.
//!
//! - **MS2-only Export**: Restricts the table to features with at least one
//!   spectrum, so the table rows and MGF records match one-to-one.
//!
//! - **Strict Linkage**: Identifiers that appear in one input but not the
//!   other abort the export instead of producing a silently broken pair.
//!
//! - **Validation**: Re-reads a written export and cross-checks the files.
//!
//! ## Quick Start
//!
//! ```rust
//! use fbmn_export::prelude::*;
//!
//! let features = FeatureSet::from_features(vec![
//!     Feature::new("FT1", ValueRange::spanning(150.0, 150.02), ValueRange::spanning(30.0, 40.0)),
//!     Feature::new("FT2", ValueRange::spanning(220.1, 220.12), ValueRange::spanning(50.0, 60.0)),
//! ])?;
//!
//! let mut intensities = SampleIntensities::new();
//! intensities.insert("FT1", "sample_a", Some(1200.0));
//! intensities.insert("FT2", "sample_a", None);
//!
//! let spectra: SpectrumCollection = vec![
//!     SpectrumBuilder::new(150.01, 35.0).feature("FT1").add_peak(90.0, 5.0).build(),
//!     SpectrumBuilder::new(150.01, 36.0).feature("FT1").add_peak(90.0, 50.0).build(),
//! ]
//! .into();
//!
//! let artifacts = ExportPipeline::default().run(&features, &intensities, &spectra)?;
//! assert_eq!(artifacts.full_table.len(), 2);
//! assert_eq!(artifacts.ms2_table.len(), 1);
//! assert_eq!(artifacts.representatives.len(), 1);
//! # Ok::<(), fbmn_export::ExportError>(())
//! ```
//!
//! Writing the artifacts with [`pipeline::ExportPipeline::write_to_dir`]
//! produces:
//! ```text
//! gnps_export/
//! ├── xcms_all.txt            # Full feature table
//! ├── xcms_onlyMS2.txt        # Features with MS2 spectra
//! ├── ms2spectra_all.mgf      # Every spectrum
//! ├── ms2spectra_maxTic.mgf   # One spectrum per feature
//! └── export_summary.json     # Counts and file names
//! ```
//!
//! ## Architecture
//!
//! - [`feature`]: feature metadata and the intensity matrix, with TSV readers
//! - [`spectrum`]: MS2 spectra and collections
//! - [`mgf`]: MGF reader and writer
//! - [`table`]: the export table and [`table::FeatureTableBuilder`]
//! - [`selector`]: maximal-TIC representative selection
//! - [`filter`]: MS2-only table filtering
//! - [`pipeline`]: orchestration, configuration and atomic output
//! - [`validator`]: consistency checks over a written export

#![warn(missing_docs)]
#![deny(rustdoc::missing_crate_level_docs)]

pub mod error;
pub mod feature;
pub mod filter;
pub mod mgf;
pub mod pipeline;
pub mod selector;
pub mod spectrum;
pub mod table;
pub mod validator;

pub use error::ExportError;

/// Re-export commonly used types for convenience
pub mod prelude {
    pub use crate::error::ExportError;
    pub use crate::feature::{Feature, FeatureSet, SampleIntensities, ValueRange};
    pub use crate::filter::{ExportFilter, Ms2OnlyExport};
    pub use crate::mgf::{read_mgf_file, MgfError, MgfReader, MgfWriter};
    pub use crate::pipeline::{
        ExportArtifacts, ExportConfig, ExportPipeline, ExportSummary, InputPaths, OutputNames,
    };
    pub use crate::selector::{RepresentativeSelection, RepresentativeSpectrumSelector};
    pub use crate::spectrum::{Peak, Spectrum, SpectrumBuilder, SpectrumCollection};
    pub use crate::table::{ExportTable, FeatureTableBuilder};
    pub use crate::validator::{validate_export_dir, ValidationReport};
}
