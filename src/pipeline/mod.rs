//! End-to-end export orchestration.
//!
//! [`ExportPipeline::run`] is pure: it builds the full table, cleans the
//! spectra, selects representatives and filters the MS2-only table.
//! [`ExportPipeline::write_to_dir`] then persists the four artifacts and a
//! JSON summary. Every file is first written to a temporary file in the
//! output directory. Files are renamed into place only after all of them are
//! complete, so a failed write leaves any previous export untouched.
//!
//! ```no_run
//! use fbmn_export::pipeline::{ExportConfig, ExportPipeline, InputPaths};
//!
//! let inputs = InputPaths::new("features.tsv", "intensities.tsv", "spectra.mgf");
//! let pipeline = ExportPipeline::new(ExportConfig::default());
//! let summary = pipeline.export_files(&inputs, "gnps_export")?;
//! println!("{summary}");
//! # Ok::<(), fbmn_export::ExportError>(())
//! ```

mod config;
mod summary;


pub use config::{ExportConfig, OutputNames};
pub use summary::ExportSummary;

use std::fs::{self, File};
use std::path::{Path, PathBuf};

use log::{debug, info, warn};
use tempfile::NamedTempFile;

use crate::error::ExportError;
use crate::feature::{FeatureSet, SampleIntensities};
use crate::filter::ExportFilter;
use crate::mgf::{read_mgf_file, MgfWriter};
use crate::spectrum::SpectrumCollection;
use crate::table::{ExportTable, FeatureTableBuilder};

/// Locations of the three input files
#[derive(Debug, Clone)]
pub struct InputPaths {
    /// Feature metadata TSV
    pub features: PathBuf,
    /// Per-sample intensity TSV
    pub intensities: PathBuf,
    /// MS2 spectra MGF
    pub spectra: PathBuf,
}

/// Parsed inputs
#[derive(Debug, Clone)]
pub struct ExportInputs {
    /// Feature metadata
    pub features: FeatureSet,
    /// Intensity matrix
    pub intensities: SampleIntensities,
    /// MS2 spectra
    pub spectra: SpectrumCollection,
}

impl InputPaths {
    /// Bundle the three input paths
    pub fn new(
        features: impl Into<PathBuf>,
        intensities: impl Into<PathBuf>,
        spectra: impl Into<PathBuf>,
    ) -> Self {
        Self {
            features: features.into(),
            intensities: intensities.into(),
            spectra: spectra.into(),
        }
    }

    /// Read and parse all three inputs
    pub fn load(&self) -> Result<ExportInputs, ExportError> {
        info!("Reading features from {}", self.features.display());
        let features = FeatureSet::from_tsv_file(&self.features)?;
        info!("Reading intensities from {}", self.intensities.display());
        let intensities = SampleIntensities::from_tsv_file(&self.intensities)?;
        info!("Reading spectra from {}", self.spectra.display());
        let spectra = read_mgf_file(&self.spectra)?;

        Ok(ExportInputs {
            features,
            intensities,
            spectra,
        })
    }
}

/// In-memory result of an export, ready to be written
#[derive(Debug, Clone)]
pub struct ExportArtifacts {
    /// Every feature
    pub full_table: ExportTable,
    /// Features with at least one MS2 spectrum
    pub ms2_table: ExportTable,
    /// All spectra, cleaned if configured
    pub spectra: SpectrumCollection,
    /// One spectrum per feature, in group order
    pub representatives: SpectrumCollection,
    /// Zero-intensity peaks dropped by cleaning
    pub removed_peaks: usize,
}

/// Builds and writes the FBMN export
#[derive(Debug, Clone, Default)]
pub struct ExportPipeline {
    config: ExportConfig,
}

impl ExportPipeline {
    /// Create a pipeline with the given configuration
    pub fn new(config: ExportConfig) -> Self {
        Self { config }
    }

    /// The active configuration
    pub fn config(&self) -> &ExportConfig {
        &self.config
    }

    /// Build all artifacts in memory
    pub fn run(
        &self,
        features: &FeatureSet,
        intensities: &SampleIntensities,
        spectra: &SpectrumCollection,
    ) -> Result<ExportArtifacts, ExportError> {
        let full_table = FeatureTableBuilder::new()
            .with_id_column(self.config.id_column.as_str())
            .build(features, intensities)?;
        info!(
            "Feature table: {} features x {} samples",
            full_table.len(),
            full_table.sample_columns().len()
        );

        let (spectra, removed_peaks) = if self.config.clean_spectra {
            let cleaned = spectra.cleaned();
            let removed = spectra.total_peaks() - cleaned.total_peaks();
            debug!("Cleaning removed {} zero-intensity peaks", removed);
            (cleaned, removed)
        } else {
            (spectra.clone(), 0)
        };

        let unlinked = spectra.unlinked_count();
        if unlinked > 0 {
            warn!(
                "{} of {} spectra are not linked to a feature",
                unlinked,
                spectra.len()
            );
        }

        let ms2 = ExportFilter::new().ms2_only(&full_table, &spectra)?;
        let ms2_table = ms2.table;
        let representatives = ms2.representatives.to_collection();
        info!(
            "{} of {} features have MS2 spectra",
            ms2_table.len(),
            full_table.len()
        );

        Ok(ExportArtifacts {
            full_table,
            ms2_table,
            spectra,
            representatives,
            removed_peaks,
        })
    }

    /// Write artifacts and the JSON summary into `dir`, creating it if needed
    pub fn write_to_dir<P: AsRef<Path>>(
        &self,
        artifacts: &ExportArtifacts,
        dir: P,
    ) -> Result<ExportSummary, ExportError> {
        let dir = dir.as_ref();
        fs::create_dir_all(dir)?;
        let names = &self.config.outputs;
        let na = self.config.na_value.as_str();

        let mut staged = vec![
            stage(dir, &names.full_table, |file| {
                artifacts.full_table.write_tsv(file, na)
            })?,
            stage(dir, &names.ms2_table, |file| {
                artifacts.ms2_table.write_tsv(file, na)
            })?,
            stage(dir, &names.full_mgf, |file| {
                self.write_mgf(file, &artifacts.spectra)
            })?,
            stage(dir, &names.representative_mgf, |file| {
                self.write_mgf(file, &artifacts.representatives)
            })?,
        ];

        let summary = ExportSummary {
            created_at: chrono::Utc::now().to_rfc3339(),
            features: artifacts.full_table.len(),
            samples: artifacts.full_table.sample_columns().len(),
            ms2_features: artifacts.ms2_table.len(),
            spectra: artifacts.spectra.len(),
            unlinked_spectra: artifacts.spectra.unlinked_count(),
            representative_spectra: artifacts.representatives.len(),
            removed_peaks: artifacts.removed_peaks,
            files: names.clone(),
        };
        staged.push(stage(dir, &names.summary, |file| {
            serde_json::to_writer_pretty(file, &summary)?;
            Ok(())
        })?);

        for file in staged {
            file.persist()?;
        }

        info!("Wrote export to {}", dir.display());
        Ok(summary)
    }

    /// Read inputs, run the export and write it into `dir`
    pub fn export_files<P: AsRef<Path>>(
        &self,
        inputs: &InputPaths,
        dir: P,
    ) -> Result<ExportSummary, ExportError> {
        let loaded = inputs.load()?;
        let artifacts = self.run(&loaded.features, &loaded.intensities, &loaded.spectra)?;
        self.write_to_dir(&artifacts, dir)
    }

    fn write_mgf(&self, file: &mut File, spectra: &SpectrumCollection) -> Result<(), ExportError> {
        let mut writer =
            MgfWriter::new(file).with_feature_prefix(self.config.feature_prefix.as_str());
        writer.write_spectra(spectra)?;
        debug!("Wrote {} MGF records", writer.records_written());
        writer.finish()?;
        Ok(())
    }
}

/// A complete output file waiting to be renamed over its target
struct StagedFile {
    temp: NamedTempFile,
    target: PathBuf,
}

impl StagedFile {
    fn persist(self) -> Result<PathBuf, ExportError> {
        self.temp
            .persist(&self.target)
            .map_err(|e| ExportError::IoError(e.error))?;
        debug!("Wrote {}", self.target.display());
        Ok(self.target)
    }
}

/// Write `name` into a temporary file in `dir`, removed again if dropped unpersisted
fn stage<F>(dir: &Path, name: &str, write: F) -> Result<StagedFile, ExportError>
where
    F: FnOnce(&mut File) -> Result<(), ExportError>,
{
    let mut temp = NamedTempFile::new_in(dir)?;
    write(temp.as_file_mut())?;
    temp.as_file().sync_all()?;
    Ok(StagedFile {
        temp,
        target: dir.join(name),
    })
}
