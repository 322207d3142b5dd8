use anyhow::{Context, Result};
use std::path::PathBuf;

use fbmn_export::pipeline::InputPaths;

/// Display counts for the three export inputs
pub fn run(features: PathBuf, intensities: PathBuf, spectra: PathBuf) -> Result<()> {
    let paths = InputPaths::new(features, intensities, spectra);
    let inputs = paths.load().context("Failed to read inputs")?;

    let linked = inputs.spectra.feature_ids();
    let missing_spectra = inputs
        .features
        .ids()
        .filter(|id| !linked.contains(id))
        .count();

    println!("FBMN Export Inputs");
    println!("==================");
    println!();

    println!("Features ({}):", paths.features.display());
    println!("  Features: {}", inputs.features.len());
    let auxiliary = inputs.features.auxiliary_columns();
    if !auxiliary.is_empty() {
        println!("  Extra columns: {}", auxiliary.join(", "));
    }
    println!();

    println!("Intensities ({}):", paths.intensities.display());
    println!("  Samples: {}", inputs.intensities.samples().len());
    println!("  Rows: {}", inputs.intensities.len());
    println!();

    println!("Spectra ({}):", paths.spectra.display());
    println!("  Spectra: {}", inputs.spectra.len());
    println!("  Peaks: {}", inputs.spectra.total_peaks());
    println!("  Without feature: {}", inputs.spectra.unlinked_count());
    println!("  Features with spectra: {}", linked.len());
    println!("  Features without spectra: {}", missing_spectra);

    Ok(())
}
