use anyhow::{Context, Result};
use log::info;
use std::path::PathBuf;

use fbmn_export::pipeline::{ExportPipeline, InputPaths};

use super::Config;

/// Arguments of the export command
pub struct ExportArgs {
    pub features: PathBuf,
    pub intensities: PathBuf,
    pub spectra: PathBuf,
    pub output: PathBuf,
    pub config: Option<PathBuf>,
    pub na: Option<String>,
    pub id_column: Option<String>,
    pub no_clean: bool,
}

/// Build and write the FBMN export
pub fn run(args: ExportArgs) -> Result<()> {
    let file_config = Config::load(args.config.as_deref())?;
    let mut config = file_config.to_export_config();
    if let Some(na) = args.na {
        config.na_value = na;
    }
    if let Some(id_column) = args.id_column {
        config.id_column = id_column;
    }
    if args.no_clean {
        config.clean_spectra = false;
    }

    info!("fbmn-export");
    info!("===========");
    info!("Features:    {}", args.features.display());
    info!("Intensities: {}", args.intensities.display());
    info!("Spectra:     {}", args.spectra.display());
    info!("Output:      {}", args.output.display());

    let inputs = InputPaths::new(args.features, args.intensities, args.spectra);
    let pipeline = ExportPipeline::new(config);
    let summary = pipeline
        .export_files(&inputs, &args.output)
        .with_context(|| format!("Export to {} failed", args.output.display()))?;

    println!("{summary}");
    println!("Output: {}", args.output.display());
    Ok(())
}
