use anyhow::Result;
use clap::{Parser, Subcommand};
use std::path::PathBuf;

mod config;
mod export;
mod info;
mod validate;

pub use config::Config;

/// fbmn-export - Feature-Based Molecular Networking export tool
#[derive(Parser)]
#[command(name = "fbmn-export")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// Verbosity level (-v for info, -vv for debug)
    #[arg(short, long, action = clap::ArgAction::Count)]
    verbose: u8,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Build the feature table and MGF files for molecular networking
    Export {
        /// Feature metadata TSV (id, mzmed, mzmin, mzmax, rtmed, rtmin, rtmax, ...)
        #[arg(short, long, value_name = "FILE")]
        features: PathBuf,

        /// Per-sample intensity TSV (id, one column per sample)
        #[arg(short, long, value_name = "FILE")]
        intensities: PathBuf,

        /// MS2 spectra in MGF format, linked by FEATURE_ID
        #[arg(short, long, value_name = "FILE")]
        spectra: PathBuf,

        /// Output directory
        #[arg(short, long, value_name = "DIR", default_value = "gnps_export")]
        output: PathBuf,

        /// Load settings from a TOML config file
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,

        /// Token written for missing table cells
        #[arg(long, value_name = "TOKEN")]
        na: Option<String>,

        /// Header of the feature identifier column
        #[arg(long, value_name = "NAME")]
        id_column: Option<String>,

        /// Keep zero-intensity peaks in the written spectra
        #[arg(long)]
        no_clean: bool,
    },

    /// Check that a written export is internally consistent
    Validate {
        /// Export directory
        #[arg(value_name = "DIR")]
        dir: PathBuf,

        /// Config file used for the export (for custom file names)
        #[arg(long, value_name = "FILE")]
        config: Option<PathBuf>,
    },

    /// Summarize the export inputs without writing anything
    Info {
        /// Feature metadata TSV
        #[arg(short, long, value_name = "FILE")]
        features: PathBuf,

        /// Per-sample intensity TSV
        #[arg(short, long, value_name = "FILE")]
        intensities: PathBuf,

        /// MS2 spectra MGF
        #[arg(short, long, value_name = "FILE")]
        spectra: PathBuf,
    },
}

impl Cli {
    pub fn verbosity(&self) -> u8 {
        self.verbose
    }
}

pub fn init_logging(verbosity: u8) {
    let log_level = match verbosity {
        0 => "warn",
        1 => "info",
        _ => "debug",
    };
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or(log_level)).init();
}

pub fn dispatch(cli: Cli) -> Result<()> {
    match cli.command {
        Commands::Export {
            features,
            intensities,
            spectra,
            output,
            config,
            na,
            id_column,
            no_clean,
        } => export::run(export::ExportArgs {
            features,
            intensities,
            spectra,
            output,
            config,
            na,
            id_column,
            no_clean,
        }),
        Commands::Validate { dir, config } => validate::run(dir, config),
        Commands::Info {
            features,
            intensities,
            spectra,
        } => info::run(features, intensities, spectra),
    }
}
