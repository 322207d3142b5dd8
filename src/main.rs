//! # fbmn-export
//!
//! Command-line tool that writes the feature table and MGF files for
//! feature-based molecular networking.
//!
//! ## Usage
//!
//! ```bash
//! # Build the export
//! fbmn-export export -f features.tsv -i intensities.tsv -s spectra.mgf -o gnps_export
//!
//! # Check a written export
//! fbmn-export validate gnps_export
//!
//! # Inspect inputs
//! fbmn-export info -f features.tsv -i intensities.tsv -s spectra.mgf
//! ```

use anyhow::Result;
use clap::Parser;

mod cli;

fn main() -> Result<()> {
    let cli = cli::Cli::parse();
    cli::init_logging(cli.verbosity());
    cli::dispatch(cli)
}
