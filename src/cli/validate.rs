use anyhow::Result;
use log::info;
use std::path::PathBuf;

use fbmn_export::validator::validate_export_dir;

use super::Config;

/// Validate a written export directory
pub fn run(dir: PathBuf, config: Option<PathBuf>) -> Result<()> {
    let config = Config::load(config.as_deref())?.to_export_config();

    info!("Validating {}", dir.display());

    match validate_export_dir(&dir, &config) {
        Ok(report) => {
            println!("{}", report.format_colored());

            if report.has_failures() {
                std::process::exit(1);
            }

            Ok(())
        }
        Err(e) => {
            eprintln!("Validation error: {}", e);
            std::process::exit(1);
        }
    }
}
