//! # MGF Module
//!
//! Reading and writing Mascot Generic Format files, the spectral exchange
//! format consumed by the molecular networking service.
//!
//! Records link back to the feature table through two headers:
//!
//! - `FEATURE_ID`: the full feature identifier (e.g. `FT0042`)
//! - `SCANS`: the identifier with its configured prefix stripped (e.g. `0042`),
//!   which is the key the networking service joins on
//!
//! ```text
//! BEGIN IONS
//! TITLE=msLevel 2; retentionTime 62.4; precMz 301.1
//! FEATURE_ID=FT0042
//! SCANS=0042
//! RTINSECONDS=62.4
//! PEPMASS=301.1
//! CHARGE=1+
//! 85.03 1200
//! 127.04 800
//! END IONS
//! ```

mod reader;
mod writer;


pub use reader::{read_mgf_file, MgfReader};
pub use writer::MgfWriter;

/// Errors that can occur while parsing MGF
#[derive(Debug, thiserror::Error)]
pub enum MgfError {
    /// I/O error, including invalid UTF-8
    #[error("I/O error: {0}")]
    IoError(#[from] std::io::Error),

    /// A `KEY=value` line could not be interpreted
    #[error("Malformed header on line {line}: {message}")]
    MalformedHeaderLine {
        /// 1-based line number
        line: usize,
        /// What was wrong
        message: String,
    },

    /// A peak line did not hold at least two numeric columns
    #[error("Malformed peak on line {line}: '{content}'")]
    MalformedPeakLine {
        /// 1-based line number
        line: usize,
        /// The offending line
        content: String,
    },

    /// A spectrum had no `PEPMASS` header
    #[error("Spectrum starting on line {0} has no PEPMASS")]
    MissingPrecursor(usize),

    /// End of input reached inside a `BEGIN IONS` block
    #[error("Spectrum starting on line {0} is missing END IONS")]
    UnterminatedSpectrum(usize),
}

pub(crate) const BEGIN_IONS: &str = "BEGIN IONS";
pub(crate) const END_IONS: &str = "END IONS";
