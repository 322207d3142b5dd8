use std::io::{self, BufWriter, Write};

use super::{BEGIN_IONS, END_IONS};
use crate::spectrum::Spectrum;

/// Writes spectra as MGF records linked to the feature table
///
/// `SCANS` is derived from the feature identifier with `feature_prefix`
/// stripped. Spectra without a feature get no `SCANS` line, so they can never
/// be linked to a feature table row.
pub struct MgfWriter<W: Write> {
    handle: BufWriter<W>,
    feature_prefix: String,
    records_written: usize,
}

impl<W: Write> MgfWriter<W> {
    /// Create a writer with the default `FT` feature prefix
    pub fn new(sink: W) -> Self {
        Self {
            handle: BufWriter::new(sink),
            feature_prefix: "FT".to_string(),
            records_written: 0,
        }
    }

    /// Set the prefix stripped from feature identifiers to form `SCANS`
    pub fn with_feature_prefix(mut self, prefix: impl Into<String>) -> Self {
        self.feature_prefix = prefix.into();
        self
    }

    /// Number of records written so far
    pub fn records_written(&self) -> usize {
        self.records_written
    }

    fn write_kv(&mut self, key: &str, value: &str) -> io::Result<()> {
        writeln!(self.handle, "{key}={value}")
    }

    fn scans_value<'a>(&self, spectrum: &'a Spectrum) -> Option<&'a str> {
        spectrum
            .feature_id
            .as_deref()
            .map(|id| id.strip_prefix(self.feature_prefix.as_str()).unwrap_or(id))
    }

    /// Write one `BEGIN IONS` ... `END IONS` record
    pub fn write_spectrum(&mut self, spectrum: &Spectrum) -> io::Result<()> {
        let title = spectrum.title.clone().unwrap_or_else(|| {
            format!(
                "msLevel 2; retentionTime {}; precMz {}",
                spectrum.retention_time, spectrum.precursor_mz
            )
        });
        writeln!(self.handle, "{BEGIN_IONS}")?;
        self.write_kv("TITLE", &title)?;
        if let Some(id) = &spectrum.feature_id {
            self.write_kv("FEATURE_ID", id)?;
        }
        if let Some(scans) = self.scans_value(spectrum) {
            self.write_kv("SCANS", scans)?;
        }
        self.write_kv("RTINSECONDS", &spectrum.retention_time.to_string())?;

        match spectrum.precursor_intensity {
            Some(intensity) => self.write_kv(
                "PEPMASS",
                &format!("{} {}", spectrum.precursor_mz, intensity),
            )?,
            None => self.write_kv("PEPMASS", &spectrum.precursor_mz.to_string())?,
        }

        if let Some(z) = spectrum.precursor_charge.filter(|z| *z != 0) {
            let sign = if z > 0 { '+' } else { '-' };
            self.write_kv("CHARGE", &format!("{}{}", z.unsigned_abs(), sign))?;
        }

        for peak in &spectrum.peaks {
            writeln!(self.handle, "{} {}", peak.mz, peak.intensity)?;
        }
        writeln!(self.handle, "{END_IONS}")?;
        writeln!(self.handle)?;

        self.records_written += 1;
        Ok(())
    }

    /// Write every spectrum in order
    pub fn write_spectra<'a, I>(&mut self, spectra: I) -> io::Result<()>
    where
        I: IntoIterator<Item = &'a Spectrum>,
    {
        for spectrum in spectra {
            self.write_spectrum(spectrum)?;
        }
        Ok(())
    }

    /// Flush and return the underlying sink
    pub fn finish(self) -> io::Result<W> {
        self.handle.into_inner().map_err(|e| e.into_error())
    }
}
