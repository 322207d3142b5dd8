use std::fs::File;
use std::io::{BufRead, BufReader, Read};
use std::path::Path;

use log::debug;

use super::{MgfError, BEGIN_IONS, END_IONS};
use crate::spectrum::{Peak, Spectrum, SpectrumCollection};

/// Spectrum fields accumulated between `BEGIN IONS` and `END IONS`
#[derive(Debug, Default)]
struct PartialSpectrum {
    start_line: usize,
    title: Option<String>,
    retention_time: Option<f64>,
    precursor_mz: Option<f64>,
    precursor_intensity: Option<f64>,
    precursor_charge: Option<i32>,
    scan: Option<u32>,
    feature_id: Option<String>,
    peaks: Vec<Peak>,
}

impl PartialSpectrum {
    fn new(start_line: usize) -> Self {
        Self {
            start_line,
            ..Default::default()
        }
    }

    fn finish(self) -> Result<Spectrum, MgfError> {
        let precursor_mz = self
            .precursor_mz
            .ok_or(MgfError::MissingPrecursor(self.start_line))?;
        Ok(Spectrum {
            scan: self.scan,
            title: self.title,
            retention_time: self.retention_time.unwrap_or(0.0),
            precursor_mz,
            precursor_charge: self.precursor_charge,
            precursor_intensity: self.precursor_intensity,
            feature_id: self.feature_id,
            peaks: self.peaks,
        })
    }
}

fn is_peak_line(line: &str) -> bool {
    line.chars().next().is_some_and(|c| c.is_ascii_digit())
}

fn parse_peak(line_number: usize, line: &str) -> Result<Peak, MgfError> {
    let malformed = || MgfError::MalformedPeakLine {
        line: line_number,
        content: line.to_string(),
    };
    let mut tokens = line.split_ascii_whitespace();
    let mut next_value = || {
        tokens
            .next()
            .and_then(|t| t.parse::<f64>().ok())
            .filter(|v| v.is_finite())
            .ok_or_else(malformed)
    };
    let mz = next_value()?;
    let intensity = next_value()?;
    Ok(Peak::new(mz, intensity))
}

/// Parse a charge such as `2+`, `3-`, `-1` or `2`
fn parse_charge(line_number: usize, value: &str) -> Result<i32, MgfError> {
    let token = value.split_ascii_whitespace().next().unwrap_or("");
    let (sign, digits) = if let Some(stripped) = token.strip_suffix('+') {
        (1, stripped)
    } else if let Some(stripped) = token.strip_suffix('-') {
        (-1, stripped)
    } else {
        (1, token)
    };

    digits
        .parse::<i32>()
        .ok()
        .filter(|z| sign == 1 || *z >= 0)
        .map(|z| sign * z)
        .ok_or_else(|| MgfError::MalformedHeaderLine {
            line: line_number,
            message: format!("could not parse charge '{value}'"),
        })
}

fn parse_header(
    line_number: usize,
    line: &str,
    partial: &mut PartialSpectrum,
) -> Result<(), MgfError> {
    let Some((key, value)) = line.split_once('=') else {
        return Err(MgfError::MalformedHeaderLine {
            line: line_number,
            message: format!("no '=' in '{line}'"),
        });
    };
    let value = value.trim();
    let malformed = |what: &str| MgfError::MalformedHeaderLine {
        line: line_number,
        message: format!("invalid {what} '{value}'"),
    };

    match key.trim().to_ascii_uppercase().as_str() {
        "TITLE" => partial.title = Some(value.to_string()),
        "RTINSECONDS" => {
            partial.retention_time = Some(value.parse().map_err(|_| malformed("RTINSECONDS"))?);
        }
        "PEPMASS" => {
            let mut parts = value.split_ascii_whitespace();
            let mz = parts
                .next()
                .and_then(|t| t.parse().ok())
                .ok_or_else(|| malformed("PEPMASS"))?;
            partial.precursor_mz = Some(mz);
            if let Some(intensity) = parts.next() {
                partial.precursor_intensity =
                    Some(intensity.parse().map_err(|_| malformed("PEPMASS intensity"))?);
            }
            if let Some(charge) = parts.next() {
                partial.precursor_charge = Some(parse_charge(line_number, charge)?);
            }
        }
        "CHARGE" => partial.precursor_charge = Some(parse_charge(line_number, value)?),
        "SCANS" => match value.parse() {
            Ok(scan) => partial.scan = Some(scan),
            Err(_) => debug!("Ignoring non-numeric SCANS '{value}' on line {line_number}"),
        },
        "FEATURE_ID" => {
            if !value.is_empty() {
                partial.feature_id = Some(value.to_string());
            }
        }
        _ => {}
    }
    Ok(())
}

/// Streaming MGF reader
///
/// Lines outside `BEGIN IONS` blocks that hold `=` are file-level headers and
/// are skipped, as are blank lines and `#` comments.
pub struct MgfReader<R: Read> {
    handle: BufReader<R>,
    buffer: String,
    line_number: usize,
}

impl<R: Read> MgfReader<R> {
    /// Create a reader over any byte source
    pub fn new(source: R) -> Self {
        Self {
            handle: BufReader::new(source),
            buffer: String::new(),
            line_number: 0,
        }
    }

    /// Read the next spectrum, or `None` at end of input
    pub fn next_spectrum(&mut self) -> Result<Option<Spectrum>, MgfError> {
        let mut partial: Option<PartialSpectrum> = None;

        loop {
            self.buffer.clear();
            if self.handle.read_line(&mut self.buffer)? == 0 {
                return match partial {
                    Some(p) => Err(MgfError::UnterminatedSpectrum(p.start_line)),
                    None => Ok(None),
                };
            }
            self.line_number += 1;
            let line_number = self.line_number;
            let line = self.buffer.trim();

            if line.is_empty() || line.starts_with('#') {
                continue;
            }

            if line == END_IONS {
                if let Some(done) = partial.take() {
                    return done.finish().map(Some);
                }
            }

            match partial.as_mut() {
                None => {
                    if line == BEGIN_IONS {
                        partial = Some(PartialSpectrum::new(line_number));
                    } else if !line.contains('=') {
                        return Err(MgfError::MalformedHeaderLine {
                            line: line_number,
                            message: format!("expected {BEGIN_IONS}, found '{line}'"),
                        });
                    }
                }
                Some(current) => {
                    if is_peak_line(line) {
                        current.peaks.push(parse_peak(line_number, line)?);
                    } else if !current.peaks.is_empty() {
                        return Err(MgfError::MalformedPeakLine {
                            line: line_number,
                            content: line.to_string(),
                        });
                    } else {
                        parse_header(line_number, line, current)?;
                    }
                }
            }
        }
    }

    /// Read every remaining spectrum into a collection
    pub fn read_all(&mut self) -> Result<SpectrumCollection, MgfError> {
        let mut collection = SpectrumCollection::new();
        while let Some(spectrum) = self.next_spectrum()? {
            collection.push(spectrum);
        }
        debug!("Read {} MGF spectra", collection.len());
        Ok(collection)
    }
}

impl<R: Read> Iterator for MgfReader<R> {
    type Item = Result<Spectrum, MgfError>;

    fn next(&mut self) -> Option<Self::Item> {
        self.next_spectrum().transpose()
    }
}

/// Read all spectra from an MGF file
pub fn read_mgf_file<P: AsRef<Path>>(path: P) -> Result<SpectrumCollection, MgfError> {
    let file = File::open(path)?;
    MgfReader::new(file).read_all()
}
