use std::collections::HashSet;
use std::fs::File;
use std::io::{BufReader, Read};
use std::path::Path;

use log::debug;

use super::{Feature, FeatureSet, SampleIntensities, ValueRange, PEAK_INDEX_COLUMN};
use crate::error::ExportError;

/// Tokens treated as a missing value in input tables
const NA_TOKENS: &[&str] = &["", "NA", "NaN", "nan", "null"];

const REQUIRED_COLUMNS: [&str; 6] = ["mzmed", "mzmin", "mzmax", "rtmed", "rtmin", "rtmax"];

fn tsv_reader<R: Read>(reader: R) -> csv::Reader<R> {
    csv::ReaderBuilder::new()
        .delimiter(b'\t')
        .flexible(true)
        .has_headers(true)
        .from_reader(reader)
}

fn is_na(value: &str) -> bool {
    NA_TOKENS.contains(&value)
}

fn parse_f64(column: &str, row: usize, value: &str) -> Result<f64, ExportError> {
    value.parse().map_err(|_| ExportError::InvalidValue {
        column: column.to_string(),
        row,
        value: value.to_string(),
    })
}

/// Parse a peak index list like `1,2,3`, `1;2`, `1 2` or `c(1, 2, 3)`
fn parse_peak_indices(row: usize, value: &str) -> Result<Vec<usize>, ExportError> {
    let inner = value
        .strip_prefix("c(")
        .and_then(|v| v.strip_suffix(')'))
        .unwrap_or(value);

    inner
        .split(|c: char| c == ',' || c == ';' || c.is_whitespace())
        .filter(|token| !token.is_empty())
        .map(|token| {
            token.parse().map_err(|_| ExportError::InvalidValue {
                column: PEAK_INDEX_COLUMN.to_string(),
                row,
                value: value.to_string(),
            })
        })
        .collect()
}

impl FeatureSet {
    /// Parse feature definitions from a TSV file
    pub fn from_tsv_file<P: AsRef<Path>>(path: P) -> Result<Self, ExportError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse feature definitions from a reader.
    ///
    /// The first column is the feature identifier whatever its header.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ExportError> {
        let mut csv_reader = tsv_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|s| s.trim().to_string())
            .collect();

        let position = |name: &str| headers.iter().skip(1).position(|h| h == name).map(|i| i + 1);

        let mut required = [0usize; 6];
        for (slot, name) in required.iter_mut().zip(REQUIRED_COLUMNS) {
            *slot = position(name).ok_or_else(|| ExportError::MissingColumn(name.to_string()))?;
        }
        let npeaks_column = position("npeaks");
        let peak_index_column = position(PEAK_INDEX_COLUMN);

        let mut features = FeatureSet::new();

        for (i, record) in csv_reader.records().enumerate() {
            let record = record?;
            let row = i + 1;
            let cell = |idx: usize| record.get(idx).map(str::trim).unwrap_or("");

            let id = cell(0);
            if id.is_empty() {
                return Err(ExportError::InvalidValue {
                    column: headers.first().cloned().unwrap_or_default(),
                    row,
                    value: String::new(),
                });
            }

            let mut values = [0.0f64; 6];
            for (value, (&idx, name)) in values
                .iter_mut()
                .zip(required.iter().zip(REQUIRED_COLUMNS))
            {
                *value = parse_f64(name, row, cell(idx))?;
            }
            let [mzmed, mzmin, mzmax, rtmed, rtmin, rtmax] = values;

            let mut feature = Feature::new(
                id,
                ValueRange::new(mzmed, mzmin, mzmax),
                ValueRange::new(rtmed, rtmin, rtmax),
            );

            if let Some(idx) = npeaks_column {
                let value = cell(idx);
                if !is_na(value) {
                    let npeaks = value.parse().map_err(|_| ExportError::InvalidValue {
                        column: "npeaks".to_string(),
                        row,
                        value: value.to_string(),
                    })?;
                    feature.npeaks = Some(npeaks);
                }
            }

            if let Some(idx) = peak_index_column {
                feature.peak_indices = parse_peak_indices(row, cell(idx))?;
            }

            for (idx, header) in headers.iter().enumerate().skip(1) {
                if required.contains(&idx)
                    || Some(idx) == npeaks_column
                    || Some(idx) == peak_index_column
                {
                    continue;
                }
                feature
                    .auxiliary
                    .insert(header.clone(), cell(idx).to_string());
            }

            features.insert(feature)?;
        }

        debug!("Read {} feature definitions", features.len());
        Ok(features)
    }
}

impl SampleIntensities {
    /// Parse a feature-by-sample intensity matrix from a TSV file
    pub fn from_tsv_file<P: AsRef<Path>>(path: P) -> Result<Self, ExportError> {
        let file = File::open(path)?;
        Self::from_reader(BufReader::new(file))
    }

    /// Parse a feature-by-sample intensity matrix from a reader.
    ///
    /// The first column is the feature identifier, every other column a sample.
    /// A repeated sample header or feature row is an error.
    pub fn from_reader<R: Read>(reader: R) -> Result<Self, ExportError> {
        let mut csv_reader = tsv_reader(reader);

        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|s| s.trim().to_string())
            .collect();

        let mut seen = HashSet::new();
        if let Some(repeated) = headers.iter().skip(1).find(|s| !seen.insert(s.as_str())) {
            return Err(ExportError::DuplicateSample(repeated.clone()));
        }
        let mut intensities = SampleIntensities::with_samples(headers.iter().skip(1).cloned());

        for (i, record) in csv_reader.records().enumerate() {
            let record = record?;
            let row = i + 1;
            let id = record.get(0).map(str::trim).unwrap_or("");
            if id.is_empty() {
                return Err(ExportError::InvalidValue {
                    column: headers.first().cloned().unwrap_or_default(),
                    row,
                    value: String::new(),
                });
            }

            if intensities.get(id).is_some() {
                return Err(ExportError::DuplicateFeature(id.to_string()));
            }
            intensities.ensure_feature(id);
            for (idx, sample) in headers.iter().enumerate().skip(1) {
                let value = record.get(idx).map(str::trim).unwrap_or("");
                let area = if is_na(value) {
                    None
                } else {
                    Some(parse_f64(sample, row, value)?)
                };
                intensities.insert(id, sample.as_str(), area);
            }
        }

        debug!(
            "Read intensities for {} features across {} samples",
            intensities.len(),
            intensities.samples().len()
        );
        Ok(intensities)
    }
}
