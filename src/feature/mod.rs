//! # Feature Module
//!
//! Consolidated chromatographic features (peak groups across samples) and
//! their per-sample integrated intensities, as produced by the upstream
//! correspondence and gap-filling stage.
//!
//! Both collections are keyed by feature identifier and keep insertion
//! order, so exports are reproducible byte-for-byte for a given input.

mod intensity;
mod reader;

#[cfg(test)]
mod tests;

pub use intensity::SampleIntensities;

use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use crate::error::ExportError;

/// Column holding upstream peak-index bookkeeping, never exported
pub const PEAK_INDEX_COLUMN: &str = "peakidx";

/// Median/min/max triple describing a feature's extent along one axis
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ValueRange {
    /// Median value across the grouped peaks
    pub med: f64,
    /// Lower bound
    pub min: f64,
    /// Upper bound
    pub max: f64,
}

impl ValueRange {
    /// Create a range with an explicit median
    pub fn new(med: f64, min: f64, max: f64) -> Self {
        Self { med, min, max }
    }

    /// Create a range from its bounds, using the midpoint as median
    pub fn spanning(min: f64, max: f64) -> Self {
        Self {
            med: (min + max) / 2.0,
            min,
            max,
        }
    }

    /// Width of the range
    pub fn width(&self) -> f64 {
        self.max - self.min
    }

    /// Returns true if `value` lies within `[min, max]`
    pub fn contains(&self, value: f64) -> bool {
        value >= self.min && value <= self.max
    }
}

/// A consolidated chromatographic peak group
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Feature {
    /// Unique feature identifier (e.g. `FT0001`)
    pub id: String,
    /// m/z extent
    pub mz: ValueRange,
    /// Retention time extent in seconds
    pub rt: ValueRange,
    /// Number of chromatographic peaks grouped into this feature
    pub npeaks: Option<u32>,
    /// Additional peak-shape fields, in input column order
    pub auxiliary: IndexMap<String, String>,
    /// Indices of the grouped chromatographic peaks.
    ///
    /// Upstream bookkeeping only; never exported.
    pub peak_indices: Vec<usize>,
}

impl Feature {
    /// Create a feature with the required fields
    pub fn new(id: impl Into<String>, mz: ValueRange, rt: ValueRange) -> Self {
        Self {
            id: id.into(),
            mz,
            rt,
            npeaks: None,
            auxiliary: IndexMap::new(),
            peak_indices: Vec::new(),
        }
    }

    /// Set the grouped peak count
    pub fn with_npeaks(mut self, npeaks: u32) -> Self {
        self.npeaks = Some(npeaks);
        self
    }

    /// Add an auxiliary field
    pub fn with_auxiliary(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.auxiliary.insert(name.into(), value.into());
        self
    }

    /// Set the grouped peak indices
    pub fn with_peak_indices(mut self, indices: Vec<usize>) -> Self {
        self.peak_indices = indices;
        self
    }
}

/// Insertion-ordered set of features keyed by identifier
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FeatureSet {
    features: IndexMap<String, Feature>,
}

impl FeatureSet {
    /// Create an empty feature set
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a feature set, rejecting duplicate identifiers
    pub fn from_features<I>(features: I) -> Result<Self, ExportError>
    where
        I: IntoIterator<Item = Feature>,
    {
        let mut set = Self::new();
        for feature in features {
            set.insert(feature)?;
        }
        Ok(set)
    }

    /// Add a feature. Identifiers must be unique.
    pub fn insert(&mut self, feature: Feature) -> Result<(), ExportError> {
        if self.features.contains_key(&feature.id) {
            return Err(ExportError::DuplicateFeature(feature.id));
        }
        self.features.insert(feature.id.clone(), feature);
        Ok(())
    }

    /// Look up a feature by identifier
    pub fn get(&self, id: &str) -> Option<&Feature> {
        self.features.get(id)
    }

    /// Returns true if a feature with this identifier exists
    pub fn contains(&self, id: &str) -> bool {
        self.features.contains_key(id)
    }

    /// Number of features
    pub fn len(&self) -> usize {
        self.features.len()
    }

    /// Returns true if the set holds no features
    pub fn is_empty(&self) -> bool {
        self.features.is_empty()
    }

    /// Iterate features in insertion order
    pub fn iter(&self) -> impl Iterator<Item = &Feature> {
        self.features.values()
    }

    /// Iterate feature identifiers in insertion order
    pub fn ids(&self) -> impl Iterator<Item = &str> {
        self.features.keys().map(String::as_str)
    }

    /// Returns true if any feature carries a peak count
    pub fn has_npeaks(&self) -> bool {
        self.iter().any(|f| f.npeaks.is_some())
    }

    /// Union of auxiliary field names over all features, in first-seen order
    pub fn auxiliary_columns(&self) -> Vec<&str> {
        let mut columns: IndexMap<&str, ()> = IndexMap::new();
        for feature in self.iter() {
            for name in feature.auxiliary.keys() {
                columns.entry(name.as_str()).or_insert(());
            }
        }
        columns.into_keys().collect()
    }
}

impl<'a> IntoIterator for &'a FeatureSet {
    type Item = &'a Feature;
    type IntoIter = indexmap::map::Values<'a, String, Feature>;

    fn into_iter(self) -> Self::IntoIter {
        self.features.values()
    }
}
