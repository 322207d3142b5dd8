use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

/// Per-sample integrated peak areas keyed by feature identifier
///
/// Sample names form an ordered list that becomes the export column order.
/// A sample first seen during [`SampleIntensities::insert`] is appended to it.
/// A `None` area means gap filling did not recover signal for that sample.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SampleIntensities {
    samples: Vec<String>,
    values: IndexMap<String, IndexMap<String, Option<f64>>>,
}

impl SampleIntensities {
    /// Create an empty mapping with no samples
    pub fn new() -> Self {
        Self::default()
    }

    /// Create an empty mapping with a declared sample order
    pub fn with_samples<I, S>(samples: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let mut this = Self::new();
        for sample in samples {
            this.add_sample(sample.into());
        }
        this
    }

    fn add_sample(&mut self, sample: String) {
        if !self.samples.contains(&sample) {
            self.samples.push(sample);
        }
    }

    /// Register a feature with no sample values yet
    pub fn ensure_feature(&mut self, feature_id: impl Into<String>) {
        self.values.entry(feature_id.into()).or_default();
    }

    /// Set the area of `feature_id` in `sample`
    pub fn insert(
        &mut self,
        feature_id: impl Into<String>,
        sample: impl Into<String>,
        area: Option<f64>,
    ) {
        let sample = sample.into();
        self.add_sample(sample.clone());
        self.values
            .entry(feature_id.into())
            .or_default()
            .insert(sample, area);
    }

    /// Sample names in column order
    pub fn samples(&self) -> &[String] {
        &self.samples
    }

    /// All sample values of a feature, if the feature has an entry
    pub fn get(&self, feature_id: &str) -> Option<&IndexMap<String, Option<f64>>> {
        self.values.get(feature_id)
    }

    /// Area of a feature in one sample. `None` when absent or null.
    pub fn value(&self, feature_id: &str, sample: &str) -> Option<f64> {
        self.values
            .get(feature_id)
            .and_then(|row| row.get(sample).copied().flatten())
    }

    /// Iterate feature identifiers in insertion order
    pub fn feature_ids(&self) -> impl Iterator<Item = &str> {
        self.values.keys().map(String::as_str)
    }

    /// Number of features with an entry
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Returns true if no feature has an entry
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }
}
