//! # Spectrum Module
//!
//! MS2 fragmentation spectra linked to features, and the ordered
//! collections they travel in through the export pipeline.

mod builder;

#[cfg(test)]
mod tests;

pub use builder::SpectrumBuilder;

use serde::{Deserialize, Serialize};

/// A single centroided fragment peak
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Peak {
    /// Mass-to-charge ratio
    pub mz: f64,
    /// Peak intensity
    pub intensity: f64,
}

impl Peak {
    /// Create a peak
    pub fn new(mz: f64, intensity: f64) -> Self {
        Self { mz, intensity }
    }
}

/// One MS2 scan and its link to a feature
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Spectrum {
    /// Native scan number, if known
    pub scan: Option<u32>,
    /// Free-text title carried through from the input
    pub title: Option<String>,
    /// Retention time in seconds
    pub retention_time: f64,
    /// Precursor m/z
    pub precursor_mz: f64,
    /// Precursor charge state (signed)
    pub precursor_charge: Option<i32>,
    /// Precursor intensity
    pub precursor_intensity: Option<f64>,
    /// Identifier of the feature this scan was matched to
    pub feature_id: Option<String>,
    /// Peak list in acquisition order
    pub peaks: Vec<Peak>,
}

impl Spectrum {
    /// Sum of all peak intensities. Zero for an empty peak list.
    pub fn total_ion_current(&self) -> f64 {
        self.peaks.iter().map(|p| p.intensity).sum()
    }

    /// Most intense peak, first one on ties
    pub fn base_peak(&self) -> Option<&Peak> {
        self.peaks.iter().fold(None, |best: Option<&Peak>, peak| match best {
            Some(b) if b.intensity >= peak.intensity => Some(b),
            _ => Some(peak),
        })
    }

    /// Number of peaks
    pub fn peak_count(&self) -> usize {
        self.peaks.len()
    }

    /// Returns true if the spectrum has no peaks
    pub fn is_empty(&self) -> bool {
        self.peaks.is_empty()
    }

    /// Returns true if the spectrum is linked to a feature
    pub fn has_feature(&self) -> bool {
        self.feature_id.is_some()
    }

    /// Copy of this spectrum with zero-intensity peaks removed
    pub fn cleaned(&self) -> Self {
        Self {
            peaks: self
                .peaks
                .iter()
                .filter(|p| p.intensity != 0.0)
                .copied()
                .collect(),
            ..self.clone()
        }
    }
}

/// Ordered collection of spectra. Order is input order.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct SpectrumCollection {
    spectra: Vec<Spectrum>,
}

impl SpectrumCollection {
    /// Create an empty collection
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a spectrum
    pub fn push(&mut self, spectrum: Spectrum) {
        self.spectra.push(spectrum);
    }

    /// Number of spectra
    pub fn len(&self) -> usize {
        self.spectra.len()
    }

    /// Returns true if the collection is empty
    pub fn is_empty(&self) -> bool {
        self.spectra.is_empty()
    }

    /// Iterate spectra in order
    pub fn iter(&self) -> std::slice::Iter<'_, Spectrum> {
        self.spectra.iter()
    }

    /// Borrow the spectra as a slice
    pub fn as_slice(&self) -> &[Spectrum] {
        &self.spectra
    }

    /// Copy of the collection with zero-intensity peaks stripped from every spectrum
    pub fn cleaned(&self) -> Self {
        self.iter().map(Spectrum::cleaned).collect()
    }

    /// Feature identifiers with at least one spectrum, in first-seen order
    pub fn feature_ids(&self) -> Vec<&str> {
        let mut seen = std::collections::HashSet::new();
        self.iter()
            .filter_map(|s| s.feature_id.as_deref())
            .filter(|id| seen.insert(*id))
            .collect()
    }

    /// Number of spectra not linked to any feature
    pub fn unlinked_count(&self) -> usize {
        self.iter().filter(|s| !s.has_feature()).count()
    }

    /// Total number of peaks over all spectra
    pub fn total_peaks(&self) -> usize {
        self.iter().map(Spectrum::peak_count).sum()
    }
}

impl From<Vec<Spectrum>> for SpectrumCollection {
    fn from(spectra: Vec<Spectrum>) -> Self {
        Self { spectra }
    }
}

impl FromIterator<Spectrum> for SpectrumCollection {
    fn from_iter<T: IntoIterator<Item = Spectrum>>(iter: T) -> Self {
        Self {
            spectra: iter.into_iter().collect(),
        }
    }
}

impl IntoIterator for SpectrumCollection {
    type Item = Spectrum;
    type IntoIter = std::vec::IntoIter<Spectrum>;

    fn into_iter(self) -> Self::IntoIter {
        self.spectra.into_iter()
    }
}

impl<'a> IntoIterator for &'a SpectrumCollection {
    type Item = &'a Spectrum;
    type IntoIter = std::slice::Iter<'a, Spectrum>;

    fn into_iter(self) -> Self::IntoIter {
        self.spectra.iter()
    }
}
