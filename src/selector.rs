//! Representative spectrum selection.
//!
//! Spectra are grouped by feature identifier and each group is reduced to
//! the spectrum with the highest total ion current. Groups are emitted in the
//! order their first spectrum appears in the input, so the output is stable
//! for a given input order.

use indexmap::IndexMap;
use log::debug;

use crate::spectrum::{Spectrum, SpectrumCollection};

/// The winning spectrum of one feature group
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectedSpectrum<'a> {
    /// Feature the group belongs to
    pub feature_id: &'a str,
    /// The representative spectrum
    pub spectrum: &'a Spectrum,
    /// Its total ion current
    pub total_ion_current: f64,
    /// Position of the spectrum in the input collection
    pub input_index: usize,
    /// Number of spectra in the group
    pub group_size: usize,
}

/// One representative spectrum per feature, in group order
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RepresentativeSelection<'a> {
    entries: Vec<SelectedSpectrum<'a>>,
}

impl<'a> RepresentativeSelection<'a> {
    /// Selected entries in group order
    pub fn entries(&self) -> &[SelectedSpectrum<'a>] {
        &self.entries
    }

    /// Number of selected spectra (one per feature)
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Returns true if nothing was selected
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Feature identifiers in group order
    pub fn feature_ids(&self) -> impl Iterator<Item = &'a str> + '_ {
        self.entries.iter().map(|e| e.feature_id)
    }

    /// Iterate the representative spectra
    pub fn spectra(&self) -> impl Iterator<Item = &'a Spectrum> + '_ {
        self.entries.iter().map(|e| e.spectrum)
    }

    /// Owned collection of the representative spectra
    pub fn to_collection(&self) -> SpectrumCollection {
        self.spectra().cloned().collect()
    }
}

/// Picks the maximal-TIC spectrum for every feature
#[derive(Debug, Clone, Copy, Default)]
pub struct RepresentativeSpectrumSelector;

impl RepresentativeSpectrumSelector {
    /// Create a selector
    pub fn new() -> Self {
        Self
    }

    /// Select one spectrum per feature identifier.
    ///
    /// Spectra without a feature are skipped. A later spectrum replaces the
    /// current best only with a strictly greater TIC, so ties go to the
    /// spectrum seen first.
    pub fn select<'a>(&self, spectra: &'a SpectrumCollection) -> RepresentativeSelection<'a> {
        let mut groups: IndexMap<&'a str, SelectedSpectrum<'a>> = IndexMap::new();
        let mut unlinked = 0usize;

        for (input_index, spectrum) in spectra.iter().enumerate() {
            let Some(feature_id) = spectrum.feature_id.as_deref() else {
                unlinked += 1;
                continue;
            };
            let tic = spectrum.total_ion_current();

            groups
                .entry(feature_id)
                .and_modify(|best| {
                    best.group_size += 1;
                    if tic > best.total_ion_current {
                        best.spectrum = spectrum;
                        best.total_ion_current = tic;
                        best.input_index = input_index;
                    }
                })
                .or_insert(SelectedSpectrum {
                    feature_id,
                    spectrum,
                    total_ion_current: tic,
                    input_index,
                    group_size: 1,
                });
        }

        debug!(
            "Selected {} representative spectra from {} ({} without feature)",
            groups.len(),
            spectra.len(),
            unlinked
        );

        RepresentativeSelection {
            entries: groups.into_values().collect(),
        }
    }
}
