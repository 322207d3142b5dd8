use super::{Peak, Spectrum};

/// Builder for [`Spectrum`]
///
/// ```rust
/// use fbmn_export::spectrum::SpectrumBuilder;
///
/// let spectrum = SpectrumBuilder::new(301.1, 62.4)
///     .feature("FT0012")
///     .charge(1)
///     .add_peak(85.03, 1200.0)
///     .add_peak(127.04, 800.0)
///     .build();
///
/// assert_eq!(spectrum.total_ion_current(), 2000.0);
/// ```
#[derive(Debug, Clone)]
pub struct SpectrumBuilder {
    spectrum: Spectrum,
}

impl SpectrumBuilder {
    /// Start a spectrum with its precursor m/z and retention time (seconds)
    pub fn new(precursor_mz: f64, retention_time: f64) -> Self {
        Self {
            spectrum: Spectrum {
                scan: None,
                title: None,
                retention_time,
                precursor_mz,
                precursor_charge: None,
                precursor_intensity: None,
                feature_id: None,
                peaks: Vec::new(),
            },
        }
    }

    /// Set the native scan number
    pub fn scan(mut self, scan: u32) -> Self {
        self.spectrum.scan = Some(scan);
        self
    }

    /// Set the title
    pub fn title(mut self, title: impl Into<String>) -> Self {
        self.spectrum.title = Some(title.into());
        self
    }

    /// Set the signed precursor charge
    pub fn charge(mut self, charge: i32) -> Self {
        self.spectrum.precursor_charge = Some(charge);
        self
    }

    /// Set the precursor intensity
    pub fn precursor_intensity(mut self, intensity: f64) -> Self {
        self.spectrum.precursor_intensity = Some(intensity);
        self
    }

    /// Link the spectrum to a feature
    pub fn feature(mut self, feature_id: impl Into<String>) -> Self {
        self.spectrum.feature_id = Some(feature_id.into());
        self
    }

    /// Append a peak
    pub fn add_peak(mut self, mz: f64, intensity: f64) -> Self {
        self.spectrum.peaks.push(Peak::new(mz, intensity));
        self
    }

    /// Replace the peak list
    pub fn peaks(mut self, peaks: Vec<Peak>) -> Self {
        self.spectrum.peaks = peaks;
        self
    }

    /// Finish building
    pub fn build(self) -> Spectrum {
        self.spectrum
    }
}
