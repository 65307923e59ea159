//! Spectrum magnitude and phase extraction
//!
//! Splits a complex spectrum into paired magnitude and phase sequences in a
//! single pass. Phase comes from `atan2(im, re)` and lies in (-π, π], except
//! that bins whose magnitude is at or below a zero tolerance report phase 0.
//!
//! ## Why the tolerance matters
//!
//! A bin whose true value is zero is computed as rounding noise, e.g.
//! `1e-14 - 3e-15j`. Its magnitude is negligible but `atan2` of the noise is
//! an arbitrary angle anywhere in (-π, π]:
//!
//! ```text
//!   true bin:      0            → phase undefined, reported as 0
//!   direct DFT:    1e-14-3e-15j → phase ≈ -0.29 rad (noise)
//!   FFT:           0            → phase 0
//! ```
//!
//! The default tolerance is exactly zero so that noise stays visible; pass a
//! positive tolerance to suppress it.

use serde::{Deserialize, Serialize};

use crate::types::{Complex, ComplexBuffer};

/// Magnitude at or below which phase is reported as zero.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "mode", content = "value", rename_all = "lowercase")]
pub enum PhaseTolerance {
    /// Only bins with magnitude exactly 0.0 are clamped
    Exact,
    /// Clamp below an absolute magnitude
    Absolute(f64),
    /// Clamp below a fraction of the spectrum's peak magnitude
    Relative(f64),
}

impl Default for PhaseTolerance {
    fn default() -> Self {
        PhaseTolerance::Exact
    }
}

impl PhaseTolerance {
    /// Absolute magnitude threshold for a spectrum with the given peak.
    pub fn threshold(&self, peak_magnitude: f64) -> f64 {
        match *self {
            PhaseTolerance::Exact => 0.0,
            PhaseTolerance::Absolute(eps) => eps,
            PhaseTolerance::Relative(frac) => frac * peak_magnitude,
        }
    }
}

/// Phase of a single bin, zero when `|c| <= threshold`.
#[inline]
pub fn clamped_phase(c: Complex, threshold: f64) -> f64 {
    if c.norm() <= threshold {
        0.0
    } else {
        c.arg()
    }
}

/// A frequency-domain sequence with derived magnitude and phase.
#[derive(Debug, Clone, PartialEq)]
pub struct Spectrum {
    bins: ComplexBuffer,
}

impl Spectrum {
    pub fn new(bins: ComplexBuffer) -> Self {
        Self { bins }
    }

    pub fn bins(&self) -> &[Complex] {
        &self.bins
    }

    pub fn len(&self) -> usize {
        self.bins.len()
    }

    pub fn is_empty(&self) -> bool {
        self.bins.is_empty()
    }

    pub fn into_bins(self) -> ComplexBuffer {
        self.bins
    }

    /// Magnitude of every bin
    pub fn magnitude(&self) -> Vec<f64> {
        self.bins.iter().map(|c| c.norm()).collect()
    }

    /// Largest bin magnitude
    pub fn peak_magnitude(&self) -> f64 {
        self.bins.iter().map(|c| c.norm()).fold(0.0_f64, f64::max)
    }

    /// Phase of every bin in radians, clamped to 0 per `tolerance`.
    pub fn phase(&self, tolerance: PhaseTolerance) -> Vec<f64> {
        let threshold = tolerance.threshold(self.peak_magnitude());
        self.bins
            .iter()
            .map(|&c| clamped_phase(c, threshold))
            .collect()
    }

    /// `(magnitudes, phases)` in one pass.
    pub fn mag_phase(&self, tolerance: PhaseTolerance) -> (Vec<f64>, Vec<f64>) {
        let threshold = tolerance.threshold(self.peak_magnitude());
        let mut mags = Vec::with_capacity(self.bins.len());
        let mut phases = Vec::with_capacity(self.bins.len());
        for &c in &self.bins {
            let mag = c.norm();
            mags.push(mag);
            phases.push(if mag <= threshold { 0.0 } else { c.arg() });
        }
        (mags, phases)
    }

    /// Power per bin in dB, floored at -200 dB.
    pub fn power_db(&self) -> Vec<f64> {
        self.bins
            .iter()
            .map(|c| {
                let power = c.norm_sqr();
                if power > 1e-20 {
                    10.0 * power.log10()
                } else {
                    -200.0
                }
            })
            .collect()
    }
}

impl From<ComplexBuffer> for Spectrum {
    fn from(bins: ComplexBuffer) -> Self {
        Self::new(bins)
    }
}

/// Move the zero-frequency bin to the center (for display).
pub fn fft_shift<T: Clone>(spectrum: &[T]) -> Vec<T> {
    let mid = spectrum.len() / 2;
    let mut shifted = Vec::with_capacity(spectrum.len());
    shifted.extend_from_slice(&spectrum[mid..]);
    shifted.extend_from_slice(&spectrum[..mid]);
    shifted
}
