//! Error statistics and serializable comparison reports
//!
//! A [`ComparisonReport`] flattens a [`Comparison`] into per-bin and
//! per-sample rows that an external plotting tool can consume directly.
//!
//! ```json
//! {
//!   "size": 128,
//!   "oracle": "rustfft",
//!   "summary": { "direct": { "max_abs": 1.2e-13, ... }, "fft": { ... }, "error_ratio": 540.2 },
//!   "bins":    [ { "k": 0, "direct_magnitude": 64.0, "direct_phase": 0.0, ... }, ... ],
//!   "samples": [ { "n": 0, "signal_re": 1.0, "direct_error": 3.1e-15, ... }, ... ]
//! }
//! ```

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::harness::Comparison;
use crate::spectrum::PhaseTolerance;
use crate::types::Complex;

/// Errors while rendering or writing a report.
#[derive(Debug, thiserror::Error)]
pub enum ReportError {
    #[error("JSON encoding failed: {0}")]
    Json(#[from] serde_json::Error),

    #[error("YAML encoding failed: {0}")]
    Yaml(#[from] serde_yaml::Error),

    #[error("failed to write report: {0}")]
    Io(#[from] std::io::Error),
}

/// Output encoding for reports.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ReportFormat {
    Json,
    Yaml,
}

impl Default for ReportFormat {
    fn default() -> Self {
        ReportFormat::Json
    }
}

/// Summary of an elementwise error sequence.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct ErrorStats {
    /// Largest `|e|`
    pub max_abs: f64,
    /// Mean `|e|`
    pub mean_abs: f64,
    /// Root mean square of `|e|`
    pub rms: f64,
}

impl ErrorStats {
    pub fn from_errors(errors: &[Complex]) -> Self {
        if errors.is_empty() {
            return Self::default();
        }
        let n = errors.len() as f64;
        let mut max_abs = 0.0_f64;
        let mut sum = 0.0;
        let mut sum_sq = 0.0;
        for e in errors {
            let mag = e.norm();
            max_abs = max_abs.max(mag);
            sum += mag;
            sum_sq += e.norm_sqr();
        }
        Self {
            max_abs,
            mean_abs: sum / n,
            rms: (sum_sq / n).sqrt(),
        }
    }

    /// Max error in units of `f64::EPSILON · scale`.
    pub fn max_in_ulps(&self, scale: f64) -> f64 {
        if scale == 0.0 {
            return 0.0;
        }
        self.max_abs / (f64::EPSILON * scale)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ReportSummary {
    pub direct: ErrorStats,
    pub fft: ErrorStats,
    /// `direct.max_abs / fft.max_abs`; `None` when the FFT path is exact
    /// and the direct path is not
    pub error_ratio: Option<f64>,
    /// Largest `|X_direct - X_fft|` over all bins
    pub max_spectrum_difference: f64,
}

fn finite_ratio(ratio: f64) -> Option<f64> {
    if ratio.is_finite() {
        Some(ratio)
    } else {
        None
    }
}

/// One frequency bin.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct BinRow {
    pub k: usize,
    pub direct_magnitude: f64,
    pub direct_phase: f64,
    pub fft_magnitude: f64,
    pub fft_phase: f64,
}

/// One time-domain sample.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SampleRow {
    pub n: usize,
    pub signal_re: f64,
    pub signal_im: f64,
    pub direct_error: f64,
    pub fft_error: f64,
}

/// Flattened, serializable view of a [`Comparison`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ComparisonReport {
    pub size: usize,
    pub oracle: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
    pub phase_tolerance: PhaseTolerance,
    pub summary: ReportSummary,
    pub bins: Vec<BinRow>,
    pub samples: Vec<SampleRow>,
}

impl ComparisonReport {
    pub fn from_comparison(cmp: &Comparison) -> Self {
        let bins = (0..cmp.len())
            .map(|k| BinRow {
                k,
                direct_magnitude: cmp.direct.magnitude[k],
                direct_phase: cmp.direct.phase[k],
                fft_magnitude: cmp.fft.magnitude[k],
                fft_phase: cmp.fft.phase[k],
            })
            .collect();

        let samples = cmp
            .signal
            .iter()
            .enumerate()
            .map(|(n, x)| SampleRow {
                n,
                signal_re: x.re,
                signal_im: x.im,
                direct_error: cmp.direct.error[n].norm(),
                fft_error: cmp.fft.error[n].norm(),
            })
            .collect();

        let max_spectrum_difference = cmp
            .spectrum_difference()
            .into_iter()
            .fold(0.0_f64, f64::max);

        Self {
            size: cmp.len(),
            oracle: cmp.oracle.clone(),
            label: None,
            phase_tolerance: cmp.tolerance,
            summary: ReportSummary {
                direct: cmp.direct.error_stats(),
                fft: cmp.fft.error_stats(),
                error_ratio: finite_ratio(cmp.error_ratio()),
                max_spectrum_difference,
            },
            bins,
            samples,
        }
    }

    pub fn with_label(mut self, label: impl Into<String>) -> Self {
        self.label = Some(label.into());
        self
    }

    pub fn to_json(&self) -> Result<String, ReportError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    pub fn to_yaml(&self) -> Result<String, ReportError> {
        Ok(serde_yaml::to_string(self)?)
    }

    pub fn render(&self, format: ReportFormat) -> Result<String, ReportError> {
        match format {
            ReportFormat::Json => self.to_json(),
            ReportFormat::Yaml => self.to_yaml(),
        }
    }

    /// Render and write to `path`.
    pub fn write_to(&self, path: &Path, format: ReportFormat) -> Result<(), ReportError> {
        let content = self.render(format)?;
        std::fs::write(path, content)?;
        tracing::info!(path = %path.display(), ?format, "report written");
        Ok(())
    }
}
