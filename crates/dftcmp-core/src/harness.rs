//! Comparison Harness
//!
//! Runs one signal through two computation paths and exposes what each
//! produced:
//!
//! ```text
//!              ┌──────────────────┐   X_direct   ┌──────────────────────┐
//!         ┌──► │ W · x            │ ───────────► │ (1/N) · Wᴴ · X       │ ──► x̂_direct
//!         │    └──────────────────┘              └──────────────────────┘
//!   x ────┤
//!         │    ┌──────────────────┐   X_fft      ┌──────────────────────┐
//!         └──► │ oracle.forward   │ ───────────► │ oracle.inverse       │ ──► x̂_fft
//!              └──────────────────┘              └──────────────────────┘
//! ```
//!
//! For each path the harness reports magnitude, phase (clamped to zero per
//! the configured [`PhaseTolerance`]) and the reconstruction error `x̂ - x`.
//! Nothing is rendered here; plotting is left to the caller.
//!
//! ## Example
//!
//! ```rust
//! use dftcmp_core::harness::ComparisonHarness;
//! use dftcmp_core::signals::half_step;
//!
//! let signal = half_step(128).unwrap();
//! let mut harness = ComparisonHarness::new();
//! let cmp = harness.compare_real(&signal).unwrap();
//!
//! assert!((cmp.direct.magnitude[0] - 64.0).abs() < 1e-9);
//! assert!(cmp.fft.error_stats().max_abs < cmp.direct.error_stats().max_abs);
//! ```

use serde::{Deserialize, Serialize};

use crate::fft_utils::{FftOracle, RustFftOracle};
use crate::report::ErrorStats;
use crate::spectrum::{PhaseTolerance, Spectrum};
use crate::transform_matrix::TransformMatrix;
use crate::types::{complex_ops, Complex, ComplexBuffer, DftError, DftResult};

/// Which computation path produced a result.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Method {
    /// O(N²) matrix-vector product
    Direct,
    /// Injected FFT oracle
    Fft,
}

impl std::fmt::Display for Method {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Method::Direct => write!(f, "direct"),
            Method::Fft => write!(f, "fft"),
        }
    }
}

/// Outputs of one computation path.
#[derive(Debug, Clone, PartialEq)]
pub struct PathResult {
    pub method: Method,
    pub spectrum: Spectrum,
    pub magnitude: Vec<f64>,
    pub phase: Vec<f64>,
    pub reconstruction: ComplexBuffer,
    /// `reconstruction - signal`, elementwise
    pub error: ComplexBuffer,
}

impl PathResult {
    fn new(
        method: Method,
        signal: &[Complex],
        spectrum: ComplexBuffer,
        reconstruction: ComplexBuffer,
        tolerance: PhaseTolerance,
    ) -> DftResult<Self> {
        DftError::check_len(signal.len(), spectrum.len())?;
        DftError::check_len(signal.len(), reconstruction.len())?;

        let spectrum = Spectrum::new(spectrum);
        let (magnitude, phase) = spectrum.mag_phase(tolerance);
        let error = complex_ops::difference(&reconstruction, signal)?;
        Ok(Self {
            method,
            spectrum,
            magnitude,
            phase,
            reconstruction,
            error,
        })
    }

    /// Magnitude of each reconstruction error sample
    pub fn error_magnitude(&self) -> Vec<f64> {
        self.error.iter().map(|e| e.norm()).collect()
    }

    pub fn error_stats(&self) -> ErrorStats {
        ErrorStats::from_errors(&self.error)
    }

    /// Wrapped difference between this path's phase and a reference phase.
    pub fn phase_deviation(&self, reference: &[f64]) -> DftResult<Vec<f64>> {
        DftError::check_len(self.phase.len(), reference.len())?;
        Ok(self
            .phase
            .iter()
            .zip(reference.iter())
            .map(|(&p, &r)| complex_ops::wrap_phase(p - r))
            .collect())
    }
}

/// Both paths for one signal.
#[derive(Debug, Clone, PartialEq)]
pub struct Comparison {
    pub signal: ComplexBuffer,
    pub tolerance: PhaseTolerance,
    pub oracle: String,
    pub direct: PathResult,
    pub fft: PathResult,
}

impl Comparison {
    /// Signal length N
    pub fn len(&self) -> usize {
        self.signal.len()
    }

    pub fn is_empty(&self) -> bool {
        self.signal.is_empty()
    }

    pub fn path(&self, method: Method) -> &PathResult {
        match method {
            Method::Direct => &self.direct,
            Method::Fft => &self.fft,
        }
    }

    /// Direct max reconstruction error over FFT max reconstruction error.
    ///
    /// Infinite when only the FFT path is exact, 1.0 when both are.
    pub fn error_ratio(&self) -> f64 {
        let direct = self.direct.error_stats().max_abs;
        let fft = self.fft.error_stats().max_abs;
        if fft == 0.0 {
            if direct == 0.0 {
                1.0
            } else {
                f64::INFINITY
            }
        } else {
            direct / fft
        }
    }

    /// `|X_direct[k] - X_fft[k]|` per bin
    pub fn spectrum_difference(&self) -> Vec<f64> {
        self.direct
            .spectrum
            .bins()
            .iter()
            .zip(self.fft.spectrum.bins())
            .map(|(a, b)| (a - b).norm())
            .collect()
    }
}

/// Harness settings.
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct HarnessConfig {
    pub phase_tolerance: PhaseTolerance,
}

/// Runs the direct transform and an [`FftOracle`] side by side.
#[derive(Debug)]
pub struct ComparisonHarness<O: FftOracle> {
    oracle: O,
    matrix: Option<TransformMatrix>,
    config: HarnessConfig,
}

impl ComparisonHarness<RustFftOracle> {
    /// Harness backed by `rustfft`.
    pub fn new() -> Self {
        Self::with_oracle(RustFftOracle::new())
    }
}

impl Default for ComparisonHarness<RustFftOracle> {
    fn default() -> Self {
        Self::new()
    }
}

impl<O: FftOracle> ComparisonHarness<O> {
    pub fn with_oracle(oracle: O) -> Self {
        Self {
            oracle,
            matrix: None,
            config: HarnessConfig::default(),
        }
    }

    /// Use a prebuilt matrix instead of building one per signal.
    ///
    /// Signals must then match its size.
    pub fn with_matrix(mut self, matrix: TransformMatrix) -> Self {
        self.matrix = Some(matrix);
        self
    }

    pub fn with_config(mut self, config: HarnessConfig) -> Self {
        self.config = config;
        self
    }

    pub fn with_phase_tolerance(mut self, tolerance: PhaseTolerance) -> Self {
        self.config.phase_tolerance = tolerance;
        self
    }

    pub fn config(&self) -> &HarnessConfig {
        &self.config
    }

    pub fn oracle(&self) -> &O {
        &self.oracle
    }

    pub fn oracle_mut(&mut self) -> &mut O {
        &mut self.oracle
    }

    /// Compare a real-valued signal.
    pub fn compare_real(&mut self, signal: &[f64]) -> DftResult<Comparison> {
        self.compare(&complex_ops::from_real(signal))
    }

    /// Run both paths on `signal`.
    pub fn compare(&mut self, signal: &[Complex]) -> DftResult<Comparison> {
        if signal.is_empty() {
            return Err(DftError::InvalidArgument("signal must not be empty".to_string()));
        }
        let n = signal.len();
        let oracle_name = self.oracle.name().to_string();
        let span = tracing::info_span!("compare", n, oracle = %oracle_name);
        let _enter = span.enter();

        let built;
        let matrix = match &self.matrix {
            Some(m) => {
                DftError::check_len(m.size(), n)?;
                m
            }
            None => {
                built = TransformMatrix::new(n)?;
                &built
            }
        };

        let direct_spectrum = matrix.forward(signal)?;
        let direct_reconstruction = matrix.inverse(&direct_spectrum)?;

        let fft_spectrum = self.oracle.forward(signal)?;
        DftError::check_len(n, fft_spectrum.len())?;
        let fft_reconstruction = self.oracle.inverse(&fft_spectrum)?;
        DftError::check_len(n, fft_reconstruction.len())?;

        let tolerance = self.config.phase_tolerance;
        let direct = PathResult::new(
            Method::Direct,
            signal,
            direct_spectrum,
            direct_reconstruction,
            tolerance,
        )?;
        let fft = PathResult::new(Method::Fft, signal, fft_spectrum, fft_reconstruction, tolerance)?;

        let comparison = Comparison {
            signal: signal.to_vec(),
            tolerance,
            oracle: oracle_name,
            direct,
            fft,
        };
        tracing::info!(
            direct_max_error = comparison.direct.error_stats().max_abs,
            fft_max_error = comparison.fft.error_stats().max_abs,
            "comparison complete"
        );
        Ok(comparison)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::{half_step, step_spectrum};
    use approx::assert_abs_diff_eq;

    /// Returns canned outputs regardless of input.
    struct StubOracle {
        forward: ComplexBuffer,
        inverse: ComplexBuffer,
    }

    impl FftOracle for StubOracle {
        fn forward(&mut self, _time: &[Complex]) -> DftResult<ComplexBuffer> {
            Ok(self.forward.clone())
        }

        fn inverse(&mut self, _freq: &[Complex]) -> DftResult<ComplexBuffer> {
            Ok(self.inverse.clone())
        }

        fn name(&self) -> &str {
            "stub"
        }
    }

    /// Exact step spectrum and an exact reconstruction.
    fn exact_step_oracle(n: usize) -> StubOracle {
        let signal = complex_ops::from_real(&half_step(n).unwrap());
        StubOracle {
            forward: step_spectrum(n, n / 2).unwrap(),
            inverse: signal,
        }
    }

    #[test]
    fn test_empty_signal_rejected() {
        let mut harness = ComparisonHarness::new();
        assert!(matches!(
            harness.compare(&[]),
            Err(DftError::InvalidArgument(_))
        ));
    }

    #[test]
    fn test_matrix_size_mismatch() {
        let matrix = TransformMatrix::new(8).unwrap();
        let mut harness = ComparisonHarness::new().with_matrix(matrix);
        let signal = vec![Complex::new(1.0, 0.0); 6];
        assert_eq!(
            harness.compare(&signal),
            Err(DftError::DimensionMismatch { expected: 8, actual: 6 })
        );
    }

    #[test]
    fn test_prebuilt_matrix_is_used() {
        let matrix = TransformMatrix::new(3).unwrap();
        let mut harness = ComparisonHarness::new().with_matrix(matrix);
        let cmp = harness.compare_real(&[5.0, 7.0, 9.0]).unwrap();
        for e in &cmp.direct.error {
            assert!(e.norm() < 1e-10);
        }
    }

    #[test]
    fn test_oracle_wrong_length_rejected() {
        let stub = StubOracle {
            forward: vec![Complex::new(0.0, 0.0); 3],
            inverse: vec![Complex::new(0.0, 0.0); 4],
        };
        let mut harness = ComparisonHarness::with_oracle(stub);
        let signal = vec![Complex::new(1.0, 0.0); 4];
        assert_eq!(
            harness.compare(&signal),
            Err(DftError::DimensionMismatch { expected: 4, actual: 3 })
        );
    }

    #[test]
    fn test_oracle_error_propagates() {
        struct Failing;
        impl FftOracle for Failing {
            fn forward(&mut self, _: &[Complex]) -> DftResult<ComplexBuffer> {
                Err(DftError::InvalidArgument("boom".into()))
            }
            fn inverse(&mut self, _: &[Complex]) -> DftResult<ComplexBuffer> {
                unreachable!()
            }
        }
        let mut harness = ComparisonHarness::with_oracle(Failing);
        assert_eq!(
            harness.compare_real(&[1.0, 2.0]),
            Err(DftError::InvalidArgument("boom".into()))
        );
    }

    #[test]
    fn test_stub_oracle_outputs_exposed() {
        let n = 16;
        let mut harness = ComparisonHarness::with_oracle(exact_step_oracle(n));
        let cmp = harness.compare_real(&half_step(n).unwrap()).unwrap();

        assert_eq!(cmp.oracle, "stub");
        assert_eq!(cmp.len(), n);
        assert_eq!(cmp.fft.error_stats().max_abs, 0.0);
        assert!(cmp.error_ratio() >= 1.0);

        // Exact zeros in the stub give zero phase at even bins
        for k in (2..n).step_by(2) {
            assert_eq!(cmp.fft.magnitude[k], 0.0);
            assert_eq!(cmp.fft.phase[k], 0.0);
        }
        assert_abs_diff_eq!(cmp.fft.magnitude[0], 8.0);
        assert_eq!(cmp.path(Method::Fft), &cmp.fft);
    }

    #[test]
    fn test_direct_matches_fft_spectrum() {
        let signal = crate::signals::complex_gaussian_noise(24, 1.0, 11).unwrap();
        let mut harness = ComparisonHarness::new();
        let cmp = harness.compare(&signal).unwrap();
        for d in cmp.spectrum_difference() {
            assert!(d < 1e-10);
        }
    }

    #[test]
    fn test_phase_tolerance_applied() {
        let n = 32;
        let signal = half_step(n).unwrap();
        let mut harness = ComparisonHarness::new().with_phase_tolerance(PhaseTolerance::Absolute(1e-9));
        let cmp = harness.compare_real(&signal).unwrap();
        for k in (2..n).step_by(2) {
            assert_eq!(cmp.direct.phase[k], 0.0);
            assert_eq!(cmp.fft.phase[k], 0.0);
        }
        assert_eq!(harness.config().phase_tolerance, PhaseTolerance::Absolute(1e-9));
    }

    #[test]
    fn test_phase_deviation_wraps() {
        let n = 4;
        let mut harness = ComparisonHarness::new();
        let cmp = harness.compare_real(&[1.0, 0.0, 0.0, 0.0]).unwrap();
        let dev = cmp.fft.phase_deviation(&[2.0 * std::f64::consts::PI; 4]).unwrap();
        for d in dev {
            assert_abs_diff_eq!(d, 0.0, epsilon = 1e-12);
        }
        assert!(cmp.fft.phase_deviation(&[0.0; 3]).is_err());
        assert_eq!(cmp.direct.error_magnitude().len(), n);
    }
}
