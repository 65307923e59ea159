//! # Direct DFT vs FFT Precision
//!
//! Computes the Discrete Fourier Transform two ways and exposes the
//! difference:
//!
//! - **Direct**: an explicit N×N matrix `W[n][k] = exp(-j·2π·n·k/N)` applied
//!   by matrix-vector product, O(N²)
//! - **FFT**: an injected oracle (`rustfft` by default), O(N log N)
//!
//! Both are exact in infinite precision. In floating point the direct method
//! accumulates visibly more rounding error, and where the true spectrum is
//! zero its phase is pure noise.
//!
//! ## Signal Flow
//!
//! ```text
//! x ─┬─► TransformMatrix::forward ─► X_direct ─► TransformMatrix::inverse ─► x̂_direct
//!    └─► FftOracle::forward       ─► X_fft    ─► FftOracle::inverse       ─► x̂_fft
//!
//!        magnitude / phase / (x̂ - x) per path ─► ComparisonReport (JSON/YAML)
//! ```
//!
//! ## Example
//!
//! ```rust
//! use dftcmp_core::prelude::*;
//!
//! let signal = signals::half_step(128).unwrap();
//! let mut harness = ComparisonHarness::new();
//! let cmp = harness.compare_real(&signal).unwrap();
//!
//! // Bin 2 is exactly zero in theory; only the FFT gets it (nearly) right
//! println!("direct |X[2]| = {:e}", cmp.direct.magnitude[2]);
//! println!("fft    |X[2]| = {:e}", cmp.fft.magnitude[2]);
//! ```

pub mod config;
pub mod experiment;
pub mod fft_utils;
pub mod harness;
pub mod observe;
pub mod report;
pub mod signals;
pub mod spectrum;
pub mod transform_matrix;
pub mod types;

pub use fft_utils::{FftOracle, RustFftOracle};
pub use harness::{Comparison, ComparisonHarness, HarnessConfig, Method, PathResult};
pub use report::{ComparisonReport, ErrorStats, ReportFormat};
pub use spectrum::{PhaseTolerance, Spectrum};
pub use transform_matrix::TransformMatrix;
pub use types::{Complex, DftError, DftResult};

/// Prelude for common imports
pub mod prelude {
    pub use crate::fft_utils::{FftOracle, RustFftOracle};
    pub use crate::harness::{Comparison, ComparisonHarness, Method};
    pub use crate::signals;
    pub use crate::spectrum::PhaseTolerance;
    pub use crate::transform_matrix::TransformMatrix;
    pub use crate::types::{Complex, DftError, DftResult};
}
