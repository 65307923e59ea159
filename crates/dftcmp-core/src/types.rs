//! Core types for the DFT precision comparison
//!
//! Every sequence in this crate (signals, spectra, reconstructions) is a
//! buffer of double-precision complex values. Real-valued signals are lifted
//! into the complex plane with a zero imaginary part before they reach a
//! transform.
//!
//! ```text
//!            Im
//!            ^
//!            |     * X[k]
//!            |    /
//!            |   / magnitude = |X[k]|
//!            |  /  phase = atan2(Im, Re)
//!            | /
//!   ---------+---------> Re
//!            |
//! ```

use num_complex::Complex64;
use std::f64::consts::PI;

/// Type alias for complex numbers using f64 precision
pub type Complex = Complex64;

/// A real-valued sample
pub type Sample = f64;

/// A time-domain or frequency-domain buffer
pub type ComplexBuffer = Vec<Complex>;

/// Result type for transform operations
pub type DftResult<T> = Result<T, DftError>;

/// Errors that can occur while building or applying transforms
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum DftError {
    #[error("Invalid argument: {0}")]
    InvalidArgument(String),

    #[error("Dimension mismatch: expected length {expected}, got {actual}")]
    DimensionMismatch { expected: usize, actual: usize },
}

impl DftError {
    /// Fail with `DimensionMismatch` unless `actual == expected`.
    pub fn check_len(expected: usize, actual: usize) -> DftResult<()> {
        if expected == actual {
            Ok(())
        } else {
            Err(DftError::DimensionMismatch { expected, actual })
        }
    }
}

/// Helper functions for working with complex samples
pub mod complex_ops {
    use super::*;

    /// Lift a real-valued signal into the complex plane.
    pub fn from_real(samples: &[Sample]) -> ComplexBuffer {
        samples.iter().map(|&x| Complex::new(x, 0.0)).collect()
    }

    /// Largest magnitude in a buffer (0 for an empty buffer).
    pub fn peak_magnitude(samples: &[Complex]) -> f64 {
        samples.iter().map(|c| c.norm()).fold(0.0_f64, f64::max)
    }

    /// Elementwise difference `a - b`.
    ///
    /// Both buffers must be the same length.
    pub fn difference(a: &[Complex], b: &[Complex]) -> DftResult<ComplexBuffer> {
        DftError::check_len(b.len(), a.len())?;
        Ok(a.iter().zip(b.iter()).map(|(x, y)| x - y).collect())
    }

    /// Wrap a phase into (-π, π].
    #[inline]
    pub fn wrap_phase(phase: f64) -> f64 {
        let mut p = phase % (2.0 * PI);
        if p <= -PI {
            p += 2.0 * PI;
        } else if p > PI {
            p -= 2.0 * PI;
        }
        p
    }

    /// Convert phase from radians to degrees
    #[inline]
    pub fn rad_to_deg(radians: f64) -> f64 {
        radians * 180.0 / PI
    }
}
