//! Direct DFT Transform Matrix
//!
//! Builds the N×N change-of-basis matrix of the Discrete Fourier Transform
//! and applies it (and its conjugate transpose) by plain matrix-vector
//! products.
//!
//! ## The Matrix
//!
//! ```text
//!              k →
//!        ┌                                        ┐
//!   n    │ 1      1          1        ...  1      │
//!   ↓    │ 1      ω          ω²       ...  ω^(N-1)│      ω = exp(-j·2π/N)
//!        │ 1      ω²         ω⁴       ...         │
//!        │ ...                                    │      W[n][k] = ω^(n·k)
//!        │ 1      ω^(N-1)    ...      ...         │
//!        └                                        ┘
//! ```
//!
//! `W · Wᴴ = N · I`, so the inverse transform is `(1/N) · Wᴴ`.
//!
//! ## Cost
//!
//! Both construction and application are O(N²) in time and memory. The
//! exponent is formed from the raw product `n·k` (never reduced modulo N), so
//! large arguments reach `sin`/`cos` and rounding error grows with N. This is
//! the behavior being measured against the FFT; keep it that way.

use std::f64::consts::PI;

use crate::types::{Complex, ComplexBuffer, DftError, DftResult};

/// Sizes above this log a warning before allocating N² entries.
pub const LARGE_MATRIX_WARN: usize = 4096;

/// The N×N direct DFT matrix, stored row-major.
#[derive(Debug, Clone, PartialEq)]
pub struct TransformMatrix {
    size: usize,
    entries: Vec<Complex>,
}

impl TransformMatrix {
    /// Build the matrix `W[n][k] = exp(-j·2π·n·k/N)`.
    ///
    /// Fails with [`DftError::InvalidArgument`] when `size == 0`.
    pub fn new(size: usize) -> DftResult<Self> {
        if size == 0 {
            return Err(DftError::InvalidArgument(
                "transform size must be at least 1".to_string(),
            ));
        }
        if size > LARGE_MATRIX_WARN {
            tracing::warn!(
                size,
                entries = size * size,
                "building a very large direct transform matrix"
            );
        }

        // Outer product of the index vector with itself: every n·k pair.
        let indices: Vec<f64> = (0..size).map(|i| i as f64).collect();
        let n_f = size as f64;
        let entries: Vec<Complex> = indices
            .iter()
            .flat_map(|&n| {
                indices.iter().map(move |&k| {
                    let phase = -2.0 * PI * (n * k) / n_f;
                    Complex::new(phase.cos(), phase.sin())
                })
            })
            .collect();

        tracing::debug!(size, "built direct transform matrix");
        Ok(Self { size, entries })
    }

    /// Matrix dimension N
    pub fn size(&self) -> usize {
        self.size
    }

    /// Entry `W[n][k]`, or `None` when out of range
    pub fn get(&self, n: usize, k: usize) -> Option<Complex> {
        if n < self.size && k < self.size {
            Some(self.entries[n * self.size + k])
        } else {
            None
        }
    }

    /// Row `n` of the matrix
    pub fn row(&self, n: usize) -> Option<&[Complex]> {
        if n < self.size {
            Some(&self.entries[n * self.size..(n + 1) * self.size])
        } else {
            None
        }
    }

    /// All entries, row-major
    pub fn entries(&self) -> &[Complex] {
        &self.entries
    }

    /// Copy out as a vector of rows (for rendering)
    pub fn to_rows(&self) -> Vec<ComplexBuffer> {
        self.entries.chunks(self.size).map(|r| r.to_vec()).collect()
    }

    /// `Wᴴ`, row-major
    pub fn conjugate_transpose(&self) -> Vec<Complex> {
        let n = self.size;
        let mut out = vec![Complex::new(0.0, 0.0); n * n];
        for row in 0..n {
            for col in 0..n {
                out[col * n + row] = self.entries[row * n + col].conj();
            }
        }
        out
    }

    /// Direct forward transform `X = W · x`.
    pub fn forward(&self, signal: &[Complex]) -> DftResult<ComplexBuffer> {
        DftError::check_len(self.size, signal.len())?;

        let spectrum = self
            .entries
            .chunks(self.size)
            .map(|row| {
                row.iter()
                    .zip(signal.iter())
                    .fold(Complex::new(0.0, 0.0), |acc, (w, x)| acc + w * x)
            })
            .collect();
        Ok(spectrum)
    }

    /// Direct inverse transform `x = (1/N) · Wᴴ · X`.
    pub fn inverse(&self, spectrum: &[Complex]) -> DftResult<ComplexBuffer> {
        DftError::check_len(self.size, spectrum.len())?;

        let n = self.size;
        let scale = 1.0 / n as f64;
        let signal = (0..n)
            .map(|row| {
                // Row `row` of Wᴴ is the conjugate of column `row` of W.
                let sum = (0..n).fold(Complex::new(0.0, 0.0), |acc, k| {
                    acc + self.entries[k * n + row].conj() * spectrum[k]
                });
                sum * scale
            })
            .collect();
        Ok(signal)
    }

    /// Largest elementwise deviation of `W · Wᴴ / N` from the identity.
    ///
    /// O(N³); intended for diagnostics on small sizes.
    pub fn unitarity_error(&self) -> f64 {
        let n = self.size;
        let scale = 1.0 / n as f64;
        let mut worst = 0.0_f64;
        for i in 0..n {
            for j in 0..n {
                let dot = (0..n).fold(Complex::new(0.0, 0.0), |acc, k| {
                    acc + self.entries[i * n + k] * self.entries[j * n + k].conj()
                });
                let expected = if i == j { 1.0 } else { 0.0 };
                let dev = (dot * scale - Complex::new(expected, 0.0)).norm();
                worst = worst.max(dev);
            }
        }
        worst
    }
}
