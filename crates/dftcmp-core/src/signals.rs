//! Test signals and closed-form spectra
//!
//! Deterministic inputs for exercising the transforms. The step signal is the
//! canonical one: its spectrum is known in closed form, and half of its bins
//! are exactly zero, which is where the direct method's phase falls apart.
//!
//! ## Step spectrum
//!
//! For `x[n] = 1` when `n < M` and 0 otherwise, the DFT is a geometric sum:
//!
//! ```text
//!   X[0] = M
//!   X[k] = (1 - ω^(M·k)) / (1 - ω^k),   ω = exp(-j·2π/N)
//! ```
//!
//! With `M = N/2` every nonzero even bin vanishes, and the odd bins are
//!
//! ```text
//!   |X[k]| = 1 / sin(π·k/N)
//!   ∠X[k]  = -π/2 + π·k/N
//! ```

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use rand_distr::{Distribution, Normal};
use serde::{Deserialize, Serialize};
use std::f64::consts::PI;

use crate::types::{Complex, ComplexBuffer, DftError, DftResult, Sample};

/// Selects a generated input signal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SignalKind {
    /// Ones for the first half, zeros for the second
    Step,
    /// Single unit sample at index 0
    Impulse,
    /// Cosine at an integer bin
    Tone,
    /// Linear ramp from 0 to 1
    Ramp,
    /// Seeded uniform noise in [-1, 1)
    Noise,
}

impl Default for SignalKind {
    fn default() -> Self {
        SignalKind::Step
    }
}

impl std::fmt::Display for SignalKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            SignalKind::Step => write!(f, "step"),
            SignalKind::Impulse => write!(f, "impulse"),
            SignalKind::Tone => write!(f, "tone"),
            SignalKind::Ramp => write!(f, "ramp"),
            SignalKind::Noise => write!(f, "noise"),
        }
    }
}

/// Parameters for [`SignalKind::generate`].
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SignalParams {
    pub len: usize,
    pub tone_bin: usize,
    pub seed: u64,
}

impl SignalKind {
    /// Generate the real-valued signal for this kind.
    pub fn generate(&self, params: &SignalParams) -> DftResult<Vec<Sample>> {
        let len = params.len;
        match self {
            SignalKind::Step => half_step(len),
            SignalKind::Impulse => impulse(len, 0),
            SignalKind::Tone => tone(len, params.tone_bin),
            SignalKind::Ramp => ramp(len),
            SignalKind::Noise => uniform_noise(len, params.seed),
        }
    }
}

fn require_len(len: usize) -> DftResult<()> {
    if len == 0 {
        Err(DftError::InvalidArgument("signal length must be at least 1".to_string()))
    } else {
        Ok(())
    }
}

/// `ones` leading ones followed by zeros.
pub fn step(len: usize, ones: usize) -> DftResult<Vec<Sample>> {
    require_len(len)?;
    if ones > len {
        return Err(DftError::InvalidArgument(format!(
            "step width {} exceeds length {}",
            ones, len
        )));
    }
    Ok((0..len).map(|i| if i < ones { 1.0 } else { 0.0 }).collect())
}

/// Step with the first `len / 2` samples set.
pub fn half_step(len: usize) -> DftResult<Vec<Sample>> {
    step(len, len / 2)
}

/// Unit impulse at `position`.
pub fn impulse(len: usize, position: usize) -> DftResult<Vec<Sample>> {
    require_len(len)?;
    if position >= len {
        return Err(DftError::InvalidArgument(format!(
            "impulse position {} out of range for length {}",
            position, len
        )));
    }
    let mut x = vec![0.0; len];
    x[position] = 1.0;
    Ok(x)
}

/// `cos(2π·bin·n/len)`
pub fn tone(len: usize, bin: usize) -> DftResult<Vec<Sample>> {
    require_len(len)?;
    Ok((0..len)
        .map(|i| (2.0 * PI * (bin * i) as f64 / len as f64).cos())
        .collect())
}

/// Complex exponential `exp(j·2π·bin·n/len)`.
pub fn complex_tone(len: usize, bin: usize) -> DftResult<ComplexBuffer> {
    require_len(len)?;
    Ok((0..len)
        .map(|i| {
            let phase = 2.0 * PI * ((bin * i) % len) as f64 / len as f64;
            Complex::new(phase.cos(), phase.sin())
        })
        .collect())
}

/// Linear ramp from 0 to 1 inclusive.
pub fn ramp(len: usize) -> DftResult<Vec<Sample>> {
    require_len(len)?;
    if len == 1 {
        return Ok(vec![0.0]);
    }
    let last = (len - 1) as f64;
    Ok((0..len).map(|i| i as f64 / last).collect())
}

/// Seeded uniform noise in [-1, 1).
pub fn uniform_noise(len: usize, seed: u64) -> DftResult<Vec<Sample>> {
    require_len(len)?;
    let mut rng = StdRng::seed_from_u64(seed);
    Ok((0..len).map(|_| rng.gen_range(-1.0..1.0)).collect())
}

/// Seeded complex Gaussian noise with per-component standard deviation `sigma`.
pub fn complex_gaussian_noise(len: usize, sigma: f64, seed: u64) -> DftResult<ComplexBuffer> {
    require_len(len)?;
    if !(sigma.is_finite() && sigma >= 0.0) {
        return Err(DftError::InvalidArgument(format!(
            "noise sigma must be finite and non-negative, got {}",
            sigma
        )));
    }
    let normal = Normal::new(0.0, sigma)
        .map_err(|e| DftError::InvalidArgument(format!("noise sigma {}: {}", sigma, e)))?;
    let mut rng = StdRng::seed_from_u64(seed);
    Ok((0..len)
        .map(|_| Complex::new(normal.sample(&mut rng), normal.sample(&mut rng)))
        .collect())
}

/// Closed-form DFT of [`step`]`(len, ones)`.
///
/// Bins where `ones·k ≡ 0 (mod len)` for `k ≠ 0` are returned as exact zeros.
pub fn step_spectrum(len: usize, ones: usize) -> DftResult<ComplexBuffer> {
    require_len(len)?;
    if ones > len {
        return Err(DftError::InvalidArgument(format!(
            "step width {} exceeds length {}",
            ones, len
        )));
    }
    let unit = |m: usize| {
        let phase = -2.0 * PI * (m % len) as f64 / len as f64;
        Complex::new(phase.cos(), phase.sin())
    };
    let one = Complex::new(1.0, 0.0);

    Ok((0..len)
        .map(|k| {
            if k == 0 {
                Complex::new(ones as f64, 0.0)
            } else if (ones * k) % len == 0 {
                Complex::new(0.0, 0.0)
            } else {
                (one - unit(ones * k)) / (one - unit(k))
            }
        })
        .collect())
}

/// Closed-form phase of the half-step spectrum at odd bin `k`.
pub fn half_step_odd_phase(len: usize, k: usize) -> f64 {
    -PI / 2.0 + PI * k as f64 / len as f64
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_abs_diff_eq;

    #[test]
    fn test_step_shape() {
        let x = half_step(128).unwrap();
        assert_eq!(x.len(), 128);
        assert!(x[..64].iter().all(|&v| v == 1.0));
        assert!(x[64..].iter().all(|&v| v == 0.0));
        assert!(step(4, 5).is_err());
        assert!(matches!(half_step(0), Err(DftError::InvalidArgument(_))));
    }

    #[test]
    fn test_impulse_and_ramp() {
        assert_eq!(impulse(4, 2).unwrap(), vec![0.0, 0.0, 1.0, 0.0]);
        assert!(impulse(4, 4).is_err());
        assert_eq!(ramp(3).unwrap(), vec![0.0, 0.5, 1.0]);
        assert_eq!(ramp(1).unwrap(), vec![0.0]);
    }

    #[test]
    fn test_noise_is_seeded() {
        let a = uniform_noise(32, 7).unwrap();
        let b = uniform_noise(32, 7).unwrap();
        let c = uniform_noise(32, 8).unwrap();
        assert_eq!(a, b);
        assert_ne!(a, c);
        assert!(a.iter().all(|&v| (-1.0..1.0).contains(&v)));

        let g = complex_gaussian_noise(16, 0.5, 3).unwrap();
        assert_eq!(g, complex_gaussian_noise(16, 0.5, 3).unwrap());
        assert!(matches!(
            complex_gaussian_noise(16, -1.0, 3),
            Err(DftError::InvalidArgument(_))
        ));
        assert!(complex_gaussian_noise(16, f64::NAN, 3).is_err());
        assert!(complex_gaussian_noise(16, f64::INFINITY, 3).is_err());
    }

    #[test]
    fn test_step_spectrum_closed_form() {
        let n = 128;
        let spectrum = step_spectrum(n, n / 2).unwrap();
        assert_abs_diff_eq!(spectrum[0].re, 64.0);
        for k in 1..n {
            if k % 2 == 0 {
                assert_eq!(spectrum[k], Complex::new(0.0, 0.0));
            } else {
                let expected_mag = 1.0 / (PI * k as f64 / n as f64).sin();
                assert_abs_diff_eq!(spectrum[k].norm(), expected_mag, epsilon = 1e-9);
                assert_abs_diff_eq!(spectrum[k].arg(), half_step_odd_phase(n, k), epsilon = 1e-9);
            }
        }
    }

    #[test]
    fn test_step_spectrum_matches_direct_sum() {
        let (n, m) = (12, 5);
        let spectrum = step_spectrum(n, m).unwrap();
        for k in 0..n {
            let direct = (0..m).fold(Complex::new(0.0, 0.0), |acc, i| {
                let phase = -2.0 * PI * ((i * k) % n) as f64 / n as f64;
                acc + Complex::new(phase.cos(), phase.sin())
            });
            assert!((direct - spectrum[k]).norm() < 1e-12);
        }
    }

    #[test]
    fn test_generate_dispatch() {
        let params = SignalParams { len: 8, tone_bin: 2, seed: 1 };
        assert_eq!(SignalKind::Step.generate(&params).unwrap(), half_step(8).unwrap());
        assert_eq!(SignalKind::Tone.generate(&params).unwrap(), tone(8, 2).unwrap());
        assert_eq!(SignalKind::Noise.generate(&params).unwrap(), uniform_noise(8, 1).unwrap());
        assert_eq!(SignalKind::Impulse.to_string(), "impulse");
    }

    #[test]
    fn test_complex_tone_unit_magnitude() {
        for c in complex_tone(16, 3).unwrap() {
            assert_abs_diff_eq!(c.norm(), 1.0, epsilon = 1e-12);
        }
    }
}
