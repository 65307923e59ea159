//! FFT Oracle
//!
//! The comparison harness treats the FFT as a trusted external routine pair
//! (forward, inverse). This module defines that seam as the [`FftOracle`]
//! trait and provides [`RustFftOracle`], backed by `rustfft`.
//!
//! ```text
//!            ┌────────────────────┐
//!   x[n] ──► │ FftOracle::forward │ ──► X[k]        O(N log N)
//!            └────────────────────┘
//!            ┌────────────────────┐
//!   X[k] ──► │ FftOracle::inverse │ ──► x̂[n]        includes the 1/N scale
//!            └────────────────────┘
//! ```
//!
//! Both directions must return a sequence of the same length as their input;
//! the harness rejects anything else with `DimensionMismatch`.

use rustfft::{Fft, FftPlanner};
use std::collections::HashMap;
use std::fmt;
use std::sync::Arc;

use crate::types::{Complex, ComplexBuffer, DftError, DftResult};

/// A forward/inverse FFT pair over complex sequences.
///
/// `inverse(forward(x))` should reproduce `x`; implementations apply the
/// 1/N normalization in `inverse`.
pub trait FftOracle {
    /// Forward transform (negative exponent convention).
    fn forward(&mut self, time: &[Complex]) -> DftResult<ComplexBuffer>;

    /// Normalized inverse transform.
    fn inverse(&mut self, freq: &[Complex]) -> DftResult<ComplexBuffer>;

    /// Short label used in logs and reports
    fn name(&self) -> &str {
        "fft"
    }
}

struct Plan {
    forward: Arc<dyn Fft<f64>>,
    inverse: Arc<dyn Fft<f64>>,
}

/// `rustfft`-backed oracle. Plans are cached per length.
pub struct RustFftOracle {
    planner: FftPlanner<f64>,
    plans: HashMap<usize, Plan>,
    scratch: Vec<Complex>,
}

impl fmt::Debug for RustFftOracle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let mut sizes: Vec<_> = self.plans.keys().copied().collect();
        sizes.sort_unstable();
        f.debug_struct("RustFftOracle")
            .field("planned_sizes", &sizes)
            .finish()
    }
}

impl Default for RustFftOracle {
    fn default() -> Self {
        Self::new()
    }
}

impl RustFftOracle {
    pub fn new() -> Self {
        Self {
            planner: FftPlanner::new(),
            plans: HashMap::new(),
            scratch: Vec::new(),
        }
    }

    /// Lengths with a cached plan
    pub fn planned_sizes(&self) -> usize {
        self.plans.len()
    }

    fn plan(&mut self, size: usize) -> &Plan {
        let planner = &mut self.planner;
        self.plans.entry(size).or_insert_with(|| {
            tracing::debug!(size, "planning fft");
            Plan {
                forward: planner.plan_fft_forward(size),
                inverse: planner.plan_fft_inverse(size),
            }
        })
    }

    fn run(&mut self, input: &[Complex], inverse: bool) -> DftResult<ComplexBuffer> {
        if input.is_empty() {
            return Err(DftError::InvalidArgument(
                "fft input must not be empty".to_string(),
            ));
        }

        let size = input.len();
        let fft = {
            let plan = self.plan(size);
            if inverse {
                Arc::clone(&plan.inverse)
            } else {
                Arc::clone(&plan.forward)
            }
        };

        let scratch_len = fft.get_inplace_scratch_len();
        if self.scratch.len() < scratch_len {
            self.scratch.resize(scratch_len, Complex::new(0.0, 0.0));
        }

        let mut buffer = input.to_vec();
        fft.process_with_scratch(&mut buffer, &mut self.scratch[..scratch_len]);

        if inverse {
            // rustfft leaves the inverse unnormalized
            let scale = 1.0 / size as f64;
            for sample in buffer.iter_mut() {
                *sample *= scale;
            }
        }
        Ok(buffer)
    }
}

impl FftOracle for RustFftOracle {
    fn forward(&mut self, time: &[Complex]) -> DftResult<ComplexBuffer> {
        self.run(time, false)
    }

    fn inverse(&mut self, freq: &[Complex]) -> DftResult<ComplexBuffer> {
        self.run(freq, true)
    }

    fn name(&self) -> &str {
        "rustfft"
    }
}
