//! Config-driven comparison runs
//!
//! Glue between [`ExperimentConfig`] and the harness: generate the configured
//! signal, compare both paths, flatten into a report.

use crate::config::ExperimentConfig;
use crate::harness::{Comparison, ComparisonHarness};
use crate::report::ComparisonReport;
use crate::types::DftResult;

/// Generate the configured signal and compare it with the `rustfft` oracle.
pub fn compare(config: &ExperimentConfig) -> DftResult<Comparison> {
    let signal = config.signal.generate(&config.signal_params())?;
    tracing::debug!(signal = %config.signal, size = config.size, "generated signal");

    let mut harness = ComparisonHarness::new().with_config(config.harness_config());
    harness.compare_real(&signal)
}

/// [`compare`] then flatten into a labeled report.
pub fn run(config: &ExperimentConfig) -> DftResult<ComparisonReport> {
    let comparison = compare(config)?;
    let label = format!("{}-{}", config.signal, config.size);
    Ok(ComparisonReport::from_comparison(&comparison).with_label(label))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::signals::SignalKind;
    use crate::types::DftError;

    #[test]
    fn test_run_default_experiment() {
        let report = run(&ExperimentConfig::default()).unwrap();
        assert_eq!(report.size, 128);
        assert_eq!(report.label.as_deref(), Some("step-128"));
    }

    #[test]
    fn test_run_tone() {
        let config = ExperimentConfig {
            size: 32,
            signal: SignalKind::Tone,
            tone_bin: 4,
            ..Default::default()
        };
        let cmp = compare(&config).unwrap();
        // cos splits evenly between bins 4 and N-4
        assert!((cmp.fft.magnitude[4] - 16.0).abs() < 1e-9);
        assert!((cmp.fft.magnitude[28] - 16.0).abs() < 1e-9);
    }

    #[test]
    fn test_zero_size_fails() {
        let config = ExperimentConfig {
            size: 0,
            ..Default::default()
        };
        assert!(matches!(run(&config), Err(DftError::InvalidArgument(_))));
    }
}
