//! # Configuration
//!
//! YAML configuration for comparison runs.
//!
//! ## Search Path
//!
//! Loaded from the first file found:
//! 1. Path in the `DFTCMP_CONFIG` environment variable
//! 2. `./dftcmp.yaml`
//! 3. The user config directory (`~/.config/dftcmp/config.yaml` on Linux)
//! 4. `/etc/dftcmp/config.yaml`
//!
//! Defaults are used when none exists.
//!
//! ## Example
//!
//! ```yaml
//! experiment:
//!   size: 128
//!   signal: step
//!   phase_tolerance:
//!     mode: absolute
//!     value: 1.0e-9
//!
//! logging:
//!   level: debug
//!   format: pretty
//!
//! report:
//!   format: json
//!   path: step_128.json
//! ```

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::harness::HarnessConfig;
use crate::observe::LogConfig;
use crate::report::ReportFormat;
use crate::signals::{SignalKind, SignalParams};
use crate::spectrum::PhaseTolerance;

/// Environment variable naming an explicit config file
pub const CONFIG_ENV_VAR: &str = "DFTCMP_CONFIG";

/// Error type for configuration operations.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ConfigError {
    #[error("config not found: {0}")]
    NotFound(String),

    #[error("failed to read config: {0}")]
    ReadError(String),

    #[error("failed to parse config: {0}")]
    ParseError(String),

    #[error("invalid config: {0}")]
    ValidationError(String),
}

/// What to compare.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ExperimentConfig {
    /// Signal length N
    pub size: usize,
    pub signal: SignalKind,
    /// Bin for `signal: tone`
    pub tone_bin: usize,
    /// Seed for `signal: noise`
    pub noise_seed: u64,
    pub phase_tolerance: PhaseTolerance,
}

impl Default for ExperimentConfig {
    fn default() -> Self {
        Self {
            size: 128,
            signal: SignalKind::Step,
            tone_bin: 1,
            noise_seed: 0,
            phase_tolerance: PhaseTolerance::Exact,
        }
    }
}

impl ExperimentConfig {
    pub fn signal_params(&self) -> SignalParams {
        SignalParams {
            len: self.size,
            tone_bin: self.tone_bin,
            seed: self.noise_seed,
        }
    }

    pub fn harness_config(&self) -> HarnessConfig {
        HarnessConfig {
            phase_tolerance: self.phase_tolerance,
        }
    }
}

/// Where and how to write the report.
#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ReportConfig {
    pub format: ReportFormat,
    /// Output file (stdout when absent)
    pub path: Option<PathBuf>,
}

/// Top-level configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DftcmpConfig {
    pub version: String,
    pub experiment: ExperimentConfig,
    pub logging: LogConfig,
    pub report: ReportConfig,
}

impl Default for DftcmpConfig {
    fn default() -> Self {
        Self {
            version: "1.0".to_string(),
            experiment: ExperimentConfig::default(),
            logging: LogConfig::default(),
            report: ReportConfig::default(),
        }
    }
}

impl DftcmpConfig {
    /// Load from the default search path, or defaults if nothing is found.
    pub fn load() -> Result<Self, ConfigError> {
        if let Ok(path) = std::env::var(CONFIG_ENV_VAR) {
            let path = PathBuf::from(path);
            if !path.exists() {
                return Err(ConfigError::NotFound(format!(
                    "{} points to {}",
                    CONFIG_ENV_VAR,
                    path.display()
                )));
            }
            return Self::load_from(&path);
        }

        for path in Self::config_search_paths() {
            if path.exists() {
                return Self::load_from(&path);
            }
        }

        Ok(Self::default())
    }

    /// Load and validate a specific file.
    pub fn load_from(path: &Path) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))?;

        let config = Self::parse(&content)?;
        tracing::debug!(path = %path.display(), "loaded config");
        Ok(config)
    }

    /// Parse and validate a YAML string.
    pub fn parse(yaml: &str) -> Result<Self, ConfigError> {
        let config: Self =
            serde_yaml::from_str(yaml).map_err(|e| ConfigError::ParseError(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    pub fn save(&self, path: &Path) -> Result<(), ConfigError> {
        let content = self.to_yaml()?;
        std::fs::write(path, content)
            .map_err(|e| ConfigError::ReadError(format!("{}: {}", path.display(), e)))
    }

    pub fn to_yaml(&self) -> Result<String, ConfigError> {
        serde_yaml::to_string(self).map_err(|e| ConfigError::ParseError(e.to_string()))
    }

    pub fn config_search_paths() -> Vec<PathBuf> {
        let mut paths = vec![PathBuf::from("./dftcmp.yaml")];

        if let Some(dirs) = directories::ProjectDirs::from("", "", "dftcmp") {
            paths.push(dirs.config_dir().join("config.yaml"));
        }

        paths.push(PathBuf::from("/etc/dftcmp/config.yaml"));
        paths
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        let exp = &self.experiment;
        if exp.size == 0 {
            return Err(ConfigError::ValidationError(
                "experiment.size must be > 0".to_string(),
            ));
        }

        match exp.phase_tolerance {
            PhaseTolerance::Exact => {}
            PhaseTolerance::Absolute(v) | PhaseTolerance::Relative(v) => {
                if !v.is_finite() || v < 0.0 {
                    return Err(ConfigError::ValidationError(format!(
                        "phase tolerance must be finite and non-negative, got {}",
                        v
                    )));
                }
            }
        }

        if exp.signal == SignalKind::Tone && exp.tone_bin >= exp.size {
            return Err(ConfigError::ValidationError(format!(
                "tone_bin {} must be below size {}",
                exp.tone_bin, exp.size
            )));
        }

        Ok(())
    }
}
