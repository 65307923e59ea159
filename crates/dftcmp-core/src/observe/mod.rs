//! # Observability
//!
//! Structured logging via `tracing`. Transform builds, oracle planning and
//! comparison summaries are emitted as events; call [`init_logging`] once at
//! startup to see them.
//!
//! ```rust,ignore
//! use dftcmp_core::observe::{init_logging, LogConfig};
//!
//! init_logging(&LogConfig::development());
//! tracing::info!(size = 128, "starting comparison");
//! ```

pub mod logging;

pub use logging::{init_logging, LogConfig, LogFormat, LogLevel};
