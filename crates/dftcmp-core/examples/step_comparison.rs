//! Step-signal comparison of the direct DFT and the FFT
//!
//! Loads `dftcmp.yaml` (or `$DFTCMP_CONFIG`, or defaults), runs the
//! configured experiment and prints a short table plus the full report.
//!
//! Run with: cargo run --example step_comparison -p dftcmp-core

use dftcmp_core::config::DftcmpConfig;
use dftcmp_core::experiment;
use dftcmp_core::observe::init_logging;
use dftcmp_core::report::ComparisonReport;
use std::process::ExitCode;

fn main() -> ExitCode {
    let config = match DftcmpConfig::load() {
        Ok(config) => config,
        Err(e) => {
            eprintln!("{}", e);
            return ExitCode::FAILURE;
        }
    };
    init_logging(&config.logging);

    let report = match experiment::run(&config.experiment) {
        Ok(report) => report,
        Err(e) => {
            tracing::error!(error = %e, "comparison failed");
            return ExitCode::FAILURE;
        }
    };

    print_table(&report);

    let rendered = match config.report.path {
        Some(ref path) => report.write_to(path, config.report.format),
        None => report.render(config.report.format).map(|s| println!("{}", s)),
    };
    if let Err(e) = rendered {
        tracing::error!(error = %e, "failed to emit report");
        return ExitCode::FAILURE;
    }
    ExitCode::SUCCESS
}

fn print_table(report: &ComparisonReport) {
    println!("=== Direct DFT vs FFT (N = {}) ===\n", report.size);
    println!(
        "{:>4} {:>14} {:>10} {:>14} {:>10}",
        "k", "|X| direct", "∠ direct", "|X| fft", "∠ fft"
    );
    println!("{}", "-".repeat(56));
    for row in report.bins.iter().take(12) {
        println!(
            "{:>4} {:>14.6e} {:>10.4} {:>14.6e} {:>10.4}",
            row.k, row.direct_magnitude, row.direct_phase, row.fft_magnitude, row.fft_phase
        );
    }

    let s = &report.summary;
    println!();
    println!("max reconstruction error  direct: {:e}", s.direct.max_abs);
    println!("max reconstruction error  fft:    {:e}", s.fft.max_abs);
    match s.error_ratio {
        Some(ratio) => println!("ratio (direct / fft):             {:.1}", ratio),
        None => println!("ratio (direct / fft):             inf (fft exact)"),
    }
    println!();
}
