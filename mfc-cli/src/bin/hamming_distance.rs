//! Hamming distance benchmark over a line-delimited, fixed-width string
//! corpus. Sweeps replicate size `N` from 500 to 30000 in steps of 100.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mfc_core::{DatasetGenerator, TestHarness, random_subset};
use mfc_providers_text::{hamming_distance, load_lines};

use mfc_cli::logging;
use mfc_cli::trial::{
    DEFAULT_CLUSTER_COUNTS, NArgs, cluster_test_counts, fixed_cluster_evaluators,
    harness_error_exit_code, random_seed, run_cluster_test, run_n_sweep,
};

const SWEEP_START: usize = 500;
const SWEEP_END: usize = 30_000;
const SWEEP_STEP: usize = 100;

/// Arguments: `<strings file> <out> <all_out> [cluster_test]`.
#[derive(Parser)]
#[command(name = "hamming_distance", about = "Hamming distance benchmark")]
struct Args {
    /// Path to a UTF-8 text file, one fixed-width string per line.
    strings_file: PathBuf,
    /// Output path for the aggregated summary CSV.
    summary: PathBuf,
    /// Output path for the per-replicate CSV.
    all_trials: PathBuf,
    /// When present and equal to `cluster_test`, sweeps cluster counts
    /// `[2, 150)` at a fixed `N` instead of sweeping `N`.
    cluster_test: Option<String>,
}

fn main() -> ExitCode {
    if let Err(err) = logging::init_logging() {
        logging::report_init_error(&err);
        return ExitCode::from(1);
    }

    let args = match Args::try_parse() {
        Ok(args) => args,
        Err(err) => {
            mfc_cli::report_usage_error(&err);
            return ExitCode::from(1);
        }
    };

    run(&args)
}

fn run(args: &Args) -> ExitCode {
    let dataset = match load_lines(&args.strings_file) {
        Ok(dataset) => dataset,
        Err(err) => {
            mfc_cli::report_provider_error(&err);
            return ExitCode::from(1);
        }
    };

    if let Err(width) = uniform_width(&dataset) {
        tracing::error!(expected_width = width, "corpus lines are not all the same length");
        return ExitCode::from(1);
    }

    let cluster_test = args.cluster_test.as_deref() == Some("cluster_test");
    let counts = if cluster_test {
        cluster_test_counts()
    } else {
        DEFAULT_CLUSTER_COUNTS.to_vec()
    };
    let dist = |a: &String, b: &String| hamming_distance(a, b).unwrap_or(f32::INFINITY);
    let evaluators = fixed_cluster_evaluators::<String, NArgs>(&counts, dist);

    let generator: DatasetGenerator<String, NArgs> = {
        let dataset = dataset.clone();
        Box::new(move |rng, trial_args: &NArgs| Ok(random_subset(dataset.clone(), trial_args.n, rng)))
    };

    let mut harness: TestHarness<String, NArgs> = match TestHarness::new(
        &args.summary,
        &args.all_trials,
        random_seed(),
        true,
        dist,
        generator,
        evaluators,
    ) {
        Ok(harness) => harness,
        Err(err) => return harness_error_exit_code(&err),
    };

    let result = if cluster_test {
        run_cluster_test(&mut harness, |n| NArgs { n })
    } else {
        run_n_sweep(&mut harness, SWEEP_START, SWEEP_END, SWEEP_STEP, |n| NArgs { n })
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => harness_error_exit_code(&err),
    }
}

/// Confirms every line in `dataset` has the same length, returning that
/// length as the `Err` value when a mismatch is found.
fn uniform_width(dataset: &[String]) -> Result<(), usize> {
    let Some(first) = dataset.first() else {
        return Ok(());
    };
    let width = first.chars().count();
    if dataset.iter().all(|line| line.chars().count() == width) {
        Ok(())
    } else {
        Err(width)
    }
}
