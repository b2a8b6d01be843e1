//! 784-dimensional Euclidean benchmark over an HDF5-backed vector dataset
//! (e.g. flattened MNIST images). Sweeps replicate size `N` from 500 to
//! 30000 in steps of 100.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mfc_core::{DatasetGenerator, FloatVec, TestHarness, euclidean_distance, read_dataset, random_subset};
use mfc_providers_vectors::vectors_from_dataset;

use mfc_cli::logging;
use mfc_cli::trial::{
    DEFAULT_CLUSTER_COUNTS, NArgs, cluster_test_counts, fixed_cluster_evaluators,
    harness_error_exit_code, random_seed, run_cluster_test, run_n_sweep,
};

const DIM: usize = 784;
const DATASET_NAME: &str = "train";
const SWEEP_START: usize = 500;
const SWEEP_END: usize = 30_000;
const SWEEP_STEP: usize = 100;

/// Arguments: `<hdf5 file> <out> <all_out> [cluster_test]`.
#[derive(Parser)]
#[command(name = "hdf5_euclidean", about = "784-dimensional Euclidean benchmark")]
struct Args {
    /// Path to an HDF5 file containing a `train` dataset of `784`-column
    /// `f32` rows.
    hdf5_file: PathBuf,
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
    let dataset = match read_dataset(&args.hdf5_file, DATASET_NAME) {
        Ok(dataset) => dataset,
        Err(err) => {
            mfc_cli::report_provider_error(&err);
            return ExitCode::from(1);
        }
    };

    let points: Vec<FloatVec<DIM>> = match vectors_from_dataset::<DIM>(&dataset) {
        Ok(points) => points,
        Err(err) => {
            mfc_cli::report_provider_error(&err);
            return ExitCode::from(1);
        }
    };

    let cluster_test = args.cluster_test.as_deref() == Some("cluster_test");
    let counts = if cluster_test {
        cluster_test_counts()
    } else {
        DEFAULT_CLUSTER_COUNTS.to_vec()
    };
    let evaluators = fixed_cluster_evaluators::<FloatVec<DIM>, NArgs>(&counts, euclidean_distance);

    let generator: DatasetGenerator<FloatVec<DIM>, NArgs> = {
        let points = points.clone();
        Box::new(move |rng, trial_args: &NArgs| Ok(random_subset(points.clone(), trial_args.n, rng)))
    };

    let mut harness: TestHarness<FloatVec<DIM>, NArgs> = match TestHarness::new(
        &args.summary,
        &args.all_trials,
        random_seed(),
        true,
        euclidean_distance,
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
