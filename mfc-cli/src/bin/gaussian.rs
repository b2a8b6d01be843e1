//! Synthetic gaussian-clusters benchmark. Sweeps cluster count from 8 to 300
//! in normal mode, dividing a fixed point budget across clusters at each
//! step, across a fixed dimension count.

use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mfc_core::{DatasetGenerator, FloatVec, TestHarness, euclidean_distance};
use mfc_providers_vectors::gaussian_points;

use mfc_cli::logging;
use mfc_cli::trial::{
    DEFAULT_CLUSTER_COUNTS, GaussianArgs, cluster_test_counts, fixed_cluster_evaluators,
    harness_error_exit_code, random_seed, run_gaussian_cluster_test, run_gaussian_sweep,
};

/// Dimension counts this binary can run, matching the reference driver's
/// compiled-in dispatch table.
const SUPPORTED_DIMS: [usize; 9] = [2, 4, 8, 16, 32, 64, 128, 256, 512];

/// Arguments: `<dim_count> <out> <all_out> [cluster_test]`.
#[derive(Parser)]
#[command(name = "gaussian", about = "Synthetic gaussian-clusters benchmark")]
struct Args {
    /// Number of dimensions per point. Must be one of the compiled-in
    /// dispatch values.
    dim_count: usize,
    /// Output path for the aggregated summary CSV.
    summary: PathBuf,
    /// Output path for the per-replicate CSV.
    all_trials: PathBuf,
    /// When present and equal to `cluster_test`, sweeps cluster counts
    /// `[2, 150)` at a fixed dataset shape instead of sweeping `num_gauss`.
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

    if !SUPPORTED_DIMS.contains(&args.dim_count) {
        tracing::error!(
            dim_count = args.dim_count,
            supported = ?SUPPORTED_DIMS,
            "unsupported dimension count"
        );
        return ExitCode::from(1);
    }

    macro_rules! dispatch {
        ($($dim:literal),+) => {
            match args.dim_count {
                $($dim => run::<$dim>(&args),)+
                _ => unreachable!("checked against SUPPORTED_DIMS above"),
            }
        };
    }
    dispatch!(2, 4, 8, 16, 32, 64, 128, 256, 512)
}

fn run<const D: usize>(args: &Args) -> ExitCode {
    let cluster_test = args.cluster_test.as_deref() == Some("cluster_test");
    let counts = if cluster_test {
        cluster_test_counts()
    } else {
        DEFAULT_CLUSTER_COUNTS.to_vec()
    };
    let evaluators =
        fixed_cluster_evaluators::<FloatVec<D>, GaussianArgs>(&counts, euclidean_distance);

    let generator: DatasetGenerator<FloatVec<D>, GaussianArgs> = Box::new(|rng, trial_args| {
        Ok(gaussian_points::<D>(
            rng,
            trial_args.num_gauss,
            trial_args.points_per_gauss,
        ))
    });

    let mut harness: TestHarness<FloatVec<D>, GaussianArgs> = match TestHarness::new(
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
        run_gaussian_cluster_test(&mut harness)
    } else {
        run_gaussian_sweep(&mut harness)
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => harness_error_exit_code(&err),
    }
}
