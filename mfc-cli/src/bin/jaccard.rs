//! Jaccard distance benchmark over line-delimited sets of comma-separated
//! integers. Runs a single trial at `N = dataset.len()` in normal mode.

use std::collections::BTreeSet;
use std::path::PathBuf;
use std::process::ExitCode;

use clap::Parser;
use mfc_core::{DatasetGenerator, TestHarness, random_subset};
use mfc_providers_sets::{jaccard_distance, load_sets};

use mfc_cli::logging;
use mfc_cli::trial::{
    DEFAULT_CLUSTER_COUNTS, NArgs, cluster_test_counts, fixed_cluster_evaluators,
    harness_error_exit_code, random_seed, run_cluster_test,
};

/// Arguments: `<sets file> <out> <all_out> [edge_size_filter] [cluster_test]`.
///
/// `edge_size_filter` is only honoured when exactly four positional
/// arguments are given; supplying both it and `cluster_test` drops the
/// filter, matching the reference driver's argument-count dispatch.
#[derive(Parser)]
#[command(name = "jaccard", about = "Jaccard distance benchmark")]
struct Args {
    /// Path to a file of comma-separated integer sets, one per line.
    sets_file: PathBuf,
    /// Output path for the aggregated summary CSV.
    summary: PathBuf,
    /// Output path for the per-replicate CSV.
    all_trials: PathBuf,
    /// Either a minimum set size filter, or (if a sixth argument follows)
    /// an unused legacy slot.
    edge_size_filter: Option<String>,
    /// When present and equal to `cluster_test`, sweeps cluster counts
    /// `[2, 150)` at a fixed `N` instead of running the single trial.
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
    let edge_size_filter = if args.cluster_test.is_none() {
        args.edge_size_filter.as_deref().and_then(|raw| raw.parse::<usize>().ok())
    } else {
        None
    };

    let dataset = match load_sets(&args.sets_file, edge_size_filter) {
        Ok(dataset) => dataset,
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
    let evaluators = fixed_cluster_evaluators::<BTreeSet<usize>, NArgs>(&counts, jaccard_distance);

    let n = dataset.len();
    let generator: DatasetGenerator<BTreeSet<usize>, NArgs> = {
        let dataset = dataset.clone();
        Box::new(move |rng, trial_args: &NArgs| Ok(random_subset(dataset.clone(), trial_args.n, rng)))
    };

    let mut harness: TestHarness<BTreeSet<usize>, NArgs> = match TestHarness::new(
        &args.summary,
        &args.all_trials,
        random_seed(),
        true,
        jaccard_distance,
        generator,
        evaluators,
    ) {
        Ok(harness) => harness,
        Err(err) => return harness_error_exit_code(&err),
    };

    let result = if cluster_test {
        run_cluster_test(&mut harness, |n| NArgs { n })
    } else {
        harness.run_test(mfc_cli::trial::NORMAL_REPEATS, &NArgs { n })
    };

    match result {
        Ok(()) => ExitCode::SUCCESS,
        Err(err) => harness_error_exit_code(&err),
    }
}
